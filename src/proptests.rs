use super::*;

use proptest::prelude::*;
use std::collections::BTreeSet;

fn validate_trie(t: &Trie) {
    let root = t.arena.get(NodeId::ROOT);
    assert_eq!(root.depth(), 0, "root must have depth 0");
    assert_eq!(root.parent(), None, "root must have no parent");
    assert!(!root.is_key(), "root must never be a stored key");

    let mut stack = vec![(NodeId::ROOT, Vec::new())];
    let mut reachable = 0usize;
    let mut key_count = 0usize;
    while let Some((id, path)) = stack.pop() {
        reachable += 1;
        let node = t.arena.get(id);
        assert_eq!(node.depth(), path.len(), "depth must equal path length");
        assert_eq!(
            t.arena.reconstruct_key(id),
            path,
            "reconstructed key must spell the path"
        );
        if node.is_key() {
            key_count += 1;
        }

        for (c, child) in node.children() {
            let child_node = t.arena.get(child);
            assert_eq!(child_node.parent(), Some(id), "parent link mismatch");
            assert_eq!(child_node.edge(), c, "edge byte must match slot");
            assert_eq!(child_node.depth(), node.depth() + 1);
            let mut child_path = path.clone();
            child_path.push(c);
            stack.push((child, child_path));
        }
    }

    assert_eq!(reachable, t.node_count(), "every node must be reachable");
    assert_eq!(key_count, t.len(), "key flags must match Trie::len");
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // Small alphabet so that keys share prefixes often.
    prop::collection::vec(prop::sample::select(vec![0u8, b'a', b'b', b'c', 0xff]), 0..=12)
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>),
    Contains(Vec<u8>),
    LongestPrefix(Vec<u8>),
    Prefix(Vec<u8>),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        5 => key.clone().prop_map(Op::Insert),
        2 => key.clone().prop_map(Op::Contains),
        2 => key.clone().prop_map(Op::LongestPrefix),
        1 => key.prop_map(Op::Prefix),
    ];
    prop::collection::vec(op, 0..=300)
}

fn model_longest_prefix(m: &BTreeSet<Vec<u8>>, key: &[u8]) -> Vec<u8> {
    let best = m
        .iter()
        .map(|k| k.iter().zip(key).take_while(|(a, b)| a == b).count())
        .max()
        .unwrap_or(0);
    key[..best].to_vec()
}

fn model_with_prefix(m: &BTreeSet<Vec<u8>>, prefix: &[u8]) -> Vec<Vec<u8>> {
    m.iter().filter(|k| k.starts_with(prefix)).cloned().collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t = Trie::new();
        let mut m: BTreeSet<Vec<u8>> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let added_t = t.insert(&key);
                    let added_m = !key.is_empty() && m.insert(key);
                    prop_assert_eq!(added_t, added_m);
                }
                Op::Contains(key) => {
                    let expected = key.is_empty() || m.contains(&key);
                    prop_assert_eq!(t.contains(&key), expected);
                }
                Op::LongestPrefix(key) => {
                    let got = t.get_longest_prefix(&key);
                    prop_assert!(key.starts_with(&got));
                    prop_assert_eq!(got, model_longest_prefix(&m, &key));
                }
                Op::Prefix(prefix) => {
                    let expected = model_with_prefix(&m, &prefix);
                    prop_assert_eq!(t.get_all_with_prefix(&prefix), expected.clone());
                    prop_assert_eq!(t.keys_with_prefix(&prefix).collect::<Vec<_>>(), expected);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_trie(&t);
        let got: Vec<Vec<u8>> = t.iter().collect();
        let expected: Vec<Vec<u8>> = m.iter().cloned().collect();
        prop_assert_eq!(got, expected.clone());
        prop_assert_eq!(t.get_all_with_prefix(b""), expected);
    }

    #[test]
    fn prop_double_insert_is_idempotent(keys in prop::collection::vec(key_strategy(), 0..=50)) {
        let once: Trie = keys.iter().collect();
        let mut twice = once.clone();
        twice.load_keys(&keys);

        prop_assert_eq!(once.node_count(), twice.node_count());
        prop_assert_eq!(once.iter().collect::<Vec<_>>(), twice.iter().collect::<Vec<_>>());
        for key in &keys {
            prop_assert!(twice.contains(key));
        }
    }

    #[test]
    fn prop_rejected_insert_changes_nothing(
        keys in prop::collection::vec(key_strategy(), 0..=30),
        max_nodes in 1usize..=40,
    ) {
        let mut t = Trie::with_config(TrieConfig::new().with_max_nodes(max_nodes));
        for key in keys {
            let nodes = t.node_count();
            let len = t.len();
            match t.try_insert(&key) {
                Ok(_) => prop_assert!(t.contains(&key)),
                Err(TrieError::NodeLimit { needed, limit }) => {
                    prop_assert!(needed > limit);
                    prop_assert_eq!(t.node_count(), nodes);
                    prop_assert_eq!(t.len(), len);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
            prop_assert!(t.node_count() <= max_nodes);
        }
        validate_trie(&t);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"b".to_vec(),
        b"an".to_vec(),
        b"ant".to_vec(),
        b"anthem".to_vec(),
        b"ba".to_vec(),
    ];

    let reference: Trie = keys.iter().collect();
    let expected: Vec<Vec<u8>> = keys.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();

    for_each_permutation(&keys, |perm| {
        let mut t = Trie::new();
        t.load_keys(&perm);

        validate_trie(&t);
        assert_eq!(t.node_count(), reference.node_count());
        assert_eq!(t.iter().collect::<Vec<_>>(), expected);
        for k in &keys {
            assert!(t.contains(k));
        }
    });
}

#[test]
fn random_keys_against_model() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x7121e);
    let mut t = Trie::new();
    let mut m: BTreeSet<Vec<u8>> = BTreeSet::new();

    for _ in 0..2000 {
        let len = rng.gen_range(1..=8);
        let key: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'e')).collect();
        assert_eq!(t.insert(&key), m.insert(key));
    }

    validate_trie(&t);
    let prefixes: [&[u8]; 5] = [b"a", b"ab", b"abc", b"e", b"eee"];
    for prefix in prefixes {
        assert_eq!(t.get_all_with_prefix(prefix), model_with_prefix(&m, prefix));
    }
    assert_eq!(t.len(), m.len());
}
