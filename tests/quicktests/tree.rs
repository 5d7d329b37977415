use treemap::{Traversal, Tree};

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeMap`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map. Inserting an
/// existing key keeps the old value so the map does the same.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut BTreeMap<K, V>)
where
    K: Ord + Clone,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let fresh = !map.contains_key(k);
                map.entry(k.clone()).or_insert_with(|| v.clone());
                assert_eq!(bst.insert(k.clone(), v.clone()), fresh);
            }
            Op::Remove(k) => {
                assert_eq!(bst.remove(k), map.remove(k));
            }
            Op::Clear => {
                bst.clear();
                map.clear();
            }
            Op::Inorder => {
                assert_eq!(inorder(bst), map.values().cloned().collect::<Vec<_>>());
            }
        }
        assert_eq!(bst.len(), map.len());
    }
}

fn inorder<K, V: Clone>(tree: &Tree<K, V>) -> Vec<V> {
    let mut values = Vec::new();
    tree.inorder(|v| values.push(v.clone()));
    values
}

fn count(tree: &Tree<i8, i8>, order: Traversal) -> usize {
    let mut visited = 0;
    tree.traverse(order, |_| visited += 1);
    visited
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
        let mut tree = Tree::new();
        let mut map = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut map);
        map.keys().all(|key| tree.find(key) == map.get(key))
            && inorder(&tree) == map.values().cloned().collect::<Vec<_>>()
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }

        let distinct: HashSet<_> = xs.iter().collect();
        tree.len() == distinct.len() && xs.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x) && tree.retrieve(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn first_value_wins(pairs: Vec<(i8, u16)>) -> bool {
        let tree: Tree<_, _> = pairs.iter().cloned().collect();

        pairs.iter().all(|(k, _)| {
            let first = pairs.iter().find(|(key, _)| key == k).map(|(_, v)| *v);
            tree.retrieve(k) == first
        })
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }
        for delete in &deletes {
            tree.remove(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        let remaining: HashSet<_> = still_present.iter().collect();
        deletes.iter().all(|x| !tree.contains(x))
            && still_present.iter().all(|x| tree.find(x) == Some(x))
            && tree.len() == remaining.len()
    }
}

quickcheck::quickcheck! {
    fn clones_are_independent(xs: Vec<i8>, ys: Vec<i8>) -> bool {
        let mut original: Tree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
        let copy = original.clone();
        let before = inorder(&copy);

        for y in &ys {
            original.insert(*y, *y);
        }
        for x in &xs {
            original.remove(x);
        }

        inorder(&copy) == before && xs.iter().all(|x| copy.retrieve(x) == Some(*x))
    }
}

quickcheck::quickcheck! {
    fn reversed_relation_sorts_descending(xs: Vec<i8>) -> bool {
        let tree = Tree::from_iter_with(xs.iter().map(|x| (*x, *x)), |a: &i8, b: &i8| a > b);

        let mut expected: Vec<_> = xs.iter().copied().collect::<HashSet<_>>().into_iter().collect();
        expected.sort_unstable_by(|a, b| b.cmp(a));

        inorder(&tree) == expected
            && tree.find_min().ok() == expected.first()
            && tree.find_max().ok() == expected.last()
    }
}

quickcheck::quickcheck! {
    fn every_traversal_visits_every_node(xs: Vec<i8>) -> bool {
        let tree: Tree<_, _> = xs.iter().map(|x| (*x, *x)).collect();

        [Traversal::Preorder, Traversal::Inorder, Traversal::Postorder]
            .into_iter()
            .all(|order| count(&tree, order) == tree.len())
    }
}
