use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Remove the K from the data structure
    Remove(K),
    /// Empty the data structure
    Clear,
    /// Compare inorder traversals
    Inorder,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Clearing is kept
    /// rare so trees get a chance to grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 16 {
            0 => Op::Clear,
            1..=2 => Op::Inorder,
            3..=8 => Op::Remove(K::arbitrary(g)),
            _ => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
        }
    }
}
