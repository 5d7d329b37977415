//! An unbalanced Binary Search Tree ordered by a runtime [`Relation`].
//!
//! Each `Node` owns its two children through `Option<Box<_>>` links, so
//! removing or replacing a subtree is just moving a `Box` from one link to
//! another. Keys are unique: inserting a key the tree already holds keeps the
//! first value.
//!
//! # Examples
//!
//! ```
//! use treemap::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! assert!(tree.insert(1, "one"));
//! assert_eq!(tree.find(&1), Some(&"one"));
//!
//! // The first value for a key wins.
//! assert!(!tree.insert(1, "uno"));
//! assert_eq!(tree.find(&1), Some(&"one"));
//!
//! // Removing a node returns its value.
//! assert_eq!(tree.remove(&1), Some("one"));
//! assert_eq!(tree.find(&1), None);
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::{Error, Result};
use crate::relation::Relation;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A Binary Search Tree mapping unique keys to values. This can be used for
/// inserting, finding, removing, and traversing keys and values.
///
/// Keys that the tree's [`Relation`] says precede a node's key live in that
/// node's left subtree, the rest in its right subtree. Nothing rebalances the
/// tree so inserting keys in sorted order builds a chain.
pub struct Tree<K, V> {
    root: Link<K, V>,
    size: usize,
    relation: Relation<K>,
}

/// The order in which a traversal visits each node relative to its subtrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then node, then right subtree.
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
}

impl<K: Ord + 'static, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + 'static, V> Tree<K, V> {
    /// Generates a new, empty `Tree` ordered by `K`'s `Ord` implementation.
    pub fn new() -> Self {
        Self::with_relation_from(Relation::natural())
    }
}

impl<K: 'static, V> Tree<K, V> {
    /// Generates a new, empty `Tree` ordered by `precedes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::Tree;
    ///
    /// let mut tree = Tree::with_relation(|a: &u32, b: &u32| a > b);
    /// for k in [2, 3, 1] {
    ///     tree.insert(k, k * 10);
    /// }
    ///
    /// let mut values = Vec::new();
    /// tree.inorder(|v| values.push(*v));
    /// assert_eq!(values, [30, 20, 10]);
    /// ```
    pub fn with_relation<F>(precedes: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        Self::with_relation_from(Relation::new(precedes))
    }

    /// Builds a tree ordered by `precedes` from `pairs`, inserting them in
    /// order. When several pairs share a key only the first is kept.
    pub fn from_iter_with<I, F>(pairs: I, precedes: F) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        F: Fn(&K, &K) -> bool + 'static,
    {
        let mut tree = Self::with_relation(precedes);
        tree.extend(pairs);
        tree
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree` ordered by `relation`.
    pub fn with_relation_from(relation: Relation<K>) -> Self {
        Self {
            root: None,
            size: 0,
            relation,
        }
    }

    /// The relation this tree orders its keys by.
    pub fn relation(&self) -> &Relation<K> {
        &self.relation
    }

    /// The number of key/value pairs in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no pairs at all.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of nodes on the longest path from the root to a leaf. An
    /// empty tree has a height of 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Inserts `value` at `key` if the tree doesn't already contain `key`.
    /// Returns whether a new node was added. An existing value is never
    /// overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1, 2));
    /// assert!(!tree.insert(1, 3));
    /// assert_eq!(tree.find(&1), Some(&2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match self.relation.compare(&key, &node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => {
                    tracing::trace!(size = self.size, "insert skipped, key already present");
                    return false;
                }
            }
        }

        *link = Some(Node::new_boxed(key, value));
        self.size += 1;
        tracing::trace!(size = self.size, "inserted");
        true
    }

    /// Removes the node containing `key` and returns its value. If the tree
    /// does not contain `key`, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::Tree;
    ///
    /// let mut tree = Tree::from([(2, 'b'), (1, 'a'), (3, 'c')]);
    ///
    /// assert_eq!(tree.remove(&2), Some('b'));
    /// assert_eq!(tree.remove(&2), None);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        match Node::remove(&mut self.root, key, &self.relation) {
            Some((_, value)) => {
                self.size -= 1;
                tracing::trace!(size = self.size, "removed");
                Some(value)
            }
            None => {
                tracing::trace!(size = self.size, "remove skipped, key not found");
                None
            }
        }
    }

    /// Whether the tree holds a key equal to `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Potentially finds the value associated with `key`. If no node has the
    /// corresponding key, `None` is returned.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_node(key).map(|n| &n.value)
    }

    /// Like [`find`][Self::find] but hands back a copy of the value.
    pub fn retrieve(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.find(key).cloned()
    }

    /// The value stored with the key that precedes every other key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.find_min(), Err(Error::EmptyTree("find_min")));
    ///
    /// tree.extend([(5, "five"), (1, "one"), (7, "seven")]);
    /// assert_eq!(tree.find_min(), Ok(&"one"));
    /// ```
    pub fn find_min(&self) -> Result<&V> {
        let mut node = self.root.as_deref().ok_or_else(|| empty_tree("find_min"))?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.value)
    }

    /// The value stored with the key that every other key precedes.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty.
    pub fn find_max(&self) -> Result<&V> {
        let mut node = self.root.as_deref().ok_or_else(|| empty_tree("find_max"))?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.value)
    }

    /// Calls `visit` on every value in the tree in the given `order`.
    pub fn traverse<F>(&self, order: Traversal, mut visit: F)
    where
        F: FnMut(&V),
    {
        self.walk(order, |node| visit(&node.value))
    }

    /// Visits each value before the values in its subtrees.
    pub fn preorder<F>(&self, visit: F)
    where
        F: FnMut(&V),
    {
        self.traverse(Traversal::Preorder, visit)
    }

    /// Visits each value in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::Tree;
    ///
    /// let tree: Tree<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    ///
    /// let mut values = String::new();
    /// tree.inorder(|v| values.push(*v));
    /// assert_eq!(values, "abc");
    /// ```
    pub fn inorder<F>(&self, visit: F)
    where
        F: FnMut(&V),
    {
        self.traverse(Traversal::Inorder, visit)
    }

    /// Visits each value after the values in its subtrees.
    pub fn postorder<F>(&self, visit: F)
    where
        F: FnMut(&V),
    {
        self.traverse(Traversal::Postorder, visit)
    }

    /// Removes every pair from the tree. Children are dropped before their
    /// parents.
    pub fn clear(&mut self) {
        Node::release(self.root.take());
        self.size = 0;
        tracing::trace!("cleared");
    }

    /// Depth-first walk handing each node to `visit` in the given `order`.
    /// Uses an explicit stack so a chain of any length is fine.
    fn walk<F>(&self, order: Traversal, mut visit: F)
    where
        F: FnMut(&Node<K, V>),
    {
        let mut stack: Vec<Step<'_, K, V>> = Vec::new();
        stack.extend(self.root.as_deref().map(Step::Expand));

        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Visit(node) => {
                    visit(node);
                    continue;
                }
                Step::Expand(node) => node,
            };

            let left = node.left.as_deref().map(Step::Expand);
            let right = node.right.as_deref().map(Step::Expand);
            let here = Some(Step::Visit(node));

            // Pushed in reverse since the last one pushed is handled first.
            let steps = match order {
                Traversal::Preorder => [right, left, here],
                Traversal::Inorder => [right, here, left],
                Traversal::Postorder => [here, right, left],
            };
            stack.extend(steps.into_iter().flatten());
        }
    }

    fn find_node(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.relation.compare(key, &node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }
}

fn empty_tree(op: &'static str) -> Error {
    tracing::debug!(op, "extremum requested from an empty tree");
    Error::EmptyTree(op)
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        Node::release(self.root.take());
    }
}

/// Cloning produces a deep copy: no node is shared between the two trees.
impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: Node::deep_clone(&self.root),
            size: self.size,
            relation: self.relation.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.root = Node::deep_clone(&source.root);
        self.size = source.size;
        self.relation = source.relation.clone();
        tracing::trace!(size = self.size, "assigned from another tree");
    }
}

/// Lists the pairs in key order, like the standard maps do.
impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.walk(Traversal::Inorder, |node| {
            map.entry(&node.key, &node.value);
        });
        map.finish()
    }
}

/// Renders the tree one node per line in preorder. Each line is indented by
/// `--` per level and absent children show up as `X`.
///
/// ```
/// use treemap::Tree;
///
/// let tree = Tree::from([(2, "two"), (1, "one")]);
/// assert_eq!(tree.to_string(), "two\n--one\n----X\n----X\n--X\n");
/// assert_eq!(Tree::<u8, u8>::new().to_string(), "<empty tree>");
/// ```
impl<K, V> fmt::Display for Tree<K, V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root.as_deref() else {
            return f.write_str("<empty tree>");
        };

        let mut stack = vec![(0, Some(root))];
        while let Some((depth, slot)) = stack.pop() {
            for _ in 0..depth {
                f.write_str("--")?;
            }
            match slot {
                None => writeln!(f, "X")?,
                Some(node) => {
                    writeln!(f, "{}", node.value)?;
                    stack.push((depth + 1, node.right.as_deref()));
                    stack.push((depth + 1, node.left.as_deref()));
                }
            }
        }
        Ok(())
    }
}

impl<K: Ord + 'static, V> FromIterator<(K, V)> for Tree<K, V> {
    /// Inserts the pairs in order. Later pairs with an already seen key are
    /// dropped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut tree = Self::new();
        tree.extend(pairs);
        tree
    }
}

impl<K: Ord + 'static, V, const N: usize> From<[(K, V); N]> for Tree<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<K, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }
}

/// A pending piece of work for [`Tree::traverse`].
enum Step<'a, K, V> {
    /// Schedule this node and its children.
    Expand(&'a Node<K, V>),
    /// Hand this node to the visitor.
    Visit(&'a Node<K, V>),
}

/// A `Node` has a key that is used for searching/sorting and a value that is
/// associated with that key. Either child may be missing.
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    /// Copies the subtree at `root` node by node. Each source node is paired
    /// with the empty link its copy goes into, so nothing recurses.
    fn deep_clone(root: &Link<K, V>) -> Link<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut copy = None;
        {
            let mut stack: Vec<(&Self, &mut Link<K, V>)> = Vec::new();
            if let Some(node) = root.as_deref() {
                stack.push((node, &mut copy));
            }

            while let Some((source, target)) = stack.pop() {
                let node = target.insert(Self::new_boxed(source.key.clone(), source.value.clone()));
                let Self { left, right, .. } = &mut **node;
                if let Some(n) = source.right.as_deref() {
                    stack.push((n, right));
                }
                if let Some(n) = source.left.as_deref() {
                    stack.push((n, left));
                }
            }
        }
        copy
    }

    /// Finds `key` below `link` and unlinks its node, returning the removed
    /// key and value.
    fn remove(mut link: &mut Link<K, V>, key: &K, relation: &Relation<K>) -> Option<(K, V)> {
        loop {
            let ordering = relation.compare(key, &link.as_ref()?.key);
            link = match ordering {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Greater => &mut link.as_mut()?.right,
                Ordering::Equal => return Self::unlink(link),
            };
        }
    }

    /// Removes the node at `link` from the tree and returns its key and value.
    ///
    /// A leaf just leaves `link` empty and a node with one child hands `link`
    /// to that child. A node with two children stays where it is but takes
    /// the key and value of its successor (the leftmost node of its right
    /// subtree), which is unlinked in its place. The successor has no left
    /// child so this never recurses more than once.
    fn unlink(link: &mut Link<K, V>) -> Option<(K, V)> {
        let node = link.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            let (key, value) = Self::take_leftmost(&mut node.right)?;
            return Some((
                mem::replace(&mut node.key, key),
                mem::replace(&mut node.value, value),
            ));
        }

        let mut node = link.take()?;
        *link = node.left.take().or_else(|| node.right.take());
        Some((node.key, node.value))
    }

    /// Unlinks the leftmost node under `link`.
    fn take_leftmost(mut link: &mut Link<K, V>) -> Option<(K, V)> {
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }
        Self::unlink(link)
    }

    /// Drops a subtree without recursing so arbitrarily deep trees can't
    /// overflow the stack. Both children of a node are dropped before it.
    fn release(root: Link<K, V>) {
        let mut stack: Vec<Box<Self>> = root.into_iter().collect();
        while let Some(mut node) = stack.pop() {
            let (left, right) = (node.left.take(), node.right.take());
            if left.is_none() && right.is_none() {
                drop(node);
                continue;
            }

            // Come back to it once the children are gone.
            stack.push(node);
            stack.extend(right);
            stack.extend(left);
        }
    }
}
