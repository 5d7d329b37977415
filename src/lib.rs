//! This crate exposes an ordered map built on a plain, unbalanced Binary
//! Search Tree (BST) whose key order is chosen at runtime.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key, the value
//! associated with it and up to two child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key that precedes its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key that its own key precedes.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! "Precedes" is whatever the tree's [`Relation`] says it is. By default that
//! is `K`'s `Ord` implementation but any strict weak ordering will do, e.g.
//! `|a, b| a > b` for a tree that sorts descending.
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined
//! as the longest path from the root `Node` to a leaf `Node`). This tree never
//! rebalances so the height is only `O(lg N)` when keys arrive in a friendly
//! order. Inserting sorted keys degrades it into a chain of `N` nodes.
//!
//! ## Traversals
//!
//! [`Tree`] hands its values to a visitor in one of three depth-first orders
//! (see [`Traversal`]). The inorder traversal visits the values sorted by key.
//!
//! ```
//! use treemap::Tree;
//!
//! let tree: Tree<_, _> = [5, 1, 7, 0, 3, 2].map(|k| (k, k)).into();
//!
//! let mut inorder = Vec::new();
//! tree.inorder(|v| inorder.push(*v));
//! assert_eq!(inorder, [0, 1, 2, 3, 5, 7]);
//!
//! let mut preorder = Vec::new();
//! tree.preorder(|v| preorder.push(*v));
//! assert_eq!(preorder, [5, 1, 0, 3, 2, 7]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod relation;
pub mod tree;

pub use error::{Error, Result};
pub use relation::Relation;
pub use tree::{Traversal, Tree};
