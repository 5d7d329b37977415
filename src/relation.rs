//! The ordering a [`Tree`][crate::Tree] keeps its keys in.
//!
//! A [`Relation`] wraps a caller-supplied "precedes" predicate `R(a, b)`. It
//! must be a strict weak ordering: two keys are considered *equal* when
//! neither `R(a, b)` nor `R(b, a)` holds. The tree never asks for anything but
//! these two questions so the relation is free to order keys however it
//! likes (descending, by a projection, case-insensitively, ...).
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use treemap::Relation;
//!
//! let ascending = Relation::<i32>::natural();
//! assert_eq!(ascending.compare(&1, &2), Ordering::Less);
//!
//! let descending = ascending.reversed();
//! assert_eq!(descending.compare(&1, &2), Ordering::Greater);
//!
//! let by_len = Relation::new(|a: &String, b: &String| a.len() < b.len());
//! assert_eq!(by_len.compare(&"abc".into(), &"xyz".into()), Ordering::Equal);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A stored "precedes" predicate over keys of type `K`.
pub struct Relation<K> {
    precedes: Rc<dyn Fn(&K, &K) -> bool>,
}

/// Manual implementation of `Clone` so we don't require `K: Clone`. Clones
/// share the predicate.
impl<K> Clone for Relation<K> {
    fn clone(&self) -> Self {
        Self {
            precedes: Rc::clone(&self.precedes),
        }
    }
}

impl<K> fmt::Debug for Relation<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Relation")
    }
}

impl<K: Ord + 'static> Default for Relation<K> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<K: 'static> Relation<K> {
    /// Wraps `precedes` as a relation. `precedes(a, b)` should return `true`
    /// exactly when `a` comes before `b`.
    pub fn new<F>(precedes: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        Self {
            precedes: Rc::new(precedes),
        }
    }

    /// The ascending order given by `K`'s `Ord` implementation.
    pub fn natural() -> Self
    where
        K: Ord,
    {
        Self::new(|a: &K, b: &K| a < b)
    }

    /// Returns a relation ordering keys the opposite way to this one.
    pub fn reversed(&self) -> Self {
        let precedes = Rc::clone(&self.precedes);
        Self::new(move |a: &K, b: &K| precedes(b, a))
    }
}

impl<K> Relation<K> {
    /// Whether `a` comes strictly before `b`.
    pub fn precedes(&self, a: &K, b: &K) -> bool {
        (self.precedes)(a, b)
    }

    /// Classifies `a` relative to `b` with at most two calls to the
    /// predicate. Neither preceding the other means [`Ordering::Equal`].
    pub fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.precedes(a, b) {
            Ordering::Less
        } else if self.precedes(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
