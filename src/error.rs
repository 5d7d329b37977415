//! Error types for `treemap`.

use thiserror::Error;

/// Result type alias using our [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The ways a [`Tree`][crate::Tree] operation can fail.
///
/// Only the extremum queries can fail. Everything else on a tree is total.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The named operation needs at least one node but the tree was empty.
    #[error("{0}: called upon an empty tree")]
    EmptyTree(&'static str),
}
