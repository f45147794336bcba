//! Error handling module for dualconf
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Every failure in this crate is synchronous and final: the harness exists to
//! stop hard the first time two backends disagree, so nothing here is retried
//! or recovered from.

use crate::node::{NodeId, NodeKind};
use thiserror::Error;

/// Main error type for dualconf
#[derive(Error, Debug)]
pub enum DualConfError {
    /// The primary and secondary backends disagree on a real (non-sentinel)
    /// value. `what` names the field or result that was being compared.
    #[error("equivalence violation on {what}: primary {primary}, secondary {secondary}")]
    Equivalence {
        what: &'static str,
        primary: String,
        secondary: String,
    },

    /// The two nodes being compared are not the same node kind.
    /// Indicates a wrapping bug, not a data problem.
    #[error("variant mismatch: expected {expected} node, found {found} node")]
    VariantMismatch { expected: NodeKind, found: NodeKind },

    /// Search results from the two backends have mismatched lengths with no
    /// placeholder to explain the difference.
    #[error(
        "search protocol violation: primary returned {primary_len} node(s), \
         secondary returned {secondary_len} without a sentinel placeholder"
    )]
    Protocol {
        primary_len: usize,
        secondary_len: usize,
    },

    /// `delete_child` was given a node that is not a child of this block.
    #[error("no child with id {0:?} under this block")]
    UnknownChild(NodeId),
}

/// Result type alias for dualconf operations
pub type Result<T> = std::result::Result<T, DualConfError>;

impl DualConfError {
    /// Create an equivalence violation from the two diverging values.
    pub fn equivalence(
        what: &'static str,
        primary: impl std::fmt::Debug,
        secondary: impl std::fmt::Debug,
    ) -> Self {
        Self::Equivalence {
            what,
            primary: format!("{primary:?}"),
            secondary: format!("{secondary:?}"),
        }
    }
}
