//! Error types for construction and traversal.

use thiserror::Error;

use crate::expr::NodeKind;
use crate::operator::{Arity, Operator};

/// Errors raised when a node is built from inconsistent parts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The operator does not fit the node shape or operand count.
    #[error("operator `{operator}` is {expected} but was given {found} operand(s)")]
    InvalidArity {
        /// The offending operator.
        operator: Operator,
        /// The arity family of the operator.
        expected: Arity,
        /// The number of operands supplied.
        found: usize,
    },

    /// A set or range node was used where a value is required.
    #[error("a {kind} node may only appear as the right operand of `in` or `notin`")]
    MisplacedCollection {
        /// The kind of the misplaced node.
        kind: NodeKind,
    },

    /// A set-belonging operator was given something other than a set or range.
    #[error("the right operand of `{operator}` must be a set or a range, found a {found} node")]
    MissingCollection {
        /// The set-belonging operator.
        operator: Operator,
        /// The kind of the node found instead.
        found: NodeKind,
    },
}

/// Errors raised while walking a tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// The visitor does not handle nodes of this kind.
    #[error("visitor does not support {0} nodes")]
    Unsupported(NodeKind),

    /// The tree is deeper than the configured limit.
    #[error("expression depth exceeds the limit of {limit}")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
}
