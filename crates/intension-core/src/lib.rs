//! # intension-core
//!
//! Intension constraint expressions for constraint solvers.
//!
//! This crate provides:
//! - The operator vocabulary (arithmetic, Boolean, relational, set-belonging)
//! - A strict, immutable expression tree
//! - A post-order visitor protocol for encoders
//! - Factory functions following the XCSP3 functional notation
//! - Transitions and automata for `regular`-style constraints
//! - Rendering in XCSP3 functional notation
//!
//! ## Design Principles
//!
//! - **Fail-fast construction**: node constructors reject operand counts
//!   that do not match the operator's arity
//! - **Encoder-agnostic trees**: any number of visitors may walk the same
//!   tree, each keeping its own state
//! - **No recursion**: traversal and drop use explicit stacks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod automaton;
pub mod display;
pub mod error;
pub mod expr;
pub mod factory;
pub mod operator;
pub mod visit;

#[cfg(test)]
mod proptests;

pub use automaton::{Automaton, Transition};
pub use display::{Printer, PrinterConfig};
pub use error::{ExprError, TraversalError};
pub use expr::{
    BinaryExpr, Constant, Expr, IfThenElse, NaryExpr, NodeKind, RangeExpr, SetExpr, UnaryExpr,
    Variable,
};
pub use intension_integers::Integer;
pub use operator::{
    ArithmeticOperator, Arity, BooleanOperator, Operator, RelationalOperator,
    SetBelongingOperator,
};
pub use visit::{Visitor, WalkConfig, Walker};
