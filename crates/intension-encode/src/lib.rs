//! # intension-encode
//!
//! Encoders built on the post-order visitor protocol of `intension-core`.
//!
//! This crate provides:
//! - An evaluator computing the value of a tree under an assignment
//! - A scope collector listing the variables a tree depends on
//!
//! Both are ordinary [`Visitor`](intension_core::Visitor) implementations
//! and keep all of their state on their own side, so the same tree may be
//! handed to any number of them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod eval;
pub mod scope;

#[cfg(test)]
mod proptests;

pub use eval::{evaluate, satisfies, Assignment, EvalError, Evaluator, MAX_POW_BITS};
pub use scope::{scope, ScopeCollector};
