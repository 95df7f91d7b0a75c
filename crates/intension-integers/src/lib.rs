//! # intension-integers
//!
//! Arbitrary precision integers for intension expressions.
//!
//! This crate wraps `dashu` to provide the `Integer` type used for
//! expression constants, range bounds and evaluation results.
//!
//! ## Performance Notes
//!
//! - Small integers (fitting in a machine word) use stack allocation
//! - Large integers are heap-allocated

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
