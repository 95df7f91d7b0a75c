//! # intension
//!
//! Intension constraint expressions for constraint solvers.
//!
//! An intension constraint is a predicate over integer variables written
//! as an expression tree, such as `le(add(x, y), 10)`. Trees are built with
//! the factory functions, are immutable once built, and are consumed by
//! encoders through a post-order visitor protocol.
//!
//! ## Features
//!
//! - **Operator vocabulary**: arithmetic, Boolean, relational and
//!   set-belonging operators with fixed arities
//! - **Strict trees**: invalid shapes are rejected at construction
//! - **Stack-safe traversal**: arbitrarily deep trees are walked and
//!   dropped without recursion
//! - **Encoders**: rendering, evaluation and scope collection
//! - **Automata**: transitions and finite automata for `regular` constraints
//!
//! ## Quick Start
//!
//! ```rust
//! use intension::prelude::*;
//!
//! let constraint = le(add([variable("x"), variable("y")])?, constant(10))?;
//! assert_eq!(constraint.to_string(), "le(add(x,y),10)");
//!
//! let assignment: Assignment = [("x", 3), ("y", 4)]
//!     .into_iter()
//!     .map(|(id, value)| (id.to_owned(), Integer::new(value)))
//!     .collect();
//! assert!(satisfies(&constraint, &assignment)?);
//! assert_eq!(scope(&constraint), ["x", "y"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use intension_core as core;
pub use intension_encode as encode;
pub use intension_integers as integers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use intension_core::factory::*;
    pub use intension_core::{
        Automaton, Expr, ExprError, NodeKind, Operator, Transition, TraversalError, Visitor,
        WalkConfig, Walker,
    };
    pub use intension_encode::{evaluate, satisfies, scope, Assignment, EvalError};
    pub use intension_integers::Integer;
}
