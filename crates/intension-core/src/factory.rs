//! Free functions building expressions in XCSP3 functional notation.
//!
//! Each function allocates a fresh node and keeps no state, so they may be
//! called from any number of threads at once. Sets and ranges are only
//! created inside [`in_set`], [`in_range`], [`not_in_set`] and
//! [`not_in_range`], which is what keeps them out of value positions.
//!
//! ```
//! use intension_core::factory::{add, constant, lt, variable};
//!
//! let expr = lt(add([variable("x"), constant(1)])?, variable("y"))?;
//! assert_eq!(expr.node_count(), 5);
//! # Ok::<(), intension_core::ExprError>(())
//! ```

use intension_integers::Integer;

use crate::error::ExprError;
use crate::expr::{
    BinaryExpr, Constant, Expr, IfThenElse, NaryExpr, RangeExpr, SetExpr, UnaryExpr, Variable,
};
use crate::operator::{
    ArithmeticOperator, BooleanOperator, Operator, RelationalOperator, SetBelongingOperator,
};

/// Result of every fallible factory function.
pub type ExprResult = Result<Expr, ExprError>;

/// An integer literal.
#[must_use]
pub fn constant(value: impl Into<Integer>) -> Expr {
    Constant::new(value).into()
}

/// A reference to the variable `id`.
#[must_use]
pub fn variable(id: impl Into<String>) -> Expr {
    Variable::new(id).into()
}

/// Applies a unary operator.
///
/// # Errors
///
/// Fails if `operator` is not unary or `operand` is a set or range.
pub fn unary(operator: impl Into<Operator>, operand: Expr) -> ExprResult {
    UnaryExpr::new(operator, operand).map(Expr::from)
}

/// Applies a binary operator.
///
/// # Errors
///
/// Fails if `operator` is not binary or the operands are misplaced.
pub fn binary(operator: impl Into<Operator>, left: Expr, right: Expr) -> ExprResult {
    BinaryExpr::new(operator, left, right).map(Expr::from)
}

/// Applies an n-ary operator.
///
/// # Errors
///
/// Fails if `operator` is not n-ary, no operand is given, or an operand is
/// a set or range.
pub fn nary(operator: impl Into<Operator>, operands: impl IntoIterator<Item = Expr>) -> ExprResult {
    NaryExpr::new(operator, operands.into_iter().collect()).map(Expr::from)
}

/// `if condition then if_true else if_false`.
///
/// # Errors
///
/// Fails if an argument is a set or range.
pub fn ite(condition: Expr, if_true: Expr, if_false: Expr) -> ExprResult {
    IfThenElse::new(condition, if_true, if_false).map(Expr::from)
}

macro_rules! unary_fns {
    ($($(#[$doc:meta])* $name:ident => $op:expr;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// Fails if the operand is a set or range.
            pub fn $name(operand: Expr) -> ExprResult {
                unary($op, operand)
            }
        )*
    };
}

macro_rules! binary_fns {
    ($($(#[$doc:meta])* $name:ident => $op:expr;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// Fails if an operand is a set or range.
            pub fn $name(left: Expr, right: Expr) -> ExprResult {
                binary($op, left, right)
            }
        )*
    };
}

macro_rules! nary_fns {
    ($($(#[$doc:meta])* $name:ident => $op:expr;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// Fails if no operand is given or an operand is a set or range.
            pub fn $name(operands: impl IntoIterator<Item = Expr>) -> ExprResult {
                nary($op, operands)
            }
        )*
    };
}

unary_fns! {
    /// `neg(e)`: the opposite of `e`.
    neg => ArithmeticOperator::Neg;
    /// `abs(e)`: the absolute value of `e`.
    abs => ArithmeticOperator::Abs;
    /// `sqr(e)`: the square of `e`.
    sqr => ArithmeticOperator::Sqr;
    /// `not(e)`: the logical negation of `e`.
    not => BooleanOperator::Not;
}

binary_fns! {
    /// `sub(a, b)`: `a - b`.
    sub => ArithmeticOperator::Sub;
    /// `div(a, b)`: `a / b`, truncated.
    div => ArithmeticOperator::Div;
    /// `mod(a, b)`: the remainder of `a / b`.
    modulo => ArithmeticOperator::Mod;
    /// `pow(a, b)`: `a` raised to the power `b`.
    pow => ArithmeticOperator::Pow;
    /// `dist(a, b)`: `|a - b|`.
    dist => ArithmeticOperator::Dist;
    /// `imp(a, b)`: `a` implies `b`.
    implies => BooleanOperator::Impl;
    /// `lt(a, b)`: `a < b`.
    lt => RelationalOperator::Lt;
    /// `le(a, b)`: `a <= b`.
    le => RelationalOperator::Le;
    /// `eq(a, b)`: `a == b`.
    ///
    /// Relations are binary; chain more operands as
    /// `and([eq(a, b)?, eq(b, c)?])`.
    eq => RelationalOperator::Eq;
    /// `ne(a, b)`: `a != b`.
    neq => RelationalOperator::Neq;
    /// `ge(a, b)`: `a >= b`.
    ge => RelationalOperator::Ge;
    /// `gt(a, b)`: `a > b`.
    gt => RelationalOperator::Gt;
}

nary_fns! {
    /// `add(a, b, ...)`: the sum of the operands.
    add => ArithmeticOperator::Add;
    /// `mul(a, b, ...)`: the product of the operands.
    mult => ArithmeticOperator::Mult;
    /// `min(a, b, ...)`: the smallest operand.
    min => ArithmeticOperator::Min;
    /// `max(a, b, ...)`: the largest operand.
    max => ArithmeticOperator::Max;
    /// `and(a, b, ...)`: all operands hold.
    and => BooleanOperator::And;
    /// `or(a, b, ...)`: some operand holds.
    or => BooleanOperator::Or;
    /// `xor(a, b, ...)`: an odd number of operands hold.
    xor => BooleanOperator::Xor;
    /// `iff(a, b, ...)`: all operands have the same truth value.
    equiv => BooleanOperator::Equiv;
}

/// `in(e, min..max)`: `e` lies in the closed interval.
///
/// # Errors
///
/// Fails if `expr` is a set or range.
pub fn in_range(expr: Expr, min: impl Into<Integer>, max: impl Into<Integer>) -> ExprResult {
    belongs(SetBelongingOperator::In, expr, RangeExpr::new(min, max).into())
}

/// `notin(e, min..max)`: `e` lies outside the closed interval.
///
/// # Errors
///
/// Fails if `expr` is a set or range.
pub fn not_in_range(expr: Expr, min: impl Into<Integer>, max: impl Into<Integer>) -> ExprResult {
    belongs(SetBelongingOperator::NotIn, expr, RangeExpr::new(min, max).into())
}

/// `in(e, set(a, b, ...))`: `e` equals one of the elements.
///
/// # Errors
///
/// Fails if `expr` or an element is a set or range.
pub fn in_set(expr: Expr, elements: impl IntoIterator<Item = Expr>) -> ExprResult {
    let set = SetExpr::new(elements.into_iter().collect())?;
    belongs(SetBelongingOperator::In, expr, set.into())
}

/// `notin(e, set(a, b, ...))`: `e` equals none of the elements.
///
/// # Errors
///
/// Fails if `expr` or an element is a set or range.
pub fn not_in_set(expr: Expr, elements: impl IntoIterator<Item = Expr>) -> ExprResult {
    let set = SetExpr::new(elements.into_iter().collect())?;
    belongs(SetBelongingOperator::NotIn, expr, set.into())
}

fn belongs(operator: SetBelongingOperator, expr: Expr, collection: Expr) -> ExprResult {
    binary(operator, expr, collection)
}
