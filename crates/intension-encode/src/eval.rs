//! Evaluation of expressions under a complete assignment.
//!
//! The evaluator is a stack machine driven by the post-order walk: every
//! node pops the values of its children and pushes its own. Booleans are
//! the integers 0 and 1 and any non-zero integer counts as true, as in
//! XCSP3.

use intension_core::{
    ArithmeticOperator, BinaryExpr, BooleanOperator, Constant, Expr, IfThenElse, Integer,
    NaryExpr, NodeKind, Operator, RangeExpr, SetBelongingOperator, SetExpr, TraversalError,
    UnaryExpr, Variable, Visitor, Walker,
};
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::instrument;

/// Upper bound on the bit width `pow` may produce.
pub const MAX_POW_BITS: u64 = 1 << 24;

/// Values of variables, by identifier.
pub type Assignment = FxHashMap<String, Integer>;

/// Errors that can occur during evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The assignment has no value for this variable.
    #[error("variable `{0}` has no value")]
    UnboundVariable(String),

    /// `div` or `mod` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `pow` with a negative exponent.
    #[error("negative exponent in `pow`")]
    NegativeExponent,

    /// `pow` whose result would be wider than [`MAX_POW_BITS`].
    #[error("exponent {0} is too large")]
    ExponentTooLarge(Integer),

    /// A set or range reached a position that needs a value.
    #[error("a {0} node cannot be used as a value")]
    UnexpectedCollection(NodeKind),

    /// An operator received an operand count it cannot handle.
    #[error("cannot apply `{operator}` to {found} operand(s)")]
    InvalidArity {
        /// The operator being applied.
        operator: Operator,
        /// The number of operands it received.
        found: usize,
    },

    /// The walk itself failed.
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

/// An entry of the evaluation stack.
#[derive(Clone, Debug)]
enum Operand {
    Value(Integer),
    Range(RangeExpr),
    Set(Vec<Integer>),
}

impl Operand {
    fn into_value(self) -> Result<Integer, EvalError> {
        match self {
            Operand::Value(value) => Ok(value),
            Operand::Range(_) => Err(EvalError::UnexpectedCollection(NodeKind::Range)),
            Operand::Set(_) => Err(EvalError::UnexpectedCollection(NodeKind::Set)),
        }
    }

    fn contains(&self, value: &Integer) -> bool {
        match self {
            Operand::Value(other) => other == value,
            Operand::Range(range) => range.contains(value),
            Operand::Set(elements) => elements.contains(value),
        }
    }
}

/// A visitor computing the value of a tree.
pub struct Evaluator<'a> {
    assignment: &'a Assignment,
    stack: Vec<Operand>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator reading variable values from `assignment`.
    #[must_use]
    pub fn new(assignment: &'a Assignment) -> Self {
        Self {
            assignment,
            stack: Vec::new(),
        }
    }

    /// Evaluates `expr` with `walker`.
    ///
    /// # Errors
    ///
    /// Fails on an unbound variable, a division by zero, a negative or
    /// oversized exponent, or a walker depth limit.
    pub fn evaluate(&mut self, walker: &Walker, expr: &Expr) -> Result<Integer, EvalError> {
        self.stack.clear();
        walker.walk(expr, self)?;
        match self.stack.pop() {
            Some(operand) => operand.into_value(),
            None => Err(EvalError::UnexpectedCollection(expr.kind())),
        }
    }

    fn pop(&mut self, count: usize) -> Vec<Operand> {
        let at = self.stack.len().saturating_sub(count);
        self.stack.split_off(at)
    }

    fn pop_values(&mut self, count: usize) -> Result<Vec<Integer>, EvalError> {
        self.pop(count).into_iter().map(Operand::into_value).collect()
    }

    fn push(&mut self, value: Integer) {
        self.stack.push(Operand::Value(value));
    }
}

impl Visitor for Evaluator<'_> {
    type Error = EvalError;

    fn visit_constant(&mut self, node: &Constant) -> Result<(), Self::Error> {
        self.push(node.value().clone());
        Ok(())
    }

    fn visit_variable(&mut self, node: &Variable) -> Result<(), Self::Error> {
        let value = self
            .assignment
            .get(node.id())
            .ok_or_else(|| EvalError::UnboundVariable(node.id().to_owned()))?;
        self.push(value.clone());
        Ok(())
    }

    fn visit_unary(&mut self, node: &UnaryExpr) -> Result<(), Self::Error> {
        let args = self.pop_values(1)?;
        let value = apply(node.operator(), &args)?;
        self.push(value);
        Ok(())
    }

    fn visit_binary(&mut self, node: &BinaryExpr) -> Result<(), Self::Error> {
        let operator = node.operator();
        let value = if let Operator::SetBelonging(op) = operator {
            let mut operands = self.pop(2);
            let (Some(collection), Some(element)) = (operands.pop(), operands.pop()) else {
                return Err(EvalError::InvalidArity { operator, found: 0 });
            };
            let member = collection.contains(&element.into_value()?);
            Integer::from_bool(member == (op == SetBelongingOperator::In))
        } else {
            let args = self.pop_values(2)?;
            apply(operator, &args)?
        };
        self.push(value);
        Ok(())
    }

    fn visit_nary(&mut self, node: &NaryExpr) -> Result<(), Self::Error> {
        let args = self.pop_values(node.arity())?;
        let value = apply(node.operator(), &args)?;
        self.push(value);
        Ok(())
    }

    fn visit_if_then_else(&mut self, _node: &IfThenElse) -> Result<(), Self::Error> {
        let mut args = self.pop_values(3)?;
        let (Some(if_false), Some(if_true), Some(condition)) = (args.pop(), args.pop(), args.pop())
        else {
            return Err(EvalError::UnexpectedCollection(NodeKind::IfThenElse));
        };
        self.push(if condition.is_truthy() { if_true } else { if_false });
        Ok(())
    }

    fn visit_range(&mut self, node: &RangeExpr) -> Result<(), Self::Error> {
        self.stack.push(Operand::Range(node.clone()));
        Ok(())
    }

    fn visit_set(&mut self, node: &SetExpr) -> Result<(), Self::Error> {
        let elements = self.pop_values(node.len())?;
        self.stack.push(Operand::Set(elements));
        Ok(())
    }
}

/// Applies a non-set-belonging operator to evaluated operands.
fn apply(operator: Operator, args: &[Integer]) -> Result<Integer, EvalError> {
    use ArithmeticOperator as A;
    use BooleanOperator as B;

    let invalid = || EvalError::InvalidArity {
        operator,
        found: args.len(),
    };

    let value = match (operator, args) {
        (Operator::Arithmetic(A::Neg), [a]) => -a,
        (Operator::Arithmetic(A::Abs), [a]) => a.abs(),
        (Operator::Arithmetic(A::Sqr), [a]) => a * a,
        (Operator::Arithmetic(A::Sub), [a, b]) => a - b,
        (Operator::Arithmetic(A::Div), [a, b]) => {
            if b.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
        (Operator::Arithmetic(A::Mod), [a, b]) => {
            if b.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            a % b
        }
        (Operator::Arithmetic(A::Pow), [a, b]) => power(a, b)?,
        (Operator::Arithmetic(A::Dist), [a, b]) => (a - b).abs(),
        (Operator::Arithmetic(A::Add), _) if !args.is_empty() => {
            args.iter().fold(Integer::zero(), |acc, x| acc + x)
        }
        (Operator::Arithmetic(A::Mult), _) if !args.is_empty() => {
            args.iter().fold(Integer::one(), |acc, x| acc * x)
        }
        (Operator::Arithmetic(A::Min), _) => args.iter().min().cloned().ok_or_else(invalid)?,
        (Operator::Arithmetic(A::Max), _) => args.iter().max().cloned().ok_or_else(invalid)?,
        (Operator::Boolean(B::Not), [a]) => Integer::from_bool(!a.is_truthy()),
        (Operator::Boolean(B::Impl), [a, b]) => Integer::from_bool(!a.is_truthy() || b.is_truthy()),
        (Operator::Boolean(B::And), _) if !args.is_empty() => {
            Integer::from_bool(args.iter().all(Integer::is_truthy))
        }
        (Operator::Boolean(B::Or), _) if !args.is_empty() => {
            Integer::from_bool(args.iter().any(Integer::is_truthy))
        }
        (Operator::Boolean(B::Xor), _) if !args.is_empty() => {
            let count = args.iter().filter(|a| a.is_truthy()).count();
            Integer::from_bool(count % 2 == 1)
        }
        (Operator::Boolean(B::Equiv), [first, rest @ ..]) => {
            let truth = first.is_truthy();
            Integer::from_bool(rest.iter().all(|a| a.is_truthy() == truth))
        }
        (Operator::Relational(op), [a, b]) => Integer::from_bool(op.holds(a, b)),
        _ => return Err(invalid()),
    };
    Ok(value)
}

/// `base ^ exp`, refusing results wider than [`MAX_POW_BITS`].
fn power(base: &Integer, exp: &Integer) -> Result<Integer, EvalError> {
    if exp.is_negative() {
        return Err(EvalError::NegativeExponent);
    }
    if exp.is_zero() {
        return Ok(Integer::one());
    }
    // 0, 1 and -1 stay small whatever the exponent.
    let width = base.abs().bit_len();
    if width <= 1 {
        let odd = !(exp % &Integer::new(2)).is_zero();
        return Ok(if base.is_negative() && !odd {
            Integer::one()
        } else {
            base.clone()
        });
    }
    let too_large = || EvalError::ExponentTooLarge(exp.clone());
    let small = exp.to_u32().ok_or_else(too_large)?;
    let width = u64::try_from(width).unwrap_or(u64::MAX);
    if width.saturating_mul(u64::from(small)) > MAX_POW_BITS {
        return Err(too_large());
    }
    Ok(base.pow(small))
}

/// Evaluates `expr` under `assignment`.
///
/// # Errors
///
/// See [`Evaluator::evaluate`].
#[instrument(skip_all, level = "debug")]
pub fn evaluate(expr: &Expr, assignment: &Assignment) -> Result<Integer, EvalError> {
    Evaluator::new(assignment).evaluate(&Walker::new(), expr)
}

/// Returns true if `expr` evaluates to a non-zero value under `assignment`.
///
/// # Errors
///
/// See [`Evaluator::evaluate`].
pub fn satisfies(expr: &Expr, assignment: &Assignment) -> Result<bool, EvalError> {
    evaluate(expr, assignment).map(|value| value.is_truthy())
}
