//! The operator vocabulary.
//!
//! Operators are grouped in four closed families: arithmetic, Boolean,
//! relational and set-belonging. Every operator has a fixed [`Arity`]
//! which decides the node shape that may carry it.

use std::fmt;

/// The arity family of an operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly one operand.
    Unary,
    /// Exactly two operands, order significant.
    Binary,
    /// One or more operands.
    Nary,
}

impl Arity {
    /// Returns true if a node with `count` operands fits this arity.
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Unary => count == 1,
            Arity::Binary => count == 2,
            Arity::Nary => count >= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Arity::Unary => "unary",
            Arity::Binary => "binary",
            Arity::Nary => "n-ary",
        })
    }
}

/// Arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    /// Opposite of a value.
    Neg,
    /// Absolute value.
    Abs,
    /// Sum of several values.
    Add,
    /// Difference of two values.
    Sub,
    /// Product of several values.
    Mult,
    /// Truncating division of two values.
    Div,
    /// Remainder of the division of two values.
    Mod,
    /// Square of a value.
    Sqr,
    /// A value raised to the power of another.
    Pow,
    /// Minimum of several values.
    Min,
    /// Maximum of several values.
    Max,
    /// Distance `|a - b|` between two values.
    Dist,
}

impl ArithmeticOperator {
    /// All arithmetic operators, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Neg,
        Self::Abs,
        Self::Add,
        Self::Sub,
        Self::Mult,
        Self::Div,
        Self::Mod,
        Self::Sqr,
        Self::Pow,
        Self::Min,
        Self::Max,
        Self::Dist,
    ];

    /// Returns the arity family of this operator.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Neg | Self::Abs | Self::Sqr => Arity::Unary,
            Self::Sub | Self::Div | Self::Mod | Self::Pow | Self::Dist => Arity::Binary,
            Self::Add | Self::Mult | Self::Min | Self::Max => Arity::Nary,
        }
    }

    /// Returns true if operand order does not change the result.
    #[must_use]
    pub const fn is_commutative(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Mult | Self::Min | Self::Max | Self::Dist
        )
    }

    /// Returns the XCSP3 keyword of this operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Abs => "abs",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mult => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::Sqr => "sqr",
            Self::Pow => "pow",
            Self::Min => "min",
            Self::Max => "max",
            Self::Dist => "dist",
        }
    }
}

/// Boolean operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    /// Negation.
    Not,
    /// Conjunction of several values.
    And,
    /// Disjunction of several values.
    Or,
    /// Exclusive disjunction (parity) of several values.
    Xor,
    /// Equivalence of several values.
    Equiv,
    /// Implication between two values.
    Impl,
}

impl BooleanOperator {
    /// All Boolean operators, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Not,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Equiv,
        Self::Impl,
    ];

    /// Returns the arity family of this operator.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Not => Arity::Unary,
            Self::Impl => Arity::Binary,
            Self::And | Self::Or | Self::Xor | Self::Equiv => Arity::Nary,
        }
    }

    /// Returns the XCSP3 keyword of this operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Equiv => "iff",
            Self::Impl => "imp",
        }
    }
}

/// Relational operators. All of them are binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationalOperator {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `==`
    Eq,
    /// `!=`
    Neq,
    /// `>=`
    Ge,
    /// `>`
    Gt,
}

impl RelationalOperator {
    /// All relational operators, in declaration order.
    pub const ALL: [Self; 6] = [Self::Lt, Self::Le, Self::Eq, Self::Neq, Self::Ge, Self::Gt];

    /// Returns the operator obtained by swapping the operands.
    ///
    /// `a op b` holds exactly when `b op.reverse() a` holds.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Eq => Self::Eq,
            Self::Neq => Self::Neq,
            Self::Ge => Self::Le,
            Self::Gt => Self::Lt,
        }
    }

    /// Returns the complementary operator.
    ///
    /// `a op.negate() b` holds exactly when `a op b` does not.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Lt => Self::Ge,
            Self::Le => Self::Gt,
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
            Self::Ge => Self::Lt,
            Self::Gt => Self::Le,
        }
    }

    /// Returns the XCSP3 keyword of this operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Eq => "eq",
            Self::Neq => "ne",
            Self::Ge => "ge",
            Self::Gt => "gt",
        }
    }

    /// Compares two ordered values with this operator.
    pub fn holds<T: Ord + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Eq => left == right,
            Self::Neq => left != right,
            Self::Ge => left >= right,
            Self::Gt => left > right,
        }
    }
}

/// Set-belonging operators. Their right operand is a set or a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetBelongingOperator {
    /// Membership.
    In,
    /// Non-membership.
    NotIn,
}

impl SetBelongingOperator {
    /// Returns the XCSP3 keyword of this operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::NotIn => "notin",
        }
    }
}

/// Any operator that may label a unary, binary or n-ary node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// An arithmetic operator.
    Arithmetic(ArithmeticOperator),
    /// A Boolean operator.
    Boolean(BooleanOperator),
    /// A relational operator.
    Relational(RelationalOperator),
    /// A set-belonging operator.
    SetBelonging(SetBelongingOperator),
}

impl Operator {
    /// Returns the arity family of this operator.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Operator::Arithmetic(op) => op.arity(),
            Operator::Boolean(op) => op.arity(),
            Operator::Relational(_) | Operator::SetBelonging(_) => Arity::Binary,
        }
    }

    /// Returns the XCSP3 keyword of this operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Arithmetic(op) => op.name(),
            Operator::Boolean(op) => op.name(),
            Operator::Relational(op) => op.name(),
            Operator::SetBelonging(op) => op.name(),
        }
    }

    /// Returns true for `in` and `notin`.
    #[must_use]
    pub const fn is_set_belonging(self) -> bool {
        matches!(self, Operator::SetBelonging(_))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ArithmeticOperator> for Operator {
    fn from(op: ArithmeticOperator) -> Self {
        Operator::Arithmetic(op)
    }
}

impl From<BooleanOperator> for Operator {
    fn from(op: BooleanOperator) -> Self {
        Operator::Boolean(op)
    }
}

impl From<RelationalOperator> for Operator {
    fn from(op: RelationalOperator) -> Self {
        Operator::Relational(op)
    }
}

impl From<SetBelongingOperator> for Operator {
    fn from(op: SetBelongingOperator) -> Self {
        Operator::SetBelonging(op)
    }
}
