//! Expression node types.
//!
//! An expression is a strict tree: every node owns its children and no
//! node is shared. Nodes expose their parts through getters only, so a
//! tree never changes once it has been built.

use std::fmt;
use std::mem;

use intension_integers::Integer;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::ExprError;
use crate::operator::{Arity, Operator};

/// The eight node kinds, without their payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An integer literal.
    Constant,
    /// A reference to a problem variable.
    Variable,
    /// An operator applied to one operand.
    Unary,
    /// An operator applied to two operands.
    Binary,
    /// An operator applied to one or more operands.
    Nary,
    /// A conditional expression.
    IfThenElse,
    /// A closed interval of integers.
    Range,
    /// An explicit set of expressions.
    Set,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Constant => "constant",
            NodeKind::Variable => "variable",
            NodeKind::Unary => "unary",
            NodeKind::Binary => "binary",
            NodeKind::Nary => "n-ary",
            NodeKind::IfThenElse => "if-then-else",
            NodeKind::Range => "range",
            NodeKind::Set => "set",
        })
    }
}

/// An integer literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constant {
    value: Integer,
}

impl Constant {
    /// Creates a constant node.
    #[must_use]
    pub fn new(value: impl Into<Integer>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns the value of the constant.
    #[must_use]
    pub fn value(&self) -> &Integer {
        &self.value
    }
}

/// A reference to a variable by its identifier.
///
/// The identifier is not checked against any variable table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    id: String,
}

impl Variable {
    /// Creates a variable node.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the identifier of the variable.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A unary operator applied to one operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnaryExpr {
    operator: Operator,
    operand: Box<Expr>,
}

impl UnaryExpr {
    /// Creates a unary node.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::InvalidArity`] if `operator` is not unary and
    /// [`ExprError::MisplacedCollection`] if `operand` is a set or range.
    pub fn new(operator: impl Into<Operator>, operand: Expr) -> Result<Self, ExprError> {
        let operator = operator.into();
        check_arity(operator, Arity::Unary, 1)?;
        ensure_value(&operand)?;
        Ok(Self {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the operand.
    #[must_use]
    pub fn operand(&self) -> &Expr {
        &self.operand
    }
}

/// A binary operator applied to an ordered pair of operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryExpr {
    operator: Operator,
    left: Box<Expr>,
    right: Box<Expr>,
}

impl BinaryExpr {
    /// Creates a binary node.
    ///
    /// For `in` and `notin` the right operand must be a set or a range;
    /// for every other operator both operands must be values.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::InvalidArity`] if `operator` is not binary,
    /// [`ExprError::MissingCollection`] if a set-belonging operator lacks
    /// its set or range, and [`ExprError::MisplacedCollection`] if a set or
    /// range appears anywhere else.
    pub fn new(operator: impl Into<Operator>, left: Expr, right: Expr) -> Result<Self, ExprError> {
        let operator = operator.into();
        check_arity(operator, Arity::Binary, 2)?;
        ensure_value(&left)?;
        if operator.is_set_belonging() {
            if !right.is_collection() {
                debug!(%operator, found = %right.kind(), "rejecting set-belonging node without a collection");
                return Err(ExprError::MissingCollection {
                    operator,
                    found: right.kind(),
                });
            }
        } else {
            ensure_value(&right)?;
        }
        Ok(Self {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the left operand.
    #[must_use]
    pub fn left(&self) -> &Expr {
        &self.left
    }

    /// Returns the right operand.
    #[must_use]
    pub fn right(&self) -> &Expr {
        &self.right
    }
}

/// An n-ary operator applied to an ordered, non-empty list of operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NaryExpr {
    operator: Operator,
    operands: Vec<Expr>,
}

impl NaryExpr {
    /// Creates an n-ary node.
    ///
    /// A single operand is accepted; an empty list is not.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::InvalidArity`] if `operator` is not n-ary or
    /// `operands` is empty, and [`ExprError::MisplacedCollection`] if an
    /// operand is a set or range.
    pub fn new(operator: impl Into<Operator>, operands: Vec<Expr>) -> Result<Self, ExprError> {
        let operator = operator.into();
        check_arity(operator, Arity::Nary, operands.len())?;
        operands.iter().try_for_each(ensure_value)?;
        Ok(Self { operator, operands })
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the operands in order.
    #[must_use]
    pub fn operands(&self) -> &[Expr] {
        &self.operands
    }

    /// Returns the number of operands.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.operands.len()
    }
}

/// `if condition then if_true else if_false`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IfThenElse {
    condition: Box<Expr>,
    if_true: Box<Expr>,
    if_false: Box<Expr>,
}

impl IfThenElse {
    /// Creates a conditional node.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::MisplacedCollection`] if a branch or the
    /// condition is a set or range.
    pub fn new(condition: Expr, if_true: Expr, if_false: Expr) -> Result<Self, ExprError> {
        ensure_value(&condition)?;
        ensure_value(&if_true)?;
        ensure_value(&if_false)?;
        Ok(Self {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        })
    }

    /// Returns the condition.
    #[must_use]
    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    /// Returns the expression selected when the condition holds.
    #[must_use]
    pub fn if_true(&self) -> &Expr {
        &self.if_true
    }

    /// Returns the expression selected when the condition does not hold.
    #[must_use]
    pub fn if_false(&self) -> &Expr {
        &self.if_false
    }
}

/// The closed interval `[min, max]`.
///
/// `min > max` denotes the empty interval.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RangeExpr {
    min: Integer,
    max: Integer,
}

impl RangeExpr {
    /// Creates a range node.
    #[must_use]
    pub fn new(min: impl Into<Integer>, max: impl Into<Integer>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn min(&self) -> &Integer {
        &self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn max(&self) -> &Integer {
        &self.max
    }

    /// Returns true if `value` lies within the bounds.
    #[must_use]
    pub fn contains(&self, value: &Integer) -> bool {
        &self.min <= value && value <= &self.max
    }
}

/// An explicit, ordered set of expressions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetExpr {
    elements: Vec<Expr>,
}

impl SetExpr {
    /// Creates a set node.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::MisplacedCollection`] if an element is itself a
    /// set or range.
    pub fn new(elements: Vec<Expr>) -> Result<Self, ExprError> {
        elements.iter().try_for_each(ensure_value)?;
        Ok(Self { elements })
    }

    /// Returns the elements in order.
    #[must_use]
    pub fn elements(&self) -> &[Expr] {
        &self.elements
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the set has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// An intension expression.
///
/// Matching on this enum is the way to inspect a tree; [`Expr::accept`]
/// walks it in post-order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// An integer literal.
    Constant(Constant),
    /// A variable reference.
    Variable(Variable),
    /// A unary operation.
    Unary(UnaryExpr),
    /// A binary operation.
    Binary(BinaryExpr),
    /// An n-ary operation.
    Nary(NaryExpr),
    /// A conditional.
    IfThenElse(IfThenElse),
    /// A range, only valid as the right operand of `in`/`notin`.
    Range(RangeExpr),
    /// A set, only valid as the right operand of `in`/`notin`.
    Set(SetExpr),
}

impl Expr {
    /// Returns the kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Constant(_) => NodeKind::Constant,
            Expr::Variable(_) => NodeKind::Variable,
            Expr::Unary(_) => NodeKind::Unary,
            Expr::Binary(_) => NodeKind::Binary,
            Expr::Nary(_) => NodeKind::Nary,
            Expr::IfThenElse(_) => NodeKind::IfThenElse,
            Expr::Range(_) => NodeKind::Range,
            Expr::Set(_) => NodeKind::Set,
        }
    }

    /// Returns the operator of a unary, binary or n-ary node.
    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expr::Unary(node) => Some(node.operator),
            Expr::Binary(node) => Some(node.operator),
            Expr::Nary(node) => Some(node.operator),
            _ => None,
        }
    }

    /// Returns true if this node is a set or a range.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self, Expr::Range(_) | Expr::Set(_))
    }

    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// Returns the children of this node, in traversal order.
    #[must_use]
    pub fn children(&self) -> SmallVec<[&Expr; 4]> {
        match self {
            Expr::Constant(_) | Expr::Variable(_) | Expr::Range(_) => SmallVec::new(),
            Expr::Unary(node) => smallvec::smallvec![node.operand.as_ref()],
            Expr::Binary(node) => smallvec::smallvec![node.left.as_ref(), node.right.as_ref()],
            Expr::Nary(node) => node.operands.iter().collect(),
            Expr::IfThenElse(node) => {
                smallvec::smallvec![
                    node.condition.as_ref(),
                    node.if_true.as_ref(),
                    node.if_false.as_ref()
                ]
            }
            Expr::Set(node) => node.elements.iter().collect(),
        }
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            count += 1;
            pending.extend(expr.children());
        }
        count
    }

    /// Returns the depth of the tree; a lone leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(expr.children().into_iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    fn has_children(&self) -> bool {
        match self {
            Expr::Constant(_) | Expr::Variable(_) | Expr::Range(_) => false,
            Expr::Unary(_) | Expr::Binary(_) | Expr::IfThenElse(_) => true,
            Expr::Nary(node) => !node.operands.is_empty(),
            Expr::Set(node) => !node.elements.is_empty(),
        }
    }

    /// Moves every child that has children of its own into `out`,
    /// leaving an empty set in its place.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        let mut detach = |slot: &mut Expr| {
            if slot.has_children() {
                out.push(mem::replace(slot, Expr::empty()));
            }
        };
        match self {
            Expr::Constant(_) | Expr::Variable(_) | Expr::Range(_) => {}
            Expr::Unary(node) => detach(&mut node.operand),
            Expr::Binary(node) => {
                detach(&mut node.left);
                detach(&mut node.right);
            }
            Expr::Nary(node) => node.operands.iter_mut().for_each(detach),
            Expr::IfThenElse(node) => {
                detach(&mut node.condition);
                detach(&mut node.if_true);
                detach(&mut node.if_false);
            }
            Expr::Set(node) => node.elements.iter_mut().for_each(detach),
        }
    }

    fn empty() -> Self {
        Expr::Set(SetExpr {
            elements: Vec::new(),
        })
    }
}

// Dropping is iterative so that very deep trees cannot overflow the stack.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl From<Constant> for Expr {
    fn from(node: Constant) -> Self {
        Expr::Constant(node)
    }
}

impl From<Variable> for Expr {
    fn from(node: Variable) -> Self {
        Expr::Variable(node)
    }
}

impl From<UnaryExpr> for Expr {
    fn from(node: UnaryExpr) -> Self {
        Expr::Unary(node)
    }
}

impl From<BinaryExpr> for Expr {
    fn from(node: BinaryExpr) -> Self {
        Expr::Binary(node)
    }
}

impl From<NaryExpr> for Expr {
    fn from(node: NaryExpr) -> Self {
        Expr::Nary(node)
    }
}

impl From<IfThenElse> for Expr {
    fn from(node: IfThenElse) -> Self {
        Expr::IfThenElse(node)
    }
}

impl From<RangeExpr> for Expr {
    fn from(node: RangeExpr) -> Self {
        Expr::Range(node)
    }
}

impl From<SetExpr> for Expr {
    fn from(node: SetExpr) -> Self {
        Expr::Set(node)
    }
}

fn check_arity(operator: Operator, shape: Arity, found: usize) -> Result<(), ExprError> {
    if operator.arity() == shape && shape.accepts(found) {
        return Ok(());
    }
    debug!(%operator, expected = %operator.arity(), found, "rejecting node with mismatched arity");
    Err(ExprError::InvalidArity {
        operator,
        expected: operator.arity(),
        found,
    })
}

fn ensure_value(expr: &Expr) -> Result<(), ExprError> {
    if expr.is_collection() {
        debug!(kind = %expr.kind(), "rejecting collection used as a value");
        return Err(ExprError::MisplacedCollection { kind: expr.kind() });
    }
    Ok(())
}
