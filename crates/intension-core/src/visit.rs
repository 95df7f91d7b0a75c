//! Post-order traversal of expression trees.
//!
//! A [`Visitor`] has one callback per node kind. The [`Walker`] calls them
//! in post-order: every child of a node is visited, left to right, before
//! the node itself. Encoders rely on this to find the encoding of all
//! operands already available when an operator node is reached.
//!
//! The walk uses an explicit stack, so its memory use is proportional to
//! the tree size and never to the call-stack depth.

use smallvec::SmallVec;
use tracing::trace;

use crate::error::TraversalError;
use crate::expr::{
    BinaryExpr, Constant, Expr, IfThenElse, NaryExpr, NodeKind, RangeExpr, SetExpr, UnaryExpr,
    Variable,
};

/// Callbacks invoked by a post-order walk.
///
/// Every method defaults to failing with [`TraversalError::Unsupported`],
/// so an implementation only overrides the kinds it knows how to handle.
/// Errors are returned to the caller of the walk unchanged.
pub trait Visitor {
    /// The error produced by this visitor.
    type Error: From<TraversalError>;

    /// Visits a constant.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support constants.
    fn visit_constant(&mut self, node: &Constant) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::Constant).into())
    }

    /// Visits a variable.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support variables.
    fn visit_variable(&mut self, node: &Variable) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::Variable).into())
    }

    /// Visits a unary node, after its operand.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support unary nodes.
    fn visit_unary(&mut self, node: &UnaryExpr) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::Unary).into())
    }

    /// Visits a binary node, after its left then right operand.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support binary nodes.
    fn visit_binary(&mut self, node: &BinaryExpr) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::Binary).into())
    }

    /// Visits an n-ary node, after all its operands in order.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support n-ary nodes.
    fn visit_nary(&mut self, node: &NaryExpr) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::Nary).into())
    }

    /// Visits a conditional, after its condition and both branches.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support conditionals.
    fn visit_if_then_else(&mut self, node: &IfThenElse) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::IfThenElse).into())
    }

    /// Visits a range.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support ranges.
    fn visit_range(&mut self, node: &RangeExpr) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::Range).into())
    }

    /// Visits a set, after all its elements in order.
    ///
    /// # Errors
    ///
    /// Fails if the visitor does not support sets.
    fn visit_set(&mut self, node: &SetExpr) -> Result<(), Self::Error> {
        let _ = node;
        Err(TraversalError::Unsupported(NodeKind::Set).into())
    }
}

/// Configuration for a [`Walker`].
#[derive(Clone, Debug, Default)]
pub struct WalkConfig {
    /// Maximum accepted tree depth; `None` for no limit.
    pub max_depth: Option<usize>,
}

impl WalkConfig {
    /// Sets the maximum accepted tree depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Drives a [`Visitor`] over a tree in post-order.
#[derive(Clone, Debug, Default)]
pub struct Walker {
    config: WalkConfig,
}

struct Frame<'a> {
    expr: &'a Expr,
    depth: usize,
    expanded: bool,
}

impl Walker {
    /// Creates a walker with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a walker with a custom configuration.
    #[must_use]
    pub fn with_config(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of this walker.
    #[must_use]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walks `root` in post-order, invoking `visitor` once per node.
    ///
    /// # Errors
    ///
    /// Stops at the first error returned by the visitor and returns it. A
    /// node deeper than [`WalkConfig::max_depth`] fails with
    /// [`TraversalError::DepthExceeded`]; nodes reached before it have
    /// already been visited.
    pub fn walk<V: Visitor + ?Sized>(&self, root: &Expr, visitor: &mut V) -> Result<(), V::Error> {
        let mut stack: SmallVec<[Frame<'_>; 32]> = SmallVec::new();
        stack.push(Frame {
            expr: root,
            depth: 1,
            expanded: false,
        });

        while let Some(frame) = stack.pop() {
            if frame.expanded {
                trace!(kind = %frame.expr.kind(), depth = frame.depth, "visit");
                dispatch(frame.expr, visitor)?;
                continue;
            }
            if let Some(limit) = self.config.max_depth {
                if frame.depth > limit {
                    return Err(TraversalError::DepthExceeded { limit }.into());
                }
            }
            let children = frame.expr.children();
            stack.push(Frame {
                expanded: true,
                ..frame
            });
            stack.extend(children.into_iter().rev().map(|child| Frame {
                expr: child,
                depth: frame.depth + 1,
                expanded: false,
            }));
        }
        Ok(())
    }
}

fn dispatch<V: Visitor + ?Sized>(expr: &Expr, visitor: &mut V) -> Result<(), V::Error> {
    match expr {
        Expr::Constant(node) => visitor.visit_constant(node),
        Expr::Variable(node) => visitor.visit_variable(node),
        Expr::Unary(node) => visitor.visit_unary(node),
        Expr::Binary(node) => visitor.visit_binary(node),
        Expr::Nary(node) => visitor.visit_nary(node),
        Expr::IfThenElse(node) => visitor.visit_if_then_else(node),
        Expr::Range(node) => visitor.visit_range(node),
        Expr::Set(node) => visitor.visit_set(node),
    }
}

impl Expr {
    /// Walks this tree in post-order with the default [`Walker`].
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `visitor`.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        Walker::new().walk(self, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{add, constant, ite, lt, sub, variable};

    /// Logs a token per visited node.
    #[derive(Default)]
    struct Log(Vec<String>);

    impl Visitor for Log {
        type Error = TraversalError;

        fn visit_constant(&mut self, node: &Constant) -> Result<(), Self::Error> {
            self.0.push(node.value().to_string());
            Ok(())
        }

        fn visit_variable(&mut self, node: &Variable) -> Result<(), Self::Error> {
            self.0.push(node.id().to_string());
            Ok(())
        }

        fn visit_binary(&mut self, node: &BinaryExpr) -> Result<(), Self::Error> {
            self.0.push(node.operator().to_string());
            Ok(())
        }

        fn visit_nary(&mut self, node: &NaryExpr) -> Result<(), Self::Error> {
            self.0.push(node.operator().to_string());
            Ok(())
        }

        fn visit_if_then_else(&mut self, _node: &IfThenElse) -> Result<(), Self::Error> {
            self.0.push("ite".to_string());
            Ok(())
        }
    }

    fn sample() -> Expr {
        ite(
            lt(variable("x"), constant(3)).unwrap(),
            add([variable("x"), constant(1)]).unwrap(),
            sub(variable("x"), constant(1)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_post_order() {
        let mut log = Log::default();
        sample().accept(&mut log).unwrap();
        assert_eq!(
            log.0,
            ["x", "3", "lt", "x", "1", "add", "x", "1", "sub", "ite"]
        );
    }

    #[test]
    fn test_unsupported_kind_propagates() {
        let expr = crate::factory::neg(variable("x")).unwrap();
        let mut log = Log::default();
        let err = expr.accept(&mut log).unwrap_err();
        assert_eq!(err, TraversalError::Unsupported(NodeKind::Unary));
        // The operand was visited before the failing node.
        assert_eq!(log.0, ["x"]);
    }

    #[test]
    fn test_depth_limit() {
        let walker = Walker::with_config(WalkConfig::default().with_max_depth(2));
        let mut log = Log::default();
        let err = walker.walk(&sample(), &mut log).unwrap_err();
        assert_eq!(err, TraversalError::DepthExceeded { limit: 2 });

        let walker = Walker::with_config(WalkConfig::default().with_max_depth(3));
        let mut log = Log::default();
        walker.walk(&sample(), &mut log).unwrap();
        assert_eq!(log.0.len(), 10);
    }

    #[test]
    fn test_independent_visitors() {
        let expr = sample();
        let mut first = Log::default();
        let mut second = Log::default();
        expr.accept(&mut first).unwrap();
        expr.accept(&mut second).unwrap();
        expr.accept(&mut first).unwrap();
        assert_eq!(first.0.len(), 2 * second.0.len());
        assert_eq!(first.0[..10], second.0[..]);
    }

    #[test]
    fn test_deep_walk() {
        struct Counter(usize);
        impl Visitor for Counter {
            type Error = TraversalError;
            fn visit_variable(&mut self, _node: &Variable) -> Result<(), Self::Error> {
                self.0 += 1;
                Ok(())
            }
            fn visit_unary(&mut self, _node: &UnaryExpr) -> Result<(), Self::Error> {
                self.0 += 1;
                Ok(())
            }
        }

        let mut expr = variable("x");
        for _ in 0..100_000 {
            expr = crate::factory::not(expr).unwrap();
        }

        let mut counter = Counter(0);
        expr.accept(&mut counter).unwrap();
        assert_eq!(counter.0, 100_001);
    }

    #[test]
    fn test_walker_config() {
        assert_eq!(Walker::new().config().max_depth, None);
        let walker = Walker::with_config(WalkConfig::default().with_max_depth(7));
        assert_eq!(walker.config().max_depth, Some(7));
    }
}
