//! Collection of the variables an expression depends on.

use intension_core::{
    BinaryExpr, Constant, Expr, IfThenElse, NaryExpr, RangeExpr, SetExpr, TraversalError,
    UnaryExpr, Variable, Visitor,
};
use rustc_hash::FxHashSet;

/// A visitor gathering distinct variable identifiers in order of first
/// occurrence.
#[derive(Debug, Default)]
pub struct ScopeCollector {
    seen: FxHashSet<String>,
    order: Vec<String>,
}

impl ScopeCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifiers collected so far.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.order
    }

    /// Consumes the collector and returns the identifiers.
    #[must_use]
    pub fn into_variables(self) -> Vec<String> {
        self.order
    }
}

impl Visitor for ScopeCollector {
    type Error = TraversalError;

    fn visit_constant(&mut self, _node: &Constant) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_variable(&mut self, node: &Variable) -> Result<(), Self::Error> {
        if !self.seen.contains(node.id()) {
            self.seen.insert(node.id().to_owned());
            self.order.push(node.id().to_owned());
        }
        Ok(())
    }

    fn visit_unary(&mut self, _node: &UnaryExpr) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_binary(&mut self, _node: &BinaryExpr) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_nary(&mut self, _node: &NaryExpr) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_if_then_else(&mut self, _node: &IfThenElse) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_range(&mut self, _node: &RangeExpr) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_set(&mut self, _node: &SetExpr) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Returns the distinct variables of `expr`, in order of first occurrence.
#[must_use]
pub fn scope(expr: &Expr) -> Vec<String> {
    let mut collector = ScopeCollector::new();
    let walked = expr.accept(&mut collector);
    debug_assert!(walked.is_ok(), "an unbounded walk of the scope collector failed");
    collector.into_variables()
}

#[cfg(test)]
mod tests {
    use super::*;
    use intension_core::factory::{add, constant, in_set, ite, lt, mult, sub, variable};

    #[test]
    fn test_first_occurrence_order() {
        let expr = ite(
            lt(variable("x"), variable("y")).unwrap(),
            add([variable("z"), variable("x")]).unwrap(),
            sub(variable("y"), constant(1)).unwrap(),
        )
        .unwrap();
        assert_eq!(scope(&expr), ["x", "y", "z"]);
    }

    #[test]
    fn test_set_elements_are_scanned() {
        let expr = in_set(variable("a"), [variable("b"), constant(3), variable("a")]).unwrap();
        assert_eq!(scope(&expr), ["a", "b"]);
    }

    #[test]
    fn test_constant_has_empty_scope() {
        assert!(scope(&mult([constant(2), constant(3)]).unwrap()).is_empty());
    }

    #[test]
    fn test_deep_tree_scope() {
        let mut expr = variable("deep");
        for i in 0..50_000i64 {
            expr = add([expr, constant(i)]).unwrap();
        }
        expr = lt(expr, variable("bound")).unwrap();
        assert_eq!(scope(&expr), ["deep", "bound"]);
    }

    #[test]
    fn test_collector_accumulates_across_trees() {
        let mut collector = ScopeCollector::new();
        variable("p").accept(&mut collector).unwrap();
        lt(variable("q"), variable("p")).unwrap().accept(&mut collector).unwrap();
        assert_eq!(collector.variables(), ["p", "q"]);
    }
}
