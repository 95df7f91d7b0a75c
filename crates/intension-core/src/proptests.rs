//! Property-based tests for tree construction and traversal.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::expr::{
        BinaryExpr, Constant, Expr, IfThenElse, NaryExpr, NodeKind, RangeExpr, SetExpr,
        UnaryExpr, Variable,
    };
    use crate::factory::{
        abs, add, and, constant, implies, in_range, in_set, ite, lt, max, neg, not, not_in_range,
        sub, variable,
    };
    use crate::visit::Visitor;
    use crate::TraversalError;

    fn leaf() -> impl Strategy<Value = Expr> {
        prop_oneof![
            (-50i64..50).prop_map(constant),
            prop::sample::select(vec!["x", "y", "z"]).prop_map(variable),
        ]
    }

    fn tree() -> impl Strategy<Value = Expr> {
        leaf().prop_recursive(5, 64, 4, |inner| {
            let unary = prop_oneof![
                inner.clone().prop_map(|e| neg(e).unwrap()),
                inner.clone().prop_map(|e| abs(e).unwrap()),
                inner.clone().prop_map(|e| not(e).unwrap()),
            ];
            let binary = prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| sub(a, b).unwrap()),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| lt(a, b).unwrap()),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| implies(a, b).unwrap()),
            ];
            let nary = prop_oneof![
                prop::collection::vec(inner.clone(), 1..4).prop_map(|v| add(v).unwrap()),
                prop::collection::vec(inner.clone(), 1..4).prop_map(|v| and(v).unwrap()),
                prop::collection::vec(inner.clone(), 1..4).prop_map(|v| max(v).unwrap()),
            ];
            let other = prop_oneof![
                (inner.clone(), inner.clone(), inner.clone())
                    .prop_map(|(c, t, f)| ite(c, t, f).unwrap()),
                (inner.clone(), -5i64..5, 0i64..5)
                    .prop_map(|(e, lo, len)| in_range(e, lo, lo + len).unwrap()),
                (inner.clone(), -5i64..5)
                    .prop_map(|(e, lo)| not_in_range(e, lo, lo + 2).unwrap()),
                (inner.clone(), prop::collection::vec(inner, 0..3))
                    .prop_map(|(e, set)| in_set(e, set).unwrap()),
            ];
            prop_oneof![unary, binary, nary, other]
        })
    }

    /// Replays the walk as a stack machine: each node pops the sizes of its
    /// children and pushes the size of its own subtree.
    #[derive(Default)]
    struct SubtreeSizes(Vec<usize>);

    impl SubtreeSizes {
        fn reduce(&mut self, children: usize) -> Result<(), TraversalError> {
            let at = self
                .0
                .len()
                .checked_sub(children)
                .expect("a child was not visited before its parent");
            let size: usize = self.0.drain(at..).sum();
            self.0.push(size + 1);
            Ok(())
        }
    }

    impl Visitor for SubtreeSizes {
        type Error = TraversalError;

        fn visit_constant(&mut self, _node: &Constant) -> Result<(), Self::Error> {
            self.reduce(0)
        }

        fn visit_variable(&mut self, _node: &Variable) -> Result<(), Self::Error> {
            self.reduce(0)
        }

        fn visit_unary(&mut self, _node: &UnaryExpr) -> Result<(), Self::Error> {
            self.reduce(1)
        }

        fn visit_binary(&mut self, _node: &BinaryExpr) -> Result<(), Self::Error> {
            self.reduce(2)
        }

        fn visit_nary(&mut self, node: &NaryExpr) -> Result<(), Self::Error> {
            self.reduce(node.arity())
        }

        fn visit_if_then_else(&mut self, _node: &IfThenElse) -> Result<(), Self::Error> {
            self.reduce(3)
        }

        fn visit_range(&mut self, _node: &RangeExpr) -> Result<(), Self::Error> {
            self.reduce(0)
        }

        fn visit_set(&mut self, node: &SetExpr) -> Result<(), Self::Error> {
            self.reduce(node.len())
        }
    }

    /// Reference post-order, written recursively.
    fn post_order(expr: &Expr, out: &mut Vec<NodeKind>) {
        for child in expr.children() {
            post_order(child, out);
        }
        out.push(expr.kind());
    }

    /// Collects the kinds the walker reports.
    #[derive(Default)]
    struct Kinds(Vec<NodeKind>);

    impl Visitor for Kinds {
        type Error = TraversalError;

        fn visit_constant(&mut self, _node: &Constant) -> Result<(), Self::Error> {
            self.0.push(NodeKind::Constant);
            Ok(())
        }

        fn visit_variable(&mut self, _node: &Variable) -> Result<(), Self::Error> {
            self.0.push(NodeKind::Variable);
            Ok(())
        }

        fn visit_unary(&mut self, _node: &UnaryExpr) -> Result<(), Self::Error> {
            self.0.push(NodeKind::Unary);
            Ok(())
        }

        fn visit_binary(&mut self, _node: &BinaryExpr) -> Result<(), Self::Error> {
            self.0.push(NodeKind::Binary);
            Ok(())
        }

        fn visit_nary(&mut self, _node: &NaryExpr) -> Result<(), Self::Error> {
            self.0.push(NodeKind::Nary);
            Ok(())
        }

        fn visit_if_then_else(&mut self, _node: &IfThenElse) -> Result<(), Self::Error> {
            self.0.push(NodeKind::IfThenElse);
            Ok(())
        }

        fn visit_range(&mut self, _node: &RangeExpr) -> Result<(), Self::Error> {
            self.0.push(NodeKind::Range);
            Ok(())
        }

        fn visit_set(&mut self, _node: &SetExpr) -> Result<(), Self::Error> {
            self.0.push(NodeKind::Set);
            Ok(())
        }
    }

    /// True if sets and ranges only appear as the right operand of `in`/`notin`.
    fn collections_well_placed(root: &Expr) -> bool {
        if root.is_collection() {
            return false;
        }
        let mut pending = vec![root];
        while let Some(expr) = pending.pop() {
            for (index, child) in expr.children().into_iter().enumerate() {
                let allowed = match expr {
                    Expr::Binary(node) => index == 1 && node.operator().is_set_belonging(),
                    _ => false,
                };
                if child.is_collection() != allowed {
                    return false;
                }
                pending.push(child);
            }
        }
        true
    }

    proptest! {
        #[test]
        fn walk_is_post_order(expr in tree()) {
            let mut sizes = SubtreeSizes::default();
            expr.accept(&mut sizes).unwrap();
            prop_assert_eq!(sizes.0, vec![expr.node_count()]);
        }

        #[test]
        fn walk_matches_recursive_reference(expr in tree()) {
            let mut expected = Vec::new();
            post_order(&expr, &mut expected);
            let mut kinds = Kinds::default();
            expr.accept(&mut kinds).unwrap();
            prop_assert_eq!(kinds.0, expected);
        }

        #[test]
        fn factory_places_collections_correctly(expr in tree()) {
            prop_assert!(collections_well_placed(&expr));
        }

        #[test]
        fn clones_are_structurally_equal(expr in tree()) {
            let copy = expr.clone();
            prop_assert_eq!(&copy, &expr);

            let mut left = Kinds::default();
            let mut right = Kinds::default();
            expr.accept(&mut left).unwrap();
            copy.accept(&mut right).unwrap();
            prop_assert_eq!(left.0, right.0);
        }

        #[test]
        fn depth_bounds_node_count(expr in tree()) {
            prop_assert!(expr.depth() <= expr.node_count());
            prop_assert!(expr.depth() >= 1);
        }
    }
}
