//! Property-based tests for the evaluator against native arithmetic.

#[cfg(test)]
mod tests {
    use intension_core::factory::{
        add, constant, dist, div, ge, in_range, lt, max, min, modulo, mult, not, not_in_range,
        sub, variable,
    };
    use intension_core::Integer;
    use proptest::prelude::*;

    use crate::eval::{evaluate, Assignment};
    use crate::scope::scope;

    fn env(x: i64, y: i64) -> Assignment {
        [("x", x), ("y", y)]
            .into_iter()
            .map(|(id, value)| (id.to_owned(), Integer::new(value)))
            .collect()
    }

    fn eval(expr: &intension_core::Expr, x: i64, y: i64) -> i64 {
        evaluate(expr, &env(x, y)).unwrap().to_i64().unwrap()
    }

    fn x() -> intension_core::Expr {
        variable("x")
    }

    fn y() -> intension_core::Expr {
        variable("y")
    }

    proptest! {
        #[test]
        fn arithmetic_matches_i64(a in -10_000i64..10_000, b in -10_000i64..10_000) {
            prop_assert_eq!(eval(&add([x(), y()]).unwrap(), a, b), a + b);
            prop_assert_eq!(eval(&sub(x(), y()).unwrap(), a, b), a - b);
            prop_assert_eq!(eval(&mult([x(), y()]).unwrap(), a, b), a * b);
            prop_assert_eq!(eval(&dist(x(), y()).unwrap(), a, b), (a - b).abs());
            prop_assert_eq!(eval(&min([x(), y()]).unwrap(), a, b), a.min(b));
            prop_assert_eq!(eval(&max([x(), y()]).unwrap(), a, b), a.max(b));
        }

        #[test]
        fn division_truncates(a in -10_000i64..10_000, b in -100i64..100) {
            prop_assume!(b != 0);
            prop_assert_eq!(eval(&div(x(), y()).unwrap(), a, b), a / b);
            prop_assert_eq!(eval(&modulo(x(), y()).unwrap(), a, b), a % b);
        }

        #[test]
        fn relation_and_negation_disagree(a in -50i64..50, b in -50i64..50) {
            let holds = eval(&lt(x(), y()).unwrap(), a, b);
            let negated = eval(&ge(x(), y()).unwrap(), a, b);
            prop_assert_eq!(holds + negated, 1);
            prop_assert_eq!(eval(&not(lt(x(), y()).unwrap()).unwrap(), a, b), negated);
        }

        #[test]
        fn range_membership_is_inclusive(a in -20i64..20, lo in -10i64..10, len in 0i64..10) {
            let hi = lo + len;
            let inside = i64::from(lo <= a && a <= hi);
            prop_assert_eq!(eval(&in_range(x(), lo, hi).unwrap(), a, 0), inside);
            prop_assert_eq!(eval(&not_in_range(x(), lo, hi).unwrap(), a, 0), 1 - inside);
        }

        #[test]
        fn constants_need_no_assignment(a in any::<i64>()) {
            let expr = constant(a);
            prop_assert!(scope(&expr).is_empty());
            prop_assert_eq!(evaluate(&expr, &Assignment::default()).unwrap(), Integer::new(a));
        }
    }
}
