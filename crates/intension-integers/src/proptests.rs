//! Property-based tests for arbitrary precision arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::Integer;

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn integer_additive_inverse(a in small_int()) {
            let a = Integer::new(a);
            let neg_a = -&a;
            prop_assert!((a + neg_a).is_zero());
        }

        // Division matches the primitive truncating semantics.

        #[test]
        fn division_matches_i64(a in small_int(), b in non_zero_int()) {
            let q = &Integer::new(a) / &Integer::new(b);
            let r = &Integer::new(a) % &Integer::new(b);
            prop_assert_eq!(q.to_i64(), Some(a / b));
            prop_assert_eq!(r.to_i64(), Some(a % b));
        }

        #[test]
        fn division_identity(a in small_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let q = &a / &b;
            let r = &a % &b;
            prop_assert_eq!(&q * &b + r, a);
        }

        #[test]
        fn display_parse_agree(a in any::<i64>()) {
            let parsed: Integer = a.to_string().parse().unwrap();
            prop_assert_eq!(parsed, Integer::new(a));
        }
    }
}
