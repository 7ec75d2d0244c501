//! Property-based tests for couponhub
//!
//! These tests verify invariants that must hold for all inputs:
//! - The filter compiler never panics and never leaks values into SQL text
//! - Placeholder numbering is contiguous from 1 for any criteria subset
//! - Draft validation never produces empty required fields or empty-string
//!   optionals
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;

// ============================================================================
// FILTER COMPILER TESTS
// ============================================================================

mod filter_tests {
    use super::*;
    use couponhub::storage::filter::{compile, BoundValue};
    use couponhub::types::SearchQuery;

    fn intent_strategy() -> impl Strategy<Value = SearchQuery> {
        (
            proptest::option::of("\\PC{0,40}"),
            proptest::option::of("\\PC{0,40}"),
            proptest::option::of("\\PC{0,40}"),
            proptest::option::of("\\PC{0,40}"),
            proptest::option::of(-100i64..1000),
        )
            .prop_map(|(query, merchant, category, country, limit)| SearchQuery {
                query,
                merchant,
                category,
                country,
                limit,
            })
    }

    proptest! {
        /// Invariant: compilation never panics on any intent
        #[test]
        fn never_panics(intent in intent_strategy()) {
            let _ = compile(&intent);
        }

        /// Invariant: one binding per predicate, in the same order
        #[test]
        fn bindings_match_predicates(intent in intent_strategy()) {
            let plan = compile(&intent);
            prop_assert_eq!(plan.predicates().len(), plan.bindings().len());
        }

        /// Invariant: placeholder indices are contiguous from 1, and the
        /// row cap takes the next index
        #[test]
        fn placeholders_are_contiguous(intent in intent_strategy()) {
            let plan = compile(&intent);
            for (i, predicate) in plan.predicates().iter().enumerate() {
                prop_assert!(
                    predicate.contains(&format!("?{}", i + 1)),
                    "predicate {} missing placeholder ?{}: {}",
                    i, i + 1, predicate
                );
            }
            prop_assert_eq!(plan.limit_placeholder(), plan.bindings().len() + 1);
        }

        /// Invariant: the resolved limit is always positive
        #[test]
        fn limit_is_positive(intent in intent_strategy()) {
            prop_assert!(compile(&intent).limit() > 0);
        }

        /// Invariant: quote-bearing values never reach clause text; they
        /// travel only through the binding list
        #[test]
        fn values_stay_out_of_sql(value in "[a-z]{2,8}'[a-z]{2,8}") {
            let intent = SearchQuery {
                query: Some(value.clone()),
                ..Default::default()
            };
            let plan = compile(&intent);
            prop_assert!(!plan.where_clause().contains(&value));
            prop_assert_eq!(
                plan.bindings(),
                &[BoundValue::Text(format!("%{}%", value))]
            );
        }

        /// Invariant: compilation is deterministic
        #[test]
        fn compilation_is_deterministic(intent in intent_strategy()) {
            prop_assert_eq!(compile(&intent), compile(&intent));
        }
    }
}

// ============================================================================
// DRAFT VALIDATION TESTS
// ============================================================================

mod validation_tests {
    use super::*;
    use couponhub::types::CouponDraft;

    fn draft_strategy() -> impl Strategy<Value = CouponDraft> {
        (
            proptest::option::of("\\PC{0,20}"),
            proptest::option::of("\\PC{0,20}"),
            proptest::option::of("\\PC{0,20}"),
            proptest::option::of("\\PC{0,20}"),
            proptest::option::of(-10.0f64..1000.0),
        )
            .prop_map(|(title, description, merchant_name, code, price)| CouponDraft {
                title,
                description,
                merchant_name,
                code,
                price,
                ..Default::default()
            })
    }

    proptest! {
        /// Invariant: validation never panics
        #[test]
        fn never_panics(draft in draft_strategy()) {
            let _ = draft.validate();
        }

        /// Invariant: a validated payload has non-blank required fields and
        /// no empty-string optionals
        #[test]
        fn valid_payloads_are_well_formed(draft in draft_strategy()) {
            if let Ok(payload) = draft.validate() {
                prop_assert!(!payload.title.trim().is_empty());
                prop_assert!(!payload.description.trim().is_empty());
                prop_assert!(!payload.merchant_name.trim().is_empty());
                if let Some(code) = &payload.code {
                    prop_assert!(!code.trim().is_empty());
                }
                if let Some(price) = payload.price {
                    prop_assert!(price >= 0.0);
                }
            }
        }
    }
}
