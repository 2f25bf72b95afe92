//! Property-based tests for the decomposition search.
//!
//! Tables are random descending sets of distinct denominations; targets,
//! tolerances and term limits are drawn around them. Every property is
//! checked against results decoded with the same truncated view.

use proptest::prelude::*;
use sake_core::constants::{DEFAULT_SEARCH_CAP, MAX_MAX_COUNT, MIN_MAX_COUNT};
use sake_core::{DenominationTable, NeverStop, decode};
use sake_search::{Decomposer, DecompositionRequest, SearchConfig};
use sake_tests::helpers::decompose_values;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_table() -> impl Strategy<Value = DenominationTable> {
    prop::collection::btree_set(1u64..2_000, 1..24).prop_map(|set| {
        DenominationTable::new(set.into_iter().rev().collect()).expect("descending")
    })
}

fn arb_request() -> impl Strategy<Value = DecompositionRequest> {
    (1u64..5_000, -5i64..60, MIN_MAX_COUNT..=MAX_MAX_COUNT)
        .prop_map(|(target, tolerance, max_count)| {
            DecompositionRequest::new(target, tolerance, max_count)
        })
}

// ---------------------------------------------------------------------------
// Result shape
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn results_decode_to_their_sum(table in arb_table(), req in arb_request()) {
        let found = decompose_values(req.target, req.tolerance, req.max_count, &table).unwrap();
        prop_assert!(found.len() <= DEFAULT_SEARCH_CAP);
        for (d, values) in &found {
            prop_assert!((1..=req.max_count).contains(&d.count), "count {} out of range", d.count);
            prop_assert_eq!(values.len(), d.count);
            prop_assert_eq!(values.iter().sum::<u64>(), d.sum);
            prop_assert!(values.windows(2).all(|w| w[0] >= w[1]), "not descending: {:?}", values);
        }
    }

    #[test]
    fn every_result_is_terminal(table in arb_table(), req in arb_request()) {
        let found = decompose_values(req.target, req.tolerance, req.max_count, &table).unwrap();
        for (d, _) in &found {
            let shortfall = req.target as i128 - d.sum as i128;
            prop_assert!(
                shortfall < req.tolerance as i128 || d.count == req.max_count,
                "sum {} count {} is not terminal", d.sum, d.count
            );
        }
    }

    #[test]
    fn sums_never_exceed_target(table in arb_table(), req in arb_request()) {
        let found = decompose_values(req.target, req.tolerance, req.max_count, &table).unwrap();
        for (d, _) in &found {
            prop_assert!(d.sum <= req.target);
        }
    }

    #[test]
    fn encoding_holds_exactly_count_indices(table in arb_table(), req in arb_request()) {
        let usable = table.usable_for(req.target).unwrap();
        let found = decompose_values(req.target, req.tolerance, req.max_count, &table).unwrap();
        for (d, values) in &found {
            let raw = d.encoding.raw();
            if d.count < MAX_MAX_COUNT {
                prop_assert_eq!(raw >> (8 * d.count as u32), 0);
            }
            prop_assert!(d.encoding.indices(d.count).all(|i| (i as usize) < usable.len()));
            prop_assert_eq!(&decode(raw, d.count, &usable).unwrap(), values);
        }
    }
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parallel_equals_sequential(table in arb_table(), req in arb_request()) {
        let sequential = Decomposer::default().run(&table, req, &NeverStop).unwrap();
        let parallel = Decomposer::new(SearchConfig { parallel: true, ..SearchConfig::default() })
            .unwrap()
            .run(&table, req, &NeverStop)
            .unwrap();
        prop_assert_eq!(parallel.decompositions, sequential.decompositions);
        prop_assert_eq!(parallel.completion, sequential.completion);
    }

    #[test]
    fn small_caps_return_a_prefix(table in arb_table(), req in arb_request(), cap in 1usize..50) {
        let full = Decomposer::default().run(&table, req, &NeverStop).unwrap();
        let capped = Decomposer::new(SearchConfig { search_cap: cap, ..SearchConfig::default() })
            .unwrap()
            .run(&table, req, &NeverStop)
            .unwrap();
        let expected = cap.min(full.decompositions.len());
        prop_assert_eq!(&capped.decompositions[..], &full.decompositions[..expected]);
    }
}
