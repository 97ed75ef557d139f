//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that amount scaling and transaction
//! normalization maintain their invariants across random inputs.

use num_bigint::BigUint;
use proptest::prelude::*;

use tezos_gateway::domain::amount::{format_amount, parse_amount};
use tezos_gateway::domain::transaction::{normalize_transaction, OperationContent};

fn content(counter: u64, gas: u64, storage: u64, amount: u64) -> OperationContent {
    OperationContent {
        source: "tz1source".to_string(),
        destination: "KT1dest".to_string(),
        counter: counter.to_string(),
        gas_limit: gas.to_string(),
        storage_limit: storage.to_string(),
        amount: amount.to_string(),
        parameters: None,
    }
}

// ── Normalizer Properties ───────────────────────────────────

proptest! {
    /// gasLimit must equal the decimal string of gas_limit + storage_limit
    /// for arbitrary non-negative budgets.
    #[test]
    fn gas_limit_is_sum_of_budgets(
        counter in 0u64..=u64::MAX,
        gas in 0u64..=u64::MAX,
        storage in 0u64..=u64::MAX,
    ) {
        let tx = normalize_transaction(&content(counter, gas, storage, 0), "oo1", "chain")
            .unwrap();
        let expected = (u128::from(gas) + u128::from(storage)).to_string();
        prop_assert_eq!(tx.gas_limit, expected);
    }

    /// The normalized value must pass through unscaled, whatever the amount.
    #[test]
    fn value_passes_through_raw(amount in 0u64..=u64::MAX) {
        let tx = normalize_transaction(&content(1, 0, 0, amount), "oo1", "chain").unwrap();
        prop_assert_eq!(tx.value, amount.to_string());
    }
}

// ── Amount Scaling Properties ───────────────────────────────

proptest! {
    /// Formatting a raw amount and parsing it back must be the identity.
    #[test]
    fn format_then_parse_roundtrips(raw in any::<u64>(), decimals in 0u32..=12) {
        let text = format_amount(&BigUint::from(raw), decimals);
        let back = parse_amount(&text, decimals).unwrap();
        prop_assert_eq!(back, BigUint::from(raw));
    }

    /// Formatted amounts always carry exactly `decimals` fractional digits.
    #[test]
    fn format_has_fixed_precision(raw in any::<u64>(), decimals in 1u32..=12) {
        let text = format_amount(&BigUint::from(raw), decimals);
        let (_, fraction) = text.split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), decimals as usize);
    }

    /// Parsing a whole number scales it by exactly 10^decimals.
    #[test]
    fn parse_scales_whole_numbers(units in 0u64..1_000_000_000u64, decimals in 0u32..=12) {
        let raw = parse_amount(&units.to_string(), decimals).unwrap();
        let expected = BigUint::from(units) * BigUint::from(10u32).pow(decimals);
        prop_assert_eq!(raw, expected);
    }
}
