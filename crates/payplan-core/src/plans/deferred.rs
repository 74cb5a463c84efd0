use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::fees;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PayPlanResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a deferred payment quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredInput {
    /// Total contract price
    pub tcp: Money,
    pub reservation_fee: Money,
    pub registration_fee_percent: Percent,
    pub move_in_fee_percent: Percent,
    /// Candidate term lengths in months; non-positive entries are skipped
    #[serde(default)]
    pub terms: Vec<i32>,
    #[serde(default = "crate::types::default_true")]
    pub use_net_of_vat: bool,
}

/// Itemized deferred payment breakdown: the full price spread evenly over
/// each candidate term, no discount, no interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeferredResult {
    pub tcp: Money,
    pub reservation_fee: Money,
    /// TCP less the reservation fee — the amount amortized
    pub ntcp: Money,
    pub tlp: Money,
    pub registration_fee: Money,
    pub move_in_fee: Money,
    pub monthly_amortizations: BTreeMap<i32, Money>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute the deferred payment breakdown for every positive term length.
pub fn compute(input: &DeferredInput) -> PayPlanResult<ComputationOutput<DeferredResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    fees::validate_contract(input.tcp, input.reservation_fee)?;
    fees::validate_percent("registration_fee_percent", input.registration_fee_percent)?;
    fees::validate_percent("move_in_fee_percent", input.move_in_fee_percent)?;

    let ntcp = input.tcp - input.reservation_fee;
    let tlp = fees::total_list_price(input.tcp, input.tcp);
    let registration_fee = fees::registration_fee(
        input.tcp,
        tlp,
        input.registration_fee_percent,
        input.use_net_of_vat,
    );
    let move_in_fee = fees::move_in_fee(tlp, input.move_in_fee_percent);

    if ntcp < Decimal::ZERO {
        warnings.push(format!(
            "Amortizable amount {ntcp} is negative — reservation fee exceeds the contract price"
        ));
    }

    let monthly_amortizations: BTreeMap<i32, Money> = input
        .terms
        .iter()
        .filter(|&&term| term > 0)
        .map(|&term| (term, ntcp / Decimal::from(term)))
        .collect();

    let result = DeferredResult {
        tcp: input.tcp,
        reservation_fee: input.reservation_fee,
        ntcp,
        tlp,
        registration_fee,
        move_in_fee,
        monthly_amortizations,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Deferred Payment Plan (zero interest)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_input() -> DeferredInput {
        DeferredInput {
            tcp: dec!(8_000_000),
            reservation_fee: dec!(50_000),
            registration_fee_percent: dec!(6),
            move_in_fee_percent: dec!(1.5),
            terms: vec![12, 18, 24],
            use_net_of_vat: true,
        }
    }

    #[test]
    fn worked_example_three_terms() {
        let r = compute(&sample_input()).unwrap().result;

        assert_eq!(r.ntcp, dec!(7_950_000));
        assert_eq!(r.monthly_amortizations.len(), 3);
        assert_eq!(r.monthly_amortizations[&12], dec!(662_500));
        assert_eq!(r.monthly_amortizations[&18].round_dp(2), dec!(441_666.67));
        assert_eq!(r.monthly_amortizations[&24], dec!(331_250));
    }

    #[test]
    fn non_positive_terms_are_skipped() {
        let mut input = sample_input();
        input.terms = vec![0, -6, 12];
        let r = compute(&input).unwrap().result;

        assert_eq!(r.monthly_amortizations.len(), 1);
        assert!(r.monthly_amortizations.contains_key(&12));
    }

    #[test]
    fn empty_terms_yield_empty_mapping() {
        let mut input = sample_input();
        input.terms = Vec::new();
        let r = compute(&input).unwrap().result;
        assert!(r.monthly_amortizations.is_empty());
    }

    #[test]
    fn tlp_on_undiscounted_tcp() {
        let r = compute(&sample_input()).unwrap().result;
        assert_eq!(r.tlp, dec!(8_000_000) / dec!(1.12));
        assert_eq!(r.registration_fee, r.tlp * dec!(0.06));
        assert_eq!(r.move_in_fee, r.tlp * dec!(0.015));
    }

    #[test]
    fn reservation_fee_above_tcp_warns() {
        let mut input = sample_input();
        input.tcp = dec!(40_000);
        let out = compute(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("negative")));
    }
}
