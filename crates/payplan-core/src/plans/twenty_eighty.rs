use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::fees;
use crate::plans::balance::{self, Balance80Result};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PayPlanResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a 20/80 payment quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwentyEightyInput {
    /// Total contract price
    pub tcp: Money,
    pub reservation_fee: Money,
    pub registration_fee_percent: Percent,
    pub move_in_fee_percent: Percent,
    /// Candidate term lengths in months for the 20% down payment;
    /// non-positive entries are skipped
    #[serde(default)]
    pub terms_20: Vec<i32>,
    #[serde(default = "crate::types::default_true")]
    pub use_net_of_vat: bool,
}

/// Itemized 20/80 breakdown: the 20% down payment amortized per term with
/// an optional staggered registration fee, the 80% balance financed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwentyEightyResult {
    pub tcp: Money,
    pub down_payment: Money,
    pub reservation_fee: Money,
    /// Net down payment after the reservation fee
    pub ndp: Money,
    pub balance_80: Money,
    pub tlp: Money,
    pub registration_fee: Money,
    pub move_in_fee: Money,
    /// NDP spread over each term
    pub monthly_amortizations_20: BTreeMap<i32, Money>,
    /// Registration fee spread over each term
    pub staggered_rgf_monthly: BTreeMap<i32, Money>,
    /// Sum of the two monthly columns per term
    pub total_monthly_with_rgf: BTreeMap<i32, Money>,
    pub net_down_payment_20: Money,
    pub with_move_in: Money,
    pub with_reg_fee: Money,
    pub with_reg_and_move_in: Money,
    pub balance_80_amortizations: Vec<Balance80Result>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute the 20/80 breakdown for every positive term length.
pub fn compute(input: &TwentyEightyInput) -> PayPlanResult<ComputationOutput<TwentyEightyResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    fees::validate_contract(input.tcp, input.reservation_fee)?;
    fees::validate_percent("registration_fee_percent", input.registration_fee_percent)?;
    fees::validate_percent("move_in_fee_percent", input.move_in_fee_percent)?;

    let down_payment = fees::down_payment(input.tcp);
    let ndp = down_payment - input.reservation_fee;
    let balance_80 = fees::balance_80(input.tcp);

    let tlp = fees::total_list_price(input.tcp, input.tcp);
    let registration_fee = fees::registration_fee(
        input.tcp,
        tlp,
        input.registration_fee_percent,
        input.use_net_of_vat,
    );
    let move_in_fee = fees::move_in_fee(tlp, input.move_in_fee_percent);

    if ndp < Decimal::ZERO {
        warnings.push(format!(
            "Net down payment {ndp} is negative — reservation fee exceeds the 20% down payment"
        ));
    }

    let mut monthly_amortizations_20 = BTreeMap::new();
    let mut staggered_rgf_monthly = BTreeMap::new();
    let mut total_monthly_with_rgf = BTreeMap::new();

    for &term in input.terms_20.iter().filter(|&&t| t > 0) {
        let months = Decimal::from(term);
        let ma = ndp / months;
        let rgf = registration_fee / months;
        monthly_amortizations_20.insert(term, ma);
        staggered_rgf_monthly.insert(term, rgf);
        total_monthly_with_rgf.insert(term, ma + rgf);
    }

    let balance_80_amortizations = balance::static_schedule(input.tcp, registration_fee);

    let result = TwentyEightyResult {
        tcp: input.tcp,
        down_payment,
        reservation_fee: input.reservation_fee,
        ndp,
        balance_80,
        tlp,
        registration_fee,
        move_in_fee,
        monthly_amortizations_20,
        staggered_rgf_monthly,
        total_monthly_with_rgf,
        net_down_payment_20: ndp,
        with_move_in: ndp + move_in_fee,
        with_reg_fee: ndp + registration_fee,
        with_reg_and_move_in: ndp + registration_fee + move_in_fee,
        balance_80_amortizations,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "20/80 Payment Plan (staggered down payment)",
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

    fn sample_input() -> TwentyEightyInput {
        TwentyEightyInput {
            tcp: dec!(8_000_000),
            reservation_fee: dec!(50_000),
            registration_fee_percent: dec!(6),
            move_in_fee_percent: dec!(1.5),
            terms_20: vec![12, 18, 24],
            use_net_of_vat: true,
        }
    }

    #[test]
    fn down_payment_split() {
        let r = compute(&sample_input()).unwrap().result;

        assert_eq!(r.down_payment, dec!(1_600_000));
        assert_eq!(r.ndp, dec!(1_550_000));
        assert_eq!(r.balance_80, dec!(6_400_000));
        assert_eq!(r.net_down_payment_20, r.ndp);
    }

    #[test]
    fn staggered_columns_sum_per_term() {
        let r = compute(&sample_input()).unwrap().result;

        for term in [12, 18, 24] {
            let ma = r.monthly_amortizations_20[&term];
            let rgf = r.staggered_rgf_monthly[&term];
            assert_eq!(r.total_monthly_with_rgf[&term], ma + rgf);
            assert_eq!(ma, r.ndp / Decimal::from(term));
            assert_eq!(rgf, r.registration_fee / Decimal::from(term));
        }
    }

    #[test]
    fn summary_totals_are_exact_sums() {
        let r = compute(&sample_input()).unwrap().result;

        assert_eq!(r.with_move_in, r.ndp + r.move_in_fee);
        assert_eq!(r.with_reg_fee, r.ndp + r.registration_fee);
        assert_eq!(
            r.with_reg_and_move_in,
            r.ndp + r.registration_fee + r.move_in_fee
        );
    }

    #[test]
    fn non_positive_terms_are_skipped() {
        let mut input = sample_input();
        input.terms_20 = vec![-12, 0, 18];
        let r = compute(&input).unwrap().result;

        assert_eq!(r.monthly_amortizations_20.len(), 1);
        assert_eq!(r.staggered_rgf_monthly.len(), 1);
        assert_eq!(r.total_monthly_with_rgf.len(), 1);
    }

    #[test]
    fn static_amortization_schedule_attached() {
        let r = compute(&sample_input()).unwrap().result;
        assert_eq!(r.balance_80_amortizations.len(), 3);
        assert_eq!(
            r.balance_80_amortizations[0].ma,
            dec!(6_400_000) * dec!(0.0212470447)
        );
    }

    #[test]
    fn reservation_fee_above_down_payment_warns() {
        let mut input = sample_input();
        input.reservation_fee = dec!(2_000_000);
        let out = compute(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("negative")));
    }
}
