use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fees;
use crate::plans::balance::{self, Balance80Result};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PayPlanResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a spot down payment quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotDownInput {
    /// Total contract price
    pub tcp: Money,
    /// Term discount in percent, applied to the 20% down payment only
    pub discount_percent: Percent,
    pub reservation_fee: Money,
    pub registration_fee_percent: Percent,
    pub move_in_fee_percent: Percent,
    #[serde(default = "crate::types::default_true")]
    pub use_net_of_vat: bool,
}

/// Itemized spot down payment breakdown, with the fixed 80%-balance
/// amortization schedule attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotDownResult {
    pub tcp: Money,
    pub down_payment: Money,
    pub discount_percent: Percent,
    pub term_discount: Money,
    pub reservation_fee: Money,
    /// Net down payment after discount and reservation fee
    pub ndp: Money,
    pub balance_80: Money,
    pub tlp: Money,
    pub registration_fee: Money,
    pub move_in_fee: Money,
    pub balance_80_amortizations: Vec<Balance80Result>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute the spot down payment breakdown: 20% down discounted and paid
/// at once, 80% financed.
pub fn compute(input: &SpotDownInput) -> PayPlanResult<ComputationOutput<SpotDownResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    fees::validate_contract(input.tcp, input.reservation_fee)?;
    fees::validate_percent("discount_percent", input.discount_percent)?;
    fees::validate_percent("registration_fee_percent", input.registration_fee_percent)?;
    fees::validate_percent("move_in_fee_percent", input.move_in_fee_percent)?;

    let down_payment = fees::down_payment(input.tcp);
    let term_discount = down_payment * input.discount_percent / fees::PERCENT_DIVISOR;
    let ndp = down_payment - term_discount - input.reservation_fee;
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
            "Net down payment {ndp} is negative — reservation fee and discount exceed the 20% down payment"
        ));
    }

    let balance_80_amortizations = balance::static_schedule(input.tcp, registration_fee);

    let result = SpotDownResult {
        tcp: input.tcp,
        down_payment,
        discount_percent: input.discount_percent,
        term_discount,
        reservation_fee: input.reservation_fee,
        ndp,
        balance_80,
        tlp,
        registration_fee,
        move_in_fee,
        balance_80_amortizations,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Spot Down Payment Plan (20/80)",
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

    fn sample_input() -> SpotDownInput {
        SpotDownInput {
            tcp: dec!(8_000_000),
            discount_percent: dec!(5),
            reservation_fee: dec!(50_000),
            registration_fee_percent: dec!(6),
            move_in_fee_percent: dec!(1.5),
            use_net_of_vat: true,
        }
    }

    #[test]
    fn discount_applies_to_down_payment_only() {
        let r = compute(&sample_input()).unwrap().result;

        assert_eq!(r.down_payment, dec!(1_600_000));
        assert_eq!(r.term_discount, dec!(80_000));
        assert_eq!(r.ndp, dec!(1_470_000));
        assert_eq!(r.balance_80, dec!(6_400_000));
        // TLP derives from the undiscounted TCP
        assert_eq!(r.tlp, dec!(8_000_000) / dec!(1.12));
    }

    #[test]
    fn static_amortization_schedule_attached() {
        let r = compute(&sample_input()).unwrap().result;

        assert_eq!(r.balance_80_amortizations.len(), 3);
        let ten_year = &r.balance_80_amortizations[2];
        assert_eq!(ten_year.years, 10);
        assert_eq!(ten_year.ma, dec!(6_400_000) * dec!(0.0161334957));
        // With-reg column folds in this plan's registration fee
        assert_eq!(
            ten_year.ma_with_reg,
            (dec!(6_400_000) + r.registration_fee) * dec!(0.0161334957)
        );
    }

    #[test]
    fn oversized_reservation_fee_warns() {
        let mut input = sample_input();
        input.reservation_fee = dec!(1_600_000);
        let out = compute(&input).unwrap();

        assert!(out.result.ndp < Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("negative")));
    }

    #[test]
    fn gross_of_vat_toggle_charges_on_tcp() {
        let mut input = sample_input();
        input.use_net_of_vat = false;
        let r = compute(&input).unwrap().result;
        assert_eq!(r.registration_fee, dec!(8_000_000) * dec!(0.06));
    }
}
