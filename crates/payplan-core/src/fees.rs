use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PayPlanError;
use crate::types::{Money, Percent, Rate};
use crate::PayPlanResult;

/// Contract prices at or below this amount are VAT-exempt and keep their
/// list price unchanged. Regulatory threshold, not an approximation.
pub const VAT_EXEMPT_THRESHOLD: Decimal = dec!(3_600_000);

/// Divisor that backs the 12% VAT out of a gross price.
pub const VAT_DIVISOR: Decimal = dec!(1.12);

pub const PERCENT_DIVISOR: Decimal = dec!(100);

const DOWN_PAYMENT_SHARE: Decimal = dec!(0.20);
const BALANCE_SHARE: Decimal = dec!(0.80);

/// Monthly amortization factor for 1-5 year terms.
pub const FACTOR_RATE_1_TO_5: Decimal = dec!(0.0212470447);
/// Monthly amortization factor for 6-7 year terms.
pub const FACTOR_RATE_6_TO_7: Decimal = dec!(0.0181919633);
/// Monthly amortization factor for 8-10 year terms.
pub const FACTOR_RATE_8_TO_10: Decimal = dec!(0.0161334957);

/// The three fixed (years, nominal annual rate %) terms every proposal
/// quotes for the 80% balance.
pub const STATIC_BALANCE_TERMS: [(u32, Decimal); 3] =
    [(5, dec!(10)), (7, dec!(13)), (10, dec!(15))];

/// Total List Price: the contract price with VAT backed out.
///
/// The exemption test is on the undiscounted TCP; the operand is the possibly
/// discounted price (spot cash passes DTCP, every other plan passes TCP).
/// A TCP of exactly 3,600,000 is exempt.
pub fn total_list_price(tcp: Money, price: Money) -> Money {
    if tcp <= VAT_EXEMPT_THRESHOLD {
        price
    } else {
        price / VAT_DIVISOR
    }
}

/// Registration fee, governed by the net-of-VAT toggle: against the TLP
/// when enabled (the default), against the pre-VAT base price when not.
pub fn registration_fee(price: Money, tlp: Money, percent: Percent, use_net_of_vat: bool) -> Money {
    let base = if use_net_of_vat { tlp } else { price };
    base * percent / PERCENT_DIVISOR
}

/// Move-in fee is always charged against the TLP, toggle or not.
pub fn move_in_fee(tlp: Money, percent: Percent) -> Money {
    tlp * percent / PERCENT_DIVISOR
}

/// 20% down payment portion of the contract price.
pub fn down_payment(tcp: Money) -> Money {
    tcp * DOWN_PAYMENT_SHARE
}

/// The financed 80% balance of the contract price.
pub fn balance_80(tcp: Money) -> Money {
    tcp * BALANCE_SHARE
}

/// Tiered monthly amortization factor by loan term length.
///
/// Returns None outside the supported 1-10 year range; callers surface the
/// gap as a warning rather than presenting zero as a quoted rate.
pub fn factor_rate_for_years(years: u32) -> Option<Rate> {
    match years {
        1..=5 => Some(FACTOR_RATE_1_TO_5),
        6..=7 => Some(FACTOR_RATE_6_TO_7),
        8..=10 => Some(FACTOR_RATE_8_TO_10),
        _ => None,
    }
}

pub(crate) fn validate_contract(tcp: Money, reservation_fee: Money) -> PayPlanResult<()> {
    if tcp <= Decimal::ZERO {
        return Err(PayPlanError::InvalidInput {
            field: "tcp".into(),
            reason: "Total contract price must be positive".into(),
        });
    }
    if reservation_fee < Decimal::ZERO {
        return Err(PayPlanError::InvalidInput {
            field: "reservation_fee".into(),
            reason: "Reservation fee cannot be negative".into(),
        });
    }
    Ok(())
}

pub(crate) fn validate_percent(field: &str, value: Percent) -> PayPlanResult<()> {
    if value < Decimal::ZERO || value > PERCENT_DIVISOR {
        return Err(PayPlanError::InvalidInput {
            field: field.into(),
            reason: "Percentage must be between 0 and 100".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tlp_above_threshold_divides_out_vat() {
        assert_eq!(
            total_list_price(dec!(8_000_000), dec!(8_000_000)),
            dec!(8_000_000) / dec!(1.12)
        );
    }

    #[test]
    fn tlp_at_threshold_is_exempt() {
        // Exactly 3.6M resolves to the exempt branch
        assert_eq!(
            total_list_price(dec!(3_600_000), dec!(3_600_000)),
            dec!(3_600_000)
        );
        assert_eq!(total_list_price(dec!(2_500_000), dec!(2_500_000)), dec!(2_500_000));
    }

    #[test]
    fn tlp_threshold_tests_tcp_not_operand() {
        // Discounted spot-cash price below 3.6M still divides when TCP is above
        let tlp = total_list_price(dec!(3_700_000), dec!(3_515_000));
        assert_eq!(tlp, dec!(3_515_000) / dec!(1.12));
    }

    #[test]
    fn registration_fee_respects_toggle() {
        let tlp = dec!(6_785_714.285714);
        assert_eq!(
            registration_fee(dec!(7_600_000), tlp, dec!(6), true),
            tlp * dec!(0.06)
        );
        assert_eq!(
            registration_fee(dec!(7_600_000), tlp, dec!(6), false),
            dec!(456_000)
        );
    }

    #[test]
    fn registration_fee_scales_linearly() {
        let tlp = dec!(1_000_000);
        let at_one = registration_fee(tlp, tlp, dec!(1), true);
        let at_six = registration_fee(tlp, tlp, dec!(6), true);
        assert_eq!(at_six, at_one * dec!(6));
    }

    #[test]
    fn factor_rate_tier_boundaries() {
        assert_eq!(factor_rate_for_years(1), Some(FACTOR_RATE_1_TO_5));
        assert_eq!(factor_rate_for_years(5), Some(dec!(0.0212470447)));
        assert_eq!(factor_rate_for_years(6), Some(dec!(0.0181919633)));
        assert_eq!(factor_rate_for_years(7), Some(dec!(0.0181919633)));
        assert_eq!(factor_rate_for_years(8), Some(dec!(0.0161334957)));
        assert_eq!(factor_rate_for_years(10), Some(FACTOR_RATE_8_TO_10));
        assert_eq!(factor_rate_for_years(0), None);
        assert_eq!(factor_rate_for_years(11), None);
    }

    #[test]
    fn validate_contract_rejects_bad_inputs() {
        assert!(validate_contract(Decimal::ZERO, Decimal::ZERO).is_err());
        assert!(validate_contract(dec!(-1), Decimal::ZERO).is_err());
        assert!(validate_contract(dec!(1), dec!(-1)).is_err());
        assert!(validate_contract(dec!(1), Decimal::ZERO).is_ok());
    }

    #[test]
    fn validate_percent_range() {
        assert!(validate_percent("x", dec!(-0.1)).is_err());
        assert!(validate_percent("x", dec!(100.1)).is_err());
        assert!(validate_percent("x", Decimal::ZERO).is_ok());
        assert!(validate_percent("x", dec!(100)).is_ok());
    }
}
