use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PayPlanError;
use crate::fees;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::PayPlanResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an 80%-balance amortization quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance80Input {
    /// Total contract price
    pub tcp: Money,
    /// Term length in years
    pub years: u32,
    /// Nominal annual interest rate in percent, quoted alongside the term
    pub rate: Percent,
    /// Registration fee amount folded into the with-registration column
    #[serde(default)]
    pub registration_fee: Money,
}

/// One amortization row for the financed 80% balance.
///
/// `factor_rate` is None when the term falls outside the supported
/// 1-10 year brackets; the derived amounts are then zero sentinels,
/// not quoted values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance80Result {
    pub balance_80: Money,
    pub years: u32,
    pub rate: Percent,
    pub factor_rate: Option<Rate>,
    pub ma: Money,
    pub ma_with_reg: Money,
    pub total_amount: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Quote the monthly amortization of the 80% balance for one term.
pub fn compute(input: &Balance80Input) -> PayPlanResult<ComputationOutput<Balance80Result>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    fees::validate_contract(input.tcp, Decimal::ZERO)?;
    if input.registration_fee < Decimal::ZERO {
        return Err(PayPlanError::InvalidInput {
            field: "registration_fee".into(),
            reason: "Registration fee cannot be negative".into(),
        });
    }

    let result = amortize(input.tcp, input.years, input.rate, input.registration_fee);

    if result.factor_rate.is_none() {
        warnings.push(format!(
            "{} years is outside the supported 1-10 year brackets — amortization reported as zero",
            input.years
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "80% Balance Amortization (factor rate)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// The fixed 5/7/10-year schedule attached to spot-down and 20/80 results.
pub fn static_schedule(tcp: Money, registration_fee: Money) -> Vec<Balance80Result> {
    fees::STATIC_BALANCE_TERMS
        .iter()
        .map(|&(years, rate)| amortize(tcp, years, rate, registration_fee))
        .collect()
}

fn amortize(tcp: Money, years: u32, rate: Percent, registration_fee: Money) -> Balance80Result {
    let balance_80 = fees::balance_80(tcp);
    let factor_rate = fees::factor_rate_for_years(years);

    let (ma, ma_with_reg, total_amount) = match factor_rate {
        Some(factor) => {
            let ma = balance_80 * factor;
            let ma_with_reg = (balance_80 + registration_fee) * factor;
            let total_amount = ma * Decimal::from(years) * dec!(12);
            (ma, ma_with_reg, total_amount)
        }
        None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
    };

    Balance80Result {
        balance_80,
        years,
        rate,
        factor_rate,
        ma,
        ma_with_reg,
        total_amount,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
