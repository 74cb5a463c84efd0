use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fees;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PayPlanResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a spot cash quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotCashInput {
    /// Total contract price
    pub tcp: Money,
    /// Term discount in percent, applied to the full TCP
    pub discount_percent: Percent,
    pub reservation_fee: Money,
    pub registration_fee_percent: Percent,
    pub move_in_fee_percent: Percent,
    /// Charge the registration fee against the TLP (true, default) or the
    /// pre-VAT base price (false)
    #[serde(default = "crate::types::default_true")]
    pub use_net_of_vat: bool,
}

/// Itemized spot cash breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotCashResult {
    pub tcp: Money,
    pub discount_percent: Percent,
    pub term_discount: Money,
    /// Discounted total contract price
    pub dtcp: Money,
    pub reservation_fee: Money,
    /// Net total contract price (equals DTCP for spot cash)
    pub ntcp: Money,
    pub tlp: Money,
    pub registration_fee: Money,
    pub move_in_fee: Money,
    pub total_payment: Money,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute the spot cash breakdown: full payment at a TCP-wide discount.
pub fn compute(input: &SpotCashInput) -> PayPlanResult<ComputationOutput<SpotCashResult>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    fees::validate_contract(input.tcp, input.reservation_fee)?;
    fees::validate_percent("discount_percent", input.discount_percent)?;
    fees::validate_percent("registration_fee_percent", input.registration_fee_percent)?;
    fees::validate_percent("move_in_fee_percent", input.move_in_fee_percent)?;

    let term_discount = input.tcp * input.discount_percent / fees::PERCENT_DIVISOR;
    let dtcp = input.tcp - term_discount;
    let ntcp = dtcp;

    // VAT exemption tests the undiscounted TCP; the discounted price is the operand
    let tlp = fees::total_list_price(input.tcp, dtcp);
    let registration_fee = fees::registration_fee(
        dtcp,
        tlp,
        input.registration_fee_percent,
        input.use_net_of_vat,
    );
    let move_in_fee = fees::move_in_fee(tlp, input.move_in_fee_percent);
    let total_payment = ntcp + registration_fee + move_in_fee;

    let result = SpotCashResult {
        tcp: input.tcp,
        discount_percent: input.discount_percent,
        term_discount,
        dtcp,
        reservation_fee: input.reservation_fee,
        ntcp,
        tlp,
        registration_fee,
        move_in_fee,
        total_payment,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Spot Cash Payment Plan",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
