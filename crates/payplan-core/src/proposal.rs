use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fees;
use crate::plans::deferred::{self, DeferredResult};
use crate::plans::spot_cash::{self, SpotCashResult};
use crate::plans::spot_down::{self, SpotDownResult};
use crate::plans::twenty_eighty::{self, TwentyEightyResult};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PayPlanResult;

// ---------------------------------------------------------------------------
// Metadata types
// ---------------------------------------------------------------------------

/// The client the proposal is addressed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact_no: String,
}

/// The property being offered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub brand: String,
    pub address: String,
    #[serde(default)]
    pub project_advantages: String,
    #[serde(flatten)]
    pub product: ProductType,
}

/// Vertical (condominium) or horizontal (subdivision) development.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "product_type")]
pub enum ProductType {
    Vertical(VerticalDetails),
    Horizontal(HorizontalDetails),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerticalDetails {
    pub property_details: String,
    pub tower_building: String,
    pub floor_unit: String,
    pub floor_area: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizontalDetails {
    pub phase: String,
    pub block_lot: String,
    #[serde(flatten)]
    pub project: HorizontalProject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "project_type")]
pub enum HorizontalProject {
    #[serde(rename = "House and Lot")]
    HouseAndLot(HouseAndLotDetails),
    Lot(LotDetails),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseAndLotDetails {
    pub house_model: String,
    pub property_details: String,
    pub lot_area: String,
    pub floor_area: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotDetails {
    pub lot_area: String,
}

// ---------------------------------------------------------------------------
// Proposal input / output
// ---------------------------------------------------------------------------

/// One proposal request: shared contract terms plus the plan variants the
/// client asked to see. A variant is computed when its selector is present
/// (a discount for the spot plans, a non-empty term list for the others).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalInput {
    pub client: ClientInfo,
    pub project: ProjectInfo,
    pub prepared_on: NaiveDate,
    pub tcp: Money,
    pub reservation_fee: Money,
    pub registration_fee_percent: Percent,
    pub move_in_fee_percent: Percent,
    #[serde(default = "crate::types::default_true")]
    pub use_net_of_vat: bool,
    #[serde(default)]
    pub spot_cash_discount: Option<Percent>,
    #[serde(default)]
    pub spot_down_discount: Option<Percent>,
    #[serde(default)]
    pub deferred_terms: Vec<i32>,
    #[serde(default)]
    pub terms_20_80: Vec<i32>,
}

/// Everything the document renderer needs for one proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub client: ClientInfo,
    pub project: ProjectInfo,
    pub prepared_on: NaiveDate,
    pub tcp: Money,
    pub reservation_fee: Money,
    /// Headline fees quoted on the cover page, always from the plain
    /// tcp / 1.12 list price
    pub registration_fee: Money,
    pub move_in_fee: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_cash: Option<SpotCashResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_down_payment: Option<SpotDownResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferred_payment: Option<DeferredResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_20_80: Option<TwentyEightyResult>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble a proposal: run each requested plan computation and collect the
/// results next to the client/project metadata.
pub fn build(input: &ProposalInput) -> PayPlanResult<ComputationOutput<Proposal>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    fees::validate_contract(input.tcp, input.reservation_fee)?;
    fees::validate_percent("registration_fee_percent", input.registration_fee_percent)?;
    fees::validate_percent("move_in_fee_percent", input.move_in_fee_percent)?;

    let spot_cash = match input.spot_cash_discount {
        Some(discount_percent) => {
            let out = spot_cash::compute(&spot_cash::SpotCashInput {
                tcp: input.tcp,
                discount_percent,
                reservation_fee: input.reservation_fee,
                registration_fee_percent: input.registration_fee_percent,
                move_in_fee_percent: input.move_in_fee_percent,
                use_net_of_vat: input.use_net_of_vat,
            })?;
            warnings.extend(out.warnings);
            Some(out.result)
        }
        None => None,
    };

    let spot_down_payment = match input.spot_down_discount {
        Some(discount_percent) => {
            let out = spot_down::compute(&spot_down::SpotDownInput {
                tcp: input.tcp,
                discount_percent,
                reservation_fee: input.reservation_fee,
                registration_fee_percent: input.registration_fee_percent,
                move_in_fee_percent: input.move_in_fee_percent,
                use_net_of_vat: input.use_net_of_vat,
            })?;
            warnings.extend(out.warnings);
            Some(out.result)
        }
        None => None,
    };

    let deferred_payment = if input.deferred_terms.is_empty() {
        None
    } else {
        let out = deferred::compute(&deferred::DeferredInput {
            tcp: input.tcp,
            reservation_fee: input.reservation_fee,
            registration_fee_percent: input.registration_fee_percent,
            move_in_fee_percent: input.move_in_fee_percent,
            terms: input.deferred_terms.clone(),
            use_net_of_vat: input.use_net_of_vat,
        })?;
        warnings.extend(out.warnings);
        Some(out.result)
    };

    let payment_20_80 = if input.terms_20_80.is_empty() {
        None
    } else {
        let out = twenty_eighty::compute(&twenty_eighty::TwentyEightyInput {
            tcp: input.tcp,
            reservation_fee: input.reservation_fee,
            registration_fee_percent: input.registration_fee_percent,
            move_in_fee_percent: input.move_in_fee_percent,
            terms_20: input.terms_20_80.clone(),
            use_net_of_vat: input.use_net_of_vat,
        })?;
        warnings.extend(out.warnings);
        Some(out.result)
    };

    if spot_cash.is_none()
        && spot_down_payment.is_none()
        && deferred_payment.is_none()
        && payment_20_80.is_none()
    {
        warnings.push(
            "No payment plan variant requested — proposal carries metadata and headline fees only"
                .into(),
        );
    }

    let headline_tlp = input.tcp / fees::VAT_DIVISOR;
    let registration_fee =
        headline_tlp * input.registration_fee_percent / fees::PERCENT_DIVISOR;
    let move_in_fee = headline_tlp * input.move_in_fee_percent / fees::PERCENT_DIVISOR;

    let result = Proposal {
        client: input.client.clone(),
        project: input.project.clone(),
        prepared_on: input.prepared_on,
        tcp: input.tcp,
        reservation_fee: input.reservation_fee,
        registration_fee,
        move_in_fee,
        spot_cash,
        spot_down_payment,
        deferred_payment,
        payment_20_80,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Payment Plan Proposal Assembly",
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

    fn sample_input() -> ProposalInput {
        ProposalInput {
            client: ClientInfo {
                name: "Maria Santos".into(),
                email: "maria.santos@example.com".into(),
                contact_no: "0917 555 0101".into(),
            },
            project: ProjectInfo {
                brand: "Metrogate".into(),
                address: "Dasmariñas, Cavite".into(),
                project_advantages: "Near CALAX interchange".into(),
                product: ProductType::Horizontal(HorizontalDetails {
                    phase: "Phase 2".into(),
                    block_lot: "Block 5 Lot 12".into(),
                    project: HorizontalProject::HouseAndLot(HouseAndLotDetails {
                        house_model: "Celina".into(),
                        property_details: "2-storey, 3BR".into(),
                        lot_area: "120 sqm".into(),
                        floor_area: "84 sqm".into(),
                    }),
                }),
            },
            prepared_on: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            tcp: dec!(8_000_000),
            reservation_fee: dec!(50_000),
            registration_fee_percent: dec!(6),
            move_in_fee_percent: dec!(1.5),
            use_net_of_vat: true,
            spot_cash_discount: Some(dec!(5)),
            spot_down_discount: None,
            deferred_terms: vec![12, 18, 24],
            terms_20_80: Vec::new(),
        }
    }

    #[test]
    fn only_requested_variants_are_computed() {
        let p = build(&sample_input()).unwrap().result;

        assert!(p.spot_cash.is_some());
        assert!(p.deferred_payment.is_some());
        assert!(p.spot_down_payment.is_none());
        assert!(p.payment_20_80.is_none());
    }

    #[test]
    fn headline_fees_from_plain_list_price() {
        let p = build(&sample_input()).unwrap().result;

        let tlp = dec!(8_000_000) / dec!(1.12);
        assert_eq!(p.registration_fee, tlp * dec!(0.06));
        assert_eq!(p.move_in_fee, tlp * dec!(0.015));
    }

    #[test]
    fn empty_request_warns() {
        let mut input = sample_input();
        input.spot_cash_discount = None;
        input.deferred_terms = Vec::new();
        let out = build(&input).unwrap();

        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("No payment plan variant")));
    }

    #[test]
    fn sub_computation_warnings_bubble_up() {
        let mut input = sample_input();
        input.spot_cash_discount = None;
        input.deferred_terms = Vec::new();
        input.spot_down_discount = Some(dec!(5));
        input.reservation_fee = dec!(1_600_000);
        let out = build(&input).unwrap();

        assert!(out.warnings.iter().any(|w| w.contains("negative")));
    }

    #[test]
    fn metadata_round_trips_through_serde() {
        let input = sample_input();
        let json = serde_json::to_string(&input).unwrap();
        let back: ProposalInput = serde_json::from_str(&json).unwrap();
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::to_value(&back).unwrap()
        );
    }

    #[test]
    fn rejects_invalid_contract() {
        let mut input = sample_input();
        input.tcp = dec!(0);
        assert!(build(&input).is_err());
    }
}
