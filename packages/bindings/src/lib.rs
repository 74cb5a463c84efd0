use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Payment plans
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_spot_cash(input_json: String) -> NapiResult<String> {
    let input: payplan_core::plans::spot_cash::SpotCashInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payplan_core::plans::spot_cash::compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_spot_down_payment(input_json: String) -> NapiResult<String> {
    let input: payplan_core::plans::spot_down::SpotDownInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payplan_core::plans::spot_down::compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_deferred_payment(input_json: String) -> NapiResult<String> {
    let input: payplan_core::plans::deferred::DeferredInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payplan_core::plans::deferred::compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi(js_name = "compute2080Payment")]
pub fn compute_twenty_eighty_payment(input_json: String) -> NapiResult<String> {
    let input: payplan_core::plans::twenty_eighty::TwentyEightyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payplan_core::plans::twenty_eighty::compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_80_balance_amortization(input_json: String) -> NapiResult<String> {
    let input: payplan_core::plans::balance::Balance80Input =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payplan_core::plans::balance::compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Proposal assembly
// ---------------------------------------------------------------------------

#[napi]
pub fn build_proposal(input_json: String) -> NapiResult<String> {
    let input: payplan_core::proposal::ProposalInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payplan_core::proposal::build(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
