use napi::Result as NapiResult;
use napi_derive::napi;

use amortization_core::schedules::SimulationResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedules(input_json: String) -> NapiResult<String> {
    let input: amortization_core::schedules::FinancingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        amortization_core::schedules::compute_schedules(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes a full-precision `SimulationResult` (as returned in `result` by
/// `computeSchedules`) and returns the rounded consumer view.
#[napi]
pub fn present_simulation(result_json: String) -> NapiResult<String> {
    let result: SimulationResult = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    let view = amortization_core::presentation::present(&result);
    serde_json::to_string(&view).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Proposals
// ---------------------------------------------------------------------------

#[napi]
pub fn build_proposal(input_json: String) -> NapiResult<String> {
    let input: amortization_core::proposal::ProposalInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization_core::proposal::build_proposal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Time value and formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_loan(input_json: String) -> NapiResult<String> {
    let input: amortization_core::time_value::LoanQuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization_core::time_value::quote_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `amount` is a decimal string such as `"2586.6667"`.
#[napi]
pub fn format_brl(amount: String) -> NapiResult<String> {
    let value: rust_decimal::Decimal = amount.trim().parse().map_err(to_napi_error)?;
    Ok(amortization_core::presentation::format_brl(value))
}
