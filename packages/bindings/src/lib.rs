use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use tax_recovery_core::company::Company;
use tax_recovery_core::theses::{FinancialInputs, ThesisSet};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct ReportRequest {
    empresa: Company,
    teses: ThesisSet,
}

// ---------------------------------------------------------------------------
// Theses
// ---------------------------------------------------------------------------

#[napi]
pub fn apply_theses(input_json: String) -> NapiResult<String> {
    let input: FinancialInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    tax_recovery_core::theses::validate_inputs(&input).map_err(to_napi_error)?;
    let output = tax_recovery_core::theses::apply_theses(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn total_recoverable(teses_json: String) -> NapiResult<String> {
    let teses: ThesisSet = serde_json::from_str(&teses_json).map_err(to_napi_error)?;
    Ok(teses.total_recoverable().to_string())
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn render_report(input_json: String) -> NapiResult<String> {
    let request: ReportRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(tax_recovery_core::report::render_report(
        &request.empresa,
        &request.teses.results(),
    ))
}

#[napi]
pub fn format_brl(amount: String) -> NapiResult<String> {
    let value: rust_decimal::Decimal = amount.trim().parse().map_err(to_napi_error)?;
    Ok(tax_recovery_core::report::format_brl(value))
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

#[napi]
pub fn run_diagnosis(input_json: String) -> NapiResult<String> {
    let input: tax_recovery_core::diagnosis::DiagnosisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        tax_recovery_core::diagnosis::run_diagnosis(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
