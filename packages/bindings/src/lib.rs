use napi::Result as NapiResult;
use napi_derive::napi;

use property_analysis_core::analysis::{
    self, MonthlyBreakdown, PropertyAnalysis, PropertyAnalysisForm,
};
use property_analysis_core::portfolio::holdings::{self, PortfolioProperty};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Bare `AnalysisResults` for a complete `PropertyAnalysis`.
#[napi]
pub fn calculate_analysis(input_json: String) -> NapiResult<String> {
    let input: PropertyAnalysis = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::calculate_analysis(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Results wrapped with warnings and computation metadata.
#[napi]
pub fn analyze_property(input_json: String) -> NapiResult<String> {
    let input: PropertyAnalysis = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze_property(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Validate a partially filled form and complete it with defaults.
#[napi]
pub fn normalize_form(form_json: String) -> NapiResult<String> {
    let form: PropertyAnalysisForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let completed = form.into_analysis().map_err(to_napi_error)?;
    serde_json::to_string(&completed).map_err(to_napi_error)
}

/// Monthly income and expense lines, computed from the analysis itself.
#[napi]
pub fn monthly_breakdown(input_json: String) -> NapiResult<String> {
    let input: PropertyAnalysis = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let breakdown = MonthlyBreakdown::for_analysis(&input);
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn portfolio_summary(properties_json: String) -> NapiResult<String> {
    let properties: Vec<PortfolioProperty> =
        serde_json::from_str(&properties_json).map_err(to_napi_error)?;
    let output = holdings::analyze_portfolio(&properties).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
