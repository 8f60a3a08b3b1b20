use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;

use hk_tax_core::advice::{
    build_prompt, fetch_advice, AdviceCache, AdviceError, AdviceRequest, AdviceService,
};
use hk_tax_core::calculators::progressive::progressive_tax as progressive;
use hk_tax_core::{
    optimize_household, render_report, HouseholdInput, Language, OptimizationResult,
    ScenarioSelection,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Household optimizer
// ---------------------------------------------------------------------------

/// Household JSON in, optimizer envelope JSON out.
#[napi]
pub fn calculate_tax_liability(household_json: String) -> NapiResult<String> {
    let input: HouseholdInput = serde_json::from_str(&household_json).map_err(to_napi_error)?;
    let output = optimize_household(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Localized text report for an optimizer result. `scenario` defaults to
/// the best option.
#[napi(js_name = "renderReport")]
pub fn render_report_text(
    result_json: String,
    lang: String,
    scenario: Option<String>,
) -> NapiResult<String> {
    let result: OptimizationResult = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    let lang: Language = lang.parse().map_err(to_napi_error)?;
    let selection: ScenarioSelection = scenario
        .as_deref()
        .unwrap_or("best")
        .parse()
        .map_err(to_napi_error)?;
    Ok(render_report(&result, lang, selection))
}

// ---------------------------------------------------------------------------
// Single calculators
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TaxWithDerivation {
    tax: Decimal,
    derivation: Vec<String>,
}

/// Progressive tax on a decimal string, e.g. `"350000"`.
#[napi]
pub fn progressive_tax(income: String) -> NapiResult<String> {
    let income: Decimal = income.trim().parse().map_err(to_napi_error)?;
    let computation = progressive(income);
    serde_json::to_string(&TaxWithDerivation {
        tax: computation.tax,
        derivation: computation.report.render(),
    })
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Advice
// ---------------------------------------------------------------------------

#[napi]
pub fn build_advice_prompt(request_json: String) -> NapiResult<String> {
    let request: AdviceRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    Ok(build_prompt(&request))
}

/// Advice request for a household and its optimizer result, using the
/// profiles the optimizer assessed.
#[napi]
pub fn advice_request_for_household(
    household_json: String,
    result_json: String,
    lang: String,
) -> NapiResult<String> {
    let household = parse_household(&household_json)?;
    let result: OptimizationResult = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    let lang: Language = lang.parse().map_err(to_napi_error)?;
    let request = AdviceRequest::for_household(&household, result, lang);
    serde_json::to_string(&request).map_err(to_napi_error)
}

/// Outcome of a model call made on the JavaScript side.
struct SettledReply(Result<String, AdviceError>);

impl AdviceService for SettledReply {
    async fn generate(&self, _prompt: &str) -> Result<String, AdviceError> {
        self.0.clone()
    }
}

/// Text to show for a finished advice call. A status or error message
/// marks the call as failed; no reply and no error means no API key was
/// configured.
#[napi]
pub async fn settle_advice(
    request_json: String,
    reply: Option<String>,
    error_status: Option<u32>,
    error_message: Option<String>,
) -> NapiResult<String> {
    let request: AdviceRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let outcome = if error_status.is_some() || error_message.is_some() {
        let status = error_status.and_then(|s| u16::try_from(s).ok());
        Err(AdviceError::classify(
            status,
            error_message.as_deref().unwrap_or_default(),
        ))
    } else {
        reply.ok_or(AdviceError::MissingApiKey)
    };
    Ok(fetch_advice(&SettledReply(outcome), &request).await)
}

fn parse_household(json: &str) -> NapiResult<HouseholdInput> {
    serde_json::from_str(json).map_err(to_napi_error)
}

/// Last advice text, keyed by the household it was produced for.
#[napi]
#[derive(Default)]
pub struct AdviceMemo {
    cache: AdviceCache,
}

#[napi]
impl AdviceMemo {
    #[napi(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[napi]
    pub fn store(&mut self, household_json: String, advice: String) -> NapiResult<()> {
        self.cache.store(parse_household(&household_json)?, advice);
        Ok(())
    }

    /// Cached advice, or `null` when none is stored or the household changed.
    #[napi]
    pub fn get(&self, household_json: String) -> NapiResult<Option<String>> {
        let household = parse_household(&household_json)?;
        Ok(self.cache.get(&household).map(str::to_string))
    }

    #[napi]
    pub fn is_stale(&self, household_json: String) -> NapiResult<bool> {
        Ok(self.cache.is_stale(&parse_household(&household_json)?))
    }

    #[napi]
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
