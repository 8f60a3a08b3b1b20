//! Boundary to a generative advice service.
//!
//! The engine never depends on advice: prompts are built from a finished
//! [`OptimizationResult`] and failures collapse into a localized message.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assessment::OptimizationResult;
use crate::i18n::Language;
use crate::profile::{HouseholdInput, PersonProfile};
use crate::tables::caps;
use crate::types::Liability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRequest {
    #[serde(rename = "self")]
    pub self_profile: PersonProfile,
    #[serde(default)]
    pub spouse: PersonProfile,
    pub result: OptimizationResult,
    #[serde(default)]
    pub language: Language,
}

impl AdviceRequest {
    /// Request for the profiles the engine actually assessed: negative
    /// amounts read as zero and an unmarried spouse is left empty.
    pub fn for_household(
        household: &HouseholdInput,
        result: OptimizationResult,
        language: Language,
    ) -> Self {
        let spouse = if household.is_married() {
            household.spouse.sanitized().0
        } else {
            PersonProfile::default()
        };
        AdviceRequest {
            self_profile: household.self_profile.sanitized().0,
            spouse,
            result,
            language,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdviceError {
    #[error("advice service API key is not configured")]
    MissingApiKey,

    #[error("advice service quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("advice service error: {0}")]
    Service(String),
}

impl AdviceError {
    /// Map a failed service call to an error. HTTP 429 or a message
    /// mentioning quota is a quota error.
    pub fn classify(status: Option<u16>, message: &str) -> Self {
        if status == Some(429) || message.to_lowercase().contains("quota") {
            AdviceError::QuotaExceeded(message.to_string())
        } else {
            AdviceError::Service(message.to_string())
        }
    }

    pub fn user_message(&self, lang: Language) -> &'static str {
        let labels = lang.labels();
        match self {
            AdviceError::MissingApiKey => labels.advice_missing_key,
            AdviceError::QuotaExceeded(_) => labels.advice_quota,
            AdviceError::Service(_) => labels.advice_failed,
        }
    }
}

/// A text generation backend.
pub trait AdviceService {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, AdviceError>> + Send;
}

fn amount(liability: Liability) -> String {
    match liability.amount() {
        Some(v) => v.round_dp(0).to_string(),
        None => "N/A".to_string(),
    }
}

/// Prompt asking for an explanation of the winning option and next-year
/// suggestions based on unused deductions.
pub fn build_prompt(req: &AdviceRequest) -> String {
    let me = &req.self_profile;
    let spouse = &req.spouse;
    let r = &req.result;

    let language = match req.language {
        Language::Zh => "IMPORTANT: You MUST reply in Traditional Chinese (Cantonese style where appropriate for Hong Kong context).",
        Language::En => "Reply in English.",
    };

    let d = &me.deductions;
    let utilisation = [
        format!(
            "- TVC (Voluntary MPF): Claimed HK${} (Cap: HK${}).",
            d.mpf_voluntary_tvc,
            caps::MPF_TVC
        ),
        format!(
            "- VHIS (Health Insurance): Claimed HK${} (Guide: HK${} per insured person).",
            d.qualifying_premiums,
            caps::VHIS_PER_PERSON
        ),
        format!(
            "- Charitable Donations: Claimed HK${}.",
            d.approved_charitable_donations
        ),
        format!(
            "- Self Education: Claimed HK${} (Cap: HK${}).",
            d.self_education,
            caps::SELF_EDUCATION
        ),
    ]
    .join("\n");

    format!(
        "You are a Hong Kong Tax Expert. Analyze the following user data and tax calculation results.
{language}

**User Data:**
Self Income: Salary {}, Profit {}, Rental {}.
Spouse Income: Salary {}, Profit {}, Rental {}.
Allowances: Married {}, Children {}.

**Deduction Utilization (Self):**
{utilisation}

**Calculation Results:**
1. Separate Filing: HK${}
2. Joint Assessment (Salaries): HK${}
3. Personal Assessment (Separate): HK${}
4. Personal Assessment (Joint): HK${}

**Winner:** {} with tax HK${}.
Savings vs Separate: HK${}.

**Task:**
1. Briefly explain why the winner is the best option.
2. Provide specific, actionable suggestions to minimize tax for the next year based on their unused deductions.
   - If TVC usage is low, suggest TVC (Tax Deductible Voluntary Contributions) or QDAP (Annuity) to use the HK${} cap.
   - If they have high income, suggest Charitable Donations.
   - If applicable, mention VHIS or Self-Education.
3. Keep it concise (under 200 words).",
        me.income.salary,
        me.income.business_profit,
        me.income.rental_income,
        spouse.income.salary,
        spouse.income.business_profit,
        spouse.income.rental_income,
        me.allowances.married,
        me.allowances.children_count,
        amount(r.separate.total_tax),
        amount(r.joint_assessment.total_tax),
        amount(r.personal_assessment_separate.total_tax),
        amount(r.personal_assessment_joint.total_tax),
        r.best_option.label,
        amount(r.best_option.total_tax),
        r.savings.round_dp(0),
        caps::MPF_TVC,
    )
}

/// Ask `service` for advice. Never fails: errors become the localized
/// user-facing message.
pub async fn fetch_advice<S: AdviceService>(service: &S, req: &AdviceRequest) -> String {
    let labels = req.language.labels();
    match service.generate(&build_prompt(req)).await {
        Ok(text) if text.trim().is_empty() => labels.advice_empty.to_string(),
        Ok(text) => text,
        Err(e) => {
            log::warn!("advice request failed: {e}");
            e.user_message(req.language).to_string()
        }
    }
}

/// Advice remembered together with the household it was produced for.
#[derive(Debug, Clone, Default)]
pub struct AdviceCache {
    entry: Option<(HouseholdInput, String)>,
}

impl AdviceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, household: HouseholdInput, advice: String) {
        self.entry = Some((household, advice));
    }

    /// Cached advice, unless the household has changed since it was stored.
    pub fn get(&self, household: &HouseholdInput) -> Option<&str> {
        match &self.entry {
            Some((snapshot, advice)) if snapshot == household => Some(advice.as_str()),
            _ => None,
        }
    }

    pub fn is_stale(&self, household: &HouseholdInput) -> bool {
        matches!(&self.entry, Some((snapshot, _)) if snapshot != household)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::optimizer::calculate_tax_liability;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    struct Canned(Result<String, AdviceError>);

    impl AdviceService for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String, AdviceError> {
            self.0.clone()
        }
    }

    fn request(language: Language) -> AdviceRequest {
        let mut me = PersonProfile::default();
        me.income.salary = dec!(500_000);
        me.deductions.mpf_voluntary_tvc = dec!(20_000);
        let spouse = PersonProfile::default();
        let result = calculate_tax_liability(&me, &spouse);
        AdviceRequest {
            self_profile: me,
            spouse,
            result,
            language,
        }
    }

    #[test]
    fn test_prompt_content() {
        let prompt = build_prompt(&request(Language::En));
        assert!(prompt.contains("Reply in English."));
        assert!(prompt.contains("Self Income: Salary 500000, Profit 0, Rental 0."));
        assert!(prompt.contains("- TVC (Voluntary MPF): Claimed HK$20000 (Cap: HK$60000)."));
        // 500,000 - MPF 18,000 - TVC 20,000 - basic allowance 132,000
        // leaves 330,000 net chargeable income.
        assert!(prompt.contains("1. Separate Filing: HK$38100"));
        assert!(prompt.contains("2. Joint Assessment (Salaries): HK$N/A"));
        assert!(prompt.contains("**Winner:** Standard Filing with tax HK$38100."));
    }

    #[test]
    fn test_prompt_chinese_instruction() {
        let prompt = build_prompt(&request(Language::Zh));
        assert!(prompt.contains("Traditional Chinese"));
    }

    #[test]
    fn test_classify_quota() {
        assert!(matches!(
            AdviceError::classify(Some(429), "Too Many Requests"),
            AdviceError::QuotaExceeded(_)
        ));
        assert!(matches!(
            AdviceError::classify(None, "Resource has been exhausted (check QUOTA)"),
            AdviceError::QuotaExceeded(_)
        ));
        assert!(matches!(
            AdviceError::classify(Some(500), "internal"),
            AdviceError::Service(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_advice_success_and_empty() {
        let req = request(Language::En);
        let text = fetch_advice(&Canned(Ok("Use your TVC cap.".into())), &req).await;
        assert_eq!(text, "Use your TVC cap.");
        let empty = fetch_advice(&Canned(Ok("  ".into())), &req).await;
        assert_eq!(empty, "No advice generated.");
    }

    #[tokio::test]
    async fn test_fetch_advice_maps_errors() {
        let req = request(Language::Zh);
        let quota = fetch_advice(&Canned(Err(AdviceError::classify(Some(429), "slow down"))), &req).await;
        assert_eq!(quota, "AI 服務繁忙（已達到配額上限）。請稍後再試。");

        let req = request(Language::En);
        let missing = fetch_advice(&Canned(Err(AdviceError::MissingApiKey)), &req).await;
        assert_eq!(
            missing,
            "API Key missing. Please configure the application environment."
        );
    }

    #[test]
    fn test_request_uses_assessed_profiles() {
        let mut household = HouseholdInput::default();
        household.self_profile.income.salary = dec!(500_000);
        household.self_profile.income.business_profit = dec!(-80_000);
        household.spouse.income.salary = dec!(300_000);
        let result = calculate_tax_liability(
            &household.self_profile.sanitized().0,
            &PersonProfile::default(),
        );

        let req = AdviceRequest::for_household(&household, result, Language::En);
        assert_eq!(req.self_profile.income.business_profit, dec!(0));
        assert_eq!(req.spouse, PersonProfile::default());

        let prompt = build_prompt(&req);
        assert!(prompt.contains("Self Income: Salary 500000, Profit 0, Rental 0."));
        assert!(prompt.contains("Spouse Income: Salary 0, Profit 0, Rental 0."));
    }

    #[test]
    fn test_cache_goes_stale_when_household_changes() {
        let req = request(Language::En);
        let household = HouseholdInput {
            self_profile: req.self_profile,
            spouse: req.spouse,
        };
        let mut cache = AdviceCache::new();
        assert_eq!(cache.get(&household), None);

        cache.store(household.clone(), "advice".into());
        assert_eq!(cache.get(&household), Some("advice"));
        assert!(!cache.is_stale(&household));

        let mut changed = household.clone();
        changed.self_profile.income.salary = dec!(600_000);
        assert_eq!(cache.get(&changed), None);
        assert!(cache.is_stale(&changed));

        cache.clear();
        assert!(!cache.is_stale(&changed));
    }
}
