//! Filing scenarios and the household-level comparison between them.

pub mod optimizer;
pub mod personal;
pub mod render;

use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::report::{render_lines, ReportLine};
use crate::types::{Liability, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingScenario {
    /// Unmarried: salaries, profits and property tax charged separately
    StandardFiling,
    /// Unmarried: personal assessment on aggregated income
    PersonalAssessment,
    SeparateFiling,
    /// Salaries tax jointly assessed, profits and property separate
    JointAssessment,
    PersonalAssessmentSeparate,
    PersonalAssessmentJoint,
    NotApplicable,
}

impl FilingScenario {
    pub fn label(self) -> &'static str {
        self.localized_label(Language::En)
    }

    pub fn localized_label(self, lang: Language) -> &'static str {
        let labels = lang.labels();
        match self {
            FilingScenario::StandardFiling => labels.standard_filing,
            FilingScenario::PersonalAssessment => labels.personal_assessment,
            FilingScenario::SeparateFiling => labels.separate_filing,
            FilingScenario::JointAssessment => labels.joint_assessment,
            FilingScenario::PersonalAssessmentSeparate => labels.personal_assessment_separate,
            FilingScenario::PersonalAssessmentJoint => labels.personal_assessment_joint,
            FilingScenario::NotApplicable => labels.not_applicable_label,
        }
    }
}

/// Outcome of one filing scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub scenario: FilingScenario,
    pub label: String,
    pub total_tax: Liability,
    /// Short summary lines for cards and tables
    pub breakdown: Vec<String>,
    pub detailed_report: Vec<ReportLine>,
    pub is_best: bool,
}

impl TaxResult {
    pub fn new(
        scenario: FilingScenario,
        total_tax: Liability,
        breakdown: Vec<String>,
        detailed_report: Vec<ReportLine>,
    ) -> Self {
        Self {
            scenario,
            label: scenario.label().to_string(),
            total_tax,
            breakdown,
            detailed_report,
            is_best: false,
        }
    }

    /// Placeholder for a scenario the household cannot use.
    pub fn not_applicable() -> Self {
        Self::new(
            FilingScenario::NotApplicable,
            Liability::NotApplicable,
            vec!["Not Applicable".to_string()],
            Vec::new(),
        )
    }

    pub fn rendered_report(&self) -> Vec<String> {
        render_lines(&self.detailed_report)
    }
}

/// All four filing options of a household and the cheapest of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Standard filing when unmarried
    pub separate: TaxResult,
    pub joint_assessment: TaxResult,
    /// Personal assessment when unmarried
    pub personal_assessment_separate: TaxResult,
    pub personal_assessment_joint: TaxResult,
    pub best_option: TaxResult,
    /// Saving of the best option against separate (or standard) filing
    pub savings: Money,
}

impl OptimizationResult {
    /// The four options in comparison order.
    pub fn options(&self) -> [&TaxResult; 4] {
        [
            &self.separate,
            &self.joint_assessment,
            &self.personal_assessment_separate,
            &self.personal_assessment_joint,
        ]
    }
}
