//! English and Traditional Chinese labels for scenario names and report
//! chrome. Derivation lines are not translated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HkTaxError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = HkTaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(HkTaxError::InvalidInput {
                field: "language".into(),
                reason: format!("unsupported language '{other}', expected 'en' or 'zh'"),
            }),
        }
    }
}

/// Fixed dictionary for one language.
#[derive(Debug)]
pub struct Labels {
    pub separate_filing: &'static str,
    pub joint_assessment: &'static str,
    pub personal_assessment_separate: &'static str,
    pub personal_assessment_joint: &'static str,
    pub standard_filing: &'static str,
    pub personal_assessment: &'static str,
    pub not_applicable_label: &'static str,

    pub report_title: &'static str,
    pub report_subtitle: &'static str,
    pub total_tax: &'static str,
    pub best_option: &'static str,
    pub no_logs: &'static str,
    pub not_applicable: &'static str,
    pub you_save: &'static str,
    pub compared: &'static str,

    pub advice_missing_key: &'static str,
    pub advice_quota: &'static str,
    pub advice_failed: &'static str,
    pub advice_empty: &'static str,
}

static EN: Labels = Labels {
    separate_filing: "Separate Filing",
    joint_assessment: "Joint Assessment (Salaries)",
    personal_assessment_separate: "Personal Assessment (Separate)",
    personal_assessment_joint: "Personal Assessment (Joint)",
    standard_filing: "Standard Filing",
    personal_assessment: "Personal Assessment",
    not_applicable_label: "N/A",

    report_title: "Detailed Calculation Report",
    report_subtitle: "Breakdown of income, deductions, and tax computation",
    total_tax: "Total Tax Liability",
    best_option: "Best Option",
    no_logs: "No detailed logs available.",
    not_applicable: "This option is not applicable.",
    you_save: "You save",
    compared: "Compared to standard separate filing",

    advice_missing_key: "API Key missing. Please configure the application environment.",
    advice_quota: "AI Service is busy (Quota Exceeded). Please try again in a minute.",
    advice_failed: "Failed to load AI advice. Please try again later.",
    advice_empty: "No advice generated.",
};

static ZH: Labels = Labels {
    separate_filing: "分開評稅",
    joint_assessment: "合併評稅 (薪俸稅)",
    personal_assessment_separate: "個人入息課稅 (分開)",
    personal_assessment_joint: "個人入息課稅 (合併)",
    standard_filing: "標準評稅",
    personal_assessment: "個人入息課稅",
    not_applicable_label: "不適用",

    report_title: "詳細計算報告",
    report_subtitle: "收入、扣除項目及稅款計算明細",
    total_tax: "應繳稅款總額",
    best_option: "最佳方案",
    no_logs: "沒有詳細記錄。",
    not_applicable: "此選項不適用。",
    you_save: "你節省了",
    compared: "相對於標準分開評稅",

    advice_missing_key: "未設定 API 金鑰，請檢查應用程式環境設定。",
    advice_quota: "AI 服務繁忙（已達到配額上限）。請稍後再試。",
    advice_failed: "暫時無法獲取 AI 建議，請稍後再試。",
    advice_empty: "未有生成建議。",
};
