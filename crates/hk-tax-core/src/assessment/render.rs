//! Localized plain-text report over an [`OptimizationResult`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{OptimizationResult, TaxResult};
use crate::error::HkTaxError;
use crate::i18n::Language;
use crate::report::format_hkd;

/// Which scenarios a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioSelection {
    #[default]
    Best,
    All,
    Separate,
    Joint,
    PaSeparate,
    PaJoint,
}

impl FromStr for ScenarioSelection {
    type Err = HkTaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best" => Ok(Self::Best),
            "all" => Ok(Self::All),
            "separate" => Ok(Self::Separate),
            "joint" => Ok(Self::Joint),
            "pa-separate" => Ok(Self::PaSeparate),
            "pa-joint" => Ok(Self::PaJoint),
            other => Err(HkTaxError::InvalidInput {
                field: "scenario".into(),
                reason: format!(
                    "unknown scenario '{other}', expected best, all, separate, joint, pa-separate or pa-joint"
                ),
            }),
        }
    }
}

impl ScenarioSelection {
    fn pick<'a>(self, result: &'a OptimizationResult) -> Vec<&'a TaxResult> {
        match self {
            Self::Best => vec![&result.best_option],
            Self::All => result.options().to_vec(),
            Self::Separate => vec![&result.separate],
            Self::Joint => vec![&result.joint_assessment],
            Self::PaSeparate => vec![&result.personal_assessment_separate],
            Self::PaJoint => vec![&result.personal_assessment_joint],
        }
    }
}

/// Render the selected scenarios with localized chrome. Derivation lines
/// keep their English text.
pub fn render_report(result: &OptimizationResult, lang: Language, selection: ScenarioSelection) -> String {
    let labels = lang.labels();
    let mut out = Vec::new();

    out.push(format!("# {}", labels.report_title));
    out.push(labels.report_subtitle.to_string());
    out.push(String::new());
    out.push(format!(
        "{}: {} ({}: {})",
        labels.best_option,
        result.best_option.scenario.localized_label(lang),
        labels.you_save,
        format_hkd(result.savings)
    ));
    out.push(labels.compared.to_string());

    for option in selection.pick(result) {
        out.push(String::new());
        let title = option.scenario.localized_label(lang);
        if option.is_best {
            out.push(format!("## {title} [{}]", labels.best_option));
        } else {
            out.push(format!("## {title}"));
        }

        match option.total_tax.amount() {
            Some(total) => out.push(format!("{}: {}", labels.total_tax, format_hkd(total))),
            None => {
                out.push(labels.not_applicable.to_string());
                continue;
            }
        }

        if option.detailed_report.is_empty() {
            out.push(labels.no_logs.to_string());
        } else {
            out.extend(option.rendered_report());
        }
    }

    out.join("\n")
}
