//! Derivation log records and their text rendering.
//!
//! Calculators emit structured [`ReportLine`]s; the text form used by report
//! viewers (`###` section headings, `---` dividers, two-space indented
//! detail lines, `HK$` amounts) is produced only at render time.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use separator::Separatable;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

const CURRENCY_PREFIX: &str = "HK$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Section title, rendered with a `###` marker
    Heading,
    /// Separator between taxpayers or components
    Divider,
    /// Top-level figure
    Entry,
    /// Indented sub-item of the preceding entry
    Detail,
    /// Tax payable for a computation, highlighted by viewers
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    /// Amount is subtracted (rendered as `-HK$…`)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negated: bool,
}

impl ReportLine {
    pub fn render(&self) -> String {
        let body = match self.amount {
            Some(amount) if self.negated => format!("{}: -{}", self.text, format_hkd(amount)),
            Some(amount) => format!("{}: {}", self.text, format_hkd(amount)),
            None => self.text.clone(),
        };
        match self.kind {
            LineKind::Heading => format!("### {body}"),
            LineKind::Divider => "---".to_string(),
            LineKind::Detail => format!("  {body}"),
            LineKind::Entry | LineKind::Total => body,
        }
    }
}

/// Ordered derivation of one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivationLog {
    lines: Vec<ReportLine>,
}

impl DerivationLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: LineKind, text: impl Into<String>, amount: Option<Money>, negated: bool) {
        self.lines.push(ReportLine {
            kind,
            text: text.into(),
            amount,
            negated,
        });
    }

    pub fn heading(&mut self, text: impl Into<String>) {
        self.push(LineKind::Heading, text, None, false);
    }

    pub fn heading_amount(&mut self, text: impl Into<String>, amount: Money) {
        self.push(LineKind::Heading, text, Some(amount), false);
    }

    pub fn divider(&mut self) {
        self.push(LineKind::Divider, "", None, false);
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.push(LineKind::Entry, text, None, false);
    }

    pub fn entry(&mut self, text: impl Into<String>, amount: Money) {
        self.push(LineKind::Entry, text, Some(amount), false);
    }

    pub fn less(&mut self, text: impl Into<String>, amount: Money) {
        self.push(LineKind::Entry, text, Some(amount), true);
    }

    pub fn detail(&mut self, text: impl Into<String>, amount: Money) {
        self.push(LineKind::Detail, text, Some(amount), false);
    }

    pub fn detail_note(&mut self, text: impl Into<String>) {
        self.push(LineKind::Detail, text, None, false);
    }

    pub fn detail_less(&mut self, text: impl Into<String>, amount: Money) {
        self.push(LineKind::Detail, text, Some(amount), true);
    }

    pub fn total(&mut self, text: impl Into<String>, amount: Money) {
        self.push(LineKind::Total, text, Some(amount), false);
    }

    pub fn append(&mut self, other: DerivationLog) {
        self.lines.extend(other.lines);
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<ReportLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> Vec<String> {
        render_lines(&self.lines)
    }
}

pub fn render_lines(lines: &[ReportLine]) -> Vec<String> {
    lines.iter().map(ReportLine::render).collect()
}

/// Round half away from zero to whole dollars and render with `HK$` and
/// thousands separators, e.g. `HK$1,234,568`.
pub fn format_hkd(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = match rounded.to_i64() {
        Some(whole) => whole.separated_string(),
        None => rounded.to_string(),
    };
    match digits.strip_prefix('-') {
        Some(abs) => format!("-{CURRENCY_PREFIX}{abs}"),
        None => format!("{CURRENCY_PREFIX}{digits}"),
    }
}

/// Render a rate as a percentage in its shortest form: `17%`, `7.5%`.
pub fn format_rate(rate: Rate) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED).round_dp(2).normalize();
    format!("{pct}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_hkd_rounds_and_separates() {
        assert_eq!(format_hkd(dec!(0)), "HK$0");
        assert_eq!(format_hkd(dec!(999.4)), "HK$999");
        assert_eq!(format_hkd(dec!(999.5)), "HK$1,000");
        assert_eq!(format_hkd(dec!(1234567.89)), "HK$1,234,568");
        assert_eq!(format_hkd(dec!(-25000)), "-HK$25,000");
    }

    #[test]
    fn test_format_rate_shortest_form() {
        assert_eq!(format_rate(dec!(0.17)), "17%");
        assert_eq!(format_rate(dec!(0.02)), "2%");
        assert_eq!(format_rate(dec!(0.075)), "7.5%");
        assert_eq!(format_rate(dec!(0.150)), "15%");
    }

    #[test]
    fn test_render_markers() {
        let mut log = DerivationLog::new();
        log.heading("Self Salaries Tax");
        log.entry("Total Salary & Other Income", dec!(500000));
        log.detail_less("Less: Mandatory MPF", dec!(18000));
        log.note("Less: Allowances");
        log.divider();
        log.total("Self Tax Payable", dec!(41500));

        assert_eq!(
            log.render(),
            vec![
                "### Self Salaries Tax",
                "Total Salary & Other Income: HK$500,000",
                "  Less: Mandatory MPF: -HK$18,000",
                "Less: Allowances",
                "---",
                "Self Tax Payable: HK$41,500",
            ]
        );
    }

    #[test]
    fn test_report_line_json_shape() {
        let mut log = DerivationLog::new();
        log.less("Total Deductions", dec!(18000));
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json[0]["kind"], "entry");
        assert_eq!(json[0]["negated"], true);
        assert_eq!(json[0]["amount"], "18000");
    }
}
