use clap::Args;

use hk_tax_core::{optimize_household, render_report, HouseholdInput, Language, ScenarioSelection};

use crate::input;

/// Arguments for the text report
#[derive(Args)]
pub struct ReportArgs {
    /// Path to a JSON or YAML household file (stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Report language: en or zh
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Scenarios to include: best, all, separate, joint, pa-separate, pa-joint
    #[arg(long, default_value = "best")]
    pub scenario: String,
}

pub fn run_report(args: ReportArgs) -> Result<String, Box<dyn std::error::Error>> {
    let lang: Language = args.lang.parse()?;
    let selection: ScenarioSelection = args.scenario.parse()?;
    let household: HouseholdInput = input::load(args.input.as_deref())?;

    let output = optimize_household(&household)?;
    for warning in &output.warnings {
        log::warn!("{warning}");
    }

    Ok(render_report(&output.result, lang, selection))
}
