use clap::Args;

use hk_tax_core::advice::{build_prompt, AdviceRequest};
use hk_tax_core::{optimize_household, HouseholdInput, Language};

use crate::input;

/// Arguments for printing the advice prompt
#[derive(Args)]
pub struct AdvicePromptArgs {
    /// Path to a JSON or YAML household file (stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Language the advice should be written in: en or zh
    #[arg(long, default_value = "en")]
    pub lang: String,
}

pub fn run_advice_prompt(args: AdvicePromptArgs) -> Result<String, Box<dyn std::error::Error>> {
    let language: Language = args.lang.parse()?;
    let household: HouseholdInput = input::load(args.input.as_deref())?;
    let output = optimize_household(&household)?;
    for warning in &output.warnings {
        log::warn!("{warning}");
    }

    let request = AdviceRequest::for_household(&household, output.result, language);
    Ok(build_prompt(&request))
}
