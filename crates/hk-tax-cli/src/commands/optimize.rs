use clap::Args;
use serde_json::Value;

use hk_tax_core::{optimize_household, HouseholdInput};

use crate::input;

/// Arguments for the household optimizer
#[derive(Args)]
pub struct OptimizeArgs {
    /// Path to a JSON or YAML household file (stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_optimize(args: OptimizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let household: HouseholdInput = input::load(args.input.as_deref())?;
    let result = optimize_household(&household)?;
    Ok(serde_json::to_value(result)?)
}
