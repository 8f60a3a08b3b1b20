use std::time::Instant;

use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::{json, Value};

use hk_tax_core::calculators::profits::profits_tax;
use hk_tax_core::calculators::progressive::progressive_tax;
use hk_tax_core::calculators::property::property_tax;
use hk_tax_core::calculators::salaries::Taxpayer;
use hk_tax_core::calculators::standard::standard_tax;
use hk_tax_core::calculators::Computation;
use hk_tax_core::with_metadata;

/// Arguments for progressive salaries tax
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProgressiveArgs {
    /// Net chargeable income (after deductions and allowances)
    #[arg(long)]
    pub income: Option<Decimal>,
}

/// Arguments for standard rate salaries tax
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct StandardArgs {
    /// Net income (after deductions, before allowances)
    #[arg(long)]
    pub income: Option<Decimal>,
}

/// Arguments for unincorporated profits tax
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProfitsArgs {
    /// Assessable profit
    #[arg(long)]
    pub profit: Option<Decimal>,
}

/// Arguments for property tax
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PropertyArgs {
    /// Gross rental income
    #[arg(long)]
    pub rental: Option<Decimal>,

    /// Rates paid by the owner
    #[arg(long)]
    pub rates: Option<Decimal>,
}

#[derive(Serialize)]
struct CalculatorResult {
    tax: Decimal,
    derivation: Vec<String>,
}

fn envelope(
    methodology: &str,
    assumptions: Value,
    start: Instant,
    computation: Computation,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut warnings = Vec::new();
    if computation.tax.is_zero() {
        warnings.push("No tax payable".to_string());
    }
    let result = CalculatorResult {
        tax: computation.tax,
        derivation: computation.report.render(),
    };
    let output = with_metadata(
        methodology,
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_progressive(args: ProgressiveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let income = args.income.ok_or("--income is required")?;
    envelope(
        "Progressive salaries tax (2%, 6%, 10%, 14% on HK$50,000 bands, 17% on the remainder)",
        json!({ "net_chargeable_income": income }),
        start,
        progressive_tax(income),
    )
}

pub fn run_standard(args: StandardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let income = args.income.ok_or("--income is required")?;
    envelope(
        "Two-tier standard rate (15% on first HK$5,000,000, 16% on the remainder)",
        json!({ "net_income": income }),
        start,
        standard_tax(income.max(Decimal::ZERO)),
    )
}

pub fn run_profits(args: ProfitsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let profit = args.profit.ok_or("--profit is required")?;
    envelope(
        "Two-tier profits tax for unincorporated business (7.5% then 15%)",
        json!({ "assessable_profit": profit }),
        start,
        profits_tax(profit, Taxpayer::Principal),
    )
}

pub fn run_property(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let rental = args.rental.ok_or("--rental is required")?;
    let rates = args.rates.unwrap_or(dec!(0));
    envelope(
        "Property tax at 15% of net assessable value after rates and 20% statutory allowance",
        json!({ "gross_rental_income": rental, "rates_paid": rates }),
        start,
        property_tax(rental, rates, Taxpayer::Principal),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progressive_envelope() {
        let value = run_progressive(ProgressiveArgs {
            income: Some(dec!(350_000)),
        })
        .unwrap();
        let tax: Decimal = value["result"]["tax"].as_str().unwrap().parse().unwrap();
        assert_eq!(tax, dec!(41_500));
        assert_eq!(
            value["result"]["derivation"][0],
            "Calculate Progressive Tax on: HK$350,000"
        );
        assert_eq!(value["metadata"]["tax_year"], "2024/25");
    }

    #[test]
    fn test_missing_flag() {
        let err = run_profits(ProfitsArgs { profit: None }).unwrap_err();
        assert_eq!(err.to_string(), "--profit is required");
    }

    #[test]
    fn test_property_defaults_rates_to_zero() {
        let value = run_property(PropertyArgs {
            rental: Some(dec!(100_000)),
            rates: None,
        })
        .unwrap();
        let rates: Decimal = value["assumptions"]["rates_paid"].as_str().unwrap().parse().unwrap();
        assert!(rates.is_zero());
        assert_eq!(value["warnings"].as_array().unwrap().len(), 0);
    }
}
