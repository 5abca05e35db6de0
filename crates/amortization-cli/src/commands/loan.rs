use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amortization_core::time_value::{self, LoanQuoteInput};

use crate::input;

/// Arguments for a quick loan quote
#[derive(Args)]
pub struct LoanQuoteArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Duration in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Nominal annual rate as a fraction (defaults to 0.12)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,
}

pub fn run_loan_quote(args: LoanQuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input: LoanQuoteInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => LoanQuoteInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            duration_months: args
                .months
                .ok_or("--months is required (or provide --input)")?,
            annual_rate: args.annual_rate,
        },
    };

    let result = time_value::quote_loan(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}
