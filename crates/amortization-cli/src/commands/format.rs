use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use amortization_core::presentation;

/// Arguments for Brazilian Real formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Amount to format (e.g. 2586.6667)
    #[arg(long, conflicts_with = "parse")]
    pub amount: Option<Decimal>,

    /// Currency text to parse (e.g. "R$ 1.234,56")
    #[arg(long)]
    pub parse: Option<String>,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = match (args.amount, args.parse.as_deref()) {
        (Some(amount), _) => amount,
        (None, Some(text)) => presentation::parse_brl(text)?,
        (None, None) => return Err("--amount or --parse is required".into()),
    };

    Ok(serde_json::json!({
        "result": {
            "formatted": presentation::format_brl(amount),
            "amount": presentation::round_currency(amount),
            "abbreviated": presentation::abbreviate(amount, 1),
            "number": presentation::format_number(amount, 2),
        }
    }))
}
