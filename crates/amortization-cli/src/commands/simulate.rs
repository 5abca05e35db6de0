use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use amortization_core::presentation::present;
use amortization_core::schedules::{self, AmortizationMethod, FinancingInput};

use crate::input;

/// Financing flags shared by `simulate` and `schedule`
#[derive(Args)]
pub struct FinancingArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment (defaults to 0)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Number of monthly periods
    #[arg(long)]
    pub term: Option<u32>,

    /// Interest rate per period as a fraction (0.008 = 0.8% a month)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

impl FinancingArgs {
    fn resolve(&self) -> Result<FinancingInput, Box<dyn std::error::Error>> {
        if let Some(loaded) = input::load::<FinancingInput>(self.input.as_deref())? {
            return Ok(loaded);
        }

        let property_value = self
            .property_value
            .ok_or("--property-value is required (or provide --input)")?;
        let term = self.term.ok_or("--term is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;

        Ok(FinancingInput::new(
            property_value,
            self.down_payment.unwrap_or(Decimal::ZERO),
            term,
            rate,
        )?)
    }
}

/// Arguments for a full simulation
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub financing: FinancingArgs,

    /// Emit the full-precision result instead of the rounded consumer view
    #[arg(long)]
    pub raw: bool,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let financing = args.financing.resolve()?;
    let output = schedules::compute_schedules(&financing)?;

    if args.raw {
        return Ok(serde_json::to_value(output)?);
    }

    let view = present(&output.result);
    let summary = serde_json::json!({
        "result": {
            "financed_amount": view.financed_amount,
            "term": view.term,
            "periodic_rate": view.periodic_rate,
            "sac_first_payment": view.constant_amortization.first_payment,
            "sac_last_payment": view.constant_amortization.last_payment,
            "sac_total_paid": view.constant_amortization.total_paid,
            "sac_total_interest": view.constant_amortization.total_interest,
            "price_payment": view.fixed_payment,
            "price_total_paid": view.fixed_installment.total_paid,
            "price_total_interest": view.fixed_installment.total_interest,
            "sac_savings": view.sac_savings,
            "computed_at": view.computed_at,
        },
        "methodology": output.methodology,
        "warnings": output.warnings,
        "metadata": output.metadata,
    });
    Ok(summary)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    /// Constant amortization (SAC)
    Cas,
    /// Fixed installment (Price)
    Fis,
}

impl From<MethodArg> for AmortizationMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Cas => AmortizationMethod::ConstantAmortization,
            MethodArg::Fis => AmortizationMethod::FixedInstallment,
        }
    }
}

/// Arguments for printing one schedule row by row
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub financing: FinancingArgs,

    /// Amortization method
    #[arg(long, value_enum, default_value = "cas")]
    pub method: MethodArg,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let financing = args.financing.resolve()?;
    let output = schedules::compute_schedules(&financing)?;
    let view = present(&output.result);
    let schedule = view.schedule(args.method.into());
    Ok(serde_json::to_value(&schedule.rows)?)
}
