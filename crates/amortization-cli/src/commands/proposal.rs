use clap::Args;
use serde_json::Value;

use amortization_core::proposal::{self, ProposalInput};

use crate::input;

/// Arguments for building a proposal document
#[derive(Args)]
pub struct ProposalArgs {
    /// Path to JSON/YAML input file with financing, personal data and signature
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_proposal(args: ProposalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let proposal_input: ProposalInput = input::load(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for a proposal")?;
    let result = proposal::build_proposal(&proposal_input)?;
    Ok(serde_json::to_value(result)?)
}
