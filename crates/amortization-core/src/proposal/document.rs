use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::personal::PersonalData;
use crate::error::AmortizationError;
use crate::presentation::{present, PresentedSimulation};
use crate::schedules::{compute_schedules_at, AmortizationMethod, FinancingInput};
use crate::types::ComputationOutput;
use crate::AmortizationResult;

const SIGNATURE_PREFIX: &str = "data:image/";
const SIGNATURE_ENCODING: &str = ";base64,";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalInput {
    pub financing: FinancingInput,
    pub personal_data: PersonalData,
    /// Signature image as a `data:image/...;base64,` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_data: Option<String>,
    /// Method highlighted on the document; constant amortization when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_method: Option<AmortizationMethod>,
}

/// Everything an external renderer needs to lay out a proposal. Carries
/// rounded figures only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalDocument {
    pub simulation: PresentedSimulation,
    pub personal_data: PersonalData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_data: Option<String>,
    pub signed: bool,
    pub selected_method: AmortizationMethod,
    pub created_at: DateTime<Utc>,
}

/// Check that a signature is a base64 image data URL.
pub fn validate_signature(signature: &str) -> AmortizationResult<()> {
    let payload = signature
        .strip_prefix(SIGNATURE_PREFIX)
        .and_then(|rest| rest.split_once(SIGNATURE_ENCODING))
        .map(|(_, data)| data);

    match payload {
        Some(data) if !data.is_empty() => Ok(()),
        _ => Err(AmortizationError::invalid(
            "signature_data",
            "Signature must be a base64 image data URL",
        )),
    }
}

/// Compute the simulation and assemble the proposal document.
pub fn build_proposal(input: &ProposalInput) -> AmortizationResult<ComputationOutput<ProposalDocument>> {
    build_proposal_at(input, Utc::now())
}

pub fn build_proposal_at(
    input: &ProposalInput,
    now: DateTime<Utc>,
) -> AmortizationResult<ComputationOutput<ProposalDocument>> {
    let start = Instant::now();

    input.personal_data.validate()?;
    if let Some(signature) = &input.signature_data {
        validate_signature(signature)?;
    }

    let simulation = compute_schedules_at(&input.financing, now)?;
    let mut warnings = simulation.warnings;
    if input.signature_data.is_none() {
        warnings.push("Proposal is unsigned".into());
    }

    let selected_method = input
        .selected_method
        .unwrap_or(AmortizationMethod::ConstantAmortization);

    let document = ProposalDocument {
        simulation: present(&simulation.result),
        personal_data: input.personal_data.clone(),
        signature_data: input.signature_data.clone(),
        signed: input.signature_data.is_some(),
        selected_method,
        created_at: now,
    };

    log::debug!(
        "built proposal: method={:?} signed={}",
        selected_method,
        document.signed
    );

    Ok(ComputationOutput::new(
        "Loan proposal document",
        serde_json::json!({
            "financing": input.financing,
            "selected_method": selected_method,
        }),
        warnings,
        start,
        document,
    ))
}
