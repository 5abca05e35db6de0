use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::validate_signature;
use super::personal::UserIdentity;
use crate::schedules::SimulationResult;
use crate::AmortizationResult;

/// One stored simulation, in the shape the external document store keeps.
///
/// The engine result inside is never modified once the record exists; only
/// the signature fields and timestamps change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: Uuid,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub simulation: SimulationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_data: Option<String>,
    pub signed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<Utc>>,
}

impl SimulationRecord {
    pub fn new(
        owner: &UserIdentity,
        simulation: SimulationResult,
        signature_data: Option<String>,
        now: DateTime<Utc>,
    ) -> AmortizationResult<Self> {
        if let Some(signature) = &signature_data {
            validate_signature(signature)?;
        }
        let signed = signature_data.is_some();

        Ok(SimulationRecord {
            id: Uuid::new_v4(),
            user_id: owner.user_id.clone(),
            user_email: owner.email.clone(),
            user_name: owner.display_name(),
            simulation,
            signature_data,
            signed,
            created_at: now,
            updated_at: now,
            signed_at: signed.then_some(now),
        })
    }

    /// Sign (or re-sign) a stored simulation.
    pub fn attach_signature(&mut self, signature: String, now: DateTime<Utc>) -> AmortizationResult<()> {
        validate_signature(&signature)?;
        self.signature_data = Some(signature);
        self.signed = true;
        self.signed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}
