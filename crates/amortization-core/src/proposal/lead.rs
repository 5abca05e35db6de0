use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::personal::{PersonalData, UserIdentity};

/// Contact data captured for a signed-in user, one record per user id.
///
/// Partial data is stored as given; `has_complete_lead_data` tells whether it
/// is enough to print a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub user_id: String,
    /// Account email from the identity provider.
    pub email: String,
    pub personal_data: PersonalData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadRecord {
    pub fn new(owner: &UserIdentity, personal_data: PersonalData, now: DateTime<Utc>) -> Self {
        LeadRecord {
            user_id: owner.user_id.clone(),
            email: owner.email.clone(),
            personal_data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the personal data. `created_at` is left as first saved.
    pub fn update(&mut self, personal_data: PersonalData, now: DateTime<Utc>) {
        self.personal_data = personal_data;
        self.updated_at = now;
    }

    /// Upsert keyed by user id: update `existing` when it belongs to `owner`,
    /// otherwise start a new record.
    pub fn save(
        existing: Option<LeadRecord>,
        owner: &UserIdentity,
        personal_data: PersonalData,
        now: DateTime<Utc>,
    ) -> Self {
        match existing {
            Some(mut lead) if lead.user_id == owner.user_id => {
                lead.email = owner.email.clone();
                lead.update(personal_data, now);
                lead
            }
            _ => LeadRecord::new(owner, personal_data, now),
        }
    }

    /// Name, phone and CPF are all present.
    pub fn has_complete_lead_data(&self) -> bool {
        let data = &self.personal_data;
        [&data.full_name, &data.phone, &data.cpf]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
