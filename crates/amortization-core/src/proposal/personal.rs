use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::AmortizationResult;

const CPF_DIGITS: usize = 11;

/// Applicant identification printed on a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalData {
    pub full_name: String,
    pub phone: String,
    /// Brazilian taxpayer number, with or without punctuation.
    pub cpf: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PersonalData {
    pub fn validate(&self) -> AmortizationResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(AmortizationError::invalid(
                "full_name",
                "Full name is required",
            ));
        }

        let phone_digits = digits(&self.phone).len();
        if !(10..=11).contains(&phone_digits) {
            return Err(AmortizationError::invalid(
                "phone",
                format!("Phone must have 10 or 11 digits, found {phone_digits}"),
            ));
        }

        let cpf_digits = digits(&self.cpf).len();
        if cpf_digits != CPF_DIGITS {
            return Err(AmortizationError::invalid(
                "cpf",
                format!("CPF must have {CPF_DIGITS} digits, found {cpf_digits}"),
            ));
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(AmortizationError::invalid(
                    "email",
                    "Email address must contain '@'",
                ));
            }
        }
        Ok(())
    }

    /// CPF with punctuation stripped.
    pub fn normalized_cpf(&self) -> String {
        digits(&self.cpf)
    }
}

fn digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Identity handed over by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserIdentity {
    /// Display name, else the local part of the email.
    pub fn display_name(&self) -> String {
        match &self.display_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}
