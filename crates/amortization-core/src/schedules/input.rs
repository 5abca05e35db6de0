use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Financing configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingInput {
    /// Total asset price.
    pub property_value: Money,
    /// Upfront payment, between zero and the property value.
    pub down_payment: Money,
    /// Number of monthly periods.
    pub term: u32,
    /// Interest rate applied once per period (0.01 = 1% per month).
    pub periodic_rate: Rate,
}

impl FinancingInput {
    /// Build a validated input.
    pub fn new(
        property_value: Money,
        down_payment: Money,
        term: u32,
        periodic_rate: Rate,
    ) -> AmortizationResult<Self> {
        let input = FinancingInput {
            property_value,
            down_payment,
            term,
            periodic_rate,
        };
        input.validate()?;
        Ok(input)
    }

    /// Principal to be repaid after the down payment.
    pub fn financed_amount(&self) -> Money {
        self.property_value - self.down_payment
    }

    pub fn validate(&self) -> AmortizationResult<()> {
        if self.property_value <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "property_value",
                "Property value must be positive",
            ));
        }
        if self.down_payment < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "down_payment",
                "Down payment cannot be negative",
            ));
        }
        if self.down_payment > self.property_value {
            return Err(AmortizationError::invalid(
                "down_payment",
                "Down payment cannot exceed the property value",
            ));
        }
        if self.term == 0 {
            return Err(AmortizationError::invalid(
                "term",
                "Term must be at least 1 period",
            ));
        }
        if self.periodic_rate < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "periodic_rate",
                "Periodic rate cannot be negative",
            ));
        }
        Ok(())
    }
}
