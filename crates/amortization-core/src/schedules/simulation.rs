use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::constant_amortization::constant_amortization_schedule;
use super::fixed_installment::fixed_installment_schedule;
use super::input::FinancingInput;
use super::schedule::{AmortizationMethod, Schedule};
use super::schedule::out_of_range;
use crate::types::{ComputationOutput, Money, Rate};
use crate::AmortizationResult;

/// Both schedules for one financing input, at full precision.
///
/// Totals cover the financed amount only; the down payment is added back by
/// the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub property_value: Money,
    pub down_payment: Money,
    pub financed_amount: Money,
    pub term: u32,
    pub periodic_rate: Rate,
    pub constant_amortization: Schedule,
    pub fixed_installment: Schedule,
    /// Level installment of the fixed installment schedule.
    pub fixed_payment: Money,
    pub computed_at: DateTime<Utc>,
}

impl SimulationResult {
    pub fn schedule(&self, method: AmortizationMethod) -> &Schedule {
        match method {
            AmortizationMethod::ConstantAmortization => &self.constant_amortization,
            AmortizationMethod::FixedInstallment => &self.fixed_installment,
        }
    }

    /// Extra interest paid under the fixed installment method.
    pub fn interest_difference(&self) -> Money {
        self.fixed_installment.summary.total_interest
            - self.constant_amortization.summary.total_interest
    }
}

/// Compute both amortization schedules, stamped with the current time.
pub fn compute_schedules(
    input: &FinancingInput,
) -> AmortizationResult<ComputationOutput<SimulationResult>> {
    compute_schedules_at(input, Utc::now())
}

/// Compute both amortization schedules with a caller-supplied timestamp.
pub fn compute_schedules_at(
    input: &FinancingInput,
    computed_at: DateTime<Utc>,
) -> AmortizationResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let financed = input.financed_amount();
    if financed.is_zero() {
        warnings.push("Down payment covers the full property value; nothing is financed".into());
    }
    if input.periodic_rate.is_zero() {
        warnings.push(
            "Zero periodic rate: both methods reduce to equal principal-only payments".into(),
        );
    }

    let constant_amortization =
        constant_amortization_schedule(financed, input.term, input.periodic_rate)?;
    let (fixed_installment, fixed_payment) =
        fixed_installment_schedule(financed, input.term, input.periodic_rate)?;

    // The consumer total adds the down payment back on top of each schedule.
    for schedule in [&constant_amortization, &fixed_installment] {
        schedule
            .summary
            .total_paid
            .checked_add(input.down_payment)
            .ok_or_else(|| out_of_range("property_value", "Total paid with down payment"))?;
    }

    let result = SimulationResult {
        property_value: input.property_value,
        down_payment: input.down_payment,
        financed_amount: financed,
        term: input.term,
        periodic_rate: input.periodic_rate,
        constant_amortization,
        fixed_installment,
        fixed_payment,
        computed_at,
    };

    log::debug!(
        "computed schedules: financed={} term={} rate={} in {}us",
        financed,
        input.term,
        input.periodic_rate,
        start.elapsed().as_micros()
    );

    Ok(ComputationOutput::new(
        "Constant amortization (SAC) and fixed installment (Price) schedules",
        serde_json::json!({
            "property_value": input.property_value.to_string(),
            "down_payment": input.down_payment.to_string(),
            "financed_amount": financed.to_string(),
            "term": input.term,
            "periodic_rate": input.periodic_rate.to_string(),
            "rounding": "none (full precision; round at presentation)",
        }),
        warnings,
        start,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmortizationError;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn golden_input() -> FinancingInput {
        FinancingInput::new(dec!(300000), dec!(60000), 360, dec!(0.008)).unwrap()
    }

    #[test]
    fn test_golden_values() {
        let out = compute_schedules(&golden_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.financed_amount, dec!(240000));
        assert_eq!(r.constant_amortization.len(), 360);
        assert_eq!(r.fixed_installment.len(), 360);

        let principal = r.constant_amortization.rows[0].principal;
        assert!((principal - dec!(666.67)).abs() < dec!(0.01));
        assert!((r.constant_amortization.summary.first_payment - dec!(2586.67)).abs() < dec!(0.01));
        assert!((r.fixed_payment - dec!(2035.5839292)).abs() < dec!(0.0000001));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_timestamp_is_caller_supplied() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let out = compute_schedules_at(&golden_input(), at).unwrap();
        assert_eq!(out.result.computed_at, at);
    }

    #[test]
    fn test_fixed_installment_costs_more_interest() {
        let out = compute_schedules(&golden_input()).unwrap();
        assert!(out.result.interest_difference() > Decimal::ZERO);
    }

    #[test]
    fn test_invalid_input_produces_no_result() {
        let input = FinancingInput {
            property_value: dec!(100000),
            down_payment: dec!(150000),
            term: 120,
            periodic_rate: dec!(0.01),
        };
        assert!(compute_schedules(&input).is_err());
    }

    #[test]
    fn test_amounts_beyond_decimal_range_are_rejected_not_panicking() {
        // Passes field validation, but interest at 1000% overflows the first period
        let input = FinancingInput::new(
            dec!(10000000000000000000000000000),
            Decimal::ZERO,
            1,
            dec!(10),
        )
        .unwrap();
        match compute_schedules(&input) {
            Err(AmortizationError::InvalidInput { field, .. }) => {
                assert_eq!(field, "periodic_rate")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_down_payment_overflowing_consumer_total_is_rejected() {
        // Each schedule fits, but adding the down payment back would not
        let input = FinancingInput::new(
            dec!(79000000000000000000000000000),
            dec!(39000000000000000000000000000),
            1,
            dec!(0.5),
        )
        .unwrap();
        assert!(compute_schedules(&input).is_err());
    }

    #[test]
    fn test_fully_paid_down_warns() {
        let input = FinancingInput::new(dec!(50000), dec!(50000), 12, dec!(0.01)).unwrap();
        let out = compute_schedules(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.fixed_payment, Decimal::ZERO);
        assert!(out
            .result
            .constant_amortization
            .rows
            .iter()
            .all(|r| r.total.is_zero() && r.remaining_balance.is_zero()));
    }
}
