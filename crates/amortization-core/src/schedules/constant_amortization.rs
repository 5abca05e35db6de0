use rust_decimal::Decimal;

use super::schedule::{
    amortize, bookends, checked_sum, out_of_range, AmortizationMethod, Schedule, ScheduleSummary,
};
use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Constant amortization (SAC): `financed / term` of principal every period,
/// interest on the opening balance, so the payment falls period over period.
pub fn constant_amortization_schedule(
    financed: Money,
    term: u32,
    rate: Rate,
) -> AmortizationResult<Schedule> {
    if term == 0 {
        return Err(AmortizationError::invalid(
            "term",
            "Term must be at least 1 period",
        ));
    }

    let principal = financed / Decimal::from(term);
    let rows = amortize(financed, term, rate, |interest| {
        let total = principal
            .checked_add(interest)
            .ok_or_else(|| out_of_range("property_value", "Payment"))?;
        Ok((principal, total))
    })?;

    let total_paid = checked_sum(rows.iter().map(|r| r.total), "property_value", "Total paid")?;
    let total_interest =
        checked_sum(rows.iter().map(|r| r.interest), "periodic_rate", "Total interest")?;
    let total_principal =
        checked_sum(rows.iter().map(|r| r.principal), "property_value", "Total principal")?;
    let (first_payment, last_payment) = bookends(&rows);

    Ok(Schedule {
        method: AmortizationMethod::ConstantAmortization,
        rows,
        summary: ScheduleSummary {
            first_payment,
            last_payment,
            total_paid,
            total_interest,
            total_principal,
        },
    })
}
