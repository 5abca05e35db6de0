use rust_decimal::Decimal;

use super::schedule::{
    amortize, bookends, checked_sum, out_of_range, AmortizationMethod, Schedule, ScheduleSummary,
};
use crate::time_value::annuity_payment;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Fixed installment (Price): level payment from the annuity formula, with the
/// interest share shrinking and the principal share growing over time.
///
/// Returns the schedule together with the level payment.
pub fn fixed_installment_schedule(
    financed: Money,
    term: u32,
    rate: Rate,
) -> AmortizationResult<(Schedule, Money)> {
    let payment = annuity_payment(financed, rate, term)?;
    let rows = amortize(financed, term, rate, |interest| {
        let principal = payment
            .checked_sub(interest)
            .ok_or_else(|| out_of_range("periodic_rate", "Principal share"))?;
        Ok((principal, payment))
    })?;

    // Totals come from the level payment, not from summing rows.
    let total_paid = payment
        .checked_mul(Decimal::from(term))
        .ok_or_else(|| out_of_range("property_value", "Total paid"))?;
    let total_interest = total_paid - financed;
    let total_principal =
        checked_sum(rows.iter().map(|r| r.principal), "property_value", "Total principal")?;
    let (first_payment, last_payment) = bookends(&rows);

    let schedule = Schedule {
        method: AmortizationMethod::FixedInstallment,
        rows,
        summary: ScheduleSummary {
            first_payment,
            last_payment,
            total_paid,
            total_interest,
            total_principal,
        },
    };
    Ok((schedule, payment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmortizationError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_level_payment() {
        let (s, payment) = fixed_installment_schedule(dec!(10000), 12, dec!(0.01)).unwrap();
        assert!((payment - dec!(888.4878867)).abs() < dec!(0.0000001));
        for row in &s.rows {
            assert_eq!(row.total, payment);
        }
        assert_eq!(s.summary.first_payment, payment);
        assert_eq!(s.summary.last_payment, payment);
    }

    #[test]
    fn test_principal_share_grows() {
        let (s, _) = fixed_installment_schedule(dec!(10000), 12, dec!(0.01)).unwrap();
        for pair in s.rows.windows(2) {
            assert!(pair[1].principal > pair[0].principal);
            assert!(pair[1].interest < pair[0].interest);
        }
        assert_eq!(s.rows.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_total_paid_beyond_decimal_range_is_an_error() {
        // 7e28 spread over two periods at 10%: payment * term no longer fits
        let result = fixed_installment_schedule(dec!(70000000000000000000000000000), 2, dec!(0.1));
        assert!(matches!(result, Err(AmortizationError::InvalidInput { .. })));
    }

    #[test]
    fn test_zero_rate_degenerates_to_division() {
        let (s, payment) = fixed_installment_schedule(dec!(1200), 12, Decimal::ZERO).unwrap();
        assert_eq!(payment, dec!(100));
        assert_eq!(s.summary.total_interest, Decimal::ZERO);
        assert_eq!(s.summary.total_paid, dec!(1200));
    }
}
