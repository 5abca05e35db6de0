use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AmortizationError;
use crate::types::{ComputationOutput, Money, Rate, Years};
use crate::AmortizationResult;

/// Annual rate used by quick quotes when none is supplied (12% a year).
pub const DEFAULT_ANNUAL_RATE: Rate = dec!(0.12);

const MONTHS_PER_YEAR: u32 = 12;

/// Present value of one unit due `nper` periods out, `(1 + rate)^-nper`.
///
/// Built by repeated multiplication so long terms underflow towards zero
/// instead of overflowing the decimal range.
pub fn discount_factor(rate: Rate, nper: u32) -> AmortizationResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(AmortizationError::invalid(
            "rate",
            "Rate must be greater than -100%",
        ));
    }

    let growth = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| AmortizationError::invalid("rate", "Rate exceeds the decimal range"))?;
    let v = Decimal::ONE / growth;
    let mut factor = Decimal::ONE;
    for _ in 0..nper {
        factor *= v;
    }
    Ok(factor)
}

/// Level payment that retires `principal` over `nper` periods at `rate`.
///
/// Returned as a positive amount. A zero rate degenerates to straight division.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> AmortizationResult<Money> {
    if nper == 0 {
        return Err(AmortizationError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let annuity_factor = Decimal::ONE - discount_factor(rate, nper)?;
    if annuity_factor.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "annuity payment factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(annuity_factor))
        .ok_or_else(|| AmortizationError::invalid("rate", "Payment exceeds the decimal range"))
}

/// Nominal conversion of an annual rate to a per-period rate.
pub fn periodic_rate_from_annual(annual_rate: Rate, periods_per_year: u32) -> AmortizationResult<Rate> {
    if periods_per_year == 0 {
        return Err(AmortizationError::invalid(
            "periods_per_year",
            "Periods per year must be > 0",
        ));
    }
    Ok(annual_rate / Decimal::from(periods_per_year))
}

/// Final amount, in cents, after compounding `periods_per_year` times a year.
///
/// `years` may be fractional; the exponent `n * years` is split into whole
/// periods and a fractional remainder.
pub fn compound_interest(
    principal: Money,
    annual_rate: Rate,
    years: Years,
    periods_per_year: u32,
) -> AmortizationResult<Money> {
    if years < Decimal::ZERO {
        return Err(AmortizationError::invalid("years", "Years cannot be negative"));
    }
    let rate = periodic_rate_from_annual(annual_rate, periods_per_year)?;
    let base = Decimal::ONE + rate;
    let periods = years * Decimal::from(periods_per_year);
    let whole = periods.trunc();
    let fraction = periods - whole;

    let overflow = || AmortizationError::invalid("years", "Compounded amount overflows");
    let whole = whole.to_u64().ok_or_else(overflow)?;
    let mut growth = base.checked_powu(whole).ok_or_else(overflow)?;
    if !fraction.is_zero() {
        growth = base
            .checked_powd(fraction)
            .and_then(|partial| growth.checked_mul(partial))
            .ok_or_else(overflow)?;
    }
    let amount = principal.checked_mul(growth).ok_or_else(overflow)?;
    Ok(to_cents(amount))
}

/// Interest earned without compounding, in cents.
pub fn simple_interest(principal: Money, annual_rate: Rate, years: Years) -> Money {
    to_cents(principal * annual_rate * years)
}

// ---------------------------------------------------------------------------
// Loan quote
// ---------------------------------------------------------------------------

/// Quick loan quote from an annual rate, without a full schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    pub principal: Money,
    pub duration_months: u32,
    /// Nominal annual rate; 12% a year when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<Rate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteOutput {
    pub monthly_rate: Rate,
    pub monthly_payment: Money,
    pub total_amount: Money,
    pub total_interest: Money,
}

/// Monthly payment, total amount and total interest for a plain annuity loan.
/// Figures are rounded to cents after the full-precision computation.
pub fn quote_loan(input: &LoanQuoteInput) -> AmortizationResult<ComputationOutput<LoanQuoteOutput>> {
    let start = Instant::now();

    if input.principal <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "principal",
            "Loan principal must be positive",
        ));
    }
    if input.duration_months == 0 {
        return Err(AmortizationError::invalid(
            "duration_months",
            "Duration must be at least 1 month",
        ));
    }
    let annual_rate = input.annual_rate.unwrap_or(DEFAULT_ANNUAL_RATE);
    if annual_rate < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "annual_rate",
            "Annual rate cannot be negative",
        ));
    }

    let monthly_rate = periodic_rate_from_annual(annual_rate, MONTHS_PER_YEAR)?;
    let payment = annuity_payment(input.principal, monthly_rate, input.duration_months)?;
    let total_amount = payment
        .checked_mul(Decimal::from(input.duration_months))
        .ok_or_else(|| AmortizationError::invalid("principal", "Total amount overflows"))?;
    let total_interest = total_amount - input.principal;

    let output = LoanQuoteOutput {
        monthly_rate,
        monthly_payment: to_cents(payment),
        total_amount: to_cents(total_amount),
        total_interest: to_cents(total_interest),
    };

    Ok(ComputationOutput::new(
        "Annuity loan quote (nominal monthly rate)",
        serde_json::json!({
            "principal": input.principal.to_string(),
            "duration_months": input.duration_months,
            "annual_rate": annual_rate.to_string(),
        }),
        Vec::new(),
        start,
        output,
    ))
}

/// Round half-up to two places and pin the scale there, so `-15.5` reads `-15.50`.
pub(crate) fn to_cents(value: Money) -> Money {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_annuity_payment_basic() {
        // 1000 over 12 periods at 1%: ~88.85
        let pmt = annuity_payment(dec!(1000), dec!(0.01), 12).unwrap();
        assert!((pmt - dec!(88.8488)).abs() < dec!(0.001), "got {pmt}");
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let pmt = annuity_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_annuity_payment_single_period() {
        let pmt = annuity_payment(dec!(1000), dec!(0.05), 1).unwrap();
        assert!((pmt - dec!(1050)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_annuity_payment_zero_periods_error() {
        assert!(annuity_payment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_discount_factor_long_term_does_not_overflow() {
        // 1.5^2000 is far outside the decimal range; the discount form underflows instead.
        let v = discount_factor(dec!(0.5), 2000).unwrap();
        assert!(v >= Decimal::ZERO && v < dec!(0.0000001));
        let pmt = annuity_payment(dec!(1000), dec!(0.5), 2000).unwrap();
        assert!((pmt - dec!(500)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_periodic_rate_from_annual() {
        assert_eq!(periodic_rate_from_annual(dec!(0.12), 12).unwrap(), dec!(0.01));
        assert!(periodic_rate_from_annual(dec!(0.12), 0).is_err());
    }

    #[test]
    fn test_compound_interest_monthly() {
        // 100000 at 12% a year compounded monthly for 1 year: ~112682.50
        let amount = compound_interest(dec!(100000), dec!(0.12), dec!(1), 12).unwrap();
        assert_eq!(amount, dec!(112682.50));
        assert_eq!(amount.scale(), 2);
    }

    #[test]
    fn test_compound_interest_fractional_years() {
        // 1000 * 1.12^0.5 = 1058.300524...
        let amount = compound_interest(dec!(1000), dec!(0.12), dec!(0.5), 1).unwrap();
        assert!((amount - dec!(1058.30)).abs() <= dec!(0.01), "got {amount}");
        // 18 months compounded monthly: 1000 * 1.01^18 = 1196.147486...
        let amount = compound_interest(dec!(1000), dec!(0.12), dec!(1.5), 12).unwrap();
        assert_eq!(amount, dec!(1196.15));
    }

    #[test]
    fn test_compound_interest_rejects_negative_years() {
        assert!(compound_interest(dec!(1000), dec!(0.12), dec!(-1), 12).is_err());
    }

    #[test]
    fn test_simple_interest() {
        assert_eq!(simple_interest(dec!(1000), dec!(0.05), dec!(3)), dec!(150.00));
        // 1234.56 * 0.07 * 0.75 = 64.8144
        let interest = simple_interest(dec!(1234.56), dec!(0.07), dec!(0.75));
        assert_eq!(interest.to_string(), "64.81");
    }

    #[test]
    fn test_to_cents_pins_two_places() {
        assert_eq!(to_cents(dec!(-15.5)).to_string(), "-15.50");
        assert_eq!(to_cents(dec!(2.345)).to_string(), "2.35");
        assert_eq!(to_cents(dec!(7)).to_string(), "7.00");
    }

    #[test]
    fn test_annuity_payment_beyond_decimal_range_is_an_error() {
        // 7e28 at 50% for one period needs a payment of 1.05e29
        let result = annuity_payment(dec!(70000000000000000000000000000), dec!(0.5), 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_quote_loan_default_rate() {
        let input = LoanQuoteInput {
            principal: dec!(10000),
            duration_months: 12,
            annual_rate: None,
        };
        let out = quote_loan(&input).unwrap().result;
        assert_eq!(out.monthly_rate, dec!(0.01));
        assert_eq!(out.monthly_payment, dec!(888.49));
        assert_eq!(out.total_amount, dec!(10661.85));
        assert_eq!(out.total_interest, dec!(661.85));
    }

    #[test]
    fn test_quote_loan_rejects_zero_principal() {
        let input = LoanQuoteInput {
            principal: Decimal::ZERO,
            duration_months: 12,
            annual_rate: None,
        };
        assert!(quote_loan(&input).is_err());
    }
}
