use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Balances below this are decimal-division residue and are reported as zero.
pub(crate) const BALANCE_EPSILON: Decimal = dec!(0.000000001);

/// Amortization method of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationMethod {
    /// Fixed principal per period; interest and payment decline (SAC).
    ConstantAmortization,
    /// Level payment from the annuity formula (Price table).
    FixedInstallment,
}

impl AmortizationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            AmortizationMethod::ConstantAmortization => "Constant Amortization (SAC)",
            AmortizationMethod::FixedInstallment => "Fixed Installment (Price)",
        }
    }
}

/// One period of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub period: u32,
    pub principal: Money,
    pub interest: Money,
    pub total: Money,
    /// Outstanding principal after this period's payment.
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub first_payment: Money,
    pub last_payment: Money,
    /// Financed-amount total; excludes the down payment.
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub method: AmortizationMethod,
    pub rows: Vec<PaymentRow>,
    pub summary: ScheduleSummary,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run the balance recurrence over `1..=term`.
///
/// `split` receives the period's interest and returns the principal portion to
/// retire together with the total payment. Each period reads the previous
/// closing balance, so this is an ordered fold. Arithmetic that leaves the
/// decimal range is reported as an error rather than a panic.
pub(crate) fn amortize<F>(
    financed: Money,
    term: u32,
    rate: Rate,
    split: F,
) -> AmortizationResult<Vec<PaymentRow>>
where
    F: Fn(Money) -> AmortizationResult<(Money, Money)>,
{
    let (_, rows) = (1..=term).try_fold(
        (financed, Vec::with_capacity(term as usize)),
        |(balance, mut rows), period| {
            let interest = balance
                .checked_mul(rate)
                .ok_or_else(|| out_of_range("periodic_rate", "Interest"))?;
            let (principal, total) = split(interest)?;
            let mut closing = balance
                .checked_sub(principal)
                .ok_or_else(|| out_of_range("property_value", "Balance"))?
                .max(Decimal::ZERO);
            if closing < BALANCE_EPSILON {
                closing = Decimal::ZERO;
            }
            rows.push(PaymentRow {
                period,
                principal,
                interest,
                total,
                remaining_balance: closing,
            });
            Ok::<_, AmortizationError>((closing, rows))
        },
    )?;
    Ok(rows)
}

/// Error for a figure that no longer fits in a `Decimal`.
pub(crate) fn out_of_range(field: &str, what: &str) -> AmortizationError {
    AmortizationError::invalid(
        field,
        format!("{what} exceeds the representable decimal range"),
    )
}

/// Checked sum, failing on `field` when the total leaves the decimal range.
pub(crate) fn checked_sum<I>(values: I, field: &str, what: &str) -> AmortizationResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or_else(|| out_of_range(field, what))
    })
}

/// First and last payment of a non-empty row set.
pub(crate) fn bookends(rows: &[PaymentRow]) -> (Money, Money) {
    let first = rows.first().map(|r| r.total).unwrap_or(Decimal::ZERO);
    let last = rows.last().map(|r| r.total).unwrap_or(Decimal::ZERO);
    (first, last)
}
