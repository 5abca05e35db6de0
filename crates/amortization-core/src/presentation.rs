//! Presentation of simulation results: currency-precision rounding, the
//! consumer-facing totals (down payment included) and Brazilian Real text
//! formatting.
//!
//! Nothing here feeds back into the engine. Values are rounded once, on the
//! way out.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AmortizationError;
use crate::schedules::{AmortizationMethod, PaymentRow, Schedule, SimulationResult};
use crate::time_value::to_cents;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Decimal places shown for currency amounts.
pub const CURRENCY_DP: u32 = 2;

const CURRENCY_SYMBOL: &str = "R$";

/// Round to cents, midpoint away from zero (half-up for positive amounts).
/// The result always carries exactly two decimal places.
pub fn round_currency(value: Money) -> Money {
    to_cents(value)
}

// ---------------------------------------------------------------------------
// Consumer view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedSchedule {
    pub method: AmortizationMethod,
    pub label: String,
    pub first_payment: Money,
    pub last_payment: Money,
    /// Down payment plus everything paid on the financed amount.
    pub total_paid: Money,
    /// Paid on the financed amount only.
    pub financed_total_paid: Money,
    pub total_interest: Money,
    pub rows: Vec<PaymentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedSimulation {
    pub property_value: Money,
    pub down_payment: Money,
    pub financed_amount: Money,
    pub term: u32,
    pub periodic_rate: Rate,
    pub constant_amortization: PresentedSchedule,
    pub fixed_installment: PresentedSchedule,
    pub fixed_payment: Money,
    /// How much less the constant amortization schedule costs in total.
    pub sac_savings: Money,
    pub computed_at: DateTime<Utc>,
}

impl PresentedSimulation {
    pub fn schedule(&self, method: AmortizationMethod) -> &PresentedSchedule {
        match method {
            AmortizationMethod::ConstantAmortization => &self.constant_amortization,
            AmortizationMethod::FixedInstallment => &self.fixed_installment,
        }
    }
}

/// Round a full-precision result for display and add the down payment back
/// into each schedule's total paid.
pub fn present(result: &SimulationResult) -> PresentedSimulation {
    PresentedSimulation {
        property_value: round_currency(result.property_value),
        down_payment: round_currency(result.down_payment),
        financed_amount: round_currency(result.financed_amount),
        term: result.term,
        periodic_rate: result.periodic_rate,
        constant_amortization: present_schedule(&result.constant_amortization, result.down_payment),
        fixed_installment: present_schedule(&result.fixed_installment, result.down_payment),
        fixed_payment: round_currency(result.fixed_payment),
        sac_savings: round_currency(
            (result.fixed_installment.summary.total_paid
                - result.constant_amortization.summary.total_paid)
                .abs(),
        ),
        computed_at: result.computed_at,
    }
}

fn present_schedule(schedule: &Schedule, down_payment: Money) -> PresentedSchedule {
    let summary = &schedule.summary;
    PresentedSchedule {
        method: schedule.method,
        label: schedule.method.label().to_string(),
        first_payment: round_currency(summary.first_payment),
        last_payment: round_currency(summary.last_payment),
        total_paid: round_currency(summary.total_paid + down_payment),
        financed_total_paid: round_currency(summary.total_paid),
        total_interest: round_currency(summary.total_interest),
        rows: schedule
            .rows
            .iter()
            .map(|row| PaymentRow {
                period: row.period,
                principal: round_currency(row.principal),
                interest: round_currency(row.interest),
                total: round_currency(row.total),
                remaining_balance: round_currency(row.remaining_balance),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting (pt-BR)
// ---------------------------------------------------------------------------

/// `1234.5` → `"1.234,50"` with `decimals` fraction digits.
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", decimals as usize, rounded.abs());

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// `1234.5` → `"R$ 1.234,50"`; negatives as `"-R$ 1.234,50"`.
pub fn format_brl(value: Money) -> String {
    let body = format_number(value.abs(), CURRENCY_DP);
    let rounded = round_currency(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{CURRENCY_SYMBOL} {body}")
    } else {
        format!("{CURRENCY_SYMBOL} {body}")
    }
}

/// `0.12` → `"12,00%"`.
pub fn format_percentage(rate: Rate, decimals: u32) -> String {
    format!("{}%", format_number(rate * dec!(100), decimals))
}

/// Parse text such as `"R$ 1.234,56"` or `"1234,56"`.
///
/// Blank text is zero. `.` is a thousands separator and `,` the decimal mark.
pub fn parse_brl(text: &str) -> AmortizationResult<Money> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let negative = trimmed.starts_with('-');
    let cleaned: String = trimmed
        .trim_start_matches('-')
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value = Decimal::from_str(&cleaned).map_err(|_| {
        AmortizationError::invalid("amount", format!("'{text}' is not a currency amount"))
    })?;
    Ok(if negative { -value } else { value })
}

/// `1250000` → `"1,3M"`; values under a thousand are printed whole.
pub fn abbreviate(value: Decimal, decimals: u32) -> String {
    const SCALES: [(Decimal, &str); 3] = [
        (dec!(1000000000), "B"),
        (dec!(1000000), "M"),
        (dec!(1000), "K"),
    ];

    for (threshold, suffix) in SCALES {
        if value.abs() >= threshold {
            let scaled = (value / threshold)
                .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            let text = format!("{:.*}", decimals as usize, scaled).replace('.', ",");
            return format!("{text}{suffix}");
        }
    }
    format_number(value, 0)
}
