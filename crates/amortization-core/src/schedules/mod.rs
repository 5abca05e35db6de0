//! Amortization engine: constant amortization and fixed installment schedules
//! computed side by side from a single financing input.
//!
//! All arithmetic is carried at full `rust_decimal::Decimal` precision through
//! the period recurrence; rounding to currency precision belongs to the
//! presentation layer.

pub mod constant_amortization;
pub mod fixed_installment;
pub mod input;
pub mod schedule;
pub mod simulation;

pub use input::FinancingInput;
pub use schedule::{AmortizationMethod, PaymentRow, Schedule, ScheduleSummary};
pub use simulation::{compute_schedules, compute_schedules_at, SimulationResult};
