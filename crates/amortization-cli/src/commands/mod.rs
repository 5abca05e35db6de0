pub mod format;
pub mod loan;
pub mod proposal;
pub mod simulate;
