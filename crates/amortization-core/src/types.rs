use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Currency amounts, always `Decimal` and never `f64`.
pub type Money = Decimal;

/// Rates expressed as decimals (0.01 = 1% per period). Never as percentages.
pub type Rate = Decimal;

/// Durations in years; fractions allowed (0.5 = six months).
pub type Years = Decimal;

/// Envelope returned by every amortization operation: the result plus how it
/// was obtained and anything the caller should know about the inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// Echo of the inputs that shaped the result.
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    /// Version of `amortization-core` that produced the output.
    pub version: String,
    pub computation_time_us: u64,
    /// Numeric representation the figures were computed in.
    pub precision: String,
}

impl<T: Serialize> ComputationOutput<T> {
    /// Close out a computation that began at `started`.
    ///
    /// Every amount in `result` is `Decimal`, so the precision tag is fixed.
    pub fn new(
        methodology: &str,
        assumptions: serde_json::Value,
        warnings: Vec<String>,
        started: Instant,
        result: T,
    ) -> Self {
        let elapsed_us = started.elapsed().as_micros() as u64;
        log::trace!("{methodology}: {elapsed_us}us, {} warning(s)", warnings.len());
        ComputationOutput {
            result,
            methodology: methodology.to_string(),
            assumptions,
            warnings,
            metadata: ComputationMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                computation_time_us: elapsed_us,
                precision: "decimal_128bit".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_carries_assumptions_and_version() {
        let out = ComputationOutput::new(
            "Level payment",
            serde_json::json!({ "term": 12 }),
            vec!["Zero periodic rate".into()],
            Instant::now(),
            Decimal::ONE,
        );
        assert_eq!(out.assumptions["term"], 12);
        assert_eq!(out.metadata.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(out.metadata.precision, "decimal_128bit");
        assert_eq!(out.warnings.len(), 1);
    }
}
