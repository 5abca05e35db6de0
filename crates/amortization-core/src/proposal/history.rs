use serde::{Deserialize, Serialize};

use super::record::SimulationRecord;
use crate::error::AmortizationError;
use crate::schedules::SimulationResult;
use crate::AmortizationResult;

/// Number of records returned for a single user when no limit is given.
pub const DEFAULT_USER_RECORD_LIMIT: usize = 50;

/// Simulations run in the current session, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationHistory {
    entries: Vec<SimulationResult>,
}

impl SimulationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: SimulationResult) {
        self.entries.insert(0, result);
    }

    pub fn remove(&mut self, index: usize) -> AmortizationResult<SimulationResult> {
        if index >= self.entries.len() {
            return Err(AmortizationError::invalid(
                "index",
                format!("No history entry at {index} ({} stored)", self.entries.len()),
            ));
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn latest(&self) -> Option<&SimulationResult> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimulationResult> {
        self.entries.iter()
    }
}

/// A user's records, newest first, capped at `limit`
/// (`DEFAULT_USER_RECORD_LIMIT` when `None`).
pub fn records_for_user<'a>(
    records: &'a [SimulationRecord],
    user_id: &str,
    limit: Option<usize>,
) -> Vec<&'a SimulationRecord> {
    let mut mine: Vec<&SimulationRecord> =
        records.iter().filter(|r| r.user_id == user_id).collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    mine.truncate(limit.unwrap_or(DEFAULT_USER_RECORD_LIMIT));
    mine
}

/// Every stored record across users, newest first, without a cap.
pub fn all_records_newest_first(records: &[SimulationRecord]) -> Vec<&SimulationRecord> {
    let mut all: Vec<&SimulationRecord> = records.iter().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::UserIdentity;
    use crate::schedules::{compute_schedules_at, FinancingInput};
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn run(term: u32) -> SimulationResult {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let input = FinancingInput::new(dec!(100000), dec!(10000), term, dec!(0.01)).unwrap();
        compute_schedules_at(&input, at).unwrap().result
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut history = SimulationHistory::new();
        history.record(run(12));
        history.record(run(24));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().term, 24);

        let removed = history.remove(1).unwrap();
        assert_eq!(removed.term, 12);
        assert!(history.remove(5).is_err());

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_records_for_user_filters_sorts_and_limits() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let alice = UserIdentity {
            user_id: "alice".into(),
            email: "alice@example.com".into(),
            display_name: None,
        };
        let bob = UserIdentity {
            user_id: "bob".into(),
            email: "bob@example.com".into(),
            display_name: Some("Bob".into()),
        };

        let mut records = Vec::new();
        for day in 0..4 {
            let at = base + Duration::days(day);
            records.push(SimulationRecord::new(&alice, run(12), None, at).unwrap());
            records.push(SimulationRecord::new(&bob, run(12), None, at).unwrap());
        }

        let mine = records_for_user(&records, "alice", Some(3));
        assert_eq!(mine.len(), 3);
        assert!(mine.iter().all(|r| r.user_id == "alice"));
        assert_eq!(mine[0].created_at, base + Duration::days(3));
        assert!(mine.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        assert_eq!(records_for_user(&records, "bob", None).len(), 4);
        assert!(records_for_user(&records, "carol", None).is_empty());
    }

    #[test]
    fn test_all_records_newest_first_has_no_limit() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let owners: Vec<UserIdentity> = ["ana", "bia", "caio"]
            .iter()
            .map(|id| UserIdentity {
                user_id: (*id).into(),
                email: format!("{id}@example.com"),
                display_name: None,
            })
            .collect();

        let mut records = Vec::new();
        for minute in 0..60 {
            let owner = &owners[minute as usize % owners.len()];
            let at = base + Duration::minutes(minute);
            records.push(SimulationRecord::new(owner, run(12), None, at).unwrap());
        }

        let all = all_records_newest_first(&records);
        assert_eq!(all.len(), 60);
        assert_eq!(all[0].created_at, base + Duration::minutes(59));
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert!(all_records_newest_first(&[]).is_empty());
    }
}
