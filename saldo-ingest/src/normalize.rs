//! The normalizer: raw wire records in, canonical transactions out.
//!
//! Malformed records are dropped and counted, never fatal; the report
//! carries the drop count so callers can surface it.

use std::time::{SystemTime, UNIX_EPOCH};

use saldo_core::Transaction;
use tracing::warn;

use crate::raw::RawRecord;
use crate::shape::{self, MapError, RecordShape};
use crate::shapes::{map_entry, map_split_totals};

/// Session-unique ids for records that arrive without one. These are
/// placeholders for display only and are never written back to the origin.
#[derive(Debug)]
pub struct IdSequence {
    base: u128,
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        let base = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        IdSequence { base, next: 0 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("local-{:x}-{}", self.base, self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a normalization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeReport {
    pub transactions: Vec<Transaction>,
    /// Records dropped for a malformed date/amount or unknown layout.
    pub dropped: usize,
}

/// Normalize a batch of raw records. Never errors: bad records are
/// dropped, counted and logged.
pub fn normalize(records: &[RawRecord]) -> NormalizeReport {
    let mut ids = IdSequence::new();
    let mut transactions = Vec::new();
    let mut dropped = 0;

    for record in records {
        let mapped = match shape::detect(record) {
            Some(RecordShape::Entry) => map_entry(record, &mut ids).map(|txn| vec![txn]),
            Some(RecordShape::SplitTotals) => map_split_totals(record, &mut ids),
            None => Err(MapError::UnknownShape),
        };

        match mapped {
            Ok(txns) => transactions.extend(txns),
            Err(err) => {
                dropped += 1;
                warn!("dropping malformed record: {err}");
            }
        }
    }

    NormalizeReport {
        transactions,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saldo_core::Direction;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_mixed_shapes_in_one_batch() {
        let report = normalize(&records(json!([
            {"date": "2023-07-19T10:00:00Z", "type": "Entrada", "amount": 500},
            {"date": "2023-07-19", "totalIncome": 0, "totalExpenses": 300},
        ])));

        assert_eq!(report.dropped, 0);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].direction, Direction::Income);
        assert_eq!(report.transactions[1].direction, Direction::Expense);
    }

    #[test]
    fn test_bad_records_are_dropped_not_fatal() {
        let report = normalize(&records(json!([
            {"date": "not a date", "type": "Entrada", "amount": 500},
            {"date": "2023-07-19", "type": "Entrada", "amount": "???"},
            {"unrelated": true},
            {"date": "2023-07-20", "type": "Saída", "amount": 100},
        ])));

        assert_eq!(report.dropped, 3);
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].amount, rust_decimal::Decimal::from(100));
    }

    #[test]
    fn test_empty_batch() {
        let report = normalize(&[]);
        assert!(report.transactions.is_empty());
        assert_eq!(report.dropped, 0);
    }

    #[test]
    fn test_synthesized_ids_are_unique_within_a_session() {
        let report = normalize(&records(json!([
            {"date": "2023-07-19", "type": "Entrada", "amount": 1},
            {"date": "2023-07-19", "type": "Entrada", "amount": 2},
            {"date": "2023-07-19", "totalIncome": 3, "totalExpenses": 4},
        ])));

        let mut ids: Vec<&str> = report.transactions.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), report.transactions.len());
    }
}
