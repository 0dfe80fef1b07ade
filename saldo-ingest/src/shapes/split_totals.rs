//! Mapper for the per-day totals layout: one record per calendar day with
//! separate income and expense magnitudes.
//!
//! Observed rows:
//!   {"id":"1","date":"2023-07-19","totalIncome":500,"totalExpenses":300}
//!
//! Each non-zero magnitude becomes its own transaction. Records carrying
//! both magnitudes yield two transactions so neither side is lost; the wire
//! format never promised only one would be set.

use rust_decimal::Decimal;
use saldo_core::{Category, Direction, PaymentMethod, Transaction, TransactionKind};

use crate::normalize::IdSequence;
use crate::raw::RawRecord;
use crate::shape::{DATE_ALIASES, MapError, TOTAL_EXPENSES_ALIASES, TOTAL_INCOME_ALIASES};

/// Map one split-totals record into zero, one or two transactions.
pub fn map_split_totals(
    record: &RawRecord,
    ids: &mut IdSequence,
) -> Result<Vec<Transaction>, MapError> {
    let timestamp = match record.date_field(DATE_ALIASES) {
        Some(ts) => ts,
        None => {
            return Err(match record.str_field(DATE_ALIASES) {
                Some(raw) => MapError::BadDate(raw.to_string()),
                None => MapError::Missing("date"),
            });
        }
    };

    let income = side_magnitude(record, TOTAL_INCOME_ALIASES)?;
    let expenses = side_magnitude(record, TOTAL_EXPENSES_ALIASES)?;

    let raw_id = record.id_field();
    let both_sides = income.is_some() && expenses.is_some();

    let mut out = Vec::new();
    if let Some(amount) = income {
        out.push(synthesize(
            side_id(&raw_id, both_sides, "in", ids),
            timestamp,
            amount,
            Direction::Income,
            "Receitas",
        ));
    }
    if let Some(amount) = expenses {
        out.push(synthesize(
            side_id(&raw_id, both_sides, "out", ids),
            timestamp,
            amount,
            Direction::Expense,
            "Despesas",
        ));
    }
    Ok(out)
}

/// One side's magnitude: `None` when absent or zero, error when present
/// but non-numeric.
fn side_magnitude(record: &RawRecord, aliases: &[&str]) -> Result<Option<Decimal>, MapError> {
    match record.amount_field(aliases) {
        Some(value) if value.is_zero() => Ok(None),
        Some(value) => Ok(Some(value.abs())),
        None if record.has(aliases) => Err(MapError::BadAmount(
            record
                .field(aliases)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        )),
        None => Ok(None),
    }
}

fn side_id(raw_id: &Option<String>, both_sides: bool, suffix: &str, ids: &mut IdSequence) -> String {
    match raw_id {
        // The record id can only name one transaction; suffix when the
        // record splits into two.
        Some(id) if both_sides => format!("{id}-{suffix}"),
        Some(id) => id.clone(),
        None => ids.next_id(),
    }
}

fn synthesize(
    id: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    amount: Decimal,
    direction: Direction,
    description: &str,
) -> Transaction {
    Transaction {
        id,
        timestamp,
        amount,
        direction,
        description: description.to_string(),
        category: Category::Uncategorized,
        payment_method: PaymentMethod::Unspecified,
        kind: TransactionKind::Regular,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> Result<Vec<Transaction>, MapError> {
        let record: RawRecord = serde_json::from_value(value).unwrap();
        map_split_totals(&record, &mut IdSequence::new())
    }

    #[test]
    fn test_both_sides_yield_two_transactions() {
        let txns = map(json!({
            "id": "1",
            "date": "2023-07-19",
            "totalIncome": 500,
            "totalExpenses": 300,
        }))
        .unwrap();

        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].direction, Direction::Income);
        assert_eq!(txns[0].amount, Decimal::from(500));
        assert_eq!(txns[0].id, "1-in");
        assert_eq!(txns[1].direction, Direction::Expense);
        assert_eq!(txns[1].amount, Decimal::from(300));
        assert_eq!(txns[1].id, "1-out");
    }

    #[test]
    fn test_single_side_keeps_record_id() {
        let txns = map(json!({
            "id": "9",
            "date": "2023-07-19",
            "totalIncome": 0,
            "totalExpenses": 100,
        }))
        .unwrap();

        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].id, "9");
        assert_eq!(txns[0].direction, Direction::Expense);
        assert_eq!(txns[0].description, "Despesas");
    }

    #[test]
    fn test_zero_day_yields_nothing() {
        let txns = map(json!({
            "date": "2023-07-19",
            "totalIncome": 0,
            "totalExpenses": 0,
        }))
        .unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_missing_id_is_synthesized() {
        let txns = map(json!({
            "date": "2023-07-19",
            "totalIncome": 500,
        }))
        .unwrap();
        assert!(txns[0].id.starts_with("local-"));
    }

    #[test]
    fn test_bad_magnitude_is_an_error() {
        let err = map(json!({
            "date": "2023-07-19",
            "totalIncome": "quinhentos",
        }))
        .unwrap_err();
        assert!(matches!(err, MapError::BadAmount(_)));
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let err = map(json!({"totalIncome": 500})).unwrap_err();
        assert_eq!(err, MapError::Missing("date"));
    }
}
