//! Wire-shape detection.
//!
//! The API has shipped more than one record layout; each is recognized by
//! marker fields and mapped by its own module under `shapes/`. New layouts
//! get a new marker row and mapper instead of edits to existing ones.

use thiserror::Error;

use crate::raw::RawRecord;

/// Known raw record layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// One movement per record: a `type` discriminator plus a single amount.
    Entry,
    /// One day per record: separate `totalIncome` / `totalExpenses` magnitudes.
    SplitTotals,
}

/// Field aliases seen across API revisions.
pub const ID_ALIASES: &[&str] = &["id"];
pub const DATE_ALIASES: &[&str] = &["date", "data"];
pub const TYPE_ALIASES: &[&str] = &["type", "tipo"];
pub const AMOUNT_ALIASES: &[&str] = &["amount", "value", "valor"];
pub const DESCRIPTION_ALIASES: &[&str] = &["description", "descricao", "descrição"];
pub const CATEGORY_ALIASES: &[&str] = &["category", "categoria"];
pub const PAYMENT_METHOD_ALIASES: &[&str] = &["paymentMethod", "formaPagamento"];
pub const KIND_ALIASES: &[&str] = &["transactionKind", "tipoTransacao"];
pub const TOTAL_INCOME_ALIASES: &[&str] = &["totalIncome", "total_income"];
pub const TOTAL_EXPENSES_ALIASES: &[&str] = &["totalExpenses", "total_expenses"];

const MARKERS: &[(RecordShape, &[&str])] = &[
    (RecordShape::Entry, TYPE_ALIASES),
    (RecordShape::SplitTotals, TOTAL_INCOME_ALIASES),
    (RecordShape::SplitTotals, TOTAL_EXPENSES_ALIASES),
];

/// Identify the layout of a raw record, `None` when no marker matches.
pub fn detect(record: &RawRecord) -> Option<RecordShape> {
    MARKERS
        .iter()
        .find(|(_, markers)| record.has(markers))
        .map(|(shape, _)| *shape)
}

/// Why a raw record could not be normalized. Mapping failures drop the
/// record; they never surface to the caller as errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("missing field `{0}`")]
    Missing(&'static str),
    #[error("unparseable date `{0}`")]
    BadDate(String),
    #[error("non-numeric amount `{0}`")]
    BadAmount(String),
    #[error("unrecognized direction token `{0}`")]
    BadDirection(String),
    #[error("unrecognized record shape")]
    UnknownShape,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_detect_entry_shape() {
        let rec = record(json!({"type": "Entrada", "amount": 10, "date": "2023-07-19"}));
        assert_eq!(detect(&rec), Some(RecordShape::Entry));
    }

    #[test]
    fn test_detect_split_totals_shape() {
        let rec = record(json!({"date": "2023-07-19", "totalIncome": 500, "totalExpenses": 300}));
        assert_eq!(detect(&rec), Some(RecordShape::SplitTotals));

        // Either magnitude alone is enough of a marker.
        let rec = record(json!({"date": "2023-07-19", "totalExpenses": 300}));
        assert_eq!(detect(&rec), Some(RecordShape::SplitTotals));
    }

    #[test]
    fn test_entry_marker_wins_over_totals() {
        // A record carrying both a discriminator and split magnitudes reads
        // as the entry shape; the totals are ignored by its mapper.
        let rec = record(json!({"type": "Saída", "amount": 10, "totalIncome": 1}));
        assert_eq!(detect(&rec), Some(RecordShape::Entry));
    }

    #[test]
    fn test_unknown_shape() {
        let rec = record(json!({"foo": 1}));
        assert_eq!(detect(&rec), None);
    }
}
