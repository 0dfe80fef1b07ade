//! Mapper for the single-movement layout: a `type` discriminator plus one
//! amount per record.
//!
//! Observed rows:
//!   {"id":"42","date":"2023-07-19T14:30:00Z","type":"Saída","amount":300.0,
//!    "description":"Mercado","category":"Alimentação","paymentMethod":"Pix"}

use saldo_core::{
    Category, DEFAULT_DESCRIPTION, Direction, PaymentMethod, Transaction, TransactionKind,
};

use crate::normalize::IdSequence;
use crate::raw::RawRecord;
use crate::shape::{
    AMOUNT_ALIASES, CATEGORY_ALIASES, DATE_ALIASES, DESCRIPTION_ALIASES, KIND_ALIASES, MapError,
    PAYMENT_METHOD_ALIASES, TYPE_ALIASES,
};

const INCOME_TOKENS: &[&str] = &["entrada", "receita", "income"];
const EXPENSE_TOKENS: &[&str] = &["saída", "saida", "despesa", "expense"];

/// Canonical write token for a direction. The reader accepts the wider
/// alias tables above.
pub fn direction_token(direction: Direction) -> &'static str {
    match direction {
        Direction::Income => "Entrada",
        Direction::Expense => "Saída",
    }
}

fn parse_direction(token: &str) -> Result<Direction, MapError> {
    let lowered = token.trim().to_lowercase();
    if INCOME_TOKENS.contains(&lowered.as_str()) {
        Ok(Direction::Income)
    } else if EXPENSE_TOKENS.contains(&lowered.as_str()) {
        Ok(Direction::Expense)
    } else {
        Err(MapError::BadDirection(token.to_string()))
    }
}

/// Map one entry-shaped record into a canonical transaction.
pub fn map_entry(record: &RawRecord, ids: &mut IdSequence) -> Result<Transaction, MapError> {
    let timestamp = match record.date_field(DATE_ALIASES) {
        Some(ts) => ts,
        None => {
            return Err(match record.str_field(DATE_ALIASES) {
                Some(raw) => MapError::BadDate(raw.to_string()),
                None => MapError::Missing("date"),
            });
        }
    };

    let amount = match record.amount_field(AMOUNT_ALIASES) {
        Some(value) => value.abs(),
        None if record.has(AMOUNT_ALIASES) => {
            return Err(MapError::BadAmount(describe_field(record, AMOUNT_ALIASES)));
        }
        None => return Err(MapError::Missing("amount")),
    };

    let token = record
        .str_field(TYPE_ALIASES)
        .ok_or(MapError::Missing("type"))?;
    let direction = parse_direction(token)?;

    Ok(Transaction {
        id: record
            .id_field()
            .unwrap_or_else(|| ids.next_id()),
        timestamp,
        amount,
        direction,
        description: record
            .str_field(DESCRIPTION_ALIASES)
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        category: Category::from_label(record.str_field(CATEGORY_ALIASES).unwrap_or("")),
        payment_method: PaymentMethod::from_label(
            record.str_field(PAYMENT_METHOD_ALIASES).unwrap_or(""),
        ),
        kind: TransactionKind::from_label(record.str_field(KIND_ALIASES).unwrap_or("")),
    })
}

fn describe_field(record: &RawRecord, aliases: &[&str]) -> String {
    record
        .field(aliases)
        .map(|value| value.to_string())
        .unwrap_or_default()
}
