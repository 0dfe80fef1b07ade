//! Direction filtering and calendar-day grouping of the month view.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time::{day_label, local_day};
use crate::transaction::{Direction, Transaction};

/// Active list filter. The filter only narrows the displayed list; monthly
/// totals are always computed over the unfiltered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectionFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl DirectionFilter {
    /// Parse a UI label. The expense filter answers to the outflow alias
    /// as well ("saída" and "despesa" are the same filter).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "entrada" | "entradas" | "receita" | "receitas" | "income" => DirectionFilter::Income,
            "saída" | "saida" | "saídas" | "saidas" | "despesa" | "despesas" | "expense" => {
                DirectionFilter::Expense
            }
            _ => DirectionFilter::All,
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::Income => txn.direction == Direction::Income,
            DirectionFilter::Expense => txn.direction == Direction::Expense,
        }
    }
}

/// Retain only transactions matching `filter`; `All` passes the list
/// through unchanged.
pub fn filter_by_direction(txns: &[Transaction], filter: DirectionFilter) -> Vec<Transaction> {
    txns.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Transactions sharing one local calendar day, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub transactions: Vec<Transaction>,
}

impl DayGroup {
    pub fn income(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum()
    }

    pub fn expenses(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum()
    }

    pub fn net(&self) -> Decimal {
        self.income() - self.expenses()
    }

    /// Display label relative to `today` (re-derive per render, "today"
    /// moves).
    pub fn label(&self, today: NaiveDate) -> String {
        day_label(self.day, today)
    }
}

/// Group transactions by local calendar day in `tz`.
///
/// Groups come out most-recent day first; inside a group transactions are
/// ordered by timestamp descending, ties keeping input order.
pub fn group_by_day(txns: &[Transaction], tz: Tz) -> Vec<DayGroup> {
    let mut ordered: Vec<Transaction> = txns.to_vec();
    // Stable sort: equal timestamps keep their input order.
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut groups: Vec<DayGroup> = Vec::new();
    for txn in ordered {
        let day = local_day(txn.timestamp, tz);
        match groups.last_mut() {
            Some(group) if group.day == day => group.transactions.push(txn),
            _ => groups.push(DayGroup {
                day,
                transactions: vec![txn],
            }),
        }
    }
    groups
}
