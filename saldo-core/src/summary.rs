//! Monthly totals over the period's full transaction set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Income, expenses and net balance for one period.
///
/// Always computed over the unfiltered period data: an active direction
/// filter narrows the displayed list but never the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
}

/// Sum the period's transactions into a summary. Empty input is a valid
/// zero state, not an error.
pub fn summarize(txns: &[Transaction]) -> MonthlySummary {
    let total_income: Decimal = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let total_expenses: Decimal = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

    MonthlySummary {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
    }
}
