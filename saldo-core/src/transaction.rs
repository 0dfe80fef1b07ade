//! Canonical transaction types shared by every saldo crate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder used when a raw record carries no description.
pub const DEFAULT_DESCRIPTION: &str = "Sem descrição";

/// Whether a movement increases or decreases the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

/// Tag distinguishing one-off, recurring and installment movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionKind {
    #[default]
    #[serde(rename = "regular")]
    Regular,
    #[serde(rename = "recurring")]
    Recurring,
    #[serde(rename = "installment")]
    Installment,
}

impl TransactionKind {
    /// Parse a wire label. Unknown labels fall back to `Regular`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "recorrente" | "recurring" => TransactionKind::Recurring,
            "parcelada" | "parcelado" | "installment" => TransactionKind::Installment,
            _ => TransactionKind::Regular,
        }
    }

    /// Display/write label; `from_label` accepts it back.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Regular => "Regular",
            TransactionKind::Recurring => "Recorrente",
            TransactionKind::Installment => "Parcelada",
        }
    }
}

/// Expense/income category from the app's fixed catalog.
///
/// Labels outside the catalog are kept verbatim in `Other` so the original
/// text still displays; presentation falls back to a default treatment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Housing,
    Transport,
    Leisure,
    Health,
    Education,
    Salary,
    Uncategorized,
    Other(String),
}

impl Category {
    /// Parse a wire label against the catalog (case-insensitive).
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "alimentação" | "alimentacao" => Category::Food,
            "moradia" => Category::Housing,
            "transporte" => Category::Transport,
            "lazer" => Category::Leisure,
            "saúde" | "saude" => Category::Health,
            "educação" | "educacao" => Category::Education,
            "salário" | "salario" => Category::Salary,
            "sem categoria" | "" => Category::Uncategorized,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Alimentação",
            Category::Housing => "Moradia",
            Category::Transport => "Transporte",
            Category::Leisure => "Lazer",
            Category::Health => "Saúde",
            Category::Education => "Educação",
            Category::Salary => "Salário",
            Category::Uncategorized => "Sem categoria",
            Category::Other(label) => label,
        }
    }

    /// True when the label came from outside the fixed catalog.
    pub fn is_catalog(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

/// Payment method from the app's fixed catalog, `Other` for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    Pix,
    BankTransfer,
    Unspecified,
    Other(String),
}

impl PaymentMethod {
    /// Parse a wire label against the catalog (case-insensitive).
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "dinheiro" => PaymentMethod::Cash,
            "cartão de débito" | "cartao de debito" | "débito" | "debito" => {
                PaymentMethod::DebitCard
            }
            "cartão de crédito" | "cartao de credito" | "crédito" | "credito" => {
                PaymentMethod::CreditCard
            }
            "pix" => PaymentMethod::Pix,
            "transferência" | "transferencia" => PaymentMethod::BankTransfer,
            "não especificado" | "nao especificado" | "" => PaymentMethod::Unspecified,
            _ => PaymentMethod::Other(trimmed.to_string()),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::DebitCard => "Cartão de débito",
            PaymentMethod::CreditCard => "Cartão de crédito",
            PaymentMethod::Pix => "Pix",
            PaymentMethod::BankTransfer => "Transferência",
            PaymentMethod::Unspecified => "Não especificado",
            PaymentMethod::Other(label) => label,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(label: String) -> Self {
        PaymentMethod::from_label(&label)
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.label().to_string()
    }
}

/// A single normalized financial movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque unique identifier
    pub id: String,
    /// Instant of the movement (UTC); day precision is derived per timezone
    pub timestamp: DateTime<Utc>,
    /// Non-negative magnitude
    pub amount: Decimal,
    pub direction: Direction,
    pub description: String,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Signed contribution to a balance: `+amount` for income, `-amount`
    /// for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Income => self.amount,
            Direction::Expense => -self.amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Expense
    }
}
