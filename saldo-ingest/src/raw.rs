//! Loosely-typed raw records as the remote API returns them.
//!
//! Field names and types drift between API revisions, so access goes
//! through lenient alias-aware accessors instead of a fixed struct.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// One record as it came off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
    /// First field present under any of the given aliases.
    pub fn field(&self, aliases: &[&str]) -> Option<&Value> {
        aliases.iter().find_map(|key| self.0.get(*key))
    }

    pub fn has(&self, aliases: &[&str]) -> bool {
        self.field(aliases).is_some()
    }

    /// String field; non-strings and blanks read as absent.
    pub fn str_field(&self, aliases: &[&str]) -> Option<&str> {
        self.field(aliases)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Record identifier, which some API revisions send as a number.
    pub fn id_field(&self) -> Option<String> {
        match self.field(&["id"])? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric field: a JSON number, or a numeric string. Strings accept
    /// the pt-BR comma decimal separator ("1.234,56" and "1234,56").
    pub fn amount_field(&self, aliases: &[&str]) -> Option<Decimal> {
        match self.field(aliases)? {
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            Value::String(s) => parse_amount_str(s),
            _ => None,
        }
    }

    /// Timestamp field: RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a bare date.
    pub fn date_field(&self, aliases: &[&str]) -> Option<DateTime<Utc>> {
        parse_timestamp(self.str_field(aliases)?)
    }
}

fn parse_amount_str(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().trim_start_matches("R$").trim();
    if cleaned.is_empty() {
        return None;
    }
    // A comma means pt-BR notation: dots group thousands, comma is the
    // decimal separator.
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.to_string()
    };
    Decimal::from_str(&normalized).ok()
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(ndt.and_utc());
    }
    // Bare dates sit at noon UTC so they stay on the same calendar day
    // for any zone within eleven hours of UTC.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let noon = NaiveTime::from_hms_opt(12, 0, 0)?;
        return Some(NaiveDateTime::new(date, noon).and_utc());
    }
    None
}
