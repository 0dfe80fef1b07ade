//! Money helpers: deterministic cent rounding and pt-BR currency display.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, half-up (0.005 rounds away from zero).
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a signed amount as Brazilian currency: `R$ 1.234,56`,
/// negative values as `-R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    // Work in whole cents so grouping is plain integer arithmetic.
    let total_cents = (round_cents(value) * Decimal::ONE_HUNDRED)
        .to_i128()
        .unwrap_or(0);
    let sign = if total_cents < 0 { "-" } else { "" };
    let abs = total_cents.unsigned_abs();
    format!("{}R$ {},{:02}", sign, group_thousands(abs / 100), abs % 100)
}

fn group_thousands(mut units: u128) -> String {
    let mut parts: Vec<String> = Vec::new();
    loop {
        if units < 1000 {
            parts.push(units.to_string());
            break;
        }
        parts.push(format!("{:03}", units % 1000));
        units /= 1000;
    }
    parts.reverse();
    parts.join(".")
}
