//! Plain-text rendering of a month view.

use chrono::NaiveDate;
use chrono_tz::Tz;

use saldo_client::MonthView;
use saldo_core::{Direction, format_brl};

pub fn print_month_view(view: &MonthView, today: NaiveDate, tz: Tz) {
    println!("Period {}", view.period);
    println!(
        "Income {} | Expenses {} | Balance {}",
        format_brl(view.summary.total_income),
        format_brl(view.summary.total_expenses),
        format_brl(view.summary.net_balance)
    );
    if view.dropped > 0 {
        println!("({} malformed records dropped)", view.dropped);
    }

    for group in &view.groups {
        println!(
            "\n{} ({})  net {}",
            group.label(today),
            group.day,
            format_brl(group.net())
        );
        for txn in &group.transactions {
            let time = txn.timestamp.with_timezone(&tz).format("%H:%M");
            let direction = match txn.direction {
                Direction::Income => "income",
                Direction::Expense => "expense",
            };
            println!(
                "  {}  {:<8} {:>15}  {}  [{} / {}]",
                time,
                direction,
                format_brl(txn.signed_amount()),
                txn.description,
                txn.category.label(),
                txn.payment_method.label()
            );
        }
    }

    if view.groups.is_empty() {
        println!("\nNo transactions for this period.");
    }
}
