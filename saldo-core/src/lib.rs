//! saldo-core: canonical transaction model and the pure month-view transforms

pub mod grouping;
pub mod money;
pub mod period;
pub mod summary;
pub mod time;
pub mod transaction;

pub use grouping::{DayGroup, DirectionFilter, filter_by_direction, group_by_day};
pub use money::{format_brl, round_cents};
pub use period::Period;
pub use summary::{MonthlySummary, summarize};
pub use time::{DEFAULT_TZ, day_label, local_day};
pub use transaction::{
    Category, DEFAULT_DESCRIPTION, Direction, PaymentMethod, Transaction, TransactionKind,
};
