//! saldo-client: the remote API boundary and the month-view session that
//! drives it.

pub mod api;
pub mod session;

pub use api::{ApiLoader, Loader, LoaderError, TransactionDraft};
pub use session::{LoadToken, MonthView, Session, SessionState};
