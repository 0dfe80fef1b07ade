//! Month-view session: one explicit state machine instead of screen-local
//! fetch state.
//!
//! The session owns the current period, the active list filter and the
//! last loaded (unfiltered) transaction set. Reloads carry a monotonic
//! request token; a reload that resolves after a newer one was issued is
//! stale and gets discarded, so out-of-order responses can never overwrite
//! a newer period's data.

use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use saldo_core::{
    DayGroup, DirectionFilter, MonthlySummary, Period, Transaction, filter_by_direction,
    group_by_day, summarize,
};
use saldo_ingest::{RawRecord, normalize};

use crate::api::{Loader, LoaderError};

/// Everything a screen needs to render one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub period: Period,
    /// Totals over the unfiltered period set; the filter never touches these.
    pub summary: MonthlySummary,
    /// Day groups of the filtered list, most recent day first.
    pub groups: Vec<DayGroup>,
    /// Raw records dropped during normalization.
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready(MonthView),
    Error { message: String },
}

/// Request token for one reload.
pub type LoadToken = u64;

pub struct Session<L: Loader> {
    loader: L,
    tz: Tz,
    period: Period,
    filter: DirectionFilter,
    state: SessionState,
    transactions: Vec<Transaction>,
    dropped: usize,
    latest_token: LoadToken,
}

impl<L: Loader> Session<L> {
    pub fn new(loader: L, tz: Tz, period: Period) -> Self {
        Session {
            loader,
            tz,
            period,
            filter: DirectionFilter::All,
            state: SessionState::Idle,
            transactions: Vec::new(),
            dropped: 0,
            latest_token: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn filter(&self) -> DirectionFilter {
        self.filter
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// Shift the period and reload it.
    pub async fn change_month(&mut self, delta: i32) {
        self.period = self.period.shifted(delta);
        self.refresh().await;
    }

    /// User-initiated retry after a failed load.
    pub async fn retry(&mut self) {
        self.refresh().await;
    }

    /// Reload the current period.
    pub async fn refresh(&mut self) {
        let token = self.begin_load();
        let result = self.loader.fetch_month(self.period).await;
        self.resolve(token, result);
    }

    /// Swap the active list filter and re-derive the view from the data
    /// already loaded. No refetch: the filter is display-only.
    pub fn set_filter(&mut self, filter: DirectionFilter) {
        self.filter = filter;
        if matches!(self.state, SessionState::Ready(_)) {
            self.state = SessionState::Ready(self.build_view());
        }
    }

    /// Start a reload: flips to `Loading` and hands out the token the
    /// matching [`resolve`](Self::resolve) call must present.
    pub fn begin_load(&mut self) -> LoadToken {
        self.latest_token += 1;
        self.state = SessionState::Loading;
        self.latest_token
    }

    /// Settle a reload. Tokens older than the latest issued one are stale
    /// responses and are dropped without touching state.
    pub fn resolve(&mut self, token: LoadToken, result: Result<Vec<RawRecord>, LoaderError>) {
        if token != self.latest_token {
            debug!("discarding stale response for token {token}");
            return;
        }

        match result {
            Ok(records) => {
                let report = normalize(&records);
                self.transactions = report.transactions;
                self.dropped = report.dropped;
                self.state = SessionState::Ready(self.build_view());
            }
            Err(err) => {
                self.state = SessionState::Error {
                    message: err.to_string(),
                };
            }
        }
    }

    fn build_view(&self) -> MonthView {
        let filtered = filter_by_direction(&self.transactions, self.filter);
        MonthView {
            period: self.period,
            summary: summarize(&self.transactions),
            groups: group_by_day(&filtered, self.tz),
            dropped: self.dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use saldo_core::Direction;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::api::TransactionDraft;

    /// Scripted loader: pops one canned response per fetch.
    struct FakeLoader {
        responses: RefCell<VecDeque<Result<Vec<RawRecord>, LoaderError>>>,
        fetches: RefCell<usize>,
    }

    impl FakeLoader {
        fn new(responses: Vec<Result<Vec<RawRecord>, LoaderError>>) -> Self {
            FakeLoader {
                responses: RefCell::new(responses.into()),
                fetches: RefCell::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            *self.fetches.borrow()
        }
    }

    impl Loader for &FakeLoader {
        async fn fetch_month(&self, _period: Period) -> Result<Vec<RawRecord>, LoaderError> {
            *self.fetches.borrow_mut() += 1;
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn create(&self, _draft: &TransactionDraft) -> Result<(), LoaderError> {
            Ok(())
        }

        async fn update(&self, _id: &str, _draft: &TransactionDraft) -> Result<(), LoaderError> {
            Ok(())
        }

        async fn delete(&self, _id: &str) -> Result<(), LoaderError> {
            Ok(())
        }
    }

    fn records(value: serde_json::Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn july_records() -> Vec<RawRecord> {
        records(json!([
            {"date": "2023-07-19T10:00:00Z", "type": "Entrada", "amount": 500},
            {"date": "2023-07-19T15:00:00Z", "type": "Saída", "amount": 300},
            {"date": "2023-07-20T09:00:00Z", "type": "Saída", "amount": 100},
        ]))
    }

    fn period() -> Period {
        Period { month: 7, year: 2023 }
    }

    const TZ: Tz = chrono_tz::UTC;

    #[tokio::test]
    async fn test_refresh_reaches_ready_with_summary() {
        let loader = FakeLoader::new(vec![Ok(july_records())]);
        let mut session = Session::new(&loader, TZ, period());

        session.refresh().await;

        let SessionState::Ready(view) = session.state() else {
            panic!("expected Ready, got {:?}", session.state());
        };
        assert_eq!(view.summary.total_income, Decimal::from(500));
        assert_eq!(view.summary.total_expenses, Decimal::from(400));
        assert_eq!(view.summary.net_balance, Decimal::from(100));
        assert_eq!(view.groups.len(), 2);
        // Most recent day first.
        assert_eq!(view.groups[0].day.to_string(), "2023-07-20");
        assert_eq!(view.groups[1].day.to_string(), "2023-07-19");
    }

    #[tokio::test]
    async fn test_empty_period_is_ready_zero_state() {
        let loader = FakeLoader::new(vec![Ok(Vec::new())]);
        let mut session = Session::new(&loader, TZ, period());

        session.refresh().await;

        let SessionState::Ready(view) = session.state() else {
            panic!("expected Ready");
        };
        assert_eq!(view.summary, MonthlySummary::default());
        assert!(view.groups.is_empty());
    }

    #[tokio::test]
    async fn test_failure_then_manual_retry() {
        let loader = FakeLoader::new(vec![
            Err(LoaderError::Status {
                status: 500,
                message: "backend down".to_string(),
            }),
            Ok(july_records()),
        ]);
        let mut session = Session::new(&loader, TZ, period());

        session.refresh().await;
        let SessionState::Error { message } = session.state() else {
            panic!("expected Error");
        };
        assert!(message.contains("backend down"));

        session.retry().await;
        assert!(matches!(session.state(), SessionState::Ready(_)));
        assert_eq!(loader.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_change_month_shifts_period_and_reloads() {
        let loader = FakeLoader::new(vec![Ok(Vec::new())]);
        let mut session = Session::new(&loader, TZ, Period { month: 12, year: 2023 });

        session.change_month(1).await;

        assert_eq!(session.period(), Period { month: 1, year: 2024 });
        assert_eq!(loader.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let loader = FakeLoader::new(Vec::new());
        let mut session = Session::new(&loader, TZ, period());

        let stale = session.begin_load();
        let latest = session.begin_load();

        session.resolve(latest, Ok(july_records()));
        let SessionState::Ready(view) = session.state().clone() else {
            panic!("expected Ready");
        };

        // The older request settles afterwards with different data; it
        // must not overwrite the newer view.
        session.resolve(
            stale,
            Ok(records(json!([
                {"date": "2023-06-01T10:00:00Z", "type": "Entrada", "amount": 1},
            ]))),
        );

        let SessionState::Ready(after) = session.state() else {
            panic!("expected Ready");
        };
        assert_eq!(*after, view);
    }

    #[tokio::test]
    async fn test_filter_rederives_without_refetch() {
        let loader = FakeLoader::new(vec![Ok(july_records())]);
        let mut session = Session::new(&loader, TZ, period());

        session.refresh().await;
        session.set_filter(DirectionFilter::Expense);

        assert_eq!(loader.fetch_count(), 1);
        let SessionState::Ready(view) = session.state() else {
            panic!("expected Ready");
        };
        let flat: Vec<_> = view.groups.iter().flat_map(|g| &g.transactions).collect();
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|t| t.direction == Direction::Expense));
        // Summary cards still reflect the unfiltered month.
        assert_eq!(view.summary.total_income, Decimal::from(500));
    }

    #[tokio::test]
    async fn test_dropped_records_are_reported() {
        let loader = FakeLoader::new(vec![Ok(records(json!([
            {"date": "garbage", "type": "Entrada", "amount": 1},
            {"date": "2023-07-19T10:00:00Z", "type": "Entrada", "amount": 2},
        ])))]);
        let mut session = Session::new(&loader, TZ, period());

        session.refresh().await;

        let SessionState::Ready(view) = session.state() else {
            panic!("expected Ready");
        };
        assert_eq!(view.dropped, 1);
        assert_eq!(view.groups.len(), 1);
    }
}
