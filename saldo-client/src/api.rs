//! HTTP loader for the remote finance API.
//!
//! The loader is the only I/O boundary of the system: it fetches the raw
//! records for one period and round-trips single-record writes. Everything
//! downstream is pure.

use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use thiserror::Error;

use chrono::NaiveDate;
use saldo_core::{Category, Direction, PaymentMethod, Period, TransactionKind};
use saldo_ingest::RawRecord;
use saldo_ingest::shapes::direction_token;

/// Failures a fetch or write can surface. An empty period is not one of
/// them: HTTP 404 reads as "no records".
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response body: {0}")]
    Decode(String),
}

/// Fetching and writing boundary the session drives.
pub trait Loader {
    fn fetch_month(
        &self,
        period: Period,
    ) -> impl Future<Output = Result<Vec<RawRecord>, LoaderError>>;
    fn create(&self, draft: &TransactionDraft) -> impl Future<Output = Result<(), LoaderError>>;
    fn update(
        &self,
        id: &str,
        draft: &TransactionDraft,
    ) -> impl Future<Output = Result<(), LoaderError>>;
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), LoaderError>>;
}

/// Write payload for one transaction. Writes always use the
/// single-amount-plus-type layout regardless of which layout reads come
/// back in; the normalizer absorbs the asymmetry.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub direction: Direction,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub kind: TransactionKind,
}

impl TransactionDraft {
    /// Serialize into the entry-shaped raw record the API accepts.
    pub fn to_raw(&self) -> RawRecord {
        let mut fields = Map::new();
        fields.insert("date".into(), json!(self.date.format("%Y-%m-%d").to_string()));
        fields.insert("type".into(), json!(direction_token(self.direction)));
        fields.insert("amount".into(), json!(self.amount.to_string()));
        fields.insert("description".into(), json!(self.description));
        fields.insert("category".into(), json!(self.category.label()));
        fields.insert("paymentMethod".into(), json!(self.payment_method.label()));
        fields.insert("transactionKind".into(), json!(self.kind.label()));
        RawRecord(fields)
    }
}

/// reqwest-backed [`Loader`] against the remote REST service.
#[derive(Debug, Clone)]
pub struct ApiLoader {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiLoader {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), LoaderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(status_error(status, response).await)
    }
}

async fn status_error(status: StatusCode, response: reqwest::Response) -> LoaderError {
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.trim().to_string()
    };
    LoaderError::Status {
        status: status.as_u16(),
        message,
    }
}

impl Loader for ApiLoader {
    async fn fetch_month(&self, period: Period) -> Result<Vec<RawRecord>, LoaderError> {
        let response = self
            .request(Method::GET, "/api/transactions")
            .query(&[
                ("month", period.month.to_string()),
                ("year", period.year.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // No records for the period; absence is not an error.
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(status_error(status, response).await);
        }

        match response.json::<Vec<Value>>().await {
            Ok(values) => {
                // Non-object elements cannot hold a record; the normalizer
                // will count objects it cannot map.
                Ok(values
                    .into_iter()
                    .filter_map(|value| match value {
                        Value::Object(fields) => Some(RawRecord(fields)),
                        _ => None,
                    })
                    .collect())
            }
            Err(err) => Err(LoaderError::Decode(err.to_string())),
        }
    }

    async fn create(&self, draft: &TransactionDraft) -> Result<(), LoaderError> {
        let response = self
            .request(Method::POST, "/api/transactions")
            .json(&draft.to_raw())
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn update(&self, id: &str, draft: &TransactionDraft) -> Result<(), LoaderError> {
        let response = self
            .request(Method::PUT, &format!("/api/transactions/{id}"))
            .json(&draft.to_raw())
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), LoaderError> {
        let response = self
            .request(Method::DELETE, &format!("/api/transactions/{id}"))
            .send()
            .await?;
        Self::expect_success(response).await
    }
}
