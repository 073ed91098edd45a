use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{CouponEvent, MarketDate, Ticker};
use crate::feed::SecuritiesFeed;
use crate::http_client::{HttpClient, HttpError, HttpRequest, NoopHttpClient};
use crate::retry::RetryConfig;
use crate::table::RawTable;

/// Production ISS endpoint root.
pub const DEFAULT_ISS_BASE_URL: &str = "https://iss.moex.com/iss";

/// T+ government bond board; the screener's default universe.
pub const DEFAULT_BOARD: &str = "TQOB";

const SECURITIES_COLUMNS: &str = "SECID,SHORTNAME,SECNAME,ISSUESIZE,COUPONPERCENT,\
                                  COUPONPERIOD,MATDATE,LISTLEVEL,FACEVALUE,CURRENCY";
const MARKETDATA_COLUMNS: &str = "YIELDCLOSE";

const COUPON_DATE_COLUMN: &str = "coupondate";
const COUPON_VALUE_COLUMN: &str = "value";

/// Fetch failure cause; logged at the trait boundary, never propagated.
#[derive(Debug, Error)]
enum FeedError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
    #[error("upstream answered status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("payload has no `{0}` block")]
    MissingBlock(&'static str),
}

/// ISS answers with named blocks, each a columns/data table. Blocks not
/// requested (or unknown to this adapter) are simply absent.
#[derive(Debug, Deserialize)]
struct IssDocument {
    securities: Option<RawTable>,
    marketdata: Option<RawTable>,
    coupons: Option<RawTable>,
}

/// Moscow Exchange ISS adapter for the bond board listing and per-bond
/// coupon schedules.
///
/// Honors the degraded [`SecuritiesFeed`] contract: every failure is
/// logged and mapped to empty data. Transient transport failures and a
/// short status list are retried with backoff before giving up.
#[derive(Clone)]
pub struct MoexIssFeed {
    base_url: String,
    board: String,
    http_client: Arc<dyn HttpClient>,
    retry: RetryConfig,
}

impl Default for MoexIssFeed {
    fn default() -> Self {
        Self {
            base_url: std::env::var("BONDSIFT_ISS_BASE_URL")
                .unwrap_or_else(|_| String::from(DEFAULT_ISS_BASE_URL)),
            board: String::from(DEFAULT_BOARD),
            http_client: Arc::new(NoopHttpClient),
            retry: RetryConfig::default(),
        }
    }
}

impl MoexIssFeed {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = board.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn securities_url(&self) -> String {
        format!(
            "{}/engines/stock/markets/bonds/boards/{}/securities.json?securities.columns={}&marketdata.columns={}",
            self.base_url,
            self.board,
            urlencoding::encode(SECURITIES_COLUMNS),
            urlencoding::encode(MARKETDATA_COLUMNS),
        )
    }

    fn coupons_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/statistics/engines/stock/markets/bonds/boards/{}/securities/{}.json",
            self.base_url,
            self.board,
            urlencoding::encode(ticker.as_str()),
        )
    }

    async fn fetch_securities_inner(&self) -> Result<RawTable, FeedError> {
        let body = self.get_with_retry(&self.securities_url()).await?;
        let document: IssDocument = serde_json::from_str(&body)?;

        let mut securities = document
            .securities
            .ok_or(FeedError::MissingBlock("securities"))?;

        if let Some(marketdata) = document.marketdata {
            if marketdata.row_count() == securities.row_count() {
                securities.merge_columns(marketdata);
            } else {
                warn!(
                    "moex: marketdata block has {} rows against {} securities rows, keeping the listing unmerged",
                    marketdata.row_count(),
                    securities.row_count()
                );
            }
        }

        Ok(securities)
    }

    async fn fetch_coupons_inner(&self, ticker: &Ticker) -> Result<Vec<CouponEvent>, FeedError> {
        let body = self.get_with_retry(&self.coupons_url(ticker)).await?;
        let document: IssDocument = serde_json::from_str(&body)?;
        let table = document.coupons.ok_or(FeedError::MissingBlock("coupons"))?;

        let date_index = position(&table, COUPON_DATE_COLUMN);
        let value_index = position(&table, COUPON_VALUE_COLUMN);

        let mut events = Vec::with_capacity(table.row_count());
        for row in table.rows() {
            // Rows without a parseable date carry no schedule information.
            let date = text_cell(row, date_index).and_then(|raw| MarketDate::parse(raw).ok());
            let Some(date) = date else {
                continue;
            };
            events.push(CouponEvent {
                date,
                amount: number_cell(row, value_index),
            });
        }

        Ok(events)
    }

    async fn get_with_retry(&self, url: &str) -> Result<String, FeedError> {
        let mut attempt: u32 = 0;

        loop {
            let outcome = self.http_client.execute(HttpRequest::get(url)).await;

            let failure = match outcome {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) if self.retry.should_retry_status(response.status) => {
                    FeedError::Status(response.status)
                }
                Ok(response) => return Err(FeedError::Status(response.status)),
                Err(error) if error.retryable() => FeedError::Transport(error),
                Err(error) => return Err(FeedError::Transport(error)),
            };

            if !self.retry.enabled || attempt >= self.retry.max_retries {
                return Err(failure);
            }

            let delay = self.retry.delay_for_attempt(attempt);
            debug!(
                "moex: attempt {} against {url} failed ({failure}), retrying in {delay:?}",
                attempt + 1
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl SecuritiesFeed for MoexIssFeed {
    fn fetch_securities<'a>(&'a self) -> Pin<Box<dyn Future<Output = RawTable> + Send + 'a>> {
        Box::pin(async move {
            match self.fetch_securities_inner().await {
                Ok(table) => table,
                Err(error) => {
                    warn!("moex: board listing fetch failed: {error}");
                    RawTable::empty()
                }
            }
        })
    }

    fn fetch_coupon_schedule<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Vec<CouponEvent>> + Send + 'a>> {
        Box::pin(async move {
            match self.fetch_coupons_inner(ticker).await {
                Ok(events) => events,
                Err(error) => {
                    warn!("moex: coupon schedule fetch for {ticker} failed: {error}");
                    Vec::new()
                }
            }
        })
    }
}

fn position(table: &RawTable, name: &str) -> Option<usize> {
    table.columns().iter().position(|column| column == name)
}

fn text_cell<'a>(row: &'a [Value], index: Option<usize>) -> Option<&'a str> {
    index.and_then(|i| row.get(i)).and_then(Value::as_str)
}

fn number_cell(row: &[Value], index: Option<usize>) -> Option<f64> {
    index.and_then(|i| row.get(i)).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpResponse;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedHttpClient {
        responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn answering(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn with_body(body: &str) -> Arc<Self> {
            Self::answering(vec![Ok(HttpResponse::ok_json(body))])
        }

        fn recorded_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .iter()
                .map(|request| request.url.clone())
                .collect()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self
                .responses
                .lock()
                .expect("response script should not be poisoned")
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::non_retryable("script exhausted")));
            Box::pin(async move { response })
        }
    }

    fn listing_body() -> &'static str {
        r#"{
            "securities": {
                "columns": ["SECID", "SHORTNAME", "MATDATE"],
                "data": [
                    ["SU26238RMFS4", "ОФЗ 26238", "2041-05-15"],
                    ["SU26240RMFS0", "ОФЗ 26240", "2036-07-30"]
                ]
            },
            "marketdata": {
                "columns": ["YIELDCLOSE"],
                "data": [[13.4], [13.1]]
            }
        }"#
    }

    fn no_retry(client: Arc<ScriptedHttpClient>) -> MoexIssFeed {
        MoexIssFeed::with_http_client(client).with_retry(RetryConfig::no_retry())
    }

    fn ticker(raw: &str) -> Ticker {
        Ticker::parse(raw).expect("valid test ticker")
    }

    #[tokio::test]
    async fn securities_request_targets_the_configured_board() {
        let client = ScriptedHttpClient::with_body(listing_body());
        let feed = no_retry(client.clone())
            .with_base_url("https://iss.example.test/iss")
            .with_board("TQCB");

        feed.fetch_securities().await;

        let urls = client.recorded_urls();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with(
            "https://iss.example.test/iss/engines/stock/markets/bonds/boards/TQCB/securities.json"
        ));
        assert!(urls[0].contains("securities.columns="));
        assert!(urls[0].contains("marketdata.columns=YIELDCLOSE"));
    }

    #[tokio::test]
    async fn marketdata_block_merges_into_listing_rows() {
        let feed = no_retry(ScriptedHttpClient::with_body(listing_body()));

        let table = feed.fetch_securities().await;

        assert_eq!(table.row_count(), 2);
        let yield_index = position(&table, "YIELDCLOSE").expect("merged column");
        assert_eq!(table.rows()[0][yield_index], serde_json::json!(13.4));
        assert_eq!(table.rows()[1][yield_index], serde_json::json!(13.1));
    }

    #[tokio::test]
    async fn marketdata_row_mismatch_keeps_listing_unmerged() {
        let body = r#"{
            "securities": {
                "columns": ["SECID"],
                "data": [["SU26238RMFS4"], ["SU26240RMFS0"]]
            },
            "marketdata": {
                "columns": ["YIELDCLOSE"],
                "data": [[13.4]]
            }
        }"#;
        let feed = no_retry(ScriptedHttpClient::with_body(body));

        let table = feed.fetch_securities().await;

        assert_eq!(table.row_count(), 2);
        assert!(position(&table, "YIELDCLOSE").is_none());
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_empty_table() {
        let client = ScriptedHttpClient::answering(vec![Err(HttpError::new("connection refused"))]);
        let feed = no_retry(client);

        let table = feed.fetch_securities().await;

        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_degrades_to_empty_table() {
        let feed = no_retry(ScriptedHttpClient::with_body("not even json"));
        assert!(feed.fetch_securities().await.is_empty());
    }

    #[tokio::test]
    async fn missing_securities_block_degrades_to_empty_table() {
        let feed = no_retry(ScriptedHttpClient::with_body("{}"));
        assert!(feed.fetch_securities().await.is_empty());
    }

    #[tokio::test]
    async fn transient_status_is_retried_until_success() {
        let client = ScriptedHttpClient::answering(vec![
            Ok(HttpResponse {
                status: 503,
                body: String::new(),
            }),
            Ok(HttpResponse::ok_json(listing_body())),
        ]);
        let feed = MoexIssFeed::with_http_client(client.clone())
            .with_retry(RetryConfig::fixed(Duration::ZERO, 2));

        let table = feed.fetch_securities().await;

        assert_eq!(client.recorded_urls().len(), 2);
        assert_eq!(table.row_count(), 2);
    }

    #[tokio::test]
    async fn client_error_status_fails_without_retry() {
        let client = ScriptedHttpClient::answering(vec![
            Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
            Ok(HttpResponse::ok_json(listing_body())),
        ]);
        let feed = MoexIssFeed::with_http_client(client.clone())
            .with_retry(RetryConfig::fixed(Duration::ZERO, 2));

        let table = feed.fetch_securities().await;

        assert_eq!(client.recorded_urls().len(), 1);
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn retry_budget_exhaustion_degrades_to_empty_table() {
        let client = ScriptedHttpClient::answering(vec![
            Err(HttpError::new("timeout")),
            Err(HttpError::new("timeout")),
            Err(HttpError::new("timeout")),
        ]);
        let feed = MoexIssFeed::with_http_client(client.clone())
            .with_retry(RetryConfig::fixed(Duration::ZERO, 2));

        let table = feed.fetch_securities().await;

        assert_eq!(client.recorded_urls().len(), 3);
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn coupon_schedule_parses_dates_and_amounts() {
        let body = r#"{
            "coupons": {
                "columns": ["coupondate", "value"],
                "data": [
                    ["2024-11-20", 35.4],
                    ["2025-05-21", null],
                    [null, 35.4],
                    ["2025-11-19", 35.4]
                ]
            }
        }"#;
        let client = ScriptedHttpClient::with_body(body);
        let feed = no_retry(client.clone());

        let events = feed.fetch_coupon_schedule(&ticker("SU26238RMFS4")).await;

        assert_eq!(events.len(), 3, "undated rows are dropped");
        assert_eq!(events[0].date.to_string(), "2024-11-20");
        assert_eq!(events[0].amount, Some(35.4));
        assert_eq!(events[1].amount, None);

        let urls = client.recorded_urls();
        assert!(urls[0].contains(
            "/statistics/engines/stock/markets/bonds/boards/TQOB/securities/SU26238RMFS4.json"
        ));
    }

    #[tokio::test]
    async fn coupon_schedule_without_block_is_empty() {
        let feed = no_retry(ScriptedHttpClient::with_body("{}"));
        let events = feed.fetch_coupon_schedule(&ticker("SU26238RMFS4")).await;
        assert!(events.is_empty());
    }
}
