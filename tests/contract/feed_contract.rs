use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use bondsift_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, MoexIssFeed, NoopHttpClient, RetryConfig,
    SecuritiesFeed, Ticker,
};

/// One document carrying every block both endpoints read, so a single
/// canned answer serves the listing and the coupon fetch alike.
const HEALTHY_BODY: &str = r#"{
    "securities": {
        "columns": ["SECID", "SHORTNAME"],
        "data": [["SU26238RMFS4", "ОФЗ 26238"]]
    },
    "marketdata": {
        "columns": ["YIELDCLOSE"],
        "data": [[13.2]]
    },
    "coupons": {
        "columns": ["coupondate", "value"],
        "data": [["2041-05-15", 37.4]]
    }
}"#;

/// Transport that answers every request identically, forever.
struct FixedHttp {
    answer: Result<HttpResponse, HttpError>,
}

impl FixedHttp {
    fn always(answer: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self { answer })
    }
}

impl HttpClient for FixedHttp {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> std::pin::Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let answer = self.answer.clone();
        Box::pin(async move { answer })
    }
}

struct FeedCase {
    name: &'static str,
    feed: MoexIssFeed,
    expect_records: bool,
    expect_events: bool,
}

/// Feed variants across the failure spectrum. Every case must resolve
/// without a retry sleep, because this suite polls futures by hand on a
/// plain test thread.
fn feed_cases() -> Vec<FeedCase> {
    vec![
        FeedCase {
            name: "offline default transport",
            feed: MoexIssFeed::with_http_client(Arc::new(NoopHttpClient)),
            expect_records: false,
            expect_events: false,
        },
        FeedCase {
            name: "healthy upstream",
            feed: MoexIssFeed::with_http_client(FixedHttp::always(Ok(HttpResponse::ok_json(
                HEALTHY_BODY,
            )))),
            expect_records: true,
            expect_events: true,
        },
        FeedCase {
            name: "hard transport failure",
            feed: MoexIssFeed::with_http_client(FixedHttp::always(Err(HttpError::non_retryable(
                "dns failure",
            )))),
            expect_records: false,
            expect_events: false,
        },
        FeedCase {
            name: "transient failure with retries disabled",
            feed: MoexIssFeed::with_http_client(FixedHttp::always(Err(HttpError::new("timeout"))))
                .with_retry(RetryConfig::no_retry()),
            expect_records: false,
            expect_events: false,
        },
        FeedCase {
            name: "access denied upstream",
            feed: MoexIssFeed::with_http_client(FixedHttp::always(Ok(HttpResponse {
                status: 403,
                body: String::new(),
            }))),
            expect_records: false,
            expect_events: false,
        },
        FeedCase {
            name: "maintenance page instead of json",
            feed: MoexIssFeed::with_http_client(FixedHttp::always(Ok(HttpResponse::ok_json(
                "<html>maintenance</html>",
            )))),
            expect_records: false,
            expect_events: false,
        },
    ]
}

fn ticker() -> Ticker {
    Ticker::parse("SU26238RMFS4").expect("valid ticker")
}

#[test]
fn securities_fetch_never_fails_outward() {
    for case in feed_cases() {
        let table = block_on(case.feed.fetch_securities());
        assert_eq!(
            !table.is_empty(),
            case.expect_records,
            "feed '{}': record presence",
            case.name
        );
    }
}

#[test]
fn coupon_fetch_never_fails_outward() {
    let ticker = ticker();

    for case in feed_cases() {
        let events = block_on(case.feed.fetch_coupon_schedule(&ticker));
        assert_eq!(
            !events.is_empty(),
            case.expect_events,
            "feed '{}': event presence",
            case.name
        );
    }
}

#[test]
fn repeated_fetches_answer_identically() {
    let ticker = ticker();

    for case in feed_cases() {
        let first = block_on(case.feed.fetch_securities());
        let second = block_on(case.feed.fetch_securities());
        assert_eq!(first, second, "feed '{}': listing determinism", case.name);

        let first = block_on(case.feed.fetch_coupon_schedule(&ticker));
        let second = block_on(case.feed.fetch_coupon_schedule(&ticker));
        assert_eq!(first, second, "feed '{}': schedule determinism", case.name);
    }
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
