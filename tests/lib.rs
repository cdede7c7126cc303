//! Shared fixtures for the rupeetick behavior tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

pub use rupeetick_core::{HttpClient, HttpError, HttpRequest, HttpResponse, IsoDate};

/// Anchor date used instead of the system clock.
pub fn anchor() -> IsoDate {
    IsoDate::parse("2024-06-28").expect("valid anchor date")
}

/// Transport that answers every request with the same canned result and
/// counts calls.
#[derive(Debug)]
pub struct ScriptedHttpClient {
    response: Result<HttpResponse, HttpError>,
    calls: AtomicUsize,
}

impl ScriptedHttpClient {
    pub fn failing(message: &str) -> Self {
        Self::new(Err(HttpError::new(message)))
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::new(Ok(HttpResponse::with_status(status, body)))
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(Ok(HttpResponse::ok_json(body)))
    }

    fn new(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

/// `TIME_SERIES_DAILY` body with one bar per `(date, close, volume)`.
pub fn daily_series_body(days: &[(&str, &str, &str)]) -> String {
    let series = days
        .iter()
        .map(|(date, close, volume)| {
            (
                (*date).to_owned(),
                serde_json::json!({
                    "1. open": close,
                    "2. high": close,
                    "3. low": close,
                    "4. close": close,
                    "5. volume": volume,
                }),
            )
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::json!({
        "Meta Data": { "2. Symbol": "MSFT", "3. Last Refreshed": days.last().map(|d| d.0) },
        "Time Series (Daily)": series,
    })
    .to_string()
}
