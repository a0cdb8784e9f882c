use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use peratio_core::PeRatioError;

const CONNECTOR: &str = "peratio-eastmoney";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// HTTP GET + JSON decode abstraction (so we can inject fakes in tests).
#[async_trait]
pub trait EmTransport: Send + Sync {
    /// GET `url` with `query` appended and decode the body as JSON.
    ///
    /// Implementations must report non-2xx statuses and undecodable bodies as
    /// `Transport` errors.
    async fn get_json(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value, PeRatioError>;
}

/// Real adapter backed by a shared `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
}

impl RealAdapter {
    /// Build a client with a browser user agent; the endpoint rejects bare clients.
    ///
    /// # Errors
    /// Returns `Transport` if the TLS backend cannot be initialized.
    pub fn try_new_default() -> Result<Self, PeRatioError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PeRatioError::transport(CONNECTOR, format!("http client: {e}")))?;
        Ok(Self { http })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn map_reqwest_err(e: &reqwest::Error, url: &str) -> PeRatioError {
    let msg = if e.is_timeout() {
        format!("timeout: {url}")
    } else if let Some(status) = e.status() {
        format!("status {status}: {url}")
    } else if e.is_decode() {
        format!("decode: {url}: {e}")
    } else if e.is_connect() {
        format!("connect: {url}: {e}")
    } else if e.is_builder() {
        format!("invalid request: {url}: {e}")
    } else {
        e.to_string()
    };
    PeRatioError::transport(CONNECTOR, msg)
}

#[async_trait]
impl EmTransport for RealAdapter {
    async fn get_json(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value, PeRatioError> {
        self.http
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| map_reqwest_err(&e, url))?
            .json::<Value>()
            .await
            .map_err(|e| map_reqwest_err(&e, url))
    }
}

impl dyn EmTransport {
    /// Build an `EmTransport` from a closure (tests and offline fixtures).
    ///
    /// The closure receives the URL and the query pairs.
    pub fn from_fn<F>(f: F) -> Arc<dyn EmTransport>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, Vec<(&'static str, String)>) -> Result<Value, PeRatioError>,
    {
        struct FnTransport<F>(F);
        #[async_trait]
        impl<F> EmTransport for FnTransport<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, Vec<(&'static str, String)>) -> Result<Value, PeRatioError>,
        {
            async fn get_json(
                &self,
                url: &str,
                query: &[(&'static str, String)],
            ) -> Result<Value, PeRatioError> {
                (self.0)(url.to_string(), query.to_vec())
            }
        }
        Arc::new(FnTransport(f))
    }
}
