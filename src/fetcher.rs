use std::error::Error;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    // Transient network/HTTP trouble, worth another attempt.
    RequestError,
    // Anything outside the transient category. Terminal.
    UnexpectedError,
}

#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn request<E: fmt::Display>(cause: E) -> Self {
        FetchFailure {
            kind: FailureKind::RequestError,
            message: cause.to_string(),
        }
    }

    pub fn unexpected<E: fmt::Display>(cause: E) -> Self {
        FetchFailure {
            kind: FailureKind::UnexpectedError,
            message: cause.to_string(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::RequestError => write!(f, "request error: {}", self.message),
            FailureKind::UnexpectedError => write!(f, "unexpected error: {}", self.message),
        }
    }
}

impl Error for FetchFailure {}

// Seam for the retry loop and the dispatcher; tests substitute scripted
// transports here instead of touching the network.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        HttpFetcher { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        HttpFetcher::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(FetchFailure::request)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchFailure::request(format!("HTTP status {}", status)));
        }

        // A body that cannot be decoded is not a network problem; retrying
        // the same URL would just fail the same way.
        resp.text().map_err(FetchFailure::unexpected)
    }
}
