//! HTTP status fetcher.
//!
//! Reads snapshots from the backend's `GET /api/status` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{PollError, Snapshot, StatusFetcher};

/// Path of the status endpoint, relative to the backend base URL.
pub const STATUS_PATH: &str = "/api/status";

/// Fetches snapshots from the andy-os status API.
///
/// # Example
///
/// ```no_run
/// use andy_console::{HttpFetcher, StatusFetcher};
///
/// # tokio_test::block_on(async {
/// let fetcher = HttpFetcher::new("http://localhost:8000", None).unwrap();
/// let snapshot = fetcher.fetch().await.unwrap();
/// println!("CPU {}%", snapshot.cpu);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: String,
    description: String,
}

impl HttpFetcher {
    /// Create a fetcher for the backend at `endpoint` (e.g.
    /// `"http://localhost:8000"`).
    ///
    /// Without a `timeout` requests are bounded only by the client's
    /// connection defaults.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, PollError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PollError::Client(e.to_string()))?;

        let url = status_url(endpoint);
        let description = format!("http: {}", url);
        Ok(Self {
            client,
            url,
            description,
        })
    }

    /// The full status URL being polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Snapshot, PollError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(PollError::Status(response.status().as_u16()));
        }

        // Decode failures surface as `PollError::Parse`.
        let snapshot = response.json::<Snapshot>().await?;
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

fn status_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), STATUS_PATH)
}
