use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

/// Fixed browser-identifying header sent with every request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

/// Transport failures are fatal to the run; there is no retry or backoff.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to retrieve {url}: status {status}")]
    FetchFailed { url: String, status: StatusCode },
    #[error("transport error for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Where review pages come from. The harvest loop only sees this seam, so
/// tests can script page sequences without a network.
pub trait PageSource {
    async fn fetch_page(&mut self, url: &str) -> Result<String, FetchError>;
}

/// HTTP page source. Success is exactly status 200.
pub struct ReviewClient {
    client: reqwest::Client,
}

impl ReviewClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl PageSource for ReviewClient {
    async fn fetch_page(&mut self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::FetchFailed { url: url.to_string(), status });
        }

        response
            .text()
            .await
            .map_err(|source| FetchError::Transport { url: url.to_string(), source })
    }
}
