//! Page fetching over HTTP with a persisted cookie session.

mod session;
mod user_agent;

pub use session::{SessionStore, StoredCookie};
pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Settings;
use crate::error::{Result, SearchError};

/// Fetches raw page content by URL.
///
/// Implementations make a single attempt; retrying is up to the caller.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by `reqwest`, sharing one cookie session.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    session: Arc<SessionStore>,
}

impl HttpFetcher {
    /// Create a fetcher with the given session, user agent, and timeout.
    pub fn new(session: SessionStore, user_agent: Option<&str>, timeout: Duration) -> Result<Self> {
        let session = Arc::new(session);
        let client = Client::builder()
            .user_agent(resolve_user_agent(user_agent))
            .cookie_provider(session.jar())
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, session })
    }

    /// Create a fetcher from resolved settings, loading the session file.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            SessionStore::load(&settings.session_file),
            settings.user_agent.as_deref(),
            settings.request_timeout,
        )
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let final_url = response.url().to_string();

        debug!(
            "GET {} -> {} in {}ms",
            url,
            status.as_u16(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        self.session.flush(&final_url);
        Ok(body)
    }
}
