//! JSON front-end for report-mode searches and result click-through.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Settings;
use crate::http_client::{HttpFetcher, PageFetcher};
use crate::search::EngineUrls;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub engine: EngineUrls,
    /// Held for the duration of a search so runs never share the session concurrently.
    pub run_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>, engine: EngineUrls) -> Self {
        Self {
            fetcher,
            engine,
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::from_settings(settings)?;
        Ok(Self::new(
            Arc::new(fetcher),
            EngineUrls::new(&settings.engine_url),
        ))
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
