//! Incremental link output.

use std::io::Write;

use serpage::config::Settings;
use serpage::http_client::HttpFetcher;
use serpage::models::SearchQuery;
use serpage::search::{EngineUrls, Paginator};

/// Print each new result link as soon as it is extracted.
///
/// Stops quietly when stdout is closed (e.g. piped into `head`).
pub async fn cmd_search(settings: &Settings, query: SearchQuery) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_settings(settings)?;
    let paginator =
        Paginator::new(&fetcher).with_engine_urls(EngineUrls::new(&settings.engine_url));

    let mut links = paginator.links(query)?;
    while let Some(link) = links.next().await? {
        if let Err(e) = writeln!(std::io::stdout(), "{}", link) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                break;
            }
            return Err(e.into());
        }
    }

    tracing::info!("{} unique links", links.unique_links());
    Ok(())
}
