//! Report output.

use console::style;

use serpage::config::Settings;
use serpage::http_client::HttpFetcher;
use serpage::models::SearchQuery;
use serpage::search::{EngineUrls, Paginator};

/// Run a report-mode search and print the aggregate as JSON.
pub async fn cmd_report(settings: &Settings, query: SearchQuery) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_settings(settings)?;
    let paginator =
        Paginator::new(&fetcher).with_engine_urls(EngineUrls::new(&settings.engine_url));

    let report = paginator.report(&query).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let [main, leads, sections, normal, top, bottom] = report.results.counts();
    eprintln!(
        "{} {} pages: {} main, {} news leads, {} news sections, {} normal, {}+{} related",
        style("✓").green(),
        report.pages_fetched,
        main,
        leads,
        sections,
        normal,
        top,
        bottom
    );
    Ok(())
}
