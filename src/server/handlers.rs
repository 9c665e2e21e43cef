//! Request handlers.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::AppState;
use crate::error::SearchError;
use crate::models::{SafeSearch, SearchQuery, TimeWindow};
use crate::search::{filter_link, Paginator, REDIRECT_PREFIX};

/// Query params for `/api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub tld: Option<String>,
    pub lang: Option<String>,
    pub tbs: Option<TimeWindow>,
    pub safe: Option<SafeSearch>,
    pub num: Option<u32>,
    pub start: Option<u32>,
    /// Defaults to a single page; 0 is the same as absent.
    pub stop: Option<u32>,
    /// Seconds; defaults to no pause.
    pub pause: Option<f64>,
}

impl SearchParams {
    fn into_query(self, text: String) -> SearchQuery {
        let mut query = SearchQuery::new(text);
        if let Some(tld) = self.tld {
            query = query.tld(&tld);
        }
        if let Some(lang) = self.lang {
            query = query.lang(&lang);
        }
        if let Some(num) = self.num {
            query = query.num(num);
        }
        let start = self.start.unwrap_or(0);
        // Zero means "unbounded" to the paginator; here it means the default.
        let stop = self
            .stop
            .filter(|stop| *stop > 0)
            .unwrap_or_else(|| start.saturating_add(query.num));
        let pause = self
            .pause
            .and_then(|p| Duration::try_from_secs_f64(p).ok())
            .unwrap_or(Duration::ZERO);

        query
            .time_window(self.tbs.unwrap_or_default())
            .safe(self.safe.unwrap_or_default())
            .start(start)
            .stop(Some(stop))
            .pause(pause)
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Run a report-mode search and return the aggregate as JSON.
pub async fn api_search(
    State(state): State<AppState>,
    Query(mut params): Query<SearchParams>,
) -> Response {
    let Some(text) = params.q.take().filter(|q| !q.trim().is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "missing query parameter q".to_string(),
        );
    };
    let query = params.into_query(text);
    tracing::info!("search for: {}", query.text);

    let _guard = state.run_lock.lock().await;
    let paginator = Paginator::new(state.fetcher.as_ref()).with_engine_urls(state.engine.clone());

    match paginator.report(&query).await {
        Ok(report) => Json(report).into_response(),
        Err(e @ SearchError::InvalidQuery(_)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::warn!("search for {:?} failed: {}", query.text, e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// Query params for `/url`.
#[derive(Debug, Deserialize)]
pub struct GotoParams {
    pub q: Option<String>,
}

/// Redirect to a result's external target, or home if it has none.
pub async fn goto(Query(params): Query<GotoParams>) -> Redirect {
    let target = params.q.and_then(|q| {
        let encoded: String = url::form_urlencoded::byte_serialize(q.as_bytes()).collect();
        let link = filter_link(&format!("{}q={}", REDIRECT_PREFIX, encoded))?;
        // Serialized form is always a valid header value.
        Url::parse(&link)
            .or_else(|_| Url::parse(&format!("https:{}", link)))
            .ok()
    });

    match target {
        Some(url) => {
            tracing::info!("goto: {}", url);
            Redirect::to(url.as_str())
        }
        None => Redirect::to("/"),
    }
}
