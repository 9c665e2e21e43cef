//! Error taxonomy for search runs.

/// Errors that abort a search run.
///
/// Link filtering never produces one of these; rejected links are dropped
/// silently by [`crate::search::filter_link`].
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed page structure in {category}: {detail}")]
    MalformedPage { category: String, detail: String },

    #[error("Failed to parse selector: {0}")]
    Selector(String),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

impl SearchError {
    /// Construct a malformed-page error for a result category.
    pub fn malformed(category: &str, detail: impl Into<String>) -> Self {
        Self::MalformedPage {
            category: category.to_string(),
            detail: detail.into(),
        }
    }

    /// Whether this error came from the network layer (connection, timeout, status).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// Whether this error means the page no longer has the expected structure.
    pub fn is_malformed_page(&self) -> bool {
        matches!(self, Self::MalformedPage { .. } | Self::Selector(_))
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
