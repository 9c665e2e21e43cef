//! Search query parameters.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SearchError};

/// Results per page the engine serves when `num` is not sent.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default pause between result page fetches.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(2);

/// Time window restriction (`tbs` parameter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// No restriction
    #[default]
    Any,
    /// Past hour
    Hour,
    /// Past 24 hours
    Day,
    /// Past week
    Week,
    /// Past month
    Month,
    /// Past year
    Year,
}

impl TimeWindow {
    /// Value sent in the `tbs` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeWindow::Any => "0",
            TimeWindow::Hour => "qdr:h",
            TimeWindow::Day => "qdr:d",
            TimeWindow::Week => "qdr:w",
            TimeWindow::Month => "qdr:m",
            TimeWindow::Year => "qdr:y",
        }
    }
}

/// Safe-search mode (`safe` parameter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    #[default]
    Off,
    On,
}

impl SafeSearch {
    /// Value sent in the `safe` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            SafeSearch::Off => "off",
            SafeSearch::On => "active",
        }
    }
}

/// A search to run, paginated from `start` until `stop` or the last page.
///
/// `text` is the raw query and must not be URL-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    /// Top-level domain of the engine host (`com`, `co.uk`, ...).
    pub tld: String,
    pub lang: String,
    pub time_window: TimeWindow,
    pub safe: SafeSearch,
    /// Results per page.
    pub num: u32,
    /// Offset of the first result to retrieve.
    pub start: u32,
    /// Offset at which to stop fetching. `None` keeps going until the engine
    /// stops offering more pages.
    pub stop: Option<u32>,
    /// Delay before every result page fetch.
    pub pause: Duration,
    /// Keep only organic result headings instead of every external link.
    pub only_standard: bool,
}

impl SearchQuery {
    /// Create a query with the default parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tld: "com".to_string(),
            lang: "en".to_string(),
            time_window: TimeWindow::default(),
            safe: SafeSearch::default(),
            num: DEFAULT_PAGE_SIZE,
            start: 0,
            stop: None,
            pause: DEFAULT_PAUSE,
            only_standard: true,
        }
    }

    pub fn tld(mut self, tld: &str) -> Self {
        self.tld = tld.to_string();
        self
    }

    pub fn lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }

    pub fn safe(mut self, safe: SafeSearch) -> Self {
        self.safe = safe;
        self
    }

    pub fn num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Set the stop offset. Zero means unbounded, matching the CLI convention.
    pub fn stop(mut self, stop: Option<u32>) -> Self {
        self.stop = stop.filter(|s| *s > 0);
        self
    }

    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn only_standard(mut self, only_standard: bool) -> Self {
        self.only_standard = only_standard;
        self
    }

    /// Whether the engine's default page size applies (no `num` parameter).
    pub fn uses_default_page_size(&self) -> bool {
        self.num == DEFAULT_PAGE_SIZE
    }

    /// Check the query invariants before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query text is empty".to_string()));
        }
        if self.num == 0 {
            return Err(SearchError::InvalidQuery(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.tld.is_empty() || self.tld.contains(['/', ':', '?', '#']) {
            return Err(SearchError::InvalidQuery(format!(
                "invalid top-level domain: {:?}",
                self.tld
            )));
        }
        if let Some(stop) = self.stop {
            if stop < self.start {
                return Err(SearchError::InvalidQuery(format!(
                    "stop offset {} is before start offset {}",
                    stop, self.start
                )));
            }
        }
        Ok(())
    }
}
