//! serpage - search result pagination, extraction and de-duplication.
//!
//! Walks the paginated result listing of a search engine, pulls result
//! links (or fully categorized records) out of each page, and yields each
//! unique link once.

pub mod config;
pub mod error;
pub mod html;
pub mod http_client;
pub mod models;
pub mod search;
pub mod server;

pub use error::{Result, SearchError};
pub use http_client::{HttpFetcher, PageFetcher};
pub use models::{SearchQuery, SearchReport};
pub use search::{LinkStream, Paginator};
