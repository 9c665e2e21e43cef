//! Result page pagination, extraction, and de-duplication.

mod dedup;
mod extract;
mod link_filter;
mod paginate;
pub mod selectors;
mod urls;

pub use dedup::DedupSet;
pub use extract::ResultExtractor;
pub use link_filter::{filter_link, LinkFilter, ENGINE_DOMAIN_MARKER, REDIRECT_PREFIX};
pub use paginate::{LinkStream, PaginationCursor, Paginator};
pub use urls::{EngineUrls, DEFAULT_ENGINE_URL};
