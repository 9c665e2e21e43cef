//! Data types shared by the search engine, CLI, and server.

mod query;
mod result;

pub use query::{SafeSearch, SearchQuery, TimeWindow, DEFAULT_PAGE_SIZE, DEFAULT_PAUSE};
pub use result::{RelatedKeyword, ResultPage, ResultRecord, SearchReport};
