//! Pagination over result pages.
//!
//! A run validates the query, fetches the engine home page once to pick up
//! session cookies, then repeats pause → fetch → extract → advance until the
//! page has no pagination bar or the stop offset is reached. Transport and
//! structure errors end the run; nothing is retried.

use std::collections::VecDeque;

use futures::Stream;
use tracing::{debug, info};

use super::dedup::DedupSet;
use super::extract::ResultExtractor;
use super::link_filter::LinkFilter;
use super::urls::EngineUrls;
use crate::error::Result;
use crate::html::HtmlDocument;
use crate::http_client::PageFetcher;
use crate::models::{ResultPage, SearchQuery, SearchReport};

/// Result offset of the next page to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    pub offset: u32,
}

impl PaginationCursor {
    pub fn new(start: u32) -> Self {
        Self { offset: start }
    }

    /// Move to the next page.
    pub fn advance(&mut self, page_size: u32) {
        self.offset = self.offset.saturating_add(page_size);
    }

    /// Whether another page may be fetched before hitting `stop`.
    pub fn can_fetch(&self, stop: Option<u32>) -> bool {
        stop.map_or(true, |stop| self.offset < stop)
    }
}

/// Drives search runs against a [`PageFetcher`].
pub struct Paginator<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    urls: EngineUrls,
    filter: LinkFilter,
}

impl<'a, F: PageFetcher + ?Sized> Clone for Paginator<'a, F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher,
            urls: self.urls.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl<'a, F: PageFetcher + ?Sized> Paginator<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self {
            fetcher,
            urls: EngineUrls::default(),
            filter: LinkFilter::default(),
        }
    }

    /// Use a different engine host template.
    pub fn with_engine_urls(mut self, urls: EngineUrls) -> Self {
        self.urls = urls;
        self
    }

    pub fn with_link_filter(mut self, filter: LinkFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Lazily yield unique result links across all pages.
    ///
    /// Nothing is fetched until the first pull. Each page is fetched only
    /// after every link from the previous page has been consumed, so a caller
    /// that stops pulling stops the run.
    pub fn links(&self, query: SearchQuery) -> Result<LinkStream<'a, F>> {
        query.validate()?;
        let extractor = self.extractor(&query);
        Ok(LinkStream {
            paginator: self.clone(),
            cursor: PaginationCursor::new(query.start),
            query,
            extractor,
            seen: DedupSet::new(),
            buffer: VecDeque::new(),
            state: StreamState::Initializing,
        })
    }

    /// Collect every record category across all pages.
    ///
    /// Records are appended page after page without de-duplication.
    pub async fn report(&self, query: &SearchQuery) -> Result<SearchReport> {
        query.validate()?;
        let extractor = self.extractor(query);
        self.warm_up(query).await?;

        let mut cursor = PaginationCursor::new(query.start);
        let mut report = SearchReport::default();

        while cursor.can_fetch(query.stop) {
            let content = self.fetch_page(query, cursor.offset).await?;
            let (page, more) = parse_report_page(&extractor, &content)?;
            report.results.merge(page);
            report.pages_fetched += 1;

            if !more {
                debug!("No more results after offset {}", cursor.offset);
                break;
            }
            cursor.advance(query.num);
        }

        info!(
            "Report for {:?}: {} pages, {} records",
            query.text,
            report.pages_fetched,
            report.results.record_count()
        );
        Ok(report)
    }

    fn extractor(&self, query: &SearchQuery) -> ResultExtractor {
        ResultExtractor::new(self.filter.clone(), &self.urls.home(query))
    }

    /// Fetch the home page so the session store picks up cookies.
    async fn warm_up(&self, query: &SearchQuery) -> Result<()> {
        let url = self.urls.home(query);
        debug!("Warming up session with {}", url);
        self.fetcher.fetch(&url).await?;
        Ok(())
    }

    /// Pause, then fetch the result page starting at `offset`.
    async fn fetch_page(&self, query: &SearchQuery, offset: u32) -> Result<String> {
        if !query.pause.is_zero() {
            tokio::time::sleep(query.pause).await;
        }
        let url = self.urls.page(query, offset);
        debug!("Fetching results page {}", url);
        self.fetcher.fetch(&url).await
    }
}

fn parse_link_page(
    extractor: &ResultExtractor,
    content: &str,
    only_standard: bool,
) -> Result<(Vec<String>, bool)> {
    let doc = HtmlDocument::parse(content);
    let links = extractor.extract_links(&doc, only_standard)?;
    let more = extractor.has_more_results(&doc)?;
    Ok((links, more))
}

fn parse_report_page(extractor: &ResultExtractor, content: &str) -> Result<(ResultPage, bool)> {
    let doc = HtmlDocument::parse(content);
    let page = extractor.extract_page(&doc)?;
    let more = extractor.has_more_results(&doc)?;
    Ok((page, more))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Initializing,
    Fetching,
    Done,
}

/// Pull-based sequence of unique result links.
///
/// `next` serves buffered links first and only fetches the next page once
/// the buffer is empty. After an error or the last page the stream is
/// finished and `next` keeps returning `Ok(None)`.
pub struct LinkStream<'a, F: PageFetcher + ?Sized> {
    paginator: Paginator<'a, F>,
    query: SearchQuery,
    extractor: ResultExtractor,
    cursor: PaginationCursor,
    seen: DedupSet,
    buffer: VecDeque<String>,
    state: StreamState,
}

impl<'a, F: PageFetcher + ?Sized> LinkStream<'a, F> {
    /// Next unique link, or `None` when the run is over.
    pub async fn next(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(link) = self.buffer.pop_front() {
                return Ok(Some(link));
            }

            match self.state {
                StreamState::Done => return Ok(None),
                StreamState::Initializing => {
                    if let Err(e) = self.paginator.warm_up(&self.query).await {
                        self.state = StreamState::Done;
                        return Err(e);
                    }
                    self.state = StreamState::Fetching;
                }
                StreamState::Fetching => {
                    if !self.cursor.can_fetch(self.query.stop) {
                        debug!("Reached stop offset at {}", self.cursor.offset);
                        self.state = StreamState::Done;
                        continue;
                    }
                    if let Err(e) = self.refill().await {
                        self.state = StreamState::Done;
                        return Err(e);
                    }
                }
            }
        }
    }

    /// Fetch one page and buffer its unseen links.
    async fn refill(&mut self) -> Result<()> {
        let content = self
            .paginator
            .fetch_page(&self.query, self.cursor.offset)
            .await?;
        let (links, more) = parse_link_page(&self.extractor, &content, self.query.only_standard)?;

        for link in links {
            if self.seen.insert(&link) {
                self.buffer.push_back(link);
            }
        }
        debug!(
            "Offset {}: {} new links buffered",
            self.cursor.offset,
            self.buffer.len()
        );

        if more {
            self.cursor.advance(self.query.num);
        } else {
            debug!("No more results after offset {}", self.cursor.offset);
            self.state = StreamState::Done;
        }
        Ok(())
    }

    /// Offset of the next page that would be fetched.
    pub fn offset(&self) -> u32 {
        self.cursor.offset
    }

    /// Number of distinct links produced or buffered so far.
    pub fn unique_links(&self) -> usize {
        self.seen.len()
    }

    /// Pull every remaining link into a vector.
    pub async fn collect_links(mut self) -> Result<Vec<String>> {
        let mut links = Vec::new();
        while let Some(link) = self.next().await? {
            links.push(link);
        }
        Ok(links)
    }

    /// Adapt into a [`Stream`]. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<String>> + 'a
    where
        F: 'a,
    {
        futures::stream::unfold(self, |mut links| async move {
            match links.next().await {
                Ok(Some(link)) => Some((Ok(link), links)),
                Ok(None) => None,
                Err(e) => Some((Err(e), links)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_advance_is_linear() {
        for (start, size, steps) in [(0u32, 10u32, 0u32), (0, 10, 3), (5, 20, 7), (30, 1, 100)] {
            let mut cursor = PaginationCursor::new(start);
            for _ in 0..steps {
                cursor.advance(size);
            }
            assert_eq!(cursor.offset, start + steps * size);
        }
    }

    #[test]
    fn cursor_stop_checks() {
        let cursor = PaginationCursor::new(10);
        assert!(cursor.can_fetch(None));
        assert!(cursor.can_fetch(Some(11)));
        assert!(!cursor.can_fetch(Some(10)));
        assert!(!cursor.can_fetch(Some(5)));
    }
}
