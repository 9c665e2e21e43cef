//! Request URL construction for the engine's home and result pages.

use crate::models::SearchQuery;

/// Default engine host template. `{tld}` is replaced by the query's TLD.
pub const DEFAULT_ENGINE_URL: &str = "https://www.google.{tld}";

/// Builds engine URLs from a host template.
#[derive(Debug, Clone)]
pub struct EngineUrls {
    base: String,
}

impl Default for EngineUrls {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_URL)
    }
}

impl EngineUrls {
    /// `template` is a scheme and host, optionally containing `{tld}`.
    pub fn new(template: &str) -> Self {
        Self {
            base: template.trim_end_matches('/').to_string(),
        }
    }

    fn base(&self, query: &SearchQuery) -> String {
        self.base.replace("{tld}", &query.tld)
    }

    /// Home page, fetched once per run to establish the session.
    pub fn home(&self, query: &SearchQuery) -> String {
        format!("{}/", self.base(query))
    }

    /// Result page URL for the page starting at `start`.
    ///
    /// Offset zero uses the first-page form; any other offset uses the
    /// next-page form. `num` is only sent for non-default page sizes.
    pub fn page(&self, query: &SearchQuery, start: u32) -> String {
        let base = self.base(query);
        let q = encode_query(&query.text);
        let hl = &query.lang;
        let tbs = query.time_window.as_param();
        let safe = query.safe.as_param();

        match (start == 0, query.uses_default_page_size()) {
            (true, true) => format!(
                "{base}/search?hl={hl}&q={q}&btnG=Google+Search&tbs={tbs}&safe={safe}"
            ),
            (true, false) => format!(
                "{base}/search?hl={hl}&q={q}&num={num}&btnG=Google+Search&tbs={tbs}&safe={safe}",
                num = query.num
            ),
            (false, true) => format!(
                "{base}/search?hl={hl}&q={q}&start={start}&tbs={tbs}&safe={safe}"
            ),
            (false, false) => format!(
                "{base}/search?hl={hl}&q={q}&num={num}&start={start}&tbs={tbs}&safe={safe}",
                num = query.num
            ),
        }
    }
}

/// Form-encode query text (spaces become `+`).
fn encode_query(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_url() {
        let urls = EngineUrls::default();
        let query = SearchQuery::new("openai").tld("co.uk");
        assert_eq!(urls.home(&query), "https://www.google.co.uk/");
    }

    #[test]
    fn first_page_default_size() {
        let urls = EngineUrls::default();
        let query = SearchQuery::new("open ai & co");
        assert_eq!(
            urls.page(&query, 0),
            "https://www.google.com/search?hl=en&q=open+ai+%26+co&btnG=Google+Search&tbs=0&safe=off"
        );
    }

    #[test]
    fn first_page_custom_size() {
        let urls = EngineUrls::default();
        let query = SearchQuery::new("openai").num(40).lang("zh");
        assert_eq!(
            urls.page(&query, 0),
            "https://www.google.com/search?hl=zh&q=openai&num=40&btnG=Google+Search&tbs=0&safe=off"
        );
    }

    #[test]
    fn next_pages() {
        let urls = EngineUrls::default();
        let query = SearchQuery::new("openai");
        assert_eq!(
            urls.page(&query, 10),
            "https://www.google.com/search?hl=en&q=openai&start=10&tbs=0&safe=off"
        );

        let query = query.num(20);
        assert_eq!(
            urls.page(&query, 40),
            "https://www.google.com/search?hl=en&q=openai&num=20&start=40&tbs=0&safe=off"
        );
    }

    #[test]
    fn custom_engine_without_tld() {
        let urls = EngineUrls::new("http://127.0.0.1:9000/");
        let query = SearchQuery::new("x");
        assert_eq!(urls.home(&query), "http://127.0.0.1:9000/");
        assert!(urls.page(&query, 0).starts_with("http://127.0.0.1:9000/search?"));
    }
}
