//! Result extraction from parsed result pages.

use tracing::debug;
use url::Url;

use super::link_filter::LinkFilter;
use super::selectors::{
    KeywordSelectors, RecordSelectors, BOTTOM_RELATED, MAIN_ITEMS, MORE_RESULTS, NEWS_LEADS,
    NEWS_SECTIONS, NORMAL_ITEMS, RESULTS_CONTAINER, TOP_RELATED,
};
use crate::error::{Result, SearchError};
use crate::html::{Document, Element};
use crate::models::{RelatedKeyword, ResultPage, ResultRecord};

/// Turns parsed result pages into links or structured records.
#[derive(Debug, Clone)]
pub struct ResultExtractor {
    filter: LinkFilter,
    /// Engine home URL; relative engine links are resolved against it.
    base: Option<Url>,
}

impl ResultExtractor {
    pub fn new(filter: LinkFilter, base_url: &str) -> Self {
        Self {
            filter,
            base: Url::parse(base_url).ok(),
        }
    }

    /// Result links on a page, in document order.
    ///
    /// With `only_standard`, only anchors directly inside an `<h3>` are
    /// considered; those are the organic result headings.
    pub fn extract_links<D: Document>(&self, doc: &D, only_standard: bool) -> Result<Vec<String>> {
        if !doc.contains(RESULTS_CONTAINER)? {
            return Err(SearchError::malformed(
                "results",
                format!("no {} container on page", RESULTS_CONTAINER),
            ));
        }

        let anchors = doc.select_all(&format!("{} a", RESULTS_CONTAINER))?;
        let total = anchors.len();

        let links: Vec<String> = anchors
            .into_iter()
            .filter(|a| !only_standard || a.parent_tag().as_deref() == Some("h3"))
            .filter_map(|a| a.attribute("href"))
            .filter_map(|href| self.filter.filter(&href))
            .collect();

        debug!("Kept {} of {} anchors", links.len(), total);
        Ok(links)
    }

    /// All record and keyword categories on a page.
    pub fn extract_page<D: Document>(&self, doc: &D) -> Result<ResultPage> {
        let page = ResultPage {
            main_items: self.extract_records(doc, &MAIN_ITEMS)?,
            news_leads: self.extract_records(doc, &NEWS_LEADS)?,
            news_sections: self.extract_records(doc, &NEWS_SECTIONS)?,
            normal_items: self.extract_records(doc, &NORMAL_ITEMS)?,
            top_related: self.extract_keywords(doc, &TOP_RELATED)?,
            bottom_related: self.extract_keywords(doc, &BOTTOM_RELATED)?,
        };

        debug!("Extracted categories {:?}", page.counts());
        Ok(page)
    }

    /// Whether the page offers another page of results.
    pub fn has_more_results<D: Document>(&self, doc: &D) -> Result<bool> {
        doc.contains(MORE_RESULTS)
    }

    fn extract_records<D: Document>(
        &self,
        doc: &D,
        selectors: &RecordSelectors,
    ) -> Result<Vec<ResultRecord>> {
        let mut records = Vec::new();

        for (row, container) in doc.select_all(selectors.container)?.iter().enumerate() {
            let Some(title) = container.select_all(selectors.title)?.into_iter().next() else {
                debug!("{} row {} has no title, skipping", selectors.category, row);
                continue;
            };

            let href = title.attribute("href").ok_or_else(|| {
                SearchError::malformed(selectors.category, format!("row {} title has no href", row))
            })?;

            let display_link =
                first_text(container, selectors.display_link)?.ok_or_else(|| {
                    SearchError::malformed(
                        selectors.category,
                        format!("row {} has a title but no display link", row),
                    )
                })?;

            let description = match selectors.description {
                Some(pattern) => first_text(container, pattern)?.ok_or_else(|| {
                    SearchError::malformed(
                        selectors.category,
                        format!("row {} has a title but no description", row),
                    )
                })?,
                None => String::new(),
            };

            records.push(ResultRecord {
                title: title.text_content(),
                link: self.record_link(&href),
                display_link,
                description,
            });
        }

        Ok(records)
    }

    fn extract_keywords<D: Document>(
        &self,
        doc: &D,
        selectors: &KeywordSelectors,
    ) -> Result<Vec<RelatedKeyword>> {
        let mut keywords = Vec::new();
        for anchor in doc.select_all(selectors.anchor)? {
            let Some(href) = anchor.attribute("href") else {
                debug!("{} anchor without href, skipping", selectors.category);
                continue;
            };
            keywords.push(RelatedKeyword {
                title: anchor.text_content(),
                link: self.resolve(&href),
            });
        }
        Ok(keywords)
    }

    /// External target of a record link, or the link made absolute.
    fn record_link(&self, href: &str) -> String {
        self.filter
            .filter(href)
            .unwrap_or_else(|| self.resolve(href))
    }

    fn resolve(&self, href: &str) -> String {
        self.base
            .as_ref()
            .and_then(|base| base.join(href).ok())
            .map(|u| u.to_string())
            .unwrap_or_else(|| href.to_string())
    }
}

/// Text of the first match of `pattern` inside `scope`.
fn first_text<E: Element>(scope: &E, pattern: &str) -> Result<Option<String>> {
    Ok(scope
        .select_all(pattern)?
        .into_iter()
        .next()
        .map(|e| e.text_content()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlDocument;

    fn extractor() -> ResultExtractor {
        ResultExtractor::new(LinkFilter::default(), "https://www.google.com/")
    }

    fn row(title_href: &str, title: &str, cite: Option<&str>, desc: Option<&str>) -> String {
        let cite = cite
            .map(|c| format!(r#"<div class="f kv _SWb"><cite class="_Rm">{c}</cite></div>"#))
            .unwrap_or_default();
        let desc = desc
            .map(|d| format!(r#"<span class="st">{d}</span>"#))
            .unwrap_or_default();
        format!(
            r#"<li class="g"><div class="rc"><h3 class="r"><a href="{title_href}">{title}</a></h3>
               <div class="s"><div>{cite}{desc}</div></div></div></li>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><div id="search"><div id="ires"><ol id="rso">{}</ol></div></div></body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn standard_links_only_come_from_headings() {
        let html = r#"
            <div id="search">
              <h3 class="r"><a href="/url?q=https://a.example/&sa=U">A</a></h3>
              <span><a href="https://cached.example/">Cached</a></span>
              <h3 class="r"><a href="https://www.google.com/search?q=x">Nav</a></h3>
            </div>
            <a href="https://outside.example/">outside container</a>
        "#;
        let doc = HtmlDocument::parse(html);
        let ex = extractor();

        assert_eq!(
            ex.extract_links(&doc, true).unwrap(),
            vec!["https://a.example/".to_string()]
        );
        assert_eq!(
            ex.extract_links(&doc, false).unwrap(),
            vec![
                "https://a.example/".to_string(),
                "https://cached.example/".to_string()
            ]
        );
    }

    #[test]
    fn missing_results_container_is_malformed() {
        let doc = HtmlDocument::parse("<html><body><form id='captcha'></form></body></html>");
        let err = extractor().extract_links(&doc, true).unwrap_err();
        assert!(err.is_malformed_page());
    }

    #[test]
    fn records_pair_fields_per_row() {
        let html = page(&[
            row("/url?q=https://one.example/&sa=U", "One", Some("one.example"), Some("first")),
            row("https://two.example/", "Two", Some("two.example"), Some("second")),
        ]);
        let doc = HtmlDocument::parse(&html);
        let result = extractor().extract_page(&doc).unwrap();

        assert_eq!(result.counts(), [2, 0, 0, 0, 0, 0]);
        assert_eq!(
            result.main_items[0],
            ResultRecord {
                title: "One".to_string(),
                link: "https://one.example/".to_string(),
                display_link: "one.example".to_string(),
                description: "first".to_string(),
            }
        );
        assert_eq!(result.main_items[1].description, "second");
    }

    #[test]
    fn missing_description_is_malformed() {
        let html = page(&[
            row("https://one.example/", "One", Some("one.example"), Some("first")),
            row("https://two.example/", "Two", Some("two.example"), None),
            row("https://three.example/", "Three", Some("three.example"), Some("third")),
        ]);
        let doc = HtmlDocument::parse(&html);
        let err = extractor().extract_page(&doc).unwrap_err();

        match err {
            SearchError::MalformedPage { category, detail } => {
                assert_eq!(category, "main_items");
                assert!(detail.contains("row 1"));
                assert!(detail.contains("description"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_display_link_is_malformed() {
        let html = page(&[row("https://one.example/", "One", None, Some("first"))]);
        let doc = HtmlDocument::parse(&html);
        assert!(extractor().extract_page(&doc).unwrap_err().is_malformed_page());
    }

    #[test]
    fn engine_record_links_are_made_absolute() {
        let html = page(&[row("/search?q=openai&tbm=isch", "Images", Some("g"), Some("d"))]);
        let doc = HtmlDocument::parse(&html);
        let result = extractor().extract_page(&doc).unwrap();
        assert_eq!(
            result.main_items[0].link,
            "https://www.google.com/search?q=openai&tbm=isch"
        );
    }

    #[test]
    fn bad_field_pattern_is_a_selector_error() {
        let html = page(&[row("https://one.example/", "One", Some("one.example"), Some("first"))]);
        let doc = HtmlDocument::parse(&html);
        let selectors = RecordSelectors {
            display_link: "div.s cite[[",
            ..MAIN_ITEMS
        };

        let err = extractor().extract_records(&doc, &selectors).unwrap_err();
        assert!(matches!(err, SearchError::Selector(_)), "{err}");
    }

    #[test]
    fn more_results_signal() {
        let ex = extractor();
        let with_nav = HtmlDocument::parse(r#"<div id="search"></div><table id="nav"></table>"#);
        let without_nav = HtmlDocument::parse(r#"<div id="search"></div>"#);
        assert!(ex.has_more_results(&with_nav).unwrap());
        assert!(!ex.has_more_results(&without_nav).unwrap());
    }
}
