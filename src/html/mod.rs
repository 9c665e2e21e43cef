//! Structural query capability over parsed HTML.
//!
//! Extraction code only talks to [`Document`] and [`Element`], so the
//! parsing engine behind them can be swapped without touching it.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, SearchError};

/// A parsed document that can be queried with CSS selector patterns.
pub trait Document {
    type Element<'a>: Element
    where
        Self: 'a;

    /// All elements matching `pattern`, in document order.
    fn select_all<'a>(&'a self, pattern: &str) -> Result<Vec<Self::Element<'a>>>;

    /// Whether any element matches `pattern`.
    fn contains(&self, pattern: &str) -> Result<bool> {
        Ok(!self.select_all(pattern)?.is_empty())
    }
}

/// An element handle returned by a [`Document`] query.
pub trait Element: Sized {
    /// All descendants of this element matching `pattern`, in document order.
    fn select_all(&self, pattern: &str) -> Result<Vec<Self>>;

    /// Concatenated, trimmed text of this element's subtree.
    fn text_content(&self) -> String;

    /// Value of attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Lowercased tag name of the immediate parent element.
    fn parent_tag(&self) -> Option<String>;
}

/// HTML document parsed with `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(content: &str) -> Self {
        Self {
            html: Html::parse_document(content),
        }
    }
}

fn parse_selector(pattern: &str) -> Result<Selector> {
    Selector::parse(pattern)
        .map_err(|e| SearchError::Selector(format!("{}: {:?}", pattern, e)))
}

impl Document for HtmlDocument {
    type Element<'a> = ElementRef<'a> where Self: 'a;

    fn select_all<'a>(&'a self, pattern: &str) -> Result<Vec<ElementRef<'a>>> {
        let selector = parse_selector(pattern)?;
        Ok(self.html.select(&selector).collect())
    }
}

impl<'a> Element for ElementRef<'a> {
    fn select_all(&self, pattern: &str) -> Result<Vec<Self>> {
        let selector = parse_selector(pattern)?;
        Ok(self.select(&selector).collect())
    }

    fn text_content(&self) -> String {
        self.text().collect::<String>().trim().to_string()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(|s| s.to_string())
    }

    fn parent_tag(&self) -> Option<String> {
        self.parent()
            .and_then(|node| node.value().as_element().map(|e| e.name().to_lowercase()))
    }
}
