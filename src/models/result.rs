//! Result records extracted from search result pages.

use serde::Serialize;

/// One discovered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub title: String,
    /// Absolute URL of the result.
    pub link: String,
    /// Display link shown under the title (may be empty).
    pub display_link: String,
    /// Snippet text (may be empty).
    pub description: String,
}

/// A related search suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedKeyword {
    pub title: String,
    pub link: String,
}

/// Everything extracted from a single result page, by category.
///
/// Categories absent from a page are empty, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultPage {
    pub main_items: Vec<ResultRecord>,
    pub news_leads: Vec<ResultRecord>,
    /// News section items carry no description.
    pub news_sections: Vec<ResultRecord>,
    pub normal_items: Vec<ResultRecord>,
    pub top_related: Vec<RelatedKeyword>,
    pub bottom_related: Vec<RelatedKeyword>,
}

impl ResultPage {
    /// Append another page's sequences onto this one, preserving order.
    pub fn merge(&mut self, other: ResultPage) {
        self.main_items.extend(other.main_items);
        self.news_leads.extend(other.news_leads);
        self.news_sections.extend(other.news_sections);
        self.normal_items.extend(other.normal_items);
        self.top_related.extend(other.top_related);
        self.bottom_related.extend(other.bottom_related);
    }

    /// Sequence lengths in category order.
    pub fn counts(&self) -> [usize; 6] {
        [
            self.main_items.len(),
            self.news_leads.len(),
            self.news_sections.len(),
            self.normal_items.len(),
            self.top_related.len(),
            self.bottom_related.len(),
        ]
    }

    /// Total number of result records (keywords excluded).
    pub fn record_count(&self) -> usize {
        self.main_items.len()
            + self.news_leads.len()
            + self.news_sections.len()
            + self.normal_items.len()
    }
}

/// Aggregated output of a report-mode run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Number of result pages fetched.
    pub pages_fetched: usize,
    #[serde(flatten)]
    pub results: ResultPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str) -> ResultRecord {
        ResultRecord {
            title: "t".to_string(),
            link: link.to_string(),
            display_link: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn merge_keeps_duplicates_and_order() {
        let mut total = ResultPage::default();
        let page = ResultPage {
            main_items: vec![record("https://a.example/"), record("https://b.example/")],
            ..Default::default()
        };
        total.merge(page.clone());
        total.merge(page);

        assert_eq!(total.counts(), [4, 0, 0, 0, 0, 0]);
        assert_eq!(total.main_items[2].link, "https://a.example/");
        assert_eq!(total.record_count(), 4);
    }

    #[test]
    fn report_serializes_flat() {
        let report = SearchReport {
            pages_fetched: 1,
            results: ResultPage::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pages_fetched"], 1);
        assert!(json["main_items"].as_array().unwrap().is_empty());
        assert!(json["bottom_related"].is_array());
    }
}
