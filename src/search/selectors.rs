//! Structural patterns for each result category on a classic result page.
//!
//! Record categories are matched one row container at a time: title,
//! display link and description are looked up inside the same container so
//! fields from different rows can never be paired with each other.

/// Container holding the result list; simple-mode links come from here.
pub const RESULTS_CONTAINER: &str = "#search";

/// Pagination bar present whenever another page of results exists.
pub const MORE_RESULTS: &str = "#nav";

/// Patterns for one category of result records.
#[derive(Debug, Clone, Copy)]
pub struct RecordSelectors {
    /// Category name used in logs and errors.
    pub category: &'static str,
    /// One match per result row.
    pub container: &'static str,
    /// Title anchor, relative to the container.
    pub title: &'static str,
    /// Display link, relative to the container.
    pub display_link: &'static str,
    /// Snippet, relative to the container. `None` for categories without one.
    pub description: Option<&'static str>,
}

/// Patterns for one group of related-search keywords.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSelectors {
    pub category: &'static str,
    pub anchor: &'static str,
}

pub const MAIN_ITEMS: RecordSelectors = RecordSelectors {
    category: "main_items",
    container: "div#search div#ires ol#rso > li.g > div.rc",
    title: "h3.r a",
    display_link: "div.s cite",
    description: Some("div.s span.st"),
};

pub const NEWS_LEADS: RecordSelectors = RecordSelectors {
    category: "news_leads",
    container: "div#search div#ires ol#rso li#newsbox.g div._Hnc ol li._njd.scim div.nulead",
    title: "span._Tyb a._Knc._R7c.l",
    display_link: "div.gl",
    description: Some("div.s span.st"),
};

pub const NEWS_SECTIONS: RecordSelectors = RecordSelectors {
    category: "news_sections",
    container: "div#search div#ires ol#rso li#newsbox.g ol li._njd.card-section div.nusec",
    title: "span._Tyb a._R7c.l",
    display_link: "div.gl",
    description: None,
};

pub const NORMAL_ITEMS: RecordSelectors = RecordSelectors {
    category: "normal_items",
    container: "div#search div#ires ol#rso div.srg > li.g > div.rc",
    title: "h3.r a",
    display_link: "div.s cite",
    description: Some("div.s span.st"),
};

pub const TOP_RELATED: KeywordSelectors = KeywordSelectors {
    category: "top_related",
    anchor: "div#topstuff div#trev.std.card-section div a.nobr",
};

pub const BOTTOM_RELATED: KeywordSelectors = KeywordSelectors {
    category: "bottom_related",
    anchor: "div#botstuff div#brs div.card-section div.brs_col p._e4b a",
};
