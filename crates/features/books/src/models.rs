use ihub_derive::api_model;
use ihub_gateway::{BookHit, BookSource, WikiSummary};

/// A normalized catalogue search hit.
#[api_model]
pub struct Book {
    /// Catalogue-local identifier (ASIN or ISBN)
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    /// Catalogue the hit came from
    pub source: String,
}

impl From<BookHit> for Book {
    fn from(hit: BookHit) -> Self {
        let source = match hit.source {
            BookSource::Amazon => "amazon",
            BookSource::PenguinRandomHouse => "penguin_random_house",
        };
        Self { id: hit.id, title: hit.title, author: hit.author, source: source.to_owned() }
    }
}

/// Merged results of one catalogue search.
#[api_model]
pub struct BookSearchResults {
    pub query: String,
    pub hits: Vec<Book>,
    /// Catalogues that failed and were skipped in this answer
    pub skipped_sources: Vec<String>,
}

/// Lead-section summary of a Wikipedia page.
#[api_model]
pub struct WikiPage {
    pub title: String,
    pub description: Option<String>,
    pub extract: Option<String>,
}

impl From<WikiSummary> for WikiPage {
    fn from(summary: WikiSummary) -> Self {
        Self { title: summary.title, description: summary.description, extract: summary.extract }
    }
}
