use crate::error::BooksError;
use crate::models::{Book, BookSearchResults, WikiPage};
use ihub_gateway::{AmazonBooksClient, GatewayError, PrhClient, WikipediaClient};
use tracing::warn;

/// Fan-out search over the book catalogues plus the Wikipedia summary lookup.
#[derive(Debug, Clone)]
pub struct BooksService {
    amazon: AmazonBooksClient,
    penguin: PrhClient,
    wikipedia: WikipediaClient,
}

impl BooksService {
    #[must_use]
    pub const fn new(
        amazon: AmazonBooksClient,
        penguin: PrhClient,
        wikipedia: WikipediaClient,
    ) -> Self {
        Self { amazon, penguin, wikipedia }
    }

    /// Queries both catalogues concurrently and merges whatever answered.
    ///
    /// A failing catalogue is logged and reported in `skipped_sources`; the
    /// call only errors when every catalogue failed.
    ///
    /// # Errors
    /// Returns [`BooksError::Upstream`] when no catalogue answered.
    pub async fn search(&self, query: &str) -> Result<BookSearchResults, BooksError> {
        let (amazon, penguin) =
            tokio::join!(self.amazon.search(query), self.penguin.search(query));

        let mut hits = Vec::new();
        let mut skipped = Vec::new();
        let mut failures = Vec::new();

        match amazon {
            Ok(found) => hits.extend(found.into_iter().map(Book::from)),
            Err(err) => {
                warn!(query, %err, "Amazon catalogue search failed; skipping");
                skipped.push("amazon".to_owned());
                failures.push(err.to_string());
            }
        }
        match penguin {
            Ok(found) => hits.extend(found.into_iter().map(Book::from)),
            Err(err) => {
                warn!(query, %err, "Penguin Random House search failed; skipping");
                skipped.push("penguin_random_house".to_owned());
                failures.push(err.to_string());
            }
        }

        if skipped.len() == 2 {
            return Err(BooksError::Upstream {
                message: failures.join("; ").into(),
                context: Some(query.to_owned().into()),
            });
        }

        Ok(BookSearchResults {
            query: query.to_owned(),
            hits,
            skipped_sources: skipped,
        })
    }

    /// Fetches the Wikipedia summary for a title.
    ///
    /// # Errors
    /// Returns [`BooksError::NotFound`] when no such page exists, and
    /// [`BooksError::Gateway`] for other upstream failures.
    pub async fn wiki_summary(&self, title: &str) -> Result<WikiPage, BooksError> {
        match self.wikipedia.summary(title).await {
            Ok(summary) => Ok(WikiPage::from(summary)),
            Err(GatewayError::Upstream { status: 404, .. }) => Err(BooksError::NotFound {
                message: format!("No Wikipedia page for '{title}'").into(),
                context: None,
            }),
            Err(err) => Err(BooksError::from(err)),
        }
    }
}
