use crate::error::GatewayError;
use crate::http::{decode_json, join, parse_base};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use url::Url;

/// A normalized search hit from any book catalogue.
#[derive(Debug, Clone)]
pub struct BookHit {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub source: BookSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSource {
    Amazon,
    PenguinRandomHouse,
}

/// Amazon Product Advertising (PAAPI 5) book search.
#[derive(Debug, Clone)]
pub struct AmazonBooksClient {
    client: Client,
    base: Url,
    partner_tag: String,
}

const AMAZON: &str = "amazon";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AmazonSearchResponse {
    search_result: Option<AmazonSearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AmazonSearchResult {
    #[serde(default)]
    items: Vec<AmazonItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AmazonItem {
    #[serde(rename = "ASIN")]
    asin: String,
    item_info: Option<AmazonItemInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AmazonItemInfo {
    title: Option<AmazonDisplayValue>,
    by_line_info: Option<AmazonByLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AmazonDisplayValue {
    display_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AmazonByLine {
    #[serde(default)]
    contributors: Vec<AmazonContributor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AmazonContributor {
    name: String,
}

impl AmazonBooksClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(
        client: Client,
        base_url: &str,
        partner_tag: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Ok(Self { client, base: parse_base(AMAZON, base_url)?, partner_tag: partner_tag.into() })
    }

    #[instrument(skip(self))]
    pub async fn search(&self, keywords: &str) -> Result<Vec<BookHit>, GatewayError> {
        let url = join(AMAZON, &self.base, "paapi5/searchitems")?;
        let response = self
            .client
            .post(url)
            .json(&json!({
                "Keywords": keywords,
                "SearchIndex": "Books",
                "PartnerTag": self.partner_tag,
                "Resources": ["ItemInfo.Title", "ItemInfo.ByLineInfo"],
            }))
            .send()
            .await?;
        let payload: AmazonSearchResponse = decode_json(AMAZON, response).await?;

        let items = payload.search_result.map(|r| r.items).unwrap_or_default();
        Ok(items
            .into_iter()
            .filter_map(|item| {
                let info = item.item_info?;
                let title = info.title?.display_value;
                let author = info
                    .by_line_info
                    .and_then(|b| b.contributors.into_iter().next())
                    .map(|c| c.name);
                Some(BookHit { id: item.asin, title, author, source: BookSource::Amazon })
            })
            .collect())
    }
}

/// Penguin Random House title search.
#[derive(Debug, Clone)]
pub struct PrhClient {
    client: Client,
    base: Url,
    api_key: String,
}

const PRH: &str = "penguin_random_house";

#[derive(Debug, Deserialize)]
struct PrhResponse {
    data: Option<PrhData>,
}

#[derive(Debug, Deserialize)]
struct PrhData {
    #[serde(default)]
    titles: Vec<PrhTitle>,
}

#[derive(Debug, Deserialize)]
struct PrhTitle {
    isbn: String,
    title: String,
    author: Option<String>,
}

impl PrhClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Ok(Self { client, base: parse_base(PRH, base_url)?, api_key: api_key.into() })
    }

    #[instrument(skip(self))]
    pub async fn search(&self, keywords: &str) -> Result<Vec<BookHit>, GatewayError> {
        let url = join(PRH, &self.base, "titles")?;
        let response = self
            .client
            .get(url)
            .query(&[("search", keywords), ("api_key", &self.api_key)])
            .send()
            .await?;
        let payload: PrhResponse = decode_json(PRH, response).await?;

        let titles = payload.data.map(|d| d.titles).unwrap_or_default();
        Ok(titles
            .into_iter()
            .map(|t| BookHit {
                id: t.isbn,
                title: t.title,
                author: t.author,
                source: BookSource::PenguinRandomHouse,
            })
            .collect())
    }
}
