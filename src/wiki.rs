//! Article retrieval from Wikipedia
//!
//! Uses the MediaWiki Action API to fetch the plain-text extract of a page.
//! Missing pages, disambiguation pages and transport failures all collapse
//! into `None`: the round is skipped either way.

use crate::config::WikipediaConfig;
use anyhow::Result;
use serde_json::Value;
use std::time::Duration;

/// Source of article text for a topic title
#[allow(async_fn_in_trait)]
pub trait ArticleSource {
    /// Full article text, or `None` when there is nothing usable
    async fn fetch_article(&self, title: &str) -> Option<String>;
}

pub struct WikipediaClient {
    config: WikipediaConfig,
    client: reqwest::Client,
}

impl WikipediaClient {
    pub fn new(config: WikipediaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { config, client })
    }

    async fn query(&self, title: &str) -> Result<Value> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|pageprops"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Wikipedia API error {}: {}", status, error_text));
        }

        Ok(response.json().await?)
    }
}

impl ArticleSource for WikipediaClient {
    async fn fetch_article(&self, title: &str) -> Option<String> {
        match self.query(title).await {
            Ok(body) => match extract_article(&body) {
                Ok(text) => {
                    tracing::debug!("Fetched {:?} ({} bytes)", title, text.len());
                    Some(text)
                }
                Err(missing) => {
                    tracing::warn!("No article for {:?}: {}", title, missing);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Wikipedia request for {:?} failed: {}", title, e);
                None
            }
        }
    }
}

/// Why a well-formed API response still has no usable article
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissingArticle {
    #[error("page does not exist")]
    NotFound,

    #[error("title is ambiguous (disambiguation page)")]
    Ambiguous,

    #[error("page has no text")]
    Empty,
}

/// Pull the extract out of a `formatversion=2` query response
pub fn extract_article(body: &Value) -> Result<String, MissingArticle> {
    let page = body["query"]["pages"]
        .as_array()
        .and_then(|pages| pages.first())
        .ok_or(MissingArticle::NotFound)?;

    if page.get("missing").is_some() || page.get("invalid").is_some() {
        return Err(MissingArticle::NotFound);
    }

    if page["pageprops"].get("disambiguation").is_some() {
        return Err(MissingArticle::Ambiguous);
    }

    let text = page["extract"].as_str().unwrap_or("").trim();
    if text.is_empty() {
        return Err(MissingArticle::Empty);
    }

    Ok(text.to_string())
}
