//! Headline lookup (NewsAPI v2 shape).
//!
//! Primary query: `top-headlines` for the configured country and inferred
//! category. When that yields nothing, a keyword search over `everything`
//! is tried once before giving up.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{fetch_json, http_client};
use crate::config::NewsConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsCategory {
    Technology,
    Business,
    Science,
    General,
}

const TECHNOLOGY_KEYWORDS: &[&str] = &["tech", "artificial intelligence", " ai ", "software", "gadget"];
const BUSINESS_KEYWORDS: &[&str] = &["business", "market", "stock", "economy", "finance"];
const SCIENCE_KEYWORDS: &[&str] = &["science", "space", "nasa", "physics"];

impl NewsCategory {
    /// Category inferred from a lower-cased utterance; first group wins.
    /// `ai` only counts as a whole word.
    pub fn from_utterance(lowered: &str) -> Self {
        let words: String =
            lowered.chars().map(|c| if c.is_alphanumeric() { c } else { ' ' }).collect();
        let padded = format!(" {words} ");
        let hits = |keywords: &[&str]| keywords.iter().any(|k| padded.contains(k));
        if hits(TECHNOLOGY_KEYWORDS) {
            NewsCategory::Technology
        } else if hits(BUSINESS_KEYWORDS) {
            NewsCategory::Business
        } else if hits(SCIENCE_KEYWORDS) {
            NewsCategory::Science
        } else {
            NewsCategory::General
        }
    }

    /// NewsAPI `category` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            NewsCategory::Technology => "technology",
            NewsCategory::Business => "business",
            NewsCategory::Science => "science",
            NewsCategory::General => "general",
        }
    }

    /// Search term for the fallback query.
    fn search_term(self) -> &'static str {
        match self {
            NewsCategory::Technology => "technology OR AI",
            NewsCategory::Business => "business OR markets",
            NewsCategory::Science => "science OR space",
            NewsCategory::General => "news",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsLookup {
    Headlines(Vec<Headline>),
    /// The service was tried but produced nothing usable.
    Empty,
    /// No API key, so the service was never contacted.
    NotConfigured,
}

#[derive(Debug, Clone)]
pub struct NewsProvider {
    client: Client,
    api_base_url: String,
    country: String,
    page_size: usize,
    api_key: Option<String>,
}

impl NewsProvider {
    pub fn new(config: &NewsConfig, api_key: Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            client: http_client(config.timeout_seconds)?,
            api_base_url: config.api_base_url.clone(),
            country: config.country.clone(),
            page_size: config.page_size,
            api_key,
        })
    }

    pub async fn get_headlines(&self, category: NewsCategory) -> NewsLookup {
        let Some(key) = self.api_key.as_deref() else {
            debug!("news: no API key configured");
            return NewsLookup::NotConfigured;
        };
        let page_size = self.page_size.to_string();

        let primary = self
            .client
            .get(format!("{}/top-headlines", self.api_base_url))
            .header("X-Api-Key", key)
            .query(&[
                ("country", self.country.as_str()),
                ("category", category.as_str()),
                ("pageSize", page_size.as_str()),
            ]);
        let headlines = self.run_query(primary, "top-headlines").await;
        if !headlines.is_empty() {
            return NewsLookup::Headlines(headlines);
        }

        debug!(category = category.as_str(), "news: primary query empty, trying fallback");
        let fallback = self
            .client
            .get(format!("{}/everything", self.api_base_url))
            .header("X-Api-Key", key)
            .query(&[
                ("q", category.search_term()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ]);
        let headlines = self.run_query(fallback, "everything").await;
        if headlines.is_empty() {
            NewsLookup::Empty
        } else {
            NewsLookup::Headlines(headlines)
        }
    }

    async fn run_query(&self, req: reqwest::RequestBuilder, label: &str) -> Vec<Headline> {
        match fetch_json(req).await {
            Ok(body) => parse_headlines(&body, self.page_size),
            Err(e) => {
                warn!(query = label, error = %e, "news lookup failed");
                Vec::new()
            }
        }
    }
}

/// Up to `limit` headlines from an `articles` array. Blank and
/// `[Removed]` titles are skipped; a missing source reads "unknown".
pub fn parse_headlines(body: &Value, limit: usize) -> Vec<Headline> {
    let Some(articles) = body.get("articles").and_then(Value::as_array) else {
        return Vec::new();
    };
    articles
        .iter()
        .filter_map(|a| {
            let title = a.get("title")?.as_str()?.trim();
            if title.is_empty() || title == "[Removed]" {
                return None;
            }
            let source = a
                .get("source")
                .and_then(|s| s.get("name"))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("unknown");
            Some(Headline { title: title.to_string(), source: source.to_string() })
        })
        .take(limit)
        .collect()
}
