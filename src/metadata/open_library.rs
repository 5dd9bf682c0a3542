//! Open Library books API adapter.

use async_trait::async_trait;
use serde_json::Value;

use super::{cover, BookMetadata, MetadataProvider};

const API_URL: &str = "https://openlibrary.org/api/books";

pub struct OpenLibraryProvider {
    client: reqwest::Client,
}

impl OpenLibraryProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Extract metadata from a `jscmd=data` response. The payload is an
    /// object keyed by `ISBN:{isbn}`; authors and subjects are lists of
    /// `{name}` objects and both are required for a usable result. The
    /// cover block, when present, holds small/medium/large variants.
    fn parse(body: &Value) -> Option<BookMetadata> {
        let info = body.as_object()?.values().next()?;

        let title = info.get("title")?.as_str()?.to_string();
        let subtitle = info
            .get("subtitle")
            .and_then(Value::as_str)
            .map(str::to_string);

        let authors = named_list(info.get("authors"));
        if authors.is_empty() {
            return None;
        }
        let categories = named_list(info.get("subjects"));
        if categories.is_empty() {
            return None;
        }

        let cover_url = info.get("cover").and_then(|c| {
            ["medium", "large", "small"]
                .iter()
                .find_map(|size| c.get(size).and_then(Value::as_str))
                .map(str::to_string)
        });

        Some(BookMetadata {
            title,
            subtitle,
            authors,
            categories,
            cover_url,
        })
    }
}

/// Collect the `name` field of each entry in a JSON list of objects.
fn named_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl MetadataProvider for OpenLibraryProvider {
    fn name(&self) -> &'static str {
        "open-library"
    }

    async fn try_fetch(&self, isbn: &str) -> Option<BookMetadata> {
        let response = match self
            .client
            .get(API_URL)
            .query(&[
                ("bibkeys", format!("ISBN:{}", isbn)),
                ("jscmd", "data".to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Open Library request failed for {}: {}", isbn, e);
                return None;
            }
        };

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Open Library returned malformed JSON for {}: {}", isbn, e);
                return None;
            }
        };

        let mut meta = Self::parse(&body)?;
        if meta.cover_url.is_none() {
            meta.cover_url = cover::amazon_cover(&self.client, isbn).await;
        }
        Some(meta)
    }
}
