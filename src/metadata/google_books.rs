//! Google Books volumes API adapter.

use async_trait::async_trait;
use serde_json::Value;

use super::{string_list, BookMetadata, MetadataProvider};

const API_URL: &str = "https://www.googleapis.com/books/v1/volumes";

pub struct GoogleBooksProvider {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GoogleBooksProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    /// Extract metadata from a volumes response. Google interleaves the
    /// interesting fields under `items[0].volumeInfo`; a result without a
    /// thumbnail is treated as no result, since this is the primary
    /// provider and carries its own cover art.
    fn parse(body: &Value) -> Option<BookMetadata> {
        if body.get("totalItems").and_then(Value::as_i64).unwrap_or(0) == 0 {
            return None;
        }
        let info = body.get("items")?.as_array()?.first()?.get("volumeInfo")?;

        let title = info.get("title")?.as_str()?.to_string();
        let subtitle = info
            .get("subtitle")
            .and_then(Value::as_str)
            .map(str::to_string);
        let authors = string_list(info.get("authors"));
        let categories = string_list(info.get("categories"));
        let cover_url = info
            .get("imageLinks")?
            .get("thumbnail")?
            .as_str()?
            .to_string();

        Some(BookMetadata {
            title,
            subtitle,
            authors,
            categories,
            cover_url: Some(cover_url),
        })
    }
}

#[async_trait]
impl MetadataProvider for GoogleBooksProvider {
    fn name(&self) -> &'static str {
        "google-books"
    }

    async fn try_fetch(&self, isbn: &str) -> Option<BookMetadata> {
        let mut request = self
            .client
            .get(API_URL)
            .query(&[("q", format!("isbn:{}", isbn))]);
        if let Some(ref key) = self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Google Books request failed for {}: {}", isbn, e);
                return None;
            }
        };

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Google Books returned malformed JSON for {}: {}", isbn, e);
                return None;
            }
        };

        Self::parse(&body)
    }
}
