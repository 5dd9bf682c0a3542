//! WorldCat xISBN adapter.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{cover, BookMetadata, MetadataProvider};

const API_URL: &str = "http://xisbn.worldcat.org/webservices/xid/isbn";

// WorldCat packs every contributor into one "author" string, with roles
// and punctuation mixed in ("Jane Doe and John Smith ; illustrated ...").
static AUTHOR_CLEANUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z\s]|\s;").expect("invalid author cleanup regex"));

pub struct WorldCatProvider {
    client: reqwest::Client,
}

impl WorldCatProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Extract metadata from a `getMetadata` response. WorldCat reports
    /// success via `stat == "ok"` and carries no subject or cover data.
    fn parse(body: &Value) -> Option<BookMetadata> {
        if body.get("stat").and_then(Value::as_str) != Some("ok") {
            return None;
        }
        let info = body.get("list")?.as_array()?.first()?;

        let title = info.get("title")?.as_str()?.to_string();
        let authors = split_authors(info.get("author")?.as_str()?);
        if authors.is_empty() {
            return None;
        }

        Some(BookMetadata {
            title,
            subtitle: None,
            authors,
            categories: Vec::new(),
            cover_url: None,
        })
    }
}

/// Split a combined author string on " and " and strip each name of
/// non-letter characters.
fn split_authors(raw: &str) -> Vec<String> {
    raw.split(" and ")
        .map(|name| {
            AUTHOR_CLEANUP
                .replace_all(name.trim(), "")
                .trim()
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[async_trait]
impl MetadataProvider for WorldCatProvider {
    fn name(&self) -> &'static str {
        "worldcat"
    }

    async fn try_fetch(&self, isbn: &str) -> Option<BookMetadata> {
        let url = format!("{}/{}", API_URL, isbn);
        let response = match self
            .client
            .get(&url)
            .query(&[("method", "getMetadata"), ("fl", "*"), ("format", "json")])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("WorldCat request failed for {}: {}", isbn, e);
                return None;
            }
        };

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("WorldCat returned malformed JSON for {}: {}", isbn, e);
                return None;
            }
        };

        let mut meta = Self::parse(&body)?;
        meta.cover_url = cover::amazon_cover(&self.client, isbn).await;
        Some(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_ok_record() {
        let body = json!({
            "stat": "ok",
            "list": [{
                "isbn": ["9781593272814"],
                "title": "Land of Lisp",
                "author": "Conrad Barski."
            }]
        });

        let meta = WorldCatProvider::parse(&body).unwrap();
        assert_eq!(meta.title, "Land of Lisp");
        assert_eq!(meta.authors, vec!["Conrad Barski"]);
        assert!(meta.categories.is_empty());
    }

    #[test]
    fn parse_splits_combined_authors() {
        assert_eq!(
            split_authors("Jane Doe and John Smith ; illustrated"),
            vec!["Jane Doe", "John Smith illustrated"]
        );
        assert_eq!(split_authors("  A. B. Clarke."), vec!["A B Clarke"]);
    }

    #[test]
    fn parse_rejects_unknown_isbn() {
        let body = json!({ "stat": "unknownId" });
        assert!(WorldCatProvider::parse(&body).is_none());
    }

    #[test]
    fn parse_requires_author() {
        let body = json!({
            "stat": "ok",
            "list": [{ "title": "Land of Lisp" }]
        });
        assert!(WorldCatProvider::parse(&body).is_none());
    }
}
