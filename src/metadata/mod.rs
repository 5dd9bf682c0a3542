//! Book metadata lookup across external providers.
//!
//! Each provider wraps one external book-data service behind a common
//! [`MetadataProvider`] capability. Provider responses are structurally
//! inconsistent, so every adapter extracts only its own fields and the
//! [`ProviderChain`] simply takes the first non-empty result in priority
//! order; results are never merged across providers.

pub mod cover;
pub mod google_books;
pub mod open_library;
pub mod worldcat;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub use google_books::GoogleBooksProvider;
pub use open_library::OpenLibraryProvider;
pub use worldcat::WorldCatProvider;

/// Normalized book metadata, produced by exactly one provider per lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookMetadata {
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub cover_url: Option<String>,
}

/// One external book-data service.
///
/// `try_fetch` performs a network lookup for an already-validated ISBN-13
/// and returns `None` both for "no result" and for request/parse failures;
/// upstream unreliability is absorbed here and never propagated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn try_fetch(&self, isbn: &str) -> Option<BookMetadata>;
}

/// An explicit, ordered list of providers queried until one answers.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn MetadataProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn MetadataProvider>>) -> Self {
        Self { providers }
    }

    /// The default chain in priority order: Google Books, Open Library,
    /// WorldCat. All providers share one HTTP client.
    pub fn with_defaults(client: reqwest::Client, google_api_key: Option<String>) -> Self {
        Self::new(vec![
            Arc::new(GoogleBooksProvider::new(client.clone(), google_api_key)),
            Arc::new(OpenLibraryProvider::new(client.clone())),
            Arc::new(WorldCatProvider::new(client)),
        ])
    }

    /// Query each provider in order, returning the first non-empty result.
    pub async fn resolve(&self, isbn: &str) -> Option<BookMetadata> {
        for provider in &self.providers {
            tracing::debug!("Querying metadata provider {} for {}", provider.name(), isbn);
            match provider.try_fetch(isbn).await {
                Some(meta) => {
                    tracing::info!("Provider {} resolved ISBN {}", provider.name(), isbn);
                    return Some(meta);
                }
                None => {
                    tracing::debug!("Provider {} had no result for {}", provider.name(), isbn);
                }
            }
        }
        None
    }
}

/// Extract a JSON array of strings, tolerating absent or malformed input.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    fn sample_metadata() -> BookMetadata {
        BookMetadata {
            title: "Land of Lisp".to_string(),
            subtitle: None,
            authors: vec!["Conrad Barski".to_string()],
            categories: vec!["Programming".to_string()],
            cover_url: None,
        }
    }

    #[tokio::test]
    async fn resolve_returns_first_provider_result() {
        let mut first = MockMetadataProvider::new();
        first.expect_name().return_const("first");
        first
            .expect_try_fetch()
            .times(1)
            .returning(|_| Some(sample_metadata()));

        let mut second = MockMetadataProvider::new();
        second.expect_name().return_const("second");
        second.expect_try_fetch().never();

        let chain = ProviderChain::new(vec![Arc::new(first), Arc::new(second)]);
        let meta = chain.resolve("9781593272814").await;
        assert_eq!(meta, Some(sample_metadata()));
    }

    #[tokio::test]
    async fn resolve_falls_through_to_second_provider() {
        let mut seq = Sequence::new();

        let mut first = MockMetadataProvider::new();
        first.expect_name().return_const("first");
        first
            .expect_try_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| None);

        let mut second = MockMetadataProvider::new();
        second.expect_name().return_const("second");
        second
            .expect_try_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Some(sample_metadata()));

        let chain = ProviderChain::new(vec![Arc::new(first), Arc::new(second)]);
        let meta = chain.resolve("9781593272814").await;
        assert_eq!(meta, Some(sample_metadata()));
    }

    #[tokio::test]
    async fn resolve_returns_none_when_all_providers_decline() {
        let mut first = MockMetadataProvider::new();
        first.expect_name().return_const("first");
        first.expect_try_fetch().times(1).returning(|_| None);

        let mut second = MockMetadataProvider::new();
        second.expect_name().return_const("second");
        second.expect_try_fetch().times(1).returning(|_| None);

        let chain = ProviderChain::new(vec![Arc::new(first), Arc::new(second)]);
        assert_eq!(chain.resolve("9781593272814").await, None);
    }

    #[test]
    fn string_list_tolerates_malformed_input() {
        use serde_json::json;
        let arr = json!(["a", 1, "b"]);
        assert_eq!(string_list(Some(&arr)), vec!["a".to_string(), "b".to_string()]);
        let not_an_array = json!("x");
        assert!(string_list(Some(&not_an_array)).is_empty());
        assert!(string_list(None).is_empty());
    }
}
