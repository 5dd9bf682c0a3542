//! Metadata lookup service: ISBN canonicalization, cached resolution
//! across the provider chain.

use crate::{
    error::{AppError, AppResult},
    isbn,
    metadata::{BookMetadata, ProviderChain},
    services::cache::CacheService,
};

#[derive(Clone)]
pub struct MetadataService {
    chain: ProviderChain,
    cache: CacheService,
    cache_ttl_seconds: u64,
}

impl MetadataService {
    pub fn new(chain: ProviderChain, cache: CacheService, cache_ttl_seconds: u64) -> Self {
        Self {
            chain,
            cache,
            cache_ttl_seconds,
        }
    }

    /// Canonicalize any user-supplied ISBN into its ISBN-13 form.
    pub fn canonical_isbn(raw: &str) -> AppResult<String> {
        let cleaned = isbn::clean(raw);
        if !isbn::is_valid(&cleaned) {
            return Err(AppError::InvalidIsbn(raw.to_string()));
        }
        isbn::to_isbn13(&cleaned).ok_or_else(|| AppError::InvalidIsbn(raw.to_string()))
    }

    /// Resolve metadata for an ISBN, consulting the cache before the
    /// provider chain. A chain hit is cached for subsequent lookups;
    /// cache write failures only degrade to an uncached lookup.
    pub async fn lookup(&self, raw_isbn: &str) -> AppResult<BookMetadata> {
        let isbn = Self::canonical_isbn(raw_isbn)?;
        let key = format!("metadata:isbn:{}", isbn);

        if let Some(cached) = cache_hit(&key, self.cache.get_json::<BookMetadata>(&key).await) {
            tracing::debug!("Metadata cache hit for {}", isbn);
            return Ok(cached);
        }

        let meta = self
            .chain
            .resolve(&isbn)
            .await
            .ok_or_else(|| AppError::MetadataNotFound(isbn.clone()))?;

        if let Err(e) = self.cache.set_json(&key, &meta, self.cache_ttl_seconds).await {
            tracing::warn!("Failed to cache metadata for {}: {}", isbn, e);
        }

        Ok(meta)
    }
}

/// A cache read failure degrades to a miss so a flapping redis never
/// blocks lookups; only the failure is logged.
fn cache_hit<T>(key: &str, result: AppResult<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Cache read failed for {}: {}", key, e);
            None
        }
    }
}
