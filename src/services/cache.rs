//! Redis-backed cache for provider lookups and other temporary data

use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CacheService {
    client: Client,
}

impl CacheService {
    /// Create a new cache service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch and deserialize a cached JSON value. Cache misses and stale
    /// payloads both come back as `None`; a payload that no longer
    /// deserializes is treated as a miss rather than an error.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read key from Redis: {}", e)))?;

        match raw {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::warn!("Discarding undeserializable cache entry {}: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Serialize and store a JSON value with an expiration (in seconds)
    pub async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        expiration_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let payload = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Failed to serialize cache entry: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, payload, expiration_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store key in Redis: {}", e)))?;

        Ok(())
    }

    /// Drop a key, ignoring whether it existed
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let _: () = conn
            .del(key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete key from Redis: {}", e)))?;

        Ok(())
    }
}
