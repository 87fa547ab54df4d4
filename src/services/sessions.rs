//! Session service: per-session visit counters backed by Redis

use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionService {
    client: Client,
    ttl_seconds: u64,
}

impl SessionService {
    /// Create a new session service and verify the Redis connection
    pub async fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    /// Generate a fresh opaque session identifier
    pub fn new_session_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Increment and return the visit counter for a session. The counter
    /// expires after the configured TTL of inactivity.
    pub async fn increment_visits(&self, session_id: &str) -> AppResult<i64> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("session:{}:num_visits", session_id);
        let visits: i64 = conn
            .incr(&key, 1)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to increment visit count: {}", e)))?;

        conn.expire::<_, ()>(&key, self.ttl_seconds as i64)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to set session expiry: {}", e)))?;

        Ok(visits)
    }
}
