//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use chat_types::{
    Result,
    webhook::{WebhookReply, WebhookRequest},
};

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Webhook Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait WebhookPort {
    /// POST a chat turn as JSON and return the raw reply.
    ///
    /// Only transport failures are errors here; status codes and body
    /// parsing are left to the caller. Dropping the future abandons the
    /// request.
    async fn post(&self, url: &str, request: &WebhookRequest) -> Result<WebhookReply>;
}

// ─── Timer Port ──────────────────────────────────────────────

pub trait TimerPort {
    /// Resolve once `duration` has elapsed. Dropping the future clears the timer.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
