use std::time::Duration;

use serde::{Deserialize, Serialize};
use crate::agent::AgentDescriptor;
use crate::error::ChatError;

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub agents: Vec<AgentDescriptor>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            storage: StorageConfig::default(),
            agents: default_agents(),
        }
    }
}

impl ChatConfig {
    pub fn validate(&self) -> crate::Result<()> {
        self.session.validate()?;
        if self.agents.is_empty() {
            return Err(ChatError::Config("agent catalog is empty".to_string()));
        }
        Ok(())
    }
}

/// Longest timer the browser can schedule (`setTimeout` takes an `i32`).
pub const MAX_TIMEOUT_MS: u64 = i32::MAX as u64;

/// Timers and policies of a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// After this long the typing placeholder switches to a "still working" text.
    pub soft_timeout_ms: u64,
    /// After this long the request is cancelled.
    pub hard_timeout_ms: u64,
    pub clear_policy: ClearPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            soft_timeout_ms: 30_000,
            hard_timeout_ms: 300_000,
            clear_policy: ClearPolicy::KeepPending,
        }
    }
}

impl SessionConfig {
    pub fn soft_timeout(&self) -> Duration {
        Duration::from_millis(self.soft_timeout_ms)
    }

    pub fn hard_timeout(&self) -> Duration {
        Duration::from_millis(self.hard_timeout_ms)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.soft_timeout_ms == 0 {
            return Err(ChatError::Config("soft timeout must be non-zero".to_string()));
        }
        if self.soft_timeout_ms >= self.hard_timeout_ms {
            return Err(ChatError::Config(format!(
                "soft timeout ({}ms) must be shorter than hard timeout ({}ms)",
                self.soft_timeout_ms, self.hard_timeout_ms
            )));
        }
        if self.hard_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ChatError::Config(format!(
                "hard timeout ({}ms) exceeds the {}ms timer limit",
                self.hard_timeout_ms, MAX_TIMEOUT_MS
            )));
        }
        Ok(())
    }
}

/// What `clear()` does with a request that is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearPolicy {
    /// Leave it running; a late reply lands in the emptied log.
    KeepPending,
    /// Cancel it silently; a late reply is dropped.
    CancelPending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// localStorage when available, memory otherwise
    Auto,
    Memory,
    LocalStorage,
}

const DEFAULT_WEBHOOK_URL: &str = "https://n8nwebh.apolus.ai/webhook/teste-delfus";

pub fn default_agents() -> Vec<AgentDescriptor> {
    vec![
        AgentDescriptor::new("contratos", "Contracts Agent", "📝", DEFAULT_WEBHOOK_URL)
            .with_description("Specialised in contractual matters and negotiations")
            .with_placeholder("Ask about a contract clause..."),
        AgentDescriptor::new("trabalhista", "Labour Law Agent", "👷", DEFAULT_WEBHOOK_URL)
            .with_description("Specialised in labour law and human resources")
            .with_placeholder("Ask about an employment question..."),
        AgentDescriptor::new("civel", "Civil Law Agent", "⚖️", DEFAULT_WEBHOOK_URL)
            .with_description("Specialised in civil law and related proceedings")
            .with_placeholder("Ask about a civil matter..."),
    ]
}
