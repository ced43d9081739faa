//! Start-up: storage, persisted configuration, identity.

use std::rc::Rc;

use chat_core::catalog::AgentCatalog;
use chat_core::context::ChatContext;
use chat_core::event_bus::EventBus;
use chat_core::identity::IdentityStore;
use chat_core::ports::StoragePort;
use chat_core::store::load_json;
use chat_platform::{open_storage, BrowserTimer, HttpWebhook, MemoryStorage};
use chat_types::config::{ChatConfig, StorageBackendType, StorageConfig};
use chat_types::keys::CONFIG_KEY;

/// Read `chat:config`, keeping defaults for anything missing or invalid.
pub async fn restore_config(storage: &dyn StoragePort) -> ChatConfig {
    match load_json::<ChatConfig>(storage, CONFIG_KEY).await {
        Ok(Some(config)) => match config.validate() {
            Ok(()) => {
                log::info!("Config restored from storage");
                config
            }
            Err(e) => {
                log::warn!("Ignoring stored config: {}", e);
                ChatConfig::default()
            }
        },
        Ok(None) => ChatConfig::default(),
        Err(e) => {
            log::warn!("Unreadable stored config: {}", e);
            ChatConfig::default()
        }
    }
}

async fn storage_or_memory(config: &StorageConfig) -> Rc<dyn StoragePort> {
    match open_storage(config).await {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("Storage unavailable ({}), using memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}

/// Build the application context. Never fails: every backend has a fallback.
pub async fn build_context(event_bus: EventBus) -> ChatContext {
    let mut storage = storage_or_memory(&StorageConfig::default()).await;
    let config = restore_config(storage.as_ref()).await;
    if config.storage.backend != StorageBackendType::Auto {
        storage = storage_or_memory(&config.storage).await;
    }

    let identity = IdentityStore::load(storage.clone()).await;
    log::info!(
        "Context ready: backend {}, {} agents, user {}",
        storage.backend_name(),
        config.agents.len(),
        identity
            .user()
            .map(|u| u.username)
            .unwrap_or_else(|| "<none>".to_string())
    );

    ChatContext {
        storage,
        webhook: Rc::new(HttpWebhook::new()),
        timer: Rc::new(BrowserTimer::new()),
        catalog: Rc::new(AgentCatalog::new(config.agents)),
        identity,
        session: config.session,
        event_bus,
    }
}
