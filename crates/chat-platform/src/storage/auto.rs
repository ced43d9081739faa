//! Pick the storage backend named by configuration.
//!
//! `Auto` prefers `localStorage` and falls back to memory.

use std::rc::Rc;
use chat_core::ports::StoragePort;
use chat_types::{
    Result,
    config::{StorageBackendType, StorageConfig},
};
use super::{LocalStorage, MemoryStorage};

/// Open the configured backend as a trait object.
///
/// Only an explicit `LocalStorage` request can fail; `Auto` always yields a store.
pub async fn open_storage(config: &StorageConfig) -> Result<Rc<dyn StoragePort>> {
    match config.backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Ok(Rc::new(MemoryStorage::new()))
        }
        StorageBackendType::LocalStorage => {
            let local = LocalStorage::open()?;
            log::info!("Storage backend: localStorage");
            Ok(Rc::new(local))
        }
        StorageBackendType::Auto => match LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                Ok(Rc::new(local))
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
                Ok(Rc::new(MemoryStorage::new()))
            }
        },
    }
}
