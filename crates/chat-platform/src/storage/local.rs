//! `window.localStorage` backend.
//!
//! Synchronous under the hood; the async trait methods complete on first poll.
//! Quota errors surface as `ChatError::Storage`.

use async_trait::async_trait;
use wasm_bindgen::JsValue;

use chat_core::ports::StoragePort;
use chat_types::{ChatError, Result};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

fn storage_err(context: &str, e: JsValue) -> ChatError {
    ChatError::Storage(format!("{}: {:?}", context, e))
}

impl LocalStorage {
    /// Grab `localStorage` from the current window.
    ///
    /// Fails outside a browser window or when storage is disabled
    /// (private mode in some browsers, sandboxed iframes).
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| storage_err("localStorage access denied", e))?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| storage_err("get_item", e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| storage_err("set_item", e))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| storage_err("remove_item", e))
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let len = self.storage.length().map_err(|e| storage_err("length", e))?;
        let mut keys = Vec::new();
        for index in 0..len {
            if let Some(key) = self.storage.key(index).map_err(|e| storage_err("key", e))? {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
