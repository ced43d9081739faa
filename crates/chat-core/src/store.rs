//! JSON helpers over [`StoragePort`].

use serde::{de::DeserializeOwned, Serialize};
use chat_types::Result;
use crate::ports::StoragePort;

pub async fn load_json<T: DeserializeOwned>(storage: &dyn StoragePort, key: &str) -> Result<Option<T>> {
    match storage.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub async fn save_json<T: Serialize + ?Sized>(storage: &dyn StoragePort, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw).await
}
