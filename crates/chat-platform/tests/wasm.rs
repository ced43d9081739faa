//! WASM-target tests for chat-platform (Node.js runtime).
//!
//! Covers MemoryStorage and BrowserTimer under wasm32-unknown-unknown via
//! `wasm-pack test --node`. localStorage and fetch need a browser window
//! and are exercised by the app.

use wasm_bindgen_test::*;

use chat_core::ports::{StoragePort, TimerPort};
use chat_platform::storage::{open_storage, MemoryStorage};
use chat_platform::timer::BrowserTimer;
use chat_types::config::{StorageBackendType, StorageConfig};
use futures::FutureExt;
use std::time::Duration;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    assert!(storage.get("nonexistent").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_set_and_get() {
    let storage = MemoryStorage::new();
    storage.set("sessionId-civel", "abc").await.unwrap();
    assert_eq!(
        storage.get("sessionId-civel").await.unwrap(),
        Some("abc".to_string())
    );
}

#[wasm_bindgen_test]
async fn memory_storage_list_keys() {
    let storage = MemoryStorage::new();
    storage.set("chatHistory-a", "[]").await.unwrap();
    storage.set("chatHistory-b", "[]").await.unwrap();
    storage.set("user", "{}").await.unwrap();

    let mut keys = storage.list_keys("chatHistory-").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["chatHistory-a", "chatHistory-b"]);
}

#[wasm_bindgen_test]
async fn open_storage_memory() {
    let config = StorageConfig {
        backend: StorageBackendType::Memory,
    };
    let storage = open_storage(&config).await.unwrap();
    assert_eq!(storage.backend_name(), "memory");
}

// ─── BrowserTimer Tests ──────────────────────────────────

#[wasm_bindgen_test]
async fn timer_sleep_resolves() {
    BrowserTimer::new().sleep(Duration::from_millis(5)).await;
}

#[wasm_bindgen_test]
async fn timer_shorter_sleep_wins() {
    let timer = BrowserTimer::new();
    let short = timer.sleep(Duration::from_millis(5)).fuse();
    let long = timer.sleep(Duration::from_secs(60)).fuse();
    futures::pin_mut!(short, long);
    let winner = futures::select! {
        () = short => "short",
        () = long => "long",
    };
    assert_eq!(winner, "short");
}
