//! Browser implementations of the chat-core ports.
//!
//! Everything here talks to the browser through web-sys and gloo; nothing
//! in chat-core depends on this crate.

pub mod storage;
pub mod webhook;
pub mod timer;

pub use storage::{open_storage, LocalStorage, MemoryStorage};
pub use timer::BrowserTimer;
pub use webhook::HttpWebhook;
