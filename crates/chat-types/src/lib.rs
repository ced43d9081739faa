pub mod message;
pub mod agent;
pub mod identity;
pub mod event;
pub mod webhook;
pub mod config;
pub mod error;
pub mod keys;

#[cfg(test)]
mod tests;

pub use error::{CancelReason, ChatError};
pub type Result<T> = std::result::Result<T, ChatError>;
