//! Core of the agent chat client.
//!
//! Owns the conversation request lifecycle and the identity/catalog
//! collaborators. Talks to the outside world only through [`ports`].

pub mod ports;
pub mod event_bus;
pub mod store;
pub mod cancel;
pub mod reply;
pub mod catalog;
pub mod identity;
pub mod context;
pub mod session;
