//! egui screens for the agent chat client.
//!
//! Panels render from [`state::UiState`] and hand user intent back to the
//! app as return values; they never touch storage or the network.

pub mod route;
pub mod state;
pub mod markdown;
pub mod theme;
pub mod panels;
