//! WASM-target tests for chat-ui.
//!
//! Runs route, UiState and markdown tests under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_core::catalog::AgentCatalog;
use chat_types::event::{ChatEvent, RequestOutcome};
use chat_types::message::Message;
use chat_ui::markdown::plain_text;
use chat_ui::route::Route;
use chat_ui::state::UiState;

#[wasm_bindgen_test]
fn route_parses_hash() {
    assert_eq!(
        Route::from_path("#/chat/trabalhista"),
        Route::Chat { agent_id: "trabalhista".to_string() }
    );
    assert_eq!(Route::from_path("#/nowhere"), Route::Login);
}

#[wasm_bindgen_test]
fn route_guard_requires_login() {
    let catalog = AgentCatalog::default();
    assert_eq!(Route::AgentSelection.guard(false, &catalog), Route::Login);
    assert_eq!(Route::AgentSelection.guard(true, &catalog), Route::AgentSelection);
}

#[wasm_bindgen_test]
fn ui_state_projection() {
    let mut state = UiState::new();
    state.process_events(vec![
        ChatEvent::HistoryLoaded {
            agent_id: "civel".to_string(),
            messages: vec![Message::user("earlier")],
        },
        ChatEvent::RequestStarted { request_id: 1 },
    ]);
    assert!(state.pending);
    state.process_events(vec![ChatEvent::RequestFinished {
        request_id: 1,
        outcome: RequestOutcome::Cancelled,
    }]);
    assert!(!state.pending);
    assert_eq!(state.messages.len(), 1);
}

#[wasm_bindgen_test]
fn markdown_plain_text() {
    assert_eq!(plain_text("Hello **world**"), "Hello world");
}
