//! UI-level state that drives rendering.
//! The message list is a projection of the open session's log, kept in
//! step by draining the EventBus every frame.

use chat_types::{
    event::{ChatEvent, RequestOutcome},
    message::Message,
};
use crate::route::Route;

/// Seconds the "Text copied" indicator stays visible.
pub const COPY_FEEDBACK_SECS: f64 = 2.0;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_WAITING: &str = "Waiting for the agent...";
pub const STATUS_LONG: &str = "Still working...";

/// State visible to UI panels
pub struct UiState {
    pub route: Route,
    /// Agent whose log `messages` mirrors
    pub agent_id: Option<String>,
    pub messages: Vec<Message>,
    /// A request is in flight for the open conversation
    pub pending: bool,
    /// The in-flight request passed the soft timeout
    pub long_request: bool,
    /// Login form content
    pub login_input: String,
    pub login_error: Option<String>,
    /// Chat input content
    pub input_text: String,
    /// Message id whose text was just copied, and when the indicator expires
    pub copied: Option<(String, f64)>,
    pub status_text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            route: Route::Login,
            agent_id: None,
            messages: Vec::new(),
            pending: false,
            long_request: false,
            login_input: String::new(),
            login_error: None,
            input_text: String::new(),
            copied: None,
            status_text: STATUS_READY.to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::HistoryLoaded { agent_id, messages } => {
                    self.agent_id = Some(agent_id);
                    self.messages = messages;
                    self.set_idle();
                }
                ChatEvent::MessageAppended { message } => {
                    self.messages.push(message);
                }
                ChatEvent::MessageUpdated { message } => {
                    if let Some(existing) = self.messages.iter_mut().find(|m| m.id == message.id) {
                        *existing = message;
                    }
                }
                ChatEvent::MessageRemoved { id } => {
                    self.messages.retain(|m| m.id != id);
                }
                ChatEvent::HistoryCleared { .. } => {
                    self.messages.clear();
                    self.copied = None;
                }
                ChatEvent::RequestStarted { .. } => {
                    self.pending = true;
                    self.long_request = false;
                    self.status_text = STATUS_WAITING.to_string();
                }
                ChatEvent::LongRequest { .. } => {
                    self.long_request = true;
                    self.status_text = STATUS_LONG.to_string();
                }
                ChatEvent::RequestFinished { outcome, .. } => {
                    self.set_idle();
                    if outcome == RequestOutcome::Failed {
                        self.status_text = "Last request failed".to_string();
                    }
                }
            }
        }
    }

    fn set_idle(&mut self) {
        self.pending = false;
        self.long_request = false;
        self.status_text = STATUS_READY.to_string();
    }

    /// Forget the open conversation (leaving the chat screen or logging out).
    pub fn close_conversation(&mut self) {
        self.agent_id = None;
        self.messages.clear();
        self.input_text.clear();
        self.copied = None;
        self.set_idle();
    }

    /// Input may be sent: non-blank and nothing in flight.
    pub fn can_send(&self) -> bool {
        !self.input_text.trim().is_empty() && !self.pending
    }

    /// Take the input for sending, leaving the field empty.
    pub fn take_input(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        Some(std::mem::take(&mut self.input_text))
    }

    pub fn mark_copied(&mut self, message_id: &str, now: f64) {
        self.copied = Some((message_id.to_string(), now + COPY_FEEDBACK_SECS));
    }

    pub fn is_copied(&self, message_id: &str, now: f64) -> bool {
        matches!(&self.copied, Some((id, until)) if id == message_id && now < *until)
    }

    /// Drop an expired copy indicator. Returns true while one is still showing.
    pub fn expire_copied(&mut self, now: f64) -> bool {
        match &self.copied {
            Some((_, until)) if now >= *until => {
                self.copied = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
