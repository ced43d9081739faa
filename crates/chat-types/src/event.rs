use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Events emitted by a conversation session.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// Persisted log restored for an agent
    HistoryLoaded { agent_id: String, messages: Vec<Message> },

    /// A message was appended to the log
    MessageAppended { message: Message },

    /// A message changed in place (only ever the typing placeholder)
    MessageUpdated { message: Message },

    /// A message was removed (only ever the typing placeholder)
    MessageRemoved { id: String },

    /// Log emptied and a fresh session id minted
    HistoryCleared { session_id: String },

    /// A webhook request went out
    RequestStarted { request_id: u64 },

    /// The soft timer fired while the request was still pending
    LongRequest { request_id: u64 },

    /// The request reached a terminal state
    RequestFinished { request_id: u64, outcome: RequestOutcome },
}

/// How a `send` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestOutcome {
    /// A bot reply was appended
    Replied,
    /// Transport, status or parse failure; an error message was appended
    Failed,
    /// Hard timeout, dispose or supersede; an error message was appended
    Cancelled,
    /// The request no longer owned the session; its completion was ignored
    Stale,
}
