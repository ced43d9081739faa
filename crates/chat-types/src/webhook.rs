use serde::{Deserialize, Serialize};

/// Body POSTed to an agent webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub session_id: String,
    pub chat_input: String,
}

impl WebhookRequest {
    pub fn new(session_id: impl Into<String>, chat_input: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            chat_input: chat_input.into(),
        }
    }
}

/// Raw HTTP reply; interpretation happens in the session manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: u16,
    pub body: String,
}

impl WebhookReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
