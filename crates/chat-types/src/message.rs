use serde::{Deserialize, Deserializer, Serialize};

/// Reserved id of the transient typing-indicator entry.
pub const TYPING_MESSAGE_ID: &str = "typing-indicator";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Rendering hints attached to a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageFlags {
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_typing: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_simulated: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single entry of a conversation log.
///
/// `text` is markdown for bot messages and plain text for user messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub sender: Sender,
    pub text: String,
    /// RFC 3339 instant
    pub timestamp: String,
    #[serde(flatten)]
    pub flags: MessageFlags,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>, flags: MessageFlags) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            flags,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, MessageFlags::default())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text, MessageFlags::default())
    }

    pub fn bot_error(text: impl Into<String>) -> Self {
        Self::new(
            Sender::Bot,
            text,
            MessageFlags {
                is_error: true,
                ..MessageFlags::default()
            },
        )
    }

    /// The typing placeholder. Always carries [`TYPING_MESSAGE_ID`].
    pub fn typing(text: impl Into<String>) -> Self {
        let mut msg = Self::new(
            Sender::Bot,
            text,
            MessageFlags {
                is_typing: true,
                ..MessageFlags::default()
            },
        );
        msg.id = TYPING_MESSAGE_ID.to_string();
        msg
    }

    pub fn is_typing(&self) -> bool {
        self.flags.is_typing || self.id == TYPING_MESSAGE_ID
    }

    pub fn is_error(&self) -> bool {
        self.flags.is_error
    }
}

// Histories written by the first web client used `Date.now()` numbers as ids.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
