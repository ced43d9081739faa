//! Reply extraction from webhook bodies.
//!
//! Webhook backends answer in several shapes. Extractors are tried in order
//! and the first match wins; nothing matching degrades to a fixed text.

use serde_json::Value;
use chat_types::{ChatError, Result, webhook::WebhookReply};

pub const FALLBACK_REPLY: &str = "Sorry, I could not process the server response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyExtractor {
    /// A top-level field of an object body
    Field(&'static str),
    /// The whole body, when it is not an object
    BareValue,
}

pub const REPLY_EXTRACTORS: &[ReplyExtractor] = &[
    ReplyExtractor::Field("response"),
    ReplyExtractor::Field("output"),
    ReplyExtractor::Field("reply"),
    ReplyExtractor::Field("message"),
    ReplyExtractor::Field("text"),
    ReplyExtractor::Field("content"),
    ReplyExtractor::BareValue,
];

impl ReplyExtractor {
    pub fn extract(&self, body: &Value) -> Option<String> {
        match self {
            ReplyExtractor::Field(name) => body.as_object()?.get(*name).and_then(scalar_text),
            ReplyExtractor::BareValue => match body {
                Value::Object(_) | Value::Null => None,
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedReply {
    Text(String),
    Unrecognized,
}

impl ExtractedReply {
    pub fn into_text(self) -> String {
        match self {
            ExtractedReply::Text(text) => text,
            ExtractedReply::Unrecognized => FALLBACK_REPLY.to_string(),
        }
    }
}

pub fn extract_reply(body: &Value) -> ExtractedReply {
    REPLY_EXTRACTORS
        .iter()
        .find_map(|extractor| extractor.extract(body))
        .map(ExtractedReply::Text)
        .unwrap_or(ExtractedReply::Unrecognized)
}

/// Turn a raw webhook reply into the bot text to display.
pub fn parse_reply(reply: WebhookReply) -> Result<String> {
    if !reply.is_success() {
        return Err(ChatError::HttpStatus(reply.status));
    }
    let body: Value = serde_json::from_str(&reply.body)
        .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
    let extracted = extract_reply(&body);
    if extracted == ExtractedReply::Unrecognized {
        log::warn!("Webhook reply has no known reply field: {}", reply.body);
    }
    Ok(extracted.into_text())
}
