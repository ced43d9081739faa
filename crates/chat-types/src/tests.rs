#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::agent::*;
    use crate::event::*;
    use crate::webhook::*;
    use crate::config::*;
    use crate::keys::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "Hello");
        assert!(!msg.is_error());
        assert!(!msg.is_typing());
        assert!(!msg.timestamp.is_empty());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("a");
        let b = Message::user("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_message_bot_error() {
        let msg = Message::bot_error("boom");
        assert_eq!(msg.sender, Sender::Bot);
        assert!(msg.is_error());
        assert!(!msg.flags.is_typing);
    }

    #[test]
    fn test_message_typing_uses_reserved_id() {
        let msg = Message::typing("Typing...");
        assert_eq!(msg.id, TYPING_MESSAGE_ID);
        assert!(msg.is_typing());
        assert_eq!(msg.sender, Sender::Bot);
    }

    #[test]
    fn test_message_wire_shape() {
        let msg = Message::bot_error("oops");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], "bot");
        assert_eq!(value["isError"], true);
        assert!(value.get("isTyping").is_none());
        assert!(value.get("isSimulated").is_none());
        assert!(value.get("flags").is_none());
    }

    #[test]
    fn test_message_plain_has_no_flags() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert!(!json.contains("isError"));
        assert!(!json.contains("isTyping"));
    }

    #[test]
    fn test_message_accepts_numeric_legacy_id() {
        let json = r#"{"id":1718000000000,"sender":"user","text":"hi","timestamp":"2024-06-10T00:00:00.000Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "1718000000000");
        assert_eq!(msg.flags, MessageFlags::default());
    }

    #[test]
    fn test_message_reads_simulated_flag() {
        let json = r#"{"id":"a","sender":"bot","text":"x","timestamp":"t","isSimulated":true}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.flags.is_simulated);
        assert!(!msg.flags.is_error);
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), r#""bot""#);
    }

    // ─── Agent Tests ─────────────────────────────────────────

    #[test]
    fn test_agent_descriptor_camel_case() {
        let agent = AgentDescriptor::new("a", "A", "🤖", "https://example.com/hook");
        let json = serde_json::to_string(&agent).unwrap();
        assert!(json.contains(r#""webhook":"https://example.com/hook""#));
        assert!(json.contains(r#""placeholder""#));
    }

    #[test]
    fn test_agent_descriptor_legacy_shape() {
        // The first web client persisted descriptors without webhook metadata.
        let json = r#"{"id":"civel","name":"Agente Cível","icon":"⚖️","webhook":"u"}"#;
        let agent: AgentDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(agent.id, "civel");
        assert!(agent.description.is_empty());
        assert!(!agent.placeholder.is_empty());
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::RequestFinished {
            request_id: 3,
            outcome: RequestOutcome::Replied,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RequestFinished"));
        assert!(json.contains("Replied"));
    }

    // ─── Webhook Tests ───────────────────────────────────────

    #[test]
    fn test_webhook_request_body() {
        let req = WebhookRequest::new("sess-1", "hello");
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"sessionId":"sess-1","chatInput":"hello"}"#);
    }

    #[test]
    fn test_webhook_reply_success_range() {
        assert!(WebhookReply::new(200, "").is_success());
        assert!(WebhookReply::new(204, "").is_success());
        assert!(!WebhookReply::new(199, "").is_success());
        assert!(!WebhookReply::new(300, "").is_success());
        assert!(!WebhookReply::new(500, "").is_success());
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.session.soft_timeout_ms, 30_000);
        assert_eq!(config.session.hard_timeout_ms, 300_000);
        assert_eq!(config.session.clear_policy, ClearPolicy::KeepPending);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
        assert_eq!(config.agents.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_agent_ids() {
        let ids: Vec<String> = default_agents().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["contratos", "trabalhista", "civel"]);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ChatConfig =
            serde_json::from_str(r#"{"session":{"hard_timeout_ms":60000}}"#).unwrap();
        assert_eq!(config.session.soft_timeout_ms, 30_000);
        assert_eq!(config.session.hard_timeout_ms, 60_000);
        assert_eq!(config.agents.len(), 3);
    }

    #[test]
    fn test_session_config_rejects_inverted_timers() {
        let config = SessionConfig {
            soft_timeout_ms: 10_000,
            hard_timeout_ms: 5_000,
            clear_policy: ClearPolicy::KeepPending,
        };
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_session_config_rejects_zero_soft_timer() {
        let config = SessionConfig {
            soft_timeout_ms: 0,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_config_rejects_timer_overflow() {
        let config = SessionConfig {
            hard_timeout_ms: 3_000_000_000,
            ..SessionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));

        let config = SessionConfig {
            hard_timeout_ms: MAX_TIMEOUT_MS,
            ..SessionConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_catalog() {
        let config = ChatConfig {
            agents: Vec::new(),
            ..ChatConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_config_durations() {
        let config = SessionConfig::default();
        assert_eq!(config.soft_timeout().as_secs(), 30);
        assert_eq!(config.hard_timeout().as_secs(), 300);
    }

    // ─── Key Tests ───────────────────────────────────────────

    #[test]
    fn test_storage_keys() {
        assert_eq!(history_key("civel"), "chatHistory-civel");
        assert_eq!(session_id_key("civel"), "sessionId-civel");
        assert!(history_key("x").starts_with(HISTORY_PREFIX));
        assert!(session_id_key("x").starts_with(SESSION_ID_PREFIX));
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(ChatError::UnknownAgent("x".to_string()).to_string(), "Unknown agent: x");
        assert_eq!(ChatError::HttpStatus(502).to_string(), "HTTP error! Status: 502");
        assert_eq!(
            ChatError::RequestCancelled(CancelReason::Timeout).to_string(),
            "Request cancelled: timed out"
        );
        assert_eq!(ChatError::Validation("bad".to_string()).to_string(), "bad");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
