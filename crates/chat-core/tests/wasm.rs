//! WASM-target tests for chat-core.
//!
//! Runs EventBus, reply extraction and SessionManager tests under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_core::catalog::AgentCatalog;
use chat_core::context::ChatContext;
use chat_core::event_bus::EventBus;
use chat_core::identity::IdentityStore;
use chat_core::ports::*;
use chat_core::reply::{extract_reply, FALLBACK_REPLY};
use chat_core::session::SessionManager;
use chat_types::config::SessionConfig;
use chat_types::event::{ChatEvent, RequestOutcome};
use chat_types::webhook::{WebhookReply, WebhookRequest};
use chat_types::{keys, ChatError, Result};

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

// ─── Mocks ───────────────────────────────────────────────

#[derive(Default)]
struct MockStorage {
    data: RefCell<HashMap<String, String>>,
}

#[async_trait(?Send)]
impl StoragePort for MockStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
    async fn delete(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self.data.borrow().keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }
    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Answers every call immediately with the same reply.
struct CannedWebhook {
    reply: Result<WebhookReply>,
    seen: RefCell<Vec<WebhookRequest>>,
}

#[async_trait(?Send)]
impl WebhookPort for CannedWebhook {
    async fn post(&self, _url: &str, request: &WebhookRequest) -> Result<WebhookReply> {
        self.seen.borrow_mut().push(request.clone());
        self.reply.clone()
    }
}

struct NeverTimer;

impl TimerPort for NeverTimer {
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        futures::future::pending().boxed_local()
    }
}

fn context(reply: Result<WebhookReply>) -> (ChatContext, Rc<MockStorage>, Rc<CannedWebhook>) {
    let storage = Rc::new(MockStorage::default());
    let webhook = Rc::new(CannedWebhook {
        reply,
        seen: RefCell::new(Vec::new()),
    });
    let ctx = ChatContext {
        storage: storage.clone(),
        webhook: webhook.clone(),
        timer: Rc::new(NeverTimer),
        catalog: Rc::new(AgentCatalog::default()),
        identity: IdentityStore::new(storage.clone()),
        session: SessionConfig::default(),
        event_bus: EventBus::new(),
    };
    (ctx, storage, webhook)
}

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_new_is_empty() {
    let bus = EventBus::new();
    assert!(!bus.has_pending());
    assert!(bus.drain().is_empty());
}

#[wasm_bindgen_test]
fn event_bus_preserves_order() {
    let bus = EventBus::new();
    for i in 0..10 {
        bus.emit(ChatEvent::RequestStarted { request_id: i });
    }
    let ids: Vec<u64> = bus
        .drain()
        .into_iter()
        .map(|e| match e {
            ChatEvent::RequestStarted { request_id } => request_id,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(ids, (0..10).collect::<Vec<_>>());
}

// ─── Reply Extraction ────────────────────────────────────

#[wasm_bindgen_test]
fn reply_extraction_order() {
    let body = serde_json::json!({"message": "m", "output": "o"});
    assert_eq!(extract_reply(&body).into_text(), "o");
    assert_eq!(extract_reply(&serde_json::json!([])).into_text(), "[]");
    assert_eq!(extract_reply(&serde_json::json!({"x": 1})).into_text(), FALLBACK_REPLY);
}

// ─── SessionManager ──────────────────────────────────────

#[wasm_bindgen_test]
async fn session_send_and_reply() {
    let (ctx, storage, webhook) = context(Ok(WebhookReply::ok(r#"{"output":"hi there"}"#)));
    let session = SessionManager::initialize(&ctx, "contratos").await.unwrap();

    let outcome = session.send("hello").await;
    assert_eq!(outcome, Some(RequestOutcome::Replied));

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text, "hi there");
    assert_eq!(webhook.seen.borrow()[0].session_id, session.session_id());

    let stored = storage.data.borrow().get(&keys::history_key("contratos")).cloned();
    assert!(stored.unwrap().contains("hi there"));
}

#[wasm_bindgen_test]
async fn session_transport_failure_is_logged() {
    let (ctx, _storage, _webhook) =
        context(Err(ChatError::Transport("offline".to_string())));
    let session = SessionManager::initialize(&ctx, "civel").await.unwrap();

    assert_eq!(session.send("hello").await, Some(RequestOutcome::Failed));
    let last = session.messages().pop().unwrap();
    assert!(last.is_error());
    assert!(!session.is_pending());
}

#[wasm_bindgen_test]
async fn session_unknown_agent() {
    let (ctx, _storage, _webhook) = context(Ok(WebhookReply::ok("{}")));
    let result = SessionManager::initialize(&ctx, "ghost").await;
    assert!(matches!(result, Err(ChatError::UnknownAgent(_))));
}

#[wasm_bindgen_test]
async fn session_clear_starts_new_session() {
    let (ctx, storage, _webhook) = context(Ok(WebhookReply::ok(r#""ok""#)));
    let session = SessionManager::initialize(&ctx, "trabalhista").await.unwrap();
    session.send("hello").await;
    let old = session.session_id();

    session.clear().await.unwrap();
    assert!(session.messages().is_empty());
    assert_ne!(session.session_id(), old);
    assert!(!storage.data.borrow().contains_key(&keys::history_key("trabalhista")));
}
