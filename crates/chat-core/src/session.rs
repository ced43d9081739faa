//! Conversation session manager: one agent's message log plus the
//! lifecycle of its in-flight webhook request.
//!
//! A `send` goes through:
//! 1. settle any pending request as superseded
//! 2. append and persist the user message, show the typing placeholder
//! 3. race the webhook against the soft timer, the hard timer and the cancel token
//! 4. settle: swap the placeholder for the reply or an error message, persist
//!
//! Settling checks token identity first, so a completion that lost the race
//! to a newer request, a dispose or a clear never touches the log.
//!
//! All state lives behind `Rc<RefCell<_>>` and borrows are never held across
//! an `.await`; clones share one session and can be moved into
//! `spawn_local` tasks.

use std::cell::RefCell;
use std::rc::Rc;

use futures::{pin_mut, select, FutureExt};
use chat_types::{
    CancelReason, ChatError, Result,
    agent::AgentDescriptor,
    config::{ClearPolicy, SessionConfig},
    event::{ChatEvent, RequestOutcome},
    keys,
    message::{Message, TYPING_MESSAGE_ID},
    webhook::WebhookRequest,
};
use crate::cancel::CancelToken;
use crate::context::ChatContext;
use crate::event_bus::EventBus;
use crate::ports::{StoragePort, TimerPort, WebhookPort};
use crate::reply::parse_reply;
use crate::store::{load_json, save_json};

pub const TYPING_TEXT: &str = "Typing...";
pub const LONG_REQUEST_TEXT: &str =
    "Still working on your request. This can take a few minutes...";
pub const CANCELLED_TEXT: &str =
    "The agent is taking longer than expected to respond. Please try again in a moment.";

pub fn error_text(err: &ChatError) -> String {
    format!("Error processing the response: {}. Please try again.", err)
}

#[derive(Clone)]
pub struct SessionManager {
    agent: AgentDescriptor,
    storage: Rc<dyn StoragePort>,
    webhook: Rc<dyn WebhookPort>,
    timer: Rc<dyn TimerPort>,
    config: SessionConfig,
    event_bus: EventBus,
    state: Rc<RefCell<SessionState>>,
}

struct SessionState {
    messages: Vec<Message>,
    session_id: String,
    pending: Option<CancelToken>,
    long_request: bool,
    request_counter: u64,
}

impl SessionState {
    fn is_current(&self, token: &CancelToken) -> bool {
        self.pending.as_ref().is_some_and(|pending| pending.same(token))
    }

    fn remove_placeholder(&mut self) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_typing());
        self.messages.len() != before
    }

    /// The log as written to storage: placeholders never persist.
    fn persisted(&self) -> Vec<Message> {
        self.messages.iter().filter(|m| !m.is_typing()).cloned().collect()
    }
}

fn fresh_session_id(previous: Option<&str>) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if previous != Some(id.as_str()) {
            return id;
        }
    }
}

impl SessionManager {
    /// Open the conversation with `agent_id`, restoring its log and session id.
    ///
    /// Fails only with [`ChatError::UnknownAgent`]; storage trouble degrades
    /// to an empty log and a fresh session id.
    pub async fn initialize(ctx: &ChatContext, agent_id: &str) -> Result<Self> {
        let agent = ctx.catalog.resolve(agent_id)?.clone();
        let storage = ctx.storage.clone();

        let history_key = keys::history_key(&agent.id);
        let messages: Vec<Message> =
            match load_json::<Vec<Message>>(storage.as_ref(), &history_key).await {
                Ok(Some(messages)) => messages.into_iter().filter(|m| !m.is_typing()).collect(),
                Ok(None) => Vec::new(),
                Err(e) => {
                    log::warn!("Discarding unreadable history for {}: {}", agent.id, e);
                    Vec::new()
                }
            };

        let session_key = keys::session_id_key(&agent.id);
        let session_id = match storage.get(&session_key).await {
            Ok(Some(id)) if !id.is_empty() => id,
            stored => {
                if let Err(e) = stored {
                    log::warn!("Could not read session id for {}: {}", agent.id, e);
                }
                let id = fresh_session_id(None);
                if let Err(e) = storage.set(&session_key, &id).await {
                    log::warn!("Could not persist session id for {}: {}", agent.id, e);
                }
                id
            }
        };

        log::info!(
            "Session {} opened for agent {} with {} messages",
            session_id,
            agent.id,
            messages.len()
        );
        ctx.event_bus.emit(ChatEvent::HistoryLoaded {
            agent_id: agent.id.clone(),
            messages: messages.clone(),
        });

        Ok(Self {
            agent,
            storage,
            webhook: ctx.webhook.clone(),
            timer: ctx.timer.clone(),
            config: ctx.session.clone(),
            event_bus: ctx.event_bus.clone(),
            state: Rc::new(RefCell::new(SessionState {
                messages,
                session_id,
                pending: None,
                long_request: false,
                request_counter: 0,
            })),
        })
    }

    pub fn agent(&self) -> &AgentDescriptor {
        &self.agent
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    pub fn session_id(&self) -> String {
        self.state.borrow().session_id.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn is_long_request(&self) -> bool {
        self.state.borrow().long_request
    }

    /// Send one chat turn and wait for it to settle.
    ///
    /// Returns `None` when `text` is blank (nothing happens). Failures never
    /// escape: they end up as an `isError` bot message in the log.
    pub async fn send(&self, text: &str) -> Option<RequestOutcome> {
        if text.trim().is_empty() {
            return None;
        }

        // Supersede and install the new request without yielding in between.
        self.cancel_pending(CancelReason::Superseded);

        let user_message = Message::user(text);
        let placeholder = Message::typing(TYPING_TEXT);
        let (token, session_id, snapshot) = {
            let mut state = self.state.borrow_mut();
            state.remove_placeholder();
            state.messages.push(user_message.clone());
            let snapshot = state.persisted();

            state.request_counter += 1;
            let token = CancelToken::new(state.request_counter);
            state.pending = Some(token.clone());
            state.long_request = false;
            state.messages.push(placeholder.clone());
            (token, state.session_id.clone(), snapshot)
        };

        self.event_bus.emit_all([
            ChatEvent::MessageAppended { message: user_message },
            ChatEvent::RequestStarted { request_id: token.id() },
            ChatEvent::MessageAppended { message: placeholder },
        ]);

        self.persist(snapshot).await;
        if token.is_cancelled() {
            return Some(RequestOutcome::Stale);
        }

        log::debug!("Request {} to agent {}", token.id(), self.agent.id);
        let result = self
            .run_request(&token, WebhookRequest::new(session_id, text))
            .await;

        match self.settle(&token, result) {
            Some((outcome, snapshot)) => {
                self.persist(snapshot).await;
                Some(outcome)
            }
            None => {
                log::debug!("Ignoring stale completion of request {}", token.id());
                Some(RequestOutcome::Stale)
            }
        }
    }

    /// Empty the log and start a new session id.
    ///
    /// Whether a pending request survives is decided by [`ClearPolicy`].
    pub async fn clear(&self) -> Result<()> {
        let (session_id, dropped) = {
            let mut state = self.state.borrow_mut();
            let dropped = match self.config.clear_policy {
                ClearPolicy::CancelPending => state.pending.take(),
                ClearPolicy::KeepPending => None,
            };
            if let Some(token) = &dropped {
                token.cancel(CancelReason::Cleared);
                state.long_request = false;
            }
            state.messages.clear();
            let session_id = fresh_session_id(Some(&state.session_id));
            state.session_id = session_id.clone();
            (session_id, dropped)
        };

        if let Some(token) = dropped {
            self.event_bus.emit(ChatEvent::RequestFinished {
                request_id: token.id(),
                outcome: RequestOutcome::Stale,
            });
        }
        self.event_bus.emit(ChatEvent::HistoryCleared {
            session_id: session_id.clone(),
        });

        self.storage.delete(&keys::history_key(&self.agent.id)).await?;
        self.storage
            .set(&keys::session_id_key(&self.agent.id), &session_id)
            .await?;
        log::info!("Cleared conversation with {}; new session {}", self.agent.id, session_id);
        Ok(())
    }

    /// Tear-down hook for the conversation view: cancel whatever is in flight.
    pub async fn dispose(&self) {
        if let Some(snapshot) = self.cancel_pending(CancelReason::Disposed) {
            self.persist(snapshot).await;
        }
    }

    async fn run_request(&self, token: &CancelToken, request: WebhookRequest) -> Result<String> {
        let webhook = self.webhook.clone();
        let url = self.agent.webhook.clone();
        let call = async move { webhook.post(&url, &request).await }.fuse();
        let soft = self.timer.sleep(self.config.soft_timeout()).fuse();
        let hard = self.timer.sleep(self.config.hard_timeout()).fuse();
        let cancelled = token.cancelled().fuse();
        pin_mut!(call, soft, hard, cancelled);

        // Leaving this loop drops both timers and the call.
        loop {
            select! {
                reply = call => return reply.and_then(parse_reply),
                () = soft => self.promote_long_request(token),
                () = hard => {
                    token.cancel(CancelReason::Timeout);
                    return Err(ChatError::RequestCancelled(CancelReason::Timeout));
                }
                reason = cancelled => return Err(ChatError::RequestCancelled(reason)),
            }
        }
    }

    fn promote_long_request(&self, token: &CancelToken) {
        let updated = {
            let mut state = self.state.borrow_mut();
            if !state.is_current(token) {
                return;
            }
            state.long_request = true;
            state.messages.iter_mut().find(|m| m.is_typing()).map(|m| {
                m.text = LONG_REQUEST_TEXT.to_string();
                m.clone()
            })
        };

        log::debug!("Request {} is taking long", token.id());
        self.event_bus.emit(ChatEvent::LongRequest { request_id: token.id() });
        if let Some(message) = updated {
            self.event_bus.emit(ChatEvent::MessageUpdated { message });
        }
    }

    /// Cancel the pending request and settle it in place.
    /// Returns the log to persist when there was something to cancel.
    fn cancel_pending(&self, reason: CancelReason) -> Option<Vec<Message>> {
        let token = self.state.borrow().pending.clone()?;
        token.cancel(reason);
        self.settle(&token, Err(ChatError::RequestCancelled(reason)))
            .map(|(_, snapshot)| snapshot)
    }

    /// Terminal transition for `token`. `None` when the token is stale.
    fn settle(
        &self,
        token: &CancelToken,
        result: Result<String>,
    ) -> Option<(RequestOutcome, Vec<Message>)> {
        let (message, outcome, removed, snapshot) = {
            let mut state = self.state.borrow_mut();
            if !state.is_current(token) {
                return None;
            }
            state.pending = None;
            state.long_request = false;
            let removed = state.remove_placeholder();

            let (message, outcome) = match result {
                Ok(text) => (Message::bot(text), RequestOutcome::Replied),
                Err(ChatError::RequestCancelled(reason)) => {
                    log::debug!("Request {} cancelled: {}", token.id(), reason);
                    (Message::bot_error(CANCELLED_TEXT), RequestOutcome::Cancelled)
                }
                Err(e) => {
                    log::warn!("Request {} to {} failed: {}", token.id(), self.agent.id, e);
                    (Message::bot_error(error_text(&e)), RequestOutcome::Failed)
                }
            };
            state.messages.push(message.clone());
            (message, outcome, removed, state.persisted())
        };

        let removal = removed.then(|| ChatEvent::MessageRemoved {
            id: TYPING_MESSAGE_ID.to_string(),
        });
        self.event_bus.emit_all(removal.into_iter().chain([
            ChatEvent::MessageAppended { message },
            ChatEvent::RequestFinished {
                request_id: token.id(),
                outcome,
            },
        ]));
        Some((outcome, snapshot))
    }

    async fn persist(&self, snapshot: Vec<Message>) {
        let key = keys::history_key(&self.agent.id);
        if let Err(e) = save_json(self.storage.as_ref(), &key, &snapshot).await {
            log::warn!("Failed to persist history for {}: {}", self.agent.id, e);
        }
    }
}
