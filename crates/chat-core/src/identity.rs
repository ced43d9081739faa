//! Identity store: current user and selected agent, backed by storage.
//!
//! State is updated in memory first and then written through, so readers
//! never wait on storage. Clone-cheap via Rc.

use std::cell::RefCell;
use std::rc::Rc;

use chat_types::{
    ChatError, Result,
    agent::AgentDescriptor,
    identity::{Identity, User},
    keys::{self, SELECTED_AGENT_KEY, USER_KEY},
};
use crate::ports::StoragePort;
use crate::store::{load_json, save_json};

/// Trim and check a login name before anything is stored.
pub fn validate_username(username: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ChatError::Validation(
            "Please enter a name or e-mail.".to_string(),
        ));
    }
    Ok(User {
        username: username.to_string(),
    })
}

#[derive(Clone)]
pub struct IdentityStore {
    storage: Rc<dyn StoragePort>,
    inner: Rc<RefCell<Identity>>,
}

impl IdentityStore {
    /// An empty identity that has not read storage.
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self {
            storage,
            inner: Rc::new(RefCell::new(Identity::default())),
        }
    }

    /// Restore user and selected agent from storage.
    /// Unreadable entries are dropped rather than failing start-up.
    pub async fn load(storage: Rc<dyn StoragePort>) -> Self {
        let user = load_json::<User>(storage.as_ref(), USER_KEY)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Discarding stored user: {}", e);
                None
            });
        let selected_agent = load_json::<AgentDescriptor>(storage.as_ref(), SELECTED_AGENT_KEY)
            .await
            .unwrap_or_else(|e| {
                log::warn!("Discarding stored agent selection: {}", e);
                None
            });

        Self {
            storage,
            inner: Rc::new(RefCell::new(Identity {
                user,
                selected_agent,
            })),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.inner.borrow().user.clone()
    }

    pub fn selected_agent(&self) -> Option<AgentDescriptor> {
        self.inner.borrow().selected_agent.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.borrow().is_logged_in()
    }

    pub async fn login(&self, username: &str) -> Result<User> {
        let user = validate_username(username)?;
        self.inner.borrow_mut().user = Some(user.clone());
        save_json(self.storage.as_ref(), USER_KEY, &user).await?;
        log::info!("Logged in as {}", user.username);
        Ok(user)
    }

    pub async fn select_agent(&self, agent: &AgentDescriptor) -> Result<()> {
        self.inner.borrow_mut().selected_agent = Some(agent.clone());
        save_json(self.storage.as_ref(), SELECTED_AGENT_KEY, agent).await
    }

    /// Global reset: user, selected agent, and every agent's log and session id.
    pub async fn logout(&self) -> Result<()> {
        *self.inner.borrow_mut() = Identity::default();

        let storage = self.storage.as_ref();
        storage.delete(USER_KEY).await?;
        storage.delete(SELECTED_AGENT_KEY).await?;

        let mut removed = 0;
        for prefix in [keys::HISTORY_PREFIX, keys::SESSION_ID_PREFIX] {
            for key in storage.list_keys(prefix).await? {
                storage.delete(&key).await?;
                removed += 1;
            }
        }
        log::info!("Logged out; removed {} conversation keys", removed);
        Ok(())
    }
}
