use serde::{Deserialize, Serialize};
use crate::agent::AgentDescriptor;

/// The signed-in user. There is no authentication behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// Current identity: who is signed in and which agent they last picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user: Option<User>,
    pub selected_agent: Option<AgentDescriptor>,
}

impl Identity {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}
