//! Screen routing, mirrored into the URL hash by the app.

use chat_core::catalog::AgentCatalog;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    /// Identity entry, `/`
    #[default]
    Login,
    /// Agent grid, `/agents`
    AgentSelection,
    /// Conversation, `/chat/<agent_id>`
    Chat { agent_id: String },
}

impl Route {
    /// Parse a path or hash fragment. Unknown paths map to `Login`.
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let path = path.trim_end_matches('/');
        match path {
            "" => Route::Login,
            "/agents" => Route::AgentSelection,
            _ => match path.strip_prefix("/chat/") {
                Some(agent_id) if !agent_id.is_empty() && !agent_id.contains('/') => {
                    Route::Chat {
                        agent_id: agent_id.to_string(),
                    }
                }
                _ => Route::Login,
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::AgentSelection => "/agents".to_string(),
            Route::Chat { agent_id } => format!("/chat/{}", agent_id),
        }
    }

    /// Redirect routes the current identity may not see.
    ///
    /// Anything but `Login` needs a user; a chat with an agent missing
    /// from the catalog falls back to agent selection.
    pub fn guard(self, logged_in: bool, catalog: &AgentCatalog) -> Route {
        match self {
            Route::Login => Route::Login,
            _ if !logged_in => Route::Login,
            Route::Chat { agent_id } if !catalog.contains(&agent_id) => {
                log::warn!("Unknown agent {} requested, back to selection", agent_id);
                Route::AgentSelection
            }
            route => route,
        }
    }

    pub fn agent_id(&self) -> Option<&str> {
        match self {
            Route::Chat { agent_id } => Some(agent_id),
            _ => None,
        }
    }
}
