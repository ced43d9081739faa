//! Durable storage keys, one browser profile per key space.

pub const USER_KEY: &str = "user";
pub const SELECTED_AGENT_KEY: &str = "selectedAgent";
pub const CONFIG_KEY: &str = "chat:config";

pub const HISTORY_PREFIX: &str = "chatHistory-";
pub const SESSION_ID_PREFIX: &str = "sessionId-";

pub fn history_key(agent_id: &str) -> String {
    format!("{}{}", HISTORY_PREFIX, agent_id)
}

pub fn session_id_key(agent_id: &str) -> String {
    format!("{}{}", SESSION_ID_PREFIX, agent_id)
}
