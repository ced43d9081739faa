pub mod header;
pub mod login;
pub mod agents;
pub mod chat;

pub use header::{header_bar, HeaderAction};
pub use login::login_panel;
pub use agents::agent_selection_panel;
pub use chat::{chat_panel, ChatAction};
