//! Application context handed to sessions and views at construction.
//!
//! Created once at app start; `identity.logout()` resets it.

use std::rc::Rc;

use chat_types::config::SessionConfig;
use crate::catalog::AgentCatalog;
use crate::event_bus::EventBus;
use crate::identity::IdentityStore;
use crate::ports::{StoragePort, TimerPort, WebhookPort};

#[derive(Clone)]
pub struct ChatContext {
    pub storage: Rc<dyn StoragePort>,
    pub webhook: Rc<dyn WebhookPort>,
    pub timer: Rc<dyn TimerPort>,
    pub catalog: Rc<AgentCatalog>,
    pub identity: IdentityStore,
    pub session: SessionConfig,
    pub event_bus: EventBus,
}
