//! Queue of `ChatEvent`s between the session manager and the UI.
//!
//! Sessions push from inside spawned tasks; the UI drains once per frame and
//! folds the batch into its projection. Single-threaded, so `Rc<RefCell>`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use chat_types::event::ChatEvent;

#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Queue the events of one log transition back to back, e.g. placeholder
    /// removal, the final message and `RequestFinished`.
    pub fn emit_all(&self, events: impl IntoIterator<Item = ChatEvent>) {
        self.queue.borrow_mut().extend(events);
    }

    /// Everything queued since the last frame, oldest first.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Lets the frame loop skip the projection pass and the repaint request.
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
