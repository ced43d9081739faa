//! Per-request cancellation tokens.
//!
//! A token is created for every webhook request. Whoever settles a request
//! first checks that the token is still the session's pending one; a
//! mismatch means the completion is stale and must be dropped.
//!
//! The wake path is a oneshot channel shared between all waiters, so any
//! number of `cancelled()` futures resolve together.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use chat_types::CancelReason;

#[derive(Clone)]
pub struct CancelToken {
    id: u64,
    inner: Rc<TokenState>,
}

struct TokenState {
    reason: Cell<Option<CancelReason>>,
    sender: RefCell<Option<oneshot::Sender<CancelReason>>>,
    signal: Shared<oneshot::Receiver<CancelReason>>,
}

impl CancelToken {
    pub fn new(id: u64) -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            id,
            inner: Rc::new(TokenState {
                reason: Cell::new(None),
                sender: RefCell::new(Some(sender)),
                signal: receiver.shared(),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Signal cancellation. The first reason wins; later calls are no-ops.
    pub fn cancel(&self, reason: CancelReason) {
        if self.inner.reason.get().is_some() {
            return;
        }
        self.inner.reason.set(Some(reason));
        if let Some(sender) = self.inner.sender.borrow_mut().take() {
            let _ = sender.send(reason);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.reason.get().is_some()
    }

    pub fn reason(&self) -> Option<CancelReason> {
        self.inner.reason.get()
    }

    /// Future resolving with the reason once the token is cancelled.
    pub fn cancelled(&self) -> Cancelled {
        Cancelled {
            signal: self.inner.signal.clone(),
        }
    }

    /// Identity comparison; clones of one token are the same token.
    pub fn same(&self, other: &CancelToken) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("id", &self.id)
            .field("reason", &self.reason())
            .finish()
    }
}

pub struct Cancelled {
    signal: Shared<oneshot::Receiver<CancelReason>>,
}

impl Future for Cancelled {
    type Output = CancelReason;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<CancelReason> {
        match self.signal.poll_unpin(cx) {
            Poll::Ready(Ok(reason)) => Poll::Ready(reason),
            // Sender gone without a reason: the token can no longer be cancelled.
            Poll::Ready(Err(oneshot::Canceled)) | Poll::Pending => Poll::Pending,
        }
    }
}
