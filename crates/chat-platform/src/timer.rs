//! Timer port on top of `setTimeout`.

use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_timers::future::TimeoutFuture;
use chat_core::ports::TimerPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTimer;

impl BrowserTimer {
    pub fn new() -> Self {
        Self
    }
}

/// `setTimeout` takes a signed 32-bit delay and fires at once on overflow.
pub(crate) fn timeout_millis(duration: Duration) -> u32 {
    const MAX_DELAY: u128 = i32::MAX as u128;
    duration.as_millis().min(MAX_DELAY) as u32
}

impl TimerPort for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        // Dropping a TimeoutFuture calls clearTimeout.
        TimeoutFuture::new(timeout_millis(duration)).boxed_local()
    }
}
