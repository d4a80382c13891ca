//! Delays for follow-up work (listing reloads, status auto-hide).

use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

/// Waits before a follow-up action runs.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, after: Duration);
}

/// `setTimeout`-backed timer for the browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, after: Duration) {
        TimeoutFuture::new(timeout_millis(after)).await;
    }
}

/// Milliseconds for `setTimeout`, saturating instead of wrapping.
pub fn timeout_millis(after: Duration) -> u32 {
    u32::try_from(after.as_millis()).unwrap_or(u32::MAX)
}
