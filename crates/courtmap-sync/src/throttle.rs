//! Request pacing, kept apart from the fetch loop so tests can skip real delays.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Throttle: Send + Sync {
    /// Called once after every request, whatever its outcome.
    async fn pause(&self);
}

/// Sleep a fixed interval after each request.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// No pacing at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn pause(&self) {}
}
