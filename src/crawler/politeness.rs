//! Request pacing policies
//!
//! The enumerator calls [`Politeness::wait_between_requests`] after every
//! populated listing page. Swapping the policy changes the pacing without
//! touching the pagination logic.

use async_trait::async_trait;
use std::time::Duration;

/// Pacing policy applied between listing page fetches
#[async_trait]
pub trait Politeness: Send + Sync {
    async fn wait_between_requests(&self);
}

/// Sleeps for a fixed duration every time
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Politeness for FixedDelay {
    async fn wait_between_requests(&self) {
        if !self.delay.is_zero() {
            tracing::trace!("Pausing {:?} before next listing page", self.delay);
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Politeness for NoDelay {
    async fn wait_between_requests(&self) {}
}
