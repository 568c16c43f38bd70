//! Courtesy delays before each request or tool run.
//!
//! The pipeline waits a random, uniformly distributed interval before every
//! network call and subprocess launch. This is politeness toward the remote
//! hosts, not a correctness mechanism, so tests swap in [`NoDelay`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use harvest_core::download::{DelayPolicy, RandomDelay};
//!
//! # async fn example() {
//! let delay = RandomDelay::new(Duration::from_millis(10), Duration::from_millis(30));
//! delay.wait().await;
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, instrument};

use super::constants::{DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY};

/// Wait inserted before every outbound request or tool invocation.
#[async_trait]
pub trait DelayPolicy: Send + Sync {
    /// Suspends the caller for this policy's interval.
    async fn wait(&self);
}

/// Uniformly random delay in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELAY, DEFAULT_MAX_DELAY)
    }
}

impl RandomDelay {
    /// Creates a delay policy; bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws one delay from the configured range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample(&self) -> Duration {
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        if min_ms == max_ms {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }
}

#[async_trait]
impl DelayPolicy for RandomDelay {
    #[instrument(level = "trace", skip(self))]
    async fn wait(&self) {
        let delay = self.sample();
        debug!(?delay, "courtesy delay");
        tokio::time::sleep(delay).await;
    }
}

/// Policy that never waits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

#[async_trait]
impl DelayPolicy for NoDelay {
    async fn wait(&self) {}
}
