//! Convergence waiting
//!
//! After a controller is scaled down its pods disappear asynchronously. The
//! waiter polls the observed replica count for a bounded number of attempts.
//! Running out of attempts is not an error: deletion proceeds regardless.

use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, info};

use crate::kubernetes::resources::{ResourceClient, ScalableController};

/// Delay growth between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same interval every time
    Fixed,
    /// Interval doubles after each poll, capped at `max_interval`
    Exponential { max_interval: Duration },
}

/// Bounded polling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub backoff: Backoff,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(1),
            backoff: Backoff::Fixed,
        }
    }
}

impl WaitPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            backoff: Backoff::Fixed,
        }
    }

    /// Poll `max_attempts` times without sleeping
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sleep duration following poll number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential { max_interval } => {
                let factor = 1u32
                    .checked_shl(attempt.saturating_sub(1))
                    .unwrap_or(u32::MAX);
                self.interval.saturating_mul(factor).min(max_interval)
            }
        }
    }

    /// Upper bound on the time spent sleeping for one controller
    pub fn max_wait(&self) -> Duration {
        (1..self.max_attempts)
            .map(|attempt| self.delay_after(attempt))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}

/// How polling one controller ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Observed count reached the target
    Converged { attempts: u32 },
    /// Attempts ran out first
    Exhausted {
        attempts: u32,
        last_observed: Option<i32>,
    },
    /// The controller no longer exists
    Gone { attempts: u32 },
}

impl WaitOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Converged { attempts }
            | Self::Exhausted { attempts, .. }
            | Self::Gone { attempts } => *attempts,
        }
    }
}

/// Poll one controller until it observes `target` replicas
pub async fn wait_for_replicas<C>(
    client: &C,
    namespace: &str,
    name: &str,
    target: i32,
    policy: &WaitPolicy,
) -> WaitOutcome
where
    C: ResourceClient,
    C::Object: ScalableController,
{
    let mut last_observed = None;

    for attempt in 1..=policy.max_attempts {
        match client.get(namespace, name).await {
            Ok(controller) => {
                let observed = controller.observed_replicas();
                if observed == target {
                    debug!(controller = name, attempt, "replicas converged");
                    return WaitOutcome::Converged { attempts: attempt };
                }
                last_observed = Some(observed);
            }
            Err(e) if e.is_not_found() => {
                debug!(controller = name, attempt, "controller disappeared while waiting");
                return WaitOutcome::Gone { attempts: attempt };
            }
            Err(e) => {
                debug!(controller = name, attempt, error = %e, "poll failed");
            }
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.delay_after(attempt)).await;
        }
    }

    WaitOutcome::Exhausted {
        attempts: policy.max_attempts,
        last_observed,
    }
}

/// Wait for every named controller to drain, polling them concurrently
///
/// Total wall time is bounded by one controller's `max_wait`, not the sum.
pub async fn wait_for_all<C>(
    client: &C,
    namespace: &str,
    names: &[String],
    policy: &WaitPolicy,
) -> Vec<(String, WaitOutcome)>
where
    C: ResourceClient,
    C::Object: ScalableController,
{
    let waits = names.iter().map(|name| async move {
        let outcome = wait_for_replicas(client, namespace, name, 0, policy).await;
        if let WaitOutcome::Exhausted { last_observed, .. } = outcome {
            info!(
                controller = %name,
                observed = ?last_observed,
                "replicas still running after {} polls, deleting anyway",
                policy.max_attempts
            );
        }
        (name.clone(), outcome)
    });

    join_all(waits).await
}
