//! Retry with exponential backoff for transient engine and clone failures.

use crate::config::Config;
use crate::core::interrupt::InterruptSignal;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first; 1 disables retries.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub jitter: bool,
    /// Stops retrying once this signal fires.
    pub interrupt: Option<InterruptSignal>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(5),
            jitter: true,
            interrupt: None,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.retry.max_attempts.max(1),
            initial_backoff: config.initial_backoff(),
            max_backoff: config.max_backoff(),
            jitter: true,
            interrupt: None,
        }
    }

    /// Single attempt, no sleeping.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            jitter: false,
            interrupt: None,
        }
    }

    pub fn with_interrupt(mut self, signal: InterruptSignal) -> Self {
        self.interrupt = Some(signal);
        self
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|signal| signal.is_interrupted())
    }

    /// Delay before retry number `attempt` (1-based), capped at `max_backoff`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(31);
        let capped = self
            .initial_backoff
            .saturating_mul(1u32 << shift)
            .min(self.max_backoff);

        if self.jitter && !capped.is_zero() {
            // Equal jitter: keep at least half of the computed delay.
            let half = capped.as_millis() as u64 / 2;
            let extra = rand::thread_rng().gen_range(0..=half);
            Duration::from_millis(half + extra)
        } else {
            capped
        }
    }

    pub fn run<T, E, F>(&self, operation_name: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: std::fmt::Display,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if self.is_interrupted() {
                        tracing::warn!("{} interrupted, not retrying: {}", operation_name, err);
                        return Err(err);
                    }
                    if attempt >= self.max_attempts {
                        if self.max_attempts > 1 {
                            tracing::warn!(
                                "{} failed after {} attempts: {}",
                                operation_name,
                                attempt,
                                err
                            );
                        }
                        return Err(err);
                    }

                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        "{} attempt {}/{} failed: {}. Retrying in {:?}...",
                        operation_name,
                        attempt,
                        self.max_attempts,
                        err,
                        delay
                    );
                    std::thread::sleep(delay);
                }
            }
        }
    }
}
