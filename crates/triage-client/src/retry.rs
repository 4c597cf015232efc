//! Bounded exponential backoff for page requests.

use std::time::Duration;

use crate::error::ClientError;

/// How many times a failing page is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first. Always at least 1.
    pub max_attempts: u32,
    /// Wait before the second attempt.
    pub initial_delay: Duration,
    /// Factor applied to the wait after each further failure.
    pub multiplier: f64,
    /// Upper bound on a single computed wait.
    pub max_delay: Duration,
    /// Upper bound on a server-requested `Retry-After` wait.
    pub max_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            multiplier: 2.0,
            max_delay: Duration::from_secs(8),
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after the first failure.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Same backoff shape without any waiting.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_retry_after: Duration::ZERO,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Effective attempt bound (a zero setting still allows one attempt).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Whether another attempt is allowed after `attempt` failed attempts.
    pub fn should_retry(&self, attempt: u32, error: &ClientError) -> bool {
        attempt < self.attempts() && error.is_retryable()
    }

    /// Wait before the attempt following failed attempt number `attempt`
    /// (1-based). A rate-limit answer extends the wait to what the server asked,
    /// up to `max_retry_after`.
    pub fn delay_for(&self, attempt: u32, error: &ClientError) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let scaled = self.initial_delay.as_secs_f64() * self.multiplier.max(1.0).powi(exponent);
        let backoff = if scaled.is_finite() {
            Duration::from_secs_f64(scaled.min(self.max_delay.as_secs_f64()))
        } else {
            self.max_delay
        };
        match error {
            ClientError::RateLimited { retry_after } => {
                let requested = Duration::from_secs(*retry_after).min(self.max_retry_after);
                backoff.max(requested)
            }
            _ => backoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> ClientError {
        ClientError::Network("reset".to_string())
    }

    #[test]
    fn delays_grow_and_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1, &network()), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2, &network()), Duration::from_secs(1));
        assert_eq!(policy.delay_for(3, &network()), Duration::from_secs(2));
        assert_eq!(policy.delay_for(10, &network()), Duration::from_secs(8));
    }

    #[test]
    fn rate_limit_extends_delay() {
        let policy = RetryPolicy::default();
        let limited = ClientError::RateLimited { retry_after: 5 };
        assert_eq!(policy.delay_for(1, &limited), Duration::from_secs(5));
    }

    #[test]
    fn rate_limit_wait_is_capped() {
        let policy = RetryPolicy::default();
        let limited = ClientError::RateLimited {
            retry_after: 86_400,
        };
        assert_eq!(policy.delay_for(1, &limited), Duration::from_secs(60));
        assert_eq!(
            RetryPolicy::immediate(3).delay_for(1, &limited),
            Duration::ZERO
        );
    }

    #[test]
    fn retry_stops_at_bound_and_on_fatal_errors() {
        let policy = RetryPolicy::immediate(3);
        assert!(policy.should_retry(1, &network()));
        assert!(policy.should_retry(2, &network()));
        assert!(!policy.should_retry(3, &network()));
        assert!(!policy.should_retry(1, &ClientError::status(401, "u", "")));
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy::immediate(0);
        assert_eq!(policy.attempts(), 1);
        assert!(!policy.should_retry(1, &network()));
        assert!(!RetryPolicy::no_retry().should_retry(1, &network()));
    }
}
