//! Readiness polling.
//!
//! [`Wait`] is the single blocking primitive in the crate: a bounded
//! busy/sleep loop evaluating a boolean predicate until it turns true or
//! the window elapses. [`Loadable`] layers the readiness protocol on top of
//! it: pages and regions expose a `loaded` predicate (default `true`) and a
//! provided `wait_until_loaded` that polls it.
//!
//! The protocol is a capability, not a fixed algorithm: implementors may
//! override `loaded`, or replace `wait_until_loaded` outright to poll a
//! different condition.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use pagemodel::Wait;
//!
//! let wait = Wait::new(Duration::from_secs(1)).with_interval(Duration::from_millis(10));
//! let mut calls = 0;
//! wait.until("counter reached", || {
//!     calls += 1;
//!     calls >= 3
//! })
//! .unwrap();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default readiness timeout (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default poll interval between predicate evaluations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// Wait
// ============================================================================

/// Bounded blocking poll over a boolean predicate.
///
/// The predicate is always evaluated at least once, even with a zero
/// timeout, so `timeout == 0` means "check now, fail fast" rather than
/// "skip the check" or "poll forever".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    timeout: Duration,
    interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Wait {
    /// Creates a wait with the given timeout and the default poll interval.
    #[inline]
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the poll interval.
    #[inline]
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the timeout.
    #[inline]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the poll interval.
    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until `predicate` returns `true` or the timeout elapses.
    ///
    /// `operation` names the awaited condition in the timeout error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the predicate never becomes true
    /// within the window.
    pub fn until<F>(&self, operation: &str, mut predicate: F) -> Result<()>
    where
        F: FnMut() -> bool,
    {
        let started = Instant::now();
        loop {
            if predicate() {
                trace!(operation, "condition met");
                return Ok(());
            }

            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                debug!(operation, timeout_ms = self.timeout.as_millis() as u64, "wait timed out");
                return Err(Error::timeout(operation, self.timeout.as_millis() as u64));
            }

            // Never sleep past the deadline.
            thread::sleep(self.interval.min(self.timeout - elapsed));
        }
    }
}

// ============================================================================
// Loadable
// ============================================================================

/// Readiness capability shared by pages and regions.
///
/// The default `loaded` is `true`, so plain pages and regions pass their
/// readiness wait immediately. Types with real load conditions override
/// `loaded`; types needing an entirely different wait replace
/// `wait_until_loaded`.
///
/// # Example
///
/// ```ignore
/// use pagemodel::{By, Loadable, Page, Wait};
///
/// struct SearchPage<D: pagemodel::Driver> {
///     page: Page<D>,
/// }
///
/// impl<D: pagemodel::Driver> Loadable for SearchPage<D> {
///     fn loaded(&self) -> bool {
///         self.page
///             .is_element_displayed(&By::id("results"))
///             .unwrap_or(false)
///     }
///
///     fn load_wait(&self) -> Wait {
///         Wait::new(self.page.timeout())
///     }
/// }
/// ```
pub trait Loadable {
    /// Loaded state of the object.
    ///
    /// Defaults to `true`; override to gate readiness on a real condition.
    fn loaded(&self) -> bool {
        true
    }

    /// Poll window used by the provided [`wait_until_loaded`](Loadable::wait_until_loaded).
    fn load_wait(&self) -> Wait;

    /// Blocks until [`loaded`](Loadable::loaded) returns `true`.
    ///
    /// Returns `&Self` on success so calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the object never reports loaded within
    /// the window.
    fn wait_until_loaded(&self) -> Result<&Self>
    where
        Self: Sized,
    {
        self.load_wait().until("loaded", || self.loaded())?;
        Ok(self)
    }

    /// Consuming form of [`wait_until_loaded`](Loadable::wait_until_loaded)
    /// for constructor tails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the object never reports loaded within
    /// the window.
    fn ready(self) -> Result<Self>
    where
        Self: Sized,
    {
        self.wait_until_loaded()?;
        Ok(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn trace_init() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_until_immediate_success() {
        trace_init();
        let wait = Wait::new(Duration::from_secs(1));
        assert!(wait.until("always true", || true).is_ok());
    }

    #[test]
    fn test_until_eventually_true() {
        let wait = Wait::new(Duration::from_secs(5)).with_interval(Duration::from_millis(1));
        let calls = Cell::new(0u32);
        wait.until("third call", || {
            calls.set(calls.get() + 1);
            calls.get() >= 3
        })
        .unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_zero_timeout_evaluates_exactly_once() {
        let wait = Wait::new(Duration::ZERO);
        let calls = Cell::new(0u32);
        let err = wait
            .until("never true", || {
                calls.set(calls.get() + 1);
                false
            })
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_timeout_error_carries_operation() {
        let wait = Wait::new(Duration::ZERO);
        let err = wait.until("page loaded", || false).unwrap_err();
        assert_eq!(err.to_string(), "Timeout after 0ms: page loaded");
    }

    #[test]
    fn test_zero_timeout_true_predicate_passes() {
        let wait = Wait::new(Duration::ZERO);
        assert!(wait.until("already loaded", || true).is_ok());
    }

    struct Eventually {
        remaining: Cell<u32>,
    }

    impl Loadable for Eventually {
        fn loaded(&self) -> bool {
            if self.remaining.get() == 0 {
                return true;
            }
            self.remaining.set(self.remaining.get() - 1);
            false
        }

        fn load_wait(&self) -> Wait {
            Wait::new(Duration::from_secs(5)).with_interval(Duration::from_millis(1))
        }
    }

    #[test]
    fn test_loadable_default_polls_predicate() {
        let target = Eventually {
            remaining: Cell::new(2),
        };
        target.wait_until_loaded().unwrap();
        assert!(target.loaded());
    }

    #[test]
    fn test_loadable_ready_consumes_and_returns() {
        let target = Eventually {
            remaining: Cell::new(0),
        };
        let target = target.ready().unwrap();
        assert!(target.loaded());
    }

    #[derive(Debug)]
    struct Never;

    impl Loadable for Never {
        fn loaded(&self) -> bool {
            false
        }

        fn load_wait(&self) -> Wait {
            Wait::new(Duration::ZERO)
        }
    }

    #[test]
    fn test_loadable_timeout_propagates() {
        let err = Never.wait_until_loaded().unwrap_err();
        assert!(err.is_timeout());
    }
}
