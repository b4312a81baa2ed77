//! Error types for the page-object layer.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use pagemodel::{PageObject, Result};
//!
//! fn example(page: &impl PageObject) -> Result<()> {
//!     page.open()?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Caller misconfiguration | [`Error::Usage`] |
//! | Readiness | [`Error::Timeout`] |
//! | Element lookup | [`Error::ElementNotFound`] |
//! | Seed URL | [`Error::MissingTemplateKey`], [`Error::Url`] |
//! | Driver backend | [`Error::Driver`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Caller Misconfiguration
    // ========================================================================
    /// Usage error.
    ///
    /// Returned when a page or region is used without the configuration the
    /// operation requires: opening a page with no base URL or URL template,
    /// or resolving a region root with neither an explicit root nor a root
    /// locator set. Never retried.
    #[error("Usage error: {message}")]
    Usage {
        /// Description of the misconfiguration.
        message: String,
    },

    // ========================================================================
    // Readiness
    // ========================================================================
    /// Readiness poll timeout.
    ///
    /// Returned when a loaded predicate does not become true within the
    /// poll window. The poll runs once; there is no internal retry.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the condition that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Element Lookup
    // ========================================================================
    /// Element not found by locator.
    ///
    /// Raised by [`Driver::find`](crate::Driver::find) implementations when
    /// a locator matches no elements.
    #[error("Element not found: strategy={strategy}, locator={locator}")]
    ElementNotFound {
        /// Locator strategy used.
        strategy: String,
        /// Locator value used.
        locator: String,
    },

    // ========================================================================
    // Seed URL
    // ========================================================================
    /// URL template placeholder with no matching argument.
    ///
    /// Returned when a `{name}` placeholder appears in the URL template but
    /// no URL argument of that name was supplied.
    #[error("Missing URL template key: {key}")]
    MissingTemplateKey {
        /// The placeholder name with no matching argument.
        key: String,
    },

    /// URL parse or resolution error.
    ///
    /// Raised when the working URL cannot be parsed, including a relative
    /// template result with no base URL to resolve it against.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    // ========================================================================
    // Driver Backend
    // ========================================================================
    /// Driver backend error.
    ///
    /// Catch-all for failures a [`Driver`](crate::Driver) implementation
    /// reports that have no more specific variant. Propagated verbatim.
    #[error("Driver error: {message}")]
    Driver {
        /// Description of the backend failure.
        message: String,
    },
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a usage error.
    #[inline]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Creates a readiness timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(strategy: impl Into<String>, locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            strategy: strategy.into(),
            locator: locator.into(),
        }
    }

    /// Creates a missing template key error.
    #[inline]
    pub fn missing_template_key(key: impl Into<String>) -> Self {
        Self::MissingTemplateKey { key: key.into() }
    }

    /// Creates a driver backend error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a usage error.
    #[inline]
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }

    /// Returns `true` if this is a readiness timeout.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is an element lookup failure.
    ///
    /// Presence and displayed checks absorb these into `false`.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_display() {
        let err = Error::usage("set a base URL");
        assert_eq!(err.to_string(), "Usage error: set a base URL");
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::timeout("page loaded", 10_000);
        assert_eq!(err.to_string(), "Timeout after 10000ms: page loaded");
    }

    #[test]
    fn test_element_not_found_display() {
        let err = Error::element_not_found("css", "#missing");
        assert_eq!(
            err.to_string(),
            "Element not found: strategy=css, locator=#missing"
        );
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::timeout("region loaded", 0);
        let other_err = Error::usage("test");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_element_error() {
        let missing = Error::element_not_found("id", "nav");
        let usage = Error::usage("test");

        assert!(missing.is_element_error());
        assert!(!usage.is_element_error());
    }

    #[test]
    fn test_is_usage() {
        assert!(Error::usage("test").is_usage());
        assert!(!Error::missing_template_key("key").is_usage());
    }

    #[test]
    fn test_from_url_parse_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Url(_)));
    }
}
