//! pagemodel - Page object modeling layer for browser automation.
//!
//! This library lets a test author describe a web page, or a reusable
//! fragment of one, as a structured object: a seed URL built from a
//! template plus arguments, a polling "wait until ready" protocol, and
//! element lookups that a region confines to its root element's subtree.
//!
//! The browser itself is an external collaborator reached through the
//! [`Driver`] trait; this crate layers the object model and readiness
//! protocol on top of whatever automation backend implements it.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use pagemodel::{By, Page, PageObject, Region, Result};
//!
//! fn main() -> Result<()> {
//!     // Any backend implementing `Driver`.
//!     let driver = Arc::new(my_webdriver_backend());
//!
//!     // Describe and open a page.
//!     let page = Page::new(Arc::clone(&driver))
//!         .with_base_url("https://www.mozilla.org/")
//!         .with_template("/{locale}/firefox/")
//!         .with_arg("locale", "en-US")
//!         .with_arg("utm_source", "tests");
//!     page.open()?;
//!
//!     // Scope follow-up lookups to a fragment of the page.
//!     let newsletter = Region::with_root_locator(&page, By::id("newsletter-form"))?;
//!     let submit = newsletter.find_element(&By::id("footer_email_submit"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`page`] | [`Page`] and the [`PageObject`] capability |
//! | [`region`] | [`Region`] root-scoped fragments |
//! | [`url`] | Seed URL construction: [`build_seed_url`], [`UrlArgs`], [`QueryValue`] |
//! | [`wait`] | [`Wait`] bounded poll and the [`Loadable`] readiness capability |
//! | [`driver`] | [`Driver`] collaborator contract and [`ElementQuery`] adapter |
//! | [`locator`] | [`By`] locator strategies |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! # Design
//!
//! - Synchronous and blocking: the only suspension point is the bounded
//!   readiness poll. There is no background work and no cancellation
//!   primitive beyond the timeout itself.
//! - No retries: every failure is either absorbed into a boolean by the
//!   presence/displayed checks or propagated verbatim to the caller.
//! - The driver handle is shared and externally owned; pages and regions
//!   never manage its lifecycle.

// ============================================================================
// Modules
// ============================================================================

/// Driver collaborator contract and element query adapter.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Element locator strategies.
pub mod locator;

/// Page objects: [`Page`] and the [`PageObject`] capability.
pub mod page;

/// Page regions: root-scoped fragments of a page.
pub mod region;

/// Seed URL construction.
pub mod url;

/// Readiness polling: [`Wait`] and the [`Loadable`] capability.
pub mod wait;

// ============================================================================
// Re-exports
// ============================================================================

// Driver types
pub use driver::{Driver, ElementQuery};

// Error types
pub use error::{Error, Result};

// Locator types
pub use locator::By;

// Page and region types
pub use page::{Page, PageObject};
pub use region::Region;

// URL types (self-qualified: `url` is also the name of the external crate)
pub use self::url::{build_seed_url, QueryValue, UrlArgs};

// Readiness types
pub use wait::{Loadable, Wait, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
