//! Page objects.
//!
//! A [`Page`] is the top-level navigable unit: it owns the seed-URL
//! configuration (base URL, optional template, URL arguments), a shared
//! driver handle, and a readiness timeout. The [`PageObject`] trait carries
//! the navigable surface — [`seed_url`](PageObject::seed_url) and
//! [`open`](PageObject::open) — so wrapper page types get `open` polling
//! their own `loaded` override.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pagemodel::{By, Loadable, Page, PageObject, Wait};
//!
//! let driver = Arc::new(my_backend());
//!
//! // A one-off page: configuration through the builder methods.
//! let page = Page::new(Arc::clone(&driver))
//!     .with_base_url("https://www.mozilla.org/")
//!     .with_template("/search")
//!     .with_arg("q", "firefox");
//! page.open()?;
//!
//! // A reusable page type: wrap Page, override readiness.
//! struct SearchPage<D: pagemodel::Driver> {
//!     page: Page<D>,
//! }
//!
//! impl<D: pagemodel::Driver> Loadable for SearchPage<D> {
//!     fn loaded(&self) -> bool {
//!         self.page
//!             .is_element_displayed(&By::id("results"))
//!             .unwrap_or(false)
//!     }
//!
//!     fn load_wait(&self) -> Wait {
//!         Wait::new(self.page.timeout())
//!     }
//! }
//!
//! impl<D: pagemodel::Driver> PageObject for SearchPage<D> {
//!     type Driver = D;
//!     fn view(&self) -> &Page<D> {
//!         &self.page
//!     }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::driver::{Driver, ElementQuery};
use crate::error::{Error, Result};
use crate::locator::By;
use crate::url::{build_seed_url, QueryValue, UrlArgs};
use crate::wait::{Loadable, Wait, DEFAULT_TIMEOUT};

// ============================================================================
// Page
// ============================================================================

/// A page object.
///
/// Stateless beyond its configuration: the seed URL is recomputed on every
/// access and element lookups go straight to the driver, unscoped. Created
/// per navigation target and discarded by the caller; there is no teardown.
#[derive(Debug)]
pub struct Page<D: Driver> {
    query: ElementQuery<D>,
    base_url: Option<String>,
    url_template: Option<String>,
    timeout: Duration,
    url_args: UrlArgs,
}

// ============================================================================
// Constructors and Builder Methods
// ============================================================================

impl<D: Driver> Page<D> {
    /// Creates a page over a shared driver handle.
    ///
    /// The page starts with no base URL, no template, no URL arguments, and
    /// the default 10 second readiness timeout.
    #[must_use]
    pub fn new(driver: Arc<D>) -> Self {
        Self {
            query: ElementQuery::new(driver),
            base_url: None,
            url_template: None,
            timeout: DEFAULT_TIMEOUT,
            url_args: UrlArgs::new(),
        }
    }

    /// Sets the base URL.
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the URL template.
    ///
    /// The template may contain `{name}` placeholders substituted from the
    /// URL arguments, and should either be relative to the base URL or
    /// yield an absolute URL:
    ///
    /// ```text
    /// "https://www.mozilla.org/"   absolute URL
    /// "/search"                    relative to base URL
    /// "/search?q={term}"           keyword argument expansion
    /// ```
    #[inline]
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = Some(template.into());
        self
    }

    /// Sets the readiness timeout.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a URL argument used when generating the seed URL.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.url_args.set(name, value);
        self
    }

    /// Replaces the URL arguments wholesale.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: UrlArgs) -> Self {
        self.url_args = args;
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl<D: Driver> Page<D> {
    /// Returns the driver collaborator.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &D {
        self.query.driver()
    }

    /// Returns the element query adapter.
    #[inline]
    #[must_use]
    pub(crate) fn query(&self) -> &ElementQuery<D> {
        &self.query
    }

    /// Returns the base URL, if set.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Returns the URL template, if set.
    #[inline]
    #[must_use]
    pub fn url_template(&self) -> Option<&str> {
        self.url_template.as_deref()
    }

    /// Returns the readiness timeout.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the URL arguments.
    #[inline]
    #[must_use]
    pub fn url_args(&self) -> &UrlArgs {
        &self.url_args
    }

    /// Computes the seed URL from this page's configuration.
    ///
    /// Pure and idempotent; never cached. `Ok(None)` means the page has
    /// neither a base URL nor a template.
    ///
    /// # Errors
    ///
    /// See [`build_seed_url`].
    pub fn seed_url(&self) -> Result<Option<Url>> {
        build_seed_url(self.base_url(), self.url_template(), &self.url_args)
    }
}

// ============================================================================
// Element Lookups (unscoped)
// ============================================================================

impl<D: Driver> Page<D> {
    /// Finds an element on the page.
    ///
    /// # Errors
    ///
    /// Propagates driver errors verbatim, including
    /// [`ElementNotFound`](Error::ElementNotFound).
    pub fn find_element(&self, by: &By) -> Result<D::Element> {
        self.query.find_element(by, None)
    }

    /// Finds all matching elements on the page.
    ///
    /// # Errors
    ///
    /// Propagates driver errors verbatim. No match is `Ok(vec![])`.
    pub fn find_elements(&self, by: &By) -> Result<Vec<D::Element>> {
        self.query.find_elements(by, None)
    }

    /// Checks whether an element is present on the page.
    ///
    /// # Errors
    ///
    /// Lookup failures become `Ok(false)`; other driver errors propagate.
    pub fn is_element_present(&self, by: &By) -> Result<bool> {
        self.query.is_element_present(by, None)
    }

    /// Checks whether an element is displayed on the page.
    ///
    /// # Errors
    ///
    /// Lookup failures become `Ok(false)`; other driver errors propagate.
    pub fn is_element_displayed(&self, by: &By) -> Result<bool> {
        self.query.is_element_displayed(by, None)
    }
}

// ============================================================================
// Readiness
// ============================================================================

impl<D: Driver> Loadable for Page<D> {
    fn load_wait(&self) -> Wait {
        Wait::new(self.timeout)
    }
}

// ============================================================================
// PageObject
// ============================================================================

/// Navigable page capability.
///
/// Implemented by [`Page`] itself and by wrapper page types. Because
/// [`open`](PageObject::open) is a provided method on the concrete type,
/// it polls the wrapper's own [`Loadable::loaded`] override.
pub trait PageObject: Loadable {
    /// Driver backend of the underlying page.
    type Driver: Driver;

    /// Returns the underlying page view.
    fn view(&self) -> &Page<Self::Driver>;

    /// Computes the seed URL for this page object.
    ///
    /// The default delegates to the underlying page's configuration.
    ///
    /// # Errors
    ///
    /// See [`build_seed_url`].
    fn seed_url(&self) -> Result<Option<Url>> {
        self.view().seed_url()
    }

    /// Opens the page.
    ///
    /// Navigates the driver to the seed URL, waits for the page to load,
    /// and returns `&Self` for chaining. The driver is never called when
    /// there is no seed URL.
    ///
    /// # Errors
    ///
    /// - [`Error::Usage`] when neither a base URL nor a template is set.
    /// - [`Error::Timeout`] when the page never reports loaded.
    /// - Driver navigation errors, verbatim.
    fn open(&self) -> Result<&Self>
    where
        Self: Sized,
    {
        match PageObject::seed_url(self)? {
            Some(url) => {
                debug!(url = %url, "opening page");
                self.view().driver().navigate(&url)?;
                self.wait_until_loaded()
            }
            None => Err(Error::usage(
                "set a base URL or URL template to open this page",
            )),
        }
    }
}

impl<D: Driver> PageObject for Page<D> {
    type Driver = D;

    fn view(&self) -> &Page<D> {
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
