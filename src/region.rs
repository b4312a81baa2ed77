//! Page regions.
//!
//! A [`Region`] is a scoped sub-unit of a page: a reusable fragment whose
//! element lookups are confined to a root element's subtree. The root is
//! resolved fresh on every access — never cached — so lookups do not act on
//! a stale, detached element reference.
//!
//! Construction runs the readiness wait, so building a region can fail
//! with a timeout. Region types with a real load condition wrap [`Region`],
//! override [`Loadable::loaded`], and finish construction with
//! [`Loadable::ready`]:
//!
//! ```ignore
//! use pagemodel::{By, Loadable, Page, Region, Result, Wait};
//!
//! struct Newsletter<'p, D: pagemodel::Driver> {
//!     region: Region<'p, D>,
//! }
//!
//! impl<'p, D: pagemodel::Driver> Newsletter<'p, D> {
//!     fn open(page: &'p Page<D>) -> Result<Self> {
//!         let region = Region::with_root_locator(page, By::id("newsletter-form"))?;
//!         Self { region }.ready()
//!     }
//!
//!     fn sign_up(&self) -> Result<()> {
//!         let _submit = self.region.find_element(&By::id("footer_email_submit"))?;
//!         Ok(())
//!     }
//! }
//!
//! impl<'p, D: pagemodel::Driver> Loadable for Newsletter<'p, D> {
//!     fn loaded(&self) -> bool {
//!         self.region
//!             .is_element_displayed(&By::tag("form"))
//!             .unwrap_or(false)
//!     }
//!
//!     fn load_wait(&self) -> Wait {
//!         Wait::new(self.region.timeout())
//!     }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use tracing::trace;

use crate::driver::{Driver, ElementQuery};
use crate::error::{Error, Result};
use crate::locator::By;
use crate::page::Page;
use crate::wait::{Loadable, Wait};

// ============================================================================
// Region
// ============================================================================

/// A page region object.
///
/// Borrows its owning [`Page`] and copies the driver handle and timeout
/// from it at construction. Exactly one of the explicit root and the root
/// locator is consulted when resolving [`root`](Region::root), the explicit
/// root taking precedence; with neither set, resolving the root is a usage
/// error.
pub struct Region<'p, D: Driver> {
    page: &'p Page<D>,
    query: ElementQuery<D>,
    timeout: Duration,
    root: Option<D::Element>,
    root_locator: Option<By>,
}

// Element handles are opaque, so Debug reports only whether an explicit
// root was supplied.
impl<D: Driver> fmt::Debug for Region<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("timeout", &self.timeout)
            .field("explicit_root", &self.root.is_some())
            .field("root_locator", &self.root_locator)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl<'p, D: Driver> Region<'p, D> {
    /// Creates a region with neither an explicit root nor a root locator.
    ///
    /// Element lookups on such a region fail with a usage error until a
    /// root is configured; only [`loaded`](Loadable::loaded)-style checks
    /// that avoid the root are meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the readiness wait fails.
    pub fn new(page: &'p Page<D>) -> Result<Self> {
        Self::attach(page, None, None)
    }

    /// Creates a region rooted at an explicit element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the readiness wait fails.
    pub fn with_root(page: &'p Page<D>, root: D::Element) -> Result<Self> {
        Self::attach(page, Some(root), None)
    }

    /// Creates a region whose root is looked up by locator on every
    /// [`root`](Region::root) access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the readiness wait fails.
    pub fn with_root_locator(page: &'p Page<D>, locator: By) -> Result<Self> {
        Self::attach(page, None, Some(locator))
    }

    /// General constructor: optional explicit root and root locator.
    ///
    /// The explicit root, when given, takes precedence over the locator.
    /// Runs the readiness wait before returning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the readiness wait fails.
    pub fn attach(
        page: &'p Page<D>,
        root: Option<D::Element>,
        root_locator: Option<By>,
    ) -> Result<Self> {
        trace!(
            explicit_root = root.is_some(),
            locator = root_locator.as_ref().map(By::value),
            "attaching region"
        );
        Self {
            page,
            query: page.query().clone(),
            timeout: page.timeout(),
            root,
            root_locator,
        }
        .ready()
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl<'p, D: Driver> Region<'p, D> {
    /// Returns the owning page.
    #[inline]
    #[must_use]
    pub fn page(&self) -> &'p Page<D> {
        self.page
    }

    /// Returns the readiness timeout copied from the owning page.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the root locator, if set.
    #[inline]
    #[must_use]
    pub fn root_locator(&self) -> Option<&By> {
        self.root_locator.as_ref()
    }

    /// Resolves the root element for this region.
    ///
    /// Resolved fresh on every access: the explicit root if one was given,
    /// otherwise the root locator looked up against the owning page
    /// (unscoped, not recursively scoped to this region).
    ///
    /// # Errors
    ///
    /// - [`Error::Usage`] when neither an explicit root nor a root locator
    ///   is configured.
    /// - [`Error::ElementNotFound`] when the locator matches nothing.
    pub fn root(&self) -> Result<D::Element> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        match &self.root_locator {
            Some(locator) => self.page.find_element(locator),
            None => Err(Error::usage(
                "set a root element or a root locator for this region",
            )),
        }
    }
}

// ============================================================================
// Element Lookups (scoped to root)
// ============================================================================

impl<'p, D: Driver> Region<'p, D> {
    /// Finds an element within the region.
    ///
    /// # Errors
    ///
    /// Root resolution errors and driver errors propagate verbatim.
    pub fn find_element(&self, by: &By) -> Result<D::Element> {
        let root = self.root()?;
        self.query.find_element(by, Some(&root))
    }

    /// Finds all matching elements within the region.
    ///
    /// # Errors
    ///
    /// Root resolution errors and driver errors propagate verbatim.
    pub fn find_elements(&self, by: &By) -> Result<Vec<D::Element>> {
        let root = self.root()?;
        self.query.find_elements(by, Some(&root))
    }

    /// Checks whether an element is present within the region.
    ///
    /// # Errors
    ///
    /// Lookup failures become `Ok(false)`; root resolution errors and other
    /// driver errors propagate.
    pub fn is_element_present(&self, by: &By) -> Result<bool> {
        let root = self.root()?;
        self.query.is_element_present(by, Some(&root))
    }

    /// Checks whether an element is displayed within the region.
    ///
    /// # Errors
    ///
    /// Lookup failures become `Ok(false)`; root resolution errors and other
    /// driver errors propagate.
    pub fn is_element_displayed(&self, by: &By) -> Result<bool> {
        let root = self.root()?;
        self.query.is_element_displayed(by, Some(&root))
    }
}

// ============================================================================
// Readiness
// ============================================================================

impl<'p, D: Driver> Loadable for Region<'p, D> {
    fn load_wait(&self) -> Wait {
        Wait::new(self.timeout)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::driver::fake::{FakeDriver, FakeElement};

    use super::*;

    const BASE: &str = "https://www.mozilla.org/";

    fn page() -> (Arc<FakeDriver>, Page<FakeDriver>) {
        let driver = Arc::new(FakeDriver::new());
        let page = Page::new(Arc::clone(&driver)).with_base_url(BASE);
        (driver, page)
    }

    #[test]
    fn test_explicit_root_wins_over_locator() {
        let (driver, page) = page();
        driver.register(&By::id("located"), FakeElement::new("located"));

        let explicit = FakeElement::new("explicit");
        let region =
            Region::attach(&page, Some(explicit.clone()), Some(By::id("located"))).unwrap();
        assert_eq!(region.root().unwrap(), explicit);
    }

    #[test]
    fn test_root_unconfigured_is_usage_error() {
        let (_, page) = page();
        let region = Region::new(&page).unwrap();

        let err = region.root().unwrap_err();
        assert!(err.is_usage());

        // Scoped lookups surface the same error.
        assert!(region.find_element(&By::id("x")).unwrap_err().is_usage());
    }

    #[test]
    fn test_root_resolved_by_locator() {
        let (driver, page) = page();
        driver.register(&By::id("form"), FakeElement::new("form"));

        let region = Region::with_root_locator(&page, By::id("form")).unwrap();
        assert_eq!(region.root().unwrap().key, "form");
    }

    #[test]
    fn test_root_resolved_fresh_on_every_access() {
        let (driver, page) = page();
        driver.register(&By::id("form"), FakeElement::new("form-v1"));

        let region = Region::with_root_locator(&page, By::id("form")).unwrap();
        assert_eq!(region.root().unwrap().key, "form-v1");

        // The page re-rendered; the next access sees the new element.
        driver.register(&By::id("form"), FakeElement::new("form-v2"));
        assert_eq!(region.root().unwrap().key, "form-v2");
    }

    #[test]
    fn test_root_locator_not_found_propagates() {
        let (_, page) = page();
        let region = Region::with_root_locator(&page, By::id("missing")).unwrap();
        assert!(region.root().unwrap_err().is_element_error());
    }

    #[test]
    fn test_lookups_scoped_to_root() {
        let (driver, page) = page();
        let root = FakeElement::new("form");
        driver.register(&By::id("form"), root.clone());
        driver.register_scoped(&root, &By::tag("input"), FakeElement::new("form-input"));
        // Same locator also exists unscoped, with a different element.
        driver.register(&By::tag("input"), FakeElement::new("page-input"));

        let region = Region::with_root_locator(&page, By::id("form")).unwrap();
        assert_eq!(region.find_element(&By::tag("input")).unwrap().key, "form-input");
        assert!(region.is_element_present(&By::tag("input")).unwrap());
        assert!(!region.is_element_present(&By::tag("select")).unwrap());
    }

    #[test]
    fn test_displayed_check_scoped_to_root() {
        let (driver, page) = page();
        let root = FakeElement::new("panel");
        driver.register_scoped(&root, &By::id("spinner"), FakeElement::hidden("spinner"));

        let region = Region::with_root(&page, root).unwrap();
        assert!(!region.is_element_displayed(&By::id("spinner")).unwrap());
        assert!(!region.is_element_displayed(&By::id("absent")).unwrap());
    }

    #[test]
    fn test_region_copies_timeout_from_page() {
        let driver = Arc::new(FakeDriver::new());
        let page = Page::new(driver)
            .with_base_url(BASE)
            .with_timeout(Duration::from_secs(3));

        let region = Region::new(&page).unwrap();
        assert_eq!(region.timeout(), Duration::from_secs(3));
    }

    #[derive(Debug)]
    struct NeverReady<'p> {
        region: Region<'p, FakeDriver>,
    }

    impl Loadable for NeverReady<'_> {
        fn loaded(&self) -> bool {
            false
        }

        fn load_wait(&self) -> Wait {
            Wait::new(Duration::ZERO)
        }
    }

    #[test]
    fn test_custom_region_construction_can_time_out() {
        let (_, page) = page();
        let wrapper = NeverReady {
            region: Region::new(&page).unwrap(),
        };
        assert!(wrapper.ready().unwrap_err().is_timeout());
    }

    struct SpinnerGated<'p> {
        region: Region<'p, FakeDriver>,
    }

    impl Loadable for SpinnerGated<'_> {
        fn loaded(&self) -> bool {
            !self
                .region
                .is_element_displayed(&By::id("spinner"))
                .unwrap_or(true)
        }

        fn load_wait(&self) -> Wait {
            Wait::new(self.region.timeout()).with_interval(Duration::from_millis(1))
        }
    }

    #[test]
    fn test_custom_region_loaded_override() {
        let (driver, page) = page();
        let root = FakeElement::new("panel");
        driver.register_scoped(&root, &By::id("spinner"), FakeElement::hidden("spinner"));

        let wrapper = SpinnerGated {
            region: Region::with_root(&page, root).unwrap(),
        };
        let wrapper = wrapper.ready().unwrap();
        assert!(wrapper.loaded());
    }
}
