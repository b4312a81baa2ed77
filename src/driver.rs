//! Driver collaborator contract and element query adapter.
//!
//! The page-object layer never automates a browser itself. It consumes an
//! external driver through the [`Driver`] trait and funnels every element
//! lookup through [`ElementQuery`], a thin pass-through that adds optional
//! root scoping and converts lookup failures into booleans for the
//! presence/displayed checks.
//!
//! # Implementing a backend
//!
//! ```ignore
//! use pagemodel::{By, Driver, Error, Result};
//! use url::Url;
//!
//! struct MyBackend { /* connection state */ }
//!
//! impl Driver for MyBackend {
//!     type Element = MyElementHandle;
//!
//!     fn navigate(&self, url: &Url) -> Result<()> { /* ... */ }
//!     fn find(&self, by: &By, root: Option<&Self::Element>) -> Result<Self::Element> { /* ... */ }
//!     fn find_all(&self, by: &By, root: Option<&Self::Element>) -> Result<Vec<Self::Element>> { /* ... */ }
//!     fn is_displayed(&self, element: &Self::Element) -> Result<bool> { /* ... */ }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use url::Url;

use crate::error::Result;
use crate::locator::By;

// ============================================================================
// Driver Trait
// ============================================================================

/// External browser-automation collaborator.
///
/// Implementations wrap whatever automation backend is in use (WebDriver,
/// CDP, an in-process fake). The page-object layer only issues navigate and
/// read requests through this handle; it never manages the driver's
/// lifecycle.
///
/// The handle is shared: pages hold it in an [`Arc`] and regions copy that
/// handle at construction.
pub trait Driver {
    /// Opaque handle to an element in the automated page.
    ///
    /// Cloning must be cheap; handles are cloned each time a region root is
    /// resolved.
    type Element: Clone;

    /// Navigates the browser to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if navigation fails.
    fn navigate(&self, url: &Url) -> Result<()>;

    /// Finds a single element, optionally scoped beneath `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`](crate::Error::ElementNotFound)
    /// when the locator matches nothing.
    fn find(&self, by: &By, root: Option<&Self::Element>) -> Result<Self::Element>;

    /// Finds all matching elements, optionally scoped beneath `root`.
    ///
    /// An empty match is an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only on backend failure.
    fn find_all(&self, by: &By, root: Option<&Self::Element>) -> Result<Vec<Self::Element>>;

    /// Reports whether `element` is currently displayed.
    ///
    /// # Errors
    ///
    /// Returns an error on backend failure.
    fn is_displayed(&self, element: &Self::Element) -> Result<bool>;
}

// ============================================================================
// ElementQuery
// ============================================================================

/// Element lookup adapter over a shared driver handle.
///
/// Pages query through it unscoped; regions pass their resolved root so
/// lookups stay confined to the region's subtree. The presence and
/// displayed checks absorb [`ElementNotFound`](crate::Error::ElementNotFound)
/// into `false`; `find_element`/`find_elements` propagate it unmodified.
#[derive(Debug)]
pub struct ElementQuery<D: Driver> {
    driver: Arc<D>,
}

impl<D: Driver> Clone for ElementQuery<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
        }
    }
}

impl<D: Driver> ElementQuery<D> {
    /// Creates an adapter over a shared driver handle.
    #[inline]
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// Returns the underlying driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Returns a clone of the shared driver handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> Arc<D> {
        Arc::clone(&self.driver)
    }

    /// Finds a single element.
    ///
    /// # Errors
    ///
    /// Propagates driver errors verbatim, including
    /// [`ElementNotFound`](crate::Error::ElementNotFound).
    pub fn find_element(&self, by: &By, root: Option<&D::Element>) -> Result<D::Element> {
        self.driver.find(by, root)
    }

    /// Finds all matching elements.
    ///
    /// # Errors
    ///
    /// Propagates driver errors verbatim. No match is `Ok(vec![])`.
    pub fn find_elements(&self, by: &By, root: Option<&D::Element>) -> Result<Vec<D::Element>> {
        self.driver.find_all(by, root)
    }

    /// Checks whether an element is present.
    ///
    /// # Errors
    ///
    /// Element lookup failures become `Ok(false)`; any other driver error
    /// propagates.
    pub fn is_element_present(&self, by: &By, root: Option<&D::Element>) -> Result<bool> {
        match self.driver.find(by, root) {
            Ok(_) => Ok(true),
            Err(err) if err.is_element_error() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Checks whether an element is present and displayed.
    ///
    /// # Errors
    ///
    /// Element lookup failures become `Ok(false)`; any other driver error
    /// propagates.
    pub fn is_element_displayed(&self, by: &By, root: Option<&D::Element>) -> Result<bool> {
        match self.driver.find(by, root) {
            Ok(element) => self.driver.is_displayed(&element),
            Err(err) if err.is_element_error() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// Test Fake
// ============================================================================

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory driver used by unit tests across the crate.

    use std::collections::HashMap;

    use parking_lot::Mutex;
    use url::Url;

    use crate::error::{Error, Result};
    use crate::locator::By;

    use super::Driver;

    /// Element handle returned by [`FakeDriver`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FakeElement {
        /// Key the element was registered under.
        pub key: String,
        /// Displayed state reported to `is_displayed`.
        pub displayed: bool,
    }

    impl FakeElement {
        pub fn new(key: impl Into<String>) -> Self {
            Self {
                key: key.into(),
                displayed: true,
            }
        }

        pub fn hidden(key: impl Into<String>) -> Self {
            Self {
                key: key.into(),
                displayed: false,
            }
        }
    }

    /// In-memory driver: elements are registered by locator value, scoped
    /// elements by `"{root}::{value}"`. Navigations are recorded.
    #[derive(Debug, Default)]
    pub struct FakeDriver {
        visited: Mutex<Vec<String>>,
        elements: Mutex<HashMap<String, FakeElement>>,
    }

    impl FakeDriver {
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers an element findable by `by` (unscoped).
        pub fn register(&self, by: &By, element: FakeElement) {
            self.elements.lock().insert(by.value().to_string(), element);
        }

        /// Registers an element findable by `by` beneath `root`.
        pub fn register_scoped(&self, root: &FakeElement, by: &By, element: FakeElement) {
            self.elements
                .lock()
                .insert(format!("{}::{}", root.key, by.value()), element);
        }

        /// Returns the URLs navigated to, in order.
        pub fn visited(&self) -> Vec<String> {
            self.visited.lock().clone()
        }

        fn key_for(by: &By, root: Option<&FakeElement>) -> String {
            match root {
                Some(root) => format!("{}::{}", root.key, by.value()),
                None => by.value().to_string(),
            }
        }
    }

    impl Driver for FakeDriver {
        type Element = FakeElement;

        fn navigate(&self, url: &Url) -> Result<()> {
            self.visited.lock().push(url.to_string());
            Ok(())
        }

        fn find(&self, by: &By, root: Option<&Self::Element>) -> Result<Self::Element> {
            self.elements
                .lock()
                .get(&Self::key_for(by, root))
                .cloned()
                .ok_or_else(|| Error::element_not_found(by.strategy(), by.value()))
        }

        fn find_all(&self, by: &By, root: Option<&Self::Element>) -> Result<Vec<Self::Element>> {
            Ok(self
                .elements
                .lock()
                .get(&Self::key_for(by, root))
                .cloned()
                .into_iter()
                .collect())
        }

        fn is_displayed(&self, element: &Self::Element) -> Result<bool> {
            Ok(element.displayed)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::fake::{FakeDriver, FakeElement};
    use super::*;

    fn query() -> (Arc<FakeDriver>, ElementQuery<FakeDriver>) {
        let driver = Arc::new(FakeDriver::new());
        let query = ElementQuery::new(Arc::clone(&driver));
        (driver, query)
    }

    #[test]
    fn test_find_element_propagates_not_found() {
        let (_, query) = query();
        let err = query.find_element(&By::id("missing"), None).unwrap_err();
        assert!(err.is_element_error());
    }

    #[test]
    fn test_find_elements_empty_is_ok() {
        let (_, query) = query();
        let found = query.find_elements(&By::css(".nope"), None).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_is_element_present_absorbs_not_found() {
        let (driver, query) = query();
        assert!(!query.is_element_present(&By::id("nav"), None).unwrap());

        driver.register(&By::id("nav"), FakeElement::new("nav"));
        assert!(query.is_element_present(&By::id("nav"), None).unwrap());
    }

    #[test]
    fn test_is_element_displayed() {
        let (driver, query) = query();
        driver.register(&By::id("shown"), FakeElement::new("shown"));
        driver.register(&By::id("hidden"), FakeElement::hidden("hidden"));

        assert!(query.is_element_displayed(&By::id("shown"), None).unwrap());
        assert!(!query.is_element_displayed(&By::id("hidden"), None).unwrap());
        assert!(!query.is_element_displayed(&By::id("absent"), None).unwrap());
    }

    #[test]
    fn test_scoped_lookup_is_confined_to_root() {
        let (driver, query) = query();
        let root = FakeElement::new("form");
        driver.register(&By::id("form"), root.clone());
        driver.register_scoped(&root, &By::tag("input"), FakeElement::new("form-input"));

        let scoped = query.find_element(&By::tag("input"), Some(&root)).unwrap();
        assert_eq!(scoped.key, "form-input");

        // The same locator unscoped is not registered.
        assert!(query.find_element(&By::tag("input"), None).is_err());
    }
}
