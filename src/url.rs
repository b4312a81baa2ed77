//! Seed URL construction.
//!
//! Composes a templated URL with a base URL and keyword-style arguments
//! into a final absolute URL with a query string:
//!
//! 1. `{name}` placeholders in the template are substituted from the
//!    arguments (a placeholder with no matching argument is an error).
//! 2. The template result is resolved against the base URL with standard
//!    RFC 3986 reference resolution — an absolute template result wins
//!    outright and the base is discarded.
//! 3. Arguments not named as a `{placeholder}` in the original template
//!    text are appended to the query string in insertion order, one pair
//!    per element for sequence values. [`QueryValue::Absent`] arguments
//!    never appear at all.
//!
//! Query strings use application/x-www-form-urlencoded encoding: space
//! becomes `+`, reserved characters are percent-encoded.
//!
//! # Example
//!
//! ```
//! use pagemodel::{build_seed_url, UrlArgs};
//!
//! let args = UrlArgs::new().with("key", "a value");
//! let url = build_seed_url(Some("https://www.mozilla.org/"), None, &args)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(url.as_str(), "https://www.mozilla.org/?key=a+value");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Placeholder Pattern
// ============================================================================

/// `{name}` placeholder tokens. Recomputed per resolution from the template
/// text, which is the source of truth; the match set is never cached.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

// ============================================================================
// QueryValue
// ============================================================================

/// Value of a URL argument.
///
/// An explicit tagged union instead of a runtime scalar-or-sequence check:
/// the builder's branching over it is exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// No value. Never substituted into the template text and never
    /// appended to the query string.
    Absent,

    /// A single value, appended as one `name=value` pair.
    Scalar(String),

    /// A sequence of values, appended as one `name=value` pair per
    /// element, preserving element order.
    Multi(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        Self::Scalar(v)
    }
}

impl From<&String> for QueryValue {
    fn from(v: &String) -> Self {
        Self::Scalar(v.clone())
    }
}

macro_rules! scalar_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for QueryValue {
                fn from(v: $t) -> Self {
                    Self::Scalar(v.to_string())
                }
            }
        )*
    };
}

scalar_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    /// `None` becomes [`QueryValue::Absent`].
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Absent, Into::into)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(v: Vec<String>) -> Self {
        Self::Multi(v)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(v: Vec<&str>) -> Self {
        Self::Multi(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for QueryValue {
    fn from(v: &[&str]) -> Self {
        Self::Multi(v.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryValue {
    fn from(v: [&str; N]) -> Self {
        Self::Multi(v.iter().map(|s| (*s).to_string()).collect())
    }
}

// ============================================================================
// UrlArgs
// ============================================================================

/// Insertion-ordered URL arguments.
///
/// Order is significant: appended query parameters follow the order the
/// arguments were inserted in.
///
/// # Example
///
/// ```
/// use pagemodel::{QueryValue, UrlArgs};
///
/// let args = UrlArgs::new()
///     .with("locale", "en-US")
///     .with("tags", ["a", "b"])
///     .with("skipped", QueryValue::Absent);
///
/// assert_eq!(args.len(), 3);
/// assert_eq!(args.get("locale"), Some(&QueryValue::Scalar("en-US".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlArgs {
    entries: Vec<(String, QueryValue)>,
}

impl UrlArgs {
    /// Creates an empty argument list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an argument, builder style.
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets an argument, replacing any existing value in place.
    ///
    /// Replacing keeps the argument's original insertion position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value for `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the number of arguments.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no arguments are set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for UrlArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.set(name, value);
        }
        args
    }
}

// ============================================================================
// Seed URL Builder
// ============================================================================

/// Builds the seed URL from a base URL, an optional template, and URL
/// arguments.
///
/// Returns `Ok(None)` when there is no usable URL: no template and a
/// missing or empty base, or a template that resolves to the empty string
/// with no base. In that case no query processing happens at all.
///
/// # Errors
///
/// - [`Error::MissingTemplateKey`] for a `{placeholder}` with no matching
///   argument.
/// - [`Error::Url`] when the working URL cannot be parsed, including a
///   relative template result with no base URL (the result must be a
///   fully-formed absolute URL).
pub fn build_seed_url(
    base_url: Option<&str>,
    template: Option<&str>,
    args: &UrlArgs,
) -> Result<Option<Url>> {
    let base = base_url.filter(|b| !b.is_empty());

    let working = match template {
        Some(template) => {
            let reference = expand_template(template, args)?;
            match base {
                Some(base) => Url::parse(base)?.join(&reference)?.to_string(),
                None => reference,
            }
        }
        None => match base {
            Some(base) => base.to_string(),
            None => return Ok(None),
        },
    };

    if working.is_empty() {
        return Ok(None);
    }

    let mut url = Url::parse(&working)?;

    // Existing pairs keep their original order; appended arguments follow
    // in insertion order.
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    for (name, value) in args.iter() {
        // The check is against the original template text: a name that
        // appears as a placeholder was already consumed by substitution.
        if placeholder_named(template, name) {
            continue;
        }
        match value {
            QueryValue::Absent => {}
            QueryValue::Scalar(v) => pairs.push((name.to_string(), v.clone())),
            QueryValue::Multi(vs) => {
                pairs.extend(vs.iter().map(|v| (name.to_string(), v.clone())));
            }
        }
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&pairs);
    }

    Ok(Some(url))
}

/// Substitutes every `{name}` placeholder in `template` from `args`.
///
/// [`QueryValue::Absent`] substitutes as the empty string; a
/// [`QueryValue::Multi`] substitutes comma-joined.
fn expand_template(template: &str, args: &UrlArgs) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(token) = caps.get(0) else { continue };
        let key = &caps[1];

        out.push_str(&template[last..token.start()]);
        match args.get(key) {
            None => return Err(Error::missing_template_key(key)),
            Some(QueryValue::Absent) => {}
            Some(QueryValue::Scalar(v)) => out.push_str(v),
            Some(QueryValue::Multi(vs)) => out.push_str(&vs.join(",")),
        }
        last = token.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// Returns `true` if `{name}` literally occurs in the template text.
fn placeholder_named(template: Option<&str>, name: &str) -> bool {
    template.is_some_and(|t| t.contains(&format!("{{{name}}}")))
}

// ============================================================================
// Tests
// ============================================================================
