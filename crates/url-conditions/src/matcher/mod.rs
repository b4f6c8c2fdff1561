//! Matcher primitives.
//!
//! A [`Matcher`] is a pure predicate over one, possibly absent, value of a URL
//! field. `None` stands for "the URL has no such component": no host, no
//! explicit port, no fragment, or a query parameter written without `=`.
//!
//! # Module Structure
//!
//! - `string_matcher` - Declarative string operators (equals, contains, regex, ...)
//! - `port_matcher` - Declarative port operators (equals, range, exists)
//! - `options` - Modifiers of string operators (caseSensitive, except, not)

mod options;
mod port_matcher;
mod string_matcher;

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

pub use options::ConditionOptions;
pub use port_matcher::{CompiledPortMatcher, PortMatcher, PortRange};
pub use string_matcher::{CompiledStringCondition, StringCondition, StringMatcher};

/// A predicate over a single field value.
pub trait Matcher<T: ?Sized>: fmt::Debug + Send + Sync {
    /// Check whether `value` is accepted. `None` means the value is absent.
    fn matches(&self, value: Option<&T>) -> bool;
}

/// Reference-counted matcher, shared between condition sets after a `join`.
pub type SharedMatcher<T> = Arc<dyn Matcher<T>>;

/// Accepts every value, including an absent one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Any;

impl<T: ?Sized> Matcher<T> for Any {
    #[inline]
    fn matches(&self, _value: Option<&T>) -> bool {
        true
    }
}

/// Accepts a present value equal to the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualTo<V>(pub V);

impl<T, V> Matcher<T> for EqualTo<V>
where
    T: ?Sized + PartialEq,
    V: Borrow<T> + fmt::Debug + Send + Sync,
{
    #[inline]
    fn matches(&self, value: Option<&T>) -> bool {
        value.is_some_and(|v| v == <V as Borrow<T>>::borrow(&self.0))
    }
}

/// Accepts an absent value or an empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyOrAbsent;

impl Matcher<str> for EmptyOrAbsent {
    #[inline]
    fn matches(&self, value: Option<&str>) -> bool {
        value.map_or(true, str::is_empty)
    }
}

/// Inverts another matcher.
pub struct Not<T: ?Sized>(pub SharedMatcher<T>);

impl<T: ?Sized> Clone for Not<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> fmt::Debug for Not<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Not").field(&self.0).finish()
    }
}

impl<T: ?Sized> Matcher<T> for Not<T> {
    fn matches(&self, value: Option<&T>) -> bool {
        !self.0.matches(value)
    }
}

/// Custom predicate with a human-readable description for `Debug` output.
pub struct FnMatcher<F> {
    description: String,
    predicate: F,
}

impl<F> FnMatcher<F> {
    pub fn new(description: impl Into<String>, predicate: F) -> Self {
        Self {
            description: description.into(),
            predicate,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl<F> fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnMatcher").field(&self.description).finish()
    }
}

impl<T, F> Matcher<T> for FnMatcher<F>
where
    T: ?Sized,
    F: Fn(Option<&T>) -> bool + Send + Sync,
{
    fn matches(&self, value: Option<&T>) -> bool {
        (self.predicate)(value)
    }
}

static ANY_STR: Lazy<SharedMatcher<str>> = Lazy::new(|| Arc::new(Any));
static EMPTY_OR_ABSENT: Lazy<SharedMatcher<str>> = Lazy::new(|| Arc::new(EmptyOrAbsent));

/// Matcher accepting anything.
pub fn any<T: ?Sized + 'static>() -> SharedMatcher<T> {
    Arc::new(Any)
}

/// Shared "any" string matcher, the default scheme condition.
pub fn any_str() -> SharedMatcher<str> {
    Arc::clone(&ANY_STR)
}

/// Shared "empty or absent" matcher, the default fragment condition.
pub fn empty_or_absent() -> SharedMatcher<str> {
    Arc::clone(&EMPTY_OR_ABSENT)
}

/// Matcher accepting values equal to `value`.
///
/// ```
/// use url_conditions::matcher::{equal_to, SharedMatcher};
///
/// let host: SharedMatcher<str> = equal_to("example.com");
/// assert!(host.matches(Some("example.com")));
/// assert!(!host.matches(None));
/// ```
pub fn equal_to<T, V>(value: V) -> SharedMatcher<T>
where
    T: ?Sized + PartialEq + 'static,
    V: Borrow<T> + fmt::Debug + Send + Sync + 'static,
{
    Arc::new(EqualTo(value))
}

/// Matcher accepting strings matched by the regex `pattern`.
pub fn regex(pattern: &str) -> Result<SharedMatcher<str>, regex::Error> {
    let condition = StringCondition::from(StringMatcher::Matches(pattern.to_string()));
    Ok(Arc::new(CompiledStringCondition::compile(&condition)?))
}

/// Matcher rejecting whatever `inner` accepts.
pub fn not<T: ?Sized + 'static>(inner: SharedMatcher<T>) -> SharedMatcher<T> {
    Arc::new(Not(inner))
}

/// Matcher backed by a closure.
pub fn predicate<T, F>(description: impl Into<String>, f: F) -> SharedMatcher<T>
where
    T: ?Sized + 'static,
    F: Fn(Option<&T>) -> bool + Send + Sync + 'static,
{
    Arc::new(FnMatcher::new(description, f))
}
