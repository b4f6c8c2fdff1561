//! Ordered conjunction of matchers for a single URL field.

use crate::matcher::SharedMatcher;
use std::fmt;
use std::sync::Arc;

/// Matchers that must all accept a value.
///
/// An empty list accepts everything. Lists only grow: a rule stacks
/// constraints with [`push`](Self::push) and a `join` appends another
/// rule's constraints with [`extend`](Self::extend).
pub struct MatchersList<T: ?Sized> {
    matchers: Vec<SharedMatcher<T>>,
}

impl<T: ?Sized> MatchersList<T> {
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    pub fn push(&mut self, matcher: SharedMatcher<T>) {
        self.matchers.push(matcher);
    }

    /// True when every matcher accepts `value` (vacuously true when empty).
    pub fn all_match(&self, value: Option<&T>) -> bool {
        self.matchers.iter().all(|m| m.matches(value))
    }

    /// Append `other`'s matchers after this list's, keeping their order.
    pub fn extend(&mut self, other: &MatchersList<T>) {
        self.matchers.extend(other.matchers.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedMatcher<T>> {
        self.matchers.iter()
    }
}

impl<T: ?Sized> Default for MatchersList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for MatchersList<T> {
    fn clone(&self) -> Self {
        Self {
            matchers: self.matchers.iter().map(Arc::clone).collect(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for MatchersList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.matchers).finish()
    }
}

impl<T: ?Sized> From<Vec<SharedMatcher<T>>> for MatchersList<T> {
    fn from(matchers: Vec<SharedMatcher<T>>) -> Self {
        Self { matchers }
    }
}

impl<T: ?Sized> FromIterator<SharedMatcher<T>> for MatchersList<T> {
    fn from_iter<I: IntoIterator<Item = SharedMatcher<T>>>(iter: I) -> Self {
        Self {
            matchers: iter.into_iter().collect(),
        }
    }
}
