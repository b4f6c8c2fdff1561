//! Per-key disjunction of matchers, used for query parameters.

use crate::matcher::SharedMatcher;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Matchers grouped by key, where any one matcher of a key must accept a value.
///
/// A key that was never registered imposes no constraint. Registering a second
/// matcher for a key widens what the key accepts; it never replaces the first.
pub struct MatchersMap<K, V: ?Sized> {
    entries: HashMap<K, Vec<SharedMatcher<V>>>,
}

impl<K, V> MatchersMap<K, V>
where
    K: Eq + Hash,
    V: ?Sized,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Append `matcher` to the matchers registered for `key`.
    pub fn put(&mut self, key: K, matcher: SharedMatcher<V>) {
        self.entries.entry(key).or_default().push(matcher);
    }

    /// True if `key` is unregistered, else whether any of its matchers accepts `value`.
    pub fn matches<Q>(&self, key: &Q, value: Option<&V>) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.entries.get(key) {
            Some(matchers) => matchers.iter().any(|m| m.matches(value)),
            None => true,
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Matchers registered for `key`, in registration order.
    pub fn get<Q>(&self, key: &Q) -> &[SharedMatcher<V>]
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> MatchersMap<K, V>
where
    K: Eq + Hash + Clone,
    V: ?Sized,
{
    /// Put every (key, matcher) pair of `other` into this map.
    pub fn extend(&mut self, other: &MatchersMap<K, V>) {
        for (key, matchers) in &other.entries {
            for matcher in matchers {
                self.put(key.clone(), Arc::clone(matcher));
            }
        }
    }
}

impl<K: Eq + Hash, V: ?Sized> Default for MatchersMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash, V: ?Sized> Clone for MatchersMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.iter().map(Arc::clone).collect()))
                .collect(),
        }
    }
}

impl<K: fmt::Debug, V: ?Sized> fmt::Debug for MatchersMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
