//! Condition sets: every per-field matcher of one mock rule.
//!
//! A [`UrlConditions`] is mutable while a rule is being set up (setters,
//! `join`). Calling [`UrlConditions::freeze`] ends setup and yields a
//! [`FrozenUrlConditions`] that can only be queried and is shared across
//! request-handling threads without locks.

use crate::matcher::{any_str, empty_or_absent, SharedMatcher};
use crate::matchers_list::MatchersList;
use crate::matchers_map::MatchersMap;
use crate::parse::{decode_query, parse_url, ParsedUrl, QueryParam};
use std::sync::Arc;
use tracing::{debug, trace};

/// Acceptance criteria for the URL of a request.
///
/// | field      | combination              | default          |
/// |------------|--------------------------|------------------|
/// | host       | all matchers             | any              |
/// | path       | all matchers             | any              |
/// | port       | all matchers             | any              |
/// | scheme     | single matcher           | any              |
/// | fragment   | single matcher           | empty or absent  |
/// | parameters | any matcher of each name | any              |
///
/// Every registered parameter name must also occur in the query string.
#[derive(Debug, Clone)]
pub struct UrlConditions {
    host: MatchersList<str>,
    path: MatchersList<str>,
    port: MatchersList<u16>,
    scheme: SharedMatcher<str>,
    fragment: SharedMatcher<str>,
    parameters: MatchersMap<String, str>,
}

impl Default for UrlConditions {
    fn default() -> Self {
        Self {
            host: MatchersList::new(),
            path: MatchersList::new(),
            port: MatchersList::new(),
            scheme: any_str(),
            fragment: empty_or_absent(),
            parameters: MatchersMap::new(),
        }
    }
}

impl UrlConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host_conditions(&self) -> &MatchersList<str> {
        &self.host
    }

    pub fn host_conditions_mut(&mut self) -> &mut MatchersList<str> {
        &mut self.host
    }

    pub fn set_host_conditions(&mut self, host: MatchersList<str>) {
        self.host = host;
    }

    pub fn path_conditions(&self) -> &MatchersList<str> {
        &self.path
    }

    pub fn path_conditions_mut(&mut self) -> &mut MatchersList<str> {
        &mut self.path
    }

    pub fn set_path_conditions(&mut self, path: MatchersList<str>) {
        self.path = path;
    }

    pub fn port_conditions(&self) -> &MatchersList<u16> {
        &self.port
    }

    pub fn port_conditions_mut(&mut self) -> &mut MatchersList<u16> {
        &mut self.port
    }

    pub fn set_port_conditions(&mut self, port: MatchersList<u16>) {
        self.port = port;
    }

    pub fn scheme_conditions(&self) -> &SharedMatcher<str> {
        &self.scheme
    }

    pub fn set_scheme_conditions(&mut self, scheme: SharedMatcher<str>) {
        self.scheme = scheme;
    }

    pub fn fragment_conditions(&self) -> &SharedMatcher<str> {
        &self.fragment
    }

    pub fn set_fragment_conditions(&mut self, fragment: SharedMatcher<str>) {
        self.fragment = fragment;
    }

    pub fn parameter_conditions(&self) -> &MatchersMap<String, str> {
        &self.parameters
    }

    pub fn parameter_conditions_mut(&mut self) -> &mut MatchersMap<String, str> {
        &mut self.parameters
    }

    pub fn set_parameter_conditions(&mut self, parameters: MatchersMap<String, str>) {
        self.parameters = parameters;
    }

    /// Check whether `url` satisfies every condition.
    ///
    /// Text that does not parse as a URL never matches.
    pub fn matches(&self, url: &str) -> bool {
        match parse_url(url) {
            Ok(parsed) => self.matches_parsed(&parsed),
            Err(error) => {
                debug!(url, %error, "URL conditions rejected unparsable URL");
                false
            }
        }
    }

    /// Check an already parsed URL.
    pub fn matches_parsed(&self, url: &ParsedUrl) -> bool {
        if !self.host.all_match(url.host.as_deref()) {
            return rejected("host");
        }
        if !self.path.all_match(Some(url.path.as_str())) {
            return rejected("path");
        }
        if !self.port.all_match(url.port.as_ref()) {
            return rejected("port");
        }
        if !self.fragment.matches(url.fragment.as_deref()) {
            return rejected("fragment");
        }
        if !self.scheme.matches(Some(url.scheme.as_str())) {
            return rejected("scheme");
        }

        let params = decode_query(url.query.as_deref());
        if !self.all_parameters_present(&params) {
            return rejected("query (missing parameter)");
        }
        if !self.all_parameters_match(&params) {
            return rejected("query");
        }
        true
    }

    /// Merge `other` into this set: scalar conditions are overridden and
    /// collection conditions are widened.
    pub fn join(&mut self, other: &UrlConditions) {
        self.override_with(other);
        self.widen_with(other);
    }

    /// Replace scheme and fragment conditions with `other`'s.
    pub fn override_with(&mut self, other: &UrlConditions) {
        self.scheme = Arc::clone(&other.scheme);
        self.fragment = Arc::clone(&other.fragment);
    }

    /// Append `other`'s host, path and port matchers and add its parameter matchers.
    pub fn widen_with(&mut self, other: &UrlConditions) {
        self.host.extend(&other.host);
        self.path.extend(&other.path);
        self.port.extend(&other.port);
        self.parameters.extend(&other.parameters);
    }

    /// End setup. The returned handle only supports queries.
    pub fn freeze(self) -> FrozenUrlConditions {
        FrozenUrlConditions {
            inner: Arc::new(self),
        }
    }

    fn all_parameters_present(&self, params: &[QueryParam]) -> bool {
        self.parameters
            .keys()
            .all(|name| params.iter().any(|p| &p.name == name))
    }

    fn all_parameters_match(&self, params: &[QueryParam]) -> bool {
        params
            .iter()
            .all(|p| self.parameters.matches(p.name.as_str(), p.value.as_deref()))
    }
}

fn rejected(field: &'static str) -> bool {
    trace!(field, "URL conditions rejected URL");
    false
}

/// Read-only, shareable condition set.
///
/// Cloning is cheap. To reconfigure, take a copy with
/// [`to_conditions`](Self::to_conditions), change it and freeze it again;
/// readers holding the old handle are unaffected.
#[derive(Debug, Clone)]
pub struct FrozenUrlConditions {
    inner: Arc<UrlConditions>,
}

impl FrozenUrlConditions {
    pub fn matches(&self, url: &str) -> bool {
        self.inner.matches(url)
    }

    pub fn matches_parsed(&self, url: &ParsedUrl) -> bool {
        self.inner.matches_parsed(url)
    }

    /// Mutable copy of these conditions for building a new frozen set.
    pub fn to_conditions(&self) -> UrlConditions {
        UrlConditions::clone(&self.inner)
    }
}

impl AsRef<UrlConditions> for FrozenUrlConditions {
    fn as_ref(&self) -> &UrlConditions {
        &self.inner
    }
}

impl From<UrlConditions> for FrozenUrlConditions {
    fn from(conditions: UrlConditions) -> Self {
        conditions.freeze()
    }
}
