//! Port operators.
//!
//! A URL without an explicit port (or with its scheme's default port spelled
//! out) has an absent port, which only `exists: false` accepts.

use super::Matcher;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Inclusive port range as written in conditions files.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct PortRange {
    pub from: u16,
    pub to: u16,
}

/// Port operator for declarative conditions.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PortMatcher {
    /// Exact port
    Equals { equals: u16 },
    /// Inclusive port range
    Range { range: PortRange },
    /// Explicit port presence check
    Exists { exists: bool },
}

/// Compiled port operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledPortMatcher {
    Equals(u16),
    Range(RangeInclusive<u16>),
    Exists(bool),
}

impl CompiledPortMatcher {
    pub fn compile(matcher: &PortMatcher) -> Result<Self, ConfigError> {
        match *matcher {
            PortMatcher::Equals { equals } => Ok(CompiledPortMatcher::Equals(equals)),
            PortMatcher::Range {
                range: PortRange { from, to },
            } => {
                if from > to {
                    return Err(ConfigError::InvalidPortRange { from, to });
                }
                Ok(CompiledPortMatcher::Range(from..=to))
            }
            PortMatcher::Exists { exists } => Ok(CompiledPortMatcher::Exists(exists)),
        }
    }
}

impl Matcher<u16> for CompiledPortMatcher {
    fn matches(&self, value: Option<&u16>) -> bool {
        match (self, value) {
            (CompiledPortMatcher::Exists(should_exist), v) => *should_exist == v.is_some(),
            (_, None) => false,
            (CompiledPortMatcher::Equals(port), Some(v)) => port == v,
            (CompiledPortMatcher::Range(range), Some(v)) => range.contains(v),
        }
    }
}
