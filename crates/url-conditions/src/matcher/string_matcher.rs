//! String conditions on host, path, scheme, fragment and query values.
//!
//! [`StringCondition`] is how a condition is written in a conditions file;
//! [`CompiledStringCondition`] is the [`Matcher`] built from it, with every
//! regex compiled and literal operands case-folded up front.

use super::options::ConditionOptions;
use super::Matcher;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Operator applied to one URL component.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StringMatcher {
    Equals(String),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    /// Unanchored regex search, e.g. `matches: "^/v[0-9]+/"`
    Matches(String),
    /// `exists: false` accepts only URLs without the component, such as a
    /// query parameter that is missing its `=value`.
    Exists(bool),
}

/// An operator plus its [`ConditionOptions`], flattened into one mapping.
///
/// ```yaml
/// endsWith: .JSON
/// caseSensitive: false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StringCondition {
    #[serde(flatten)]
    pub matcher: StringMatcher,
    #[serde(flatten, default)]
    pub options: ConditionOptions,
}

impl From<StringMatcher> for StringCondition {
    fn from(matcher: StringMatcher) -> Self {
        Self {
            matcher,
            options: ConditionOptions::default(),
        }
    }
}

#[derive(Debug, Clone)]
enum Operator {
    Equals(String),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    Pattern(Regex),
    Exists(bool),
}

/// Runtime form of a [`StringCondition`].
#[derive(Debug, Clone)]
pub struct CompiledStringCondition {
    operator: Operator,
    case_sensitive: bool,
    except: Option<Regex>,
    not: bool,
}

impl CompiledStringCondition {
    pub fn compile(condition: &StringCondition) -> Result<Self, regex::Error> {
        let case_sensitive = condition.options.case_sensitive;
        let build = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(!case_sensitive)
                .build()
        };
        let literal = |operand: &str| {
            if case_sensitive {
                operand.to_string()
            } else {
                operand.to_lowercase()
            }
        };

        let operator = match &condition.matcher {
            StringMatcher::Equals(operand) => Operator::Equals(literal(operand)),
            StringMatcher::Contains(operand) => Operator::Contains(literal(operand)),
            StringMatcher::StartsWith(operand) => Operator::StartsWith(literal(operand)),
            StringMatcher::EndsWith(operand) => Operator::EndsWith(literal(operand)),
            StringMatcher::Matches(pattern) => Operator::Pattern(build(pattern)?),
            StringMatcher::Exists(expected) => Operator::Exists(*expected),
        };
        let except = condition.options.except.as_deref().map(build).transpose()?;

        Ok(Self {
            operator,
            case_sensitive,
            except,
            not: condition.options.not,
        })
    }

    fn accepts(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return matches!(self.operator, Operator::Exists(false));
        };
        let value = match &self.except {
            Some(except) => except.replace_all(value, ""),
            None => Cow::Borrowed(value),
        };
        let folded = if self.case_sensitive {
            value
        } else {
            Cow::Owned(value.to_lowercase())
        };

        match &self.operator {
            Operator::Equals(operand) => folded == operand.as_str(),
            Operator::Contains(operand) => folded.contains(operand.as_str()),
            Operator::StartsWith(operand) => folded.starts_with(operand.as_str()),
            Operator::EndsWith(operand) => folded.ends_with(operand.as_str()),
            Operator::Pattern(regex) => regex.is_match(&folded),
            Operator::Exists(expected) => *expected,
        }
    }
}

impl Matcher<str> for CompiledStringCondition {
    fn matches(&self, value: Option<&str>) -> bool {
        self.accepts(value) != self.not
    }
}
