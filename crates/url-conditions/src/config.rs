//! Declarative URL conditions loaded from YAML or JSON.
//!
//! ```yaml
//! host:
//!   - equals: example.com
//! path:
//!   - startsWith: /api
//! port:
//!   - range: {from: 8000, to: 8999}
//! scheme:
//!   equals: https
//! query:
//!   - name: id
//!     equals: "42"
//!   - name: id
//!     matches: "^4[0-9]$"
//! ```
//!
//! Omitted fields keep their defaults. Repeated `query` entries for a name
//! widen what that name accepts.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conditions::UrlConditions;
use crate::error::ConfigError;
use crate::matcher::{
    CompiledPortMatcher, CompiledStringCondition, PortMatcher, SharedMatcher, StringCondition,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct UrlConditionsConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<StringCondition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<StringCondition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port: Vec<PortMatcher>,

    /// Replaces the default "any scheme" condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<StringCondition>,

    /// Replaces the default "no fragment" condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<StringCondition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryCondition>,
}

/// Condition on one query parameter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QueryCondition {
    pub name: String,
    #[serde(flatten)]
    pub condition: StringCondition,
}

impl UrlConditionsConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a YAML conditions file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Build the runtime condition set, compiling every regex.
    pub fn compile(&self) -> Result<UrlConditions, ConfigError> {
        let mut conditions = UrlConditions::new();

        for condition in &self.host {
            conditions
                .host_conditions_mut()
                .push(compile_string("host", condition)?);
        }
        for condition in &self.path {
            conditions
                .path_conditions_mut()
                .push(compile_string("path", condition)?);
        }
        for matcher in &self.port {
            conditions
                .port_conditions_mut()
                .push(Arc::new(CompiledPortMatcher::compile(matcher)?));
        }
        if let Some(scheme) = &self.scheme {
            conditions.set_scheme_conditions(compile_string("scheme", scheme)?);
        }
        if let Some(fragment) = &self.fragment {
            conditions.set_fragment_conditions(compile_string("fragment", fragment)?);
        }
        for query in &self.query {
            conditions
                .parameter_conditions_mut()
                .put(query.name.clone(), compile_string("query", &query.condition)?);
        }

        debug!(
            host = self.host.len(),
            path = self.path.len(),
            port = self.port.len(),
            query = self.query.len(),
            "Compiled URL conditions"
        );
        Ok(conditions)
    }
}

fn compile_string(
    field: &'static str,
    condition: &StringCondition,
) -> Result<SharedMatcher<str>, ConfigError> {
    let compiled = CompiledStringCondition::compile(condition)
        .map_err(|source| ConfigError::InvalidRegex { field, source })?;
    Ok(Arc::new(compiled))
}
