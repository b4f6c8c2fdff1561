//! URL condition sets for HTTP client mocks.
//!
//! A mock rule describes which request URLs it applies to with a
//! [`UrlConditions`]: matchers for host, path, port, scheme, fragment and
//! query parameters. Rules composed hierarchically are merged with
//! [`UrlConditions::join`], after which the set is frozen and queried once
//! per incoming request.
//!
//! ```
//! use url_conditions::matcher::equal_to;
//! use url_conditions::UrlConditions;
//!
//! let mut conditions = UrlConditions::new();
//! conditions.host_conditions_mut().push(equal_to("example.com"));
//! conditions.path_conditions_mut().push(equal_to("/api"));
//! conditions
//!     .parameter_conditions_mut()
//!     .put("id".to_string(), equal_to("42"));
//!
//! let conditions = conditions.freeze();
//! assert!(conditions.matches("https://example.com/api?id=42"));
//! assert!(!conditions.matches("https://example.com/api"));
//! ```

pub mod config;
pub mod matcher;

mod conditions;
mod error;
mod matchers_list;
mod matchers_map;
mod parse;

pub use conditions::{FrozenUrlConditions, UrlConditions};
pub use config::{QueryCondition, UrlConditionsConfig};
pub use error::{ConfigError, UrlConditionsError};
pub use matcher::{Matcher, SharedMatcher};
pub use matchers_list::MatchersList;
pub use matchers_map::MatchersMap;
pub use parse::{decode_query, parse_url, ParsedUrl, QueryParam};
