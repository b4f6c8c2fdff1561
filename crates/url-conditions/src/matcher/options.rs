//! Modifiers written next to a string operator in a conditions file.

use serde::{Deserialize, Serialize};

/// How a URL component is prepared and judged before the operator sees it.
///
/// ```yaml
/// path:
///   - equals: /users/
///     except: "[0-9]+"
/// host:
///   - endsWith: .EXAMPLE.com
///     caseSensitive: false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionOptions {
    /// Compare letters exactly. Applies to regexes too.
    #[serde(default = "exact_case")]
    pub case_sensitive: bool,

    /// Pattern whose matches are removed from the component first, e.g. the
    /// numeric ids of a REST path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<String>,

    /// Accept exactly the components the operator would reject.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub not: bool,
}

fn exact_case() -> bool {
    true
}

impl Default for ConditionOptions {
    fn default() -> Self {
        Self {
            case_sensitive: exact_case(),
            except: None,
            not: false,
        }
    }
}
