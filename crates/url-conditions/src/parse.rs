//! Splitting a URL into the components conditions are evaluated against.

use crate::error::UrlConditionsError;
use std::borrow::Cow;
use url::Url;

/// URL components as seen by matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Lowercase protocol name, e.g. `https`
    pub scheme: String,
    /// Host component, absent for URLs such as `mailto:` or `file:///`.
    ///
    /// Hosts of `http`, `https`, `ws`, `wss`, `ftp` and `file` URLs are
    /// lowercased and IDNA-normalized, so `Example.COM` is seen as
    /// `example.com`. Other schemes keep the host as written.
    pub host: Option<String>,
    /// Port written in the URL, even when it equals the scheme's default.
    /// Absent only when the URL has no port.
    pub port: Option<u16>,
    /// Percent-decoded path (`/` for hierarchical URLs without a path).
    /// Escapes that are not UTF-8 decode to U+FFFD.
    pub path: String,
    /// Raw, still-encoded query string without the leading `?`
    pub query: Option<String>,
    /// Raw fragment without the leading `#`
    pub fragment: Option<String>,
}

/// One decoded `name=value` pair of a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: String,
    /// Absent when the pair was written without `=`, e.g. `?verbose`
    pub value: Option<String>,
}

impl QueryParam {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
        }
    }
}

/// Parse `text` into its components.
pub fn parse_url(text: &str) -> Result<ParsedUrl, UrlConditionsError> {
    let url = Url::parse(text).map_err(|source| UrlConditionsError::InvalidUrl {
        url: text.to_string(),
        source,
    })?;

    // `url` forgets ports equal to the scheme default
    let port = url
        .port()
        .or_else(|| url.host().and_then(|_| written_port(text)));

    Ok(ParsedUrl {
        scheme: url.scheme().to_string(),
        host: url.host_str().map(str::to_string),
        port,
        path: percent_decode(url.path().as_bytes()),
        query: url.query().map(str::to_string),
        fragment: url.fragment().map(str::to_string),
    })
}

/// Port text of the authority in `text`, if any.
fn written_port(text: &str) -> Option<u16> {
    let (_, rest) = text.trim().split_once("://")?;
    let authority = rest.split(['/', '?', '#', '\\']).next()?;
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);
    let port = match host_port.rsplit_once(']') {
        Some((_, after_ipv6)) => after_ipv6.strip_prefix(':')?,
        None => host_port.rsplit_once(':')?.1,
    };
    port.parse().ok()
}

/// Decode an `application/x-www-form-urlencoded` query string.
///
/// Pairs are separated by `&` or `;`, keep their order, and repeated names
/// are kept. Pairs with an empty name are skipped. Malformed escapes such as
/// `%zz` are kept literally and escapes that are not UTF-8 decode to U+FFFD.
pub fn decode_query(raw: Option<&str>) -> Vec<QueryParam> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(['&', ';'])
        .filter_map(|segment| {
            let (name, value) = match segment.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (segment, None),
            };
            let name = decode_component(name);
            if name.is_empty() {
                return None;
            }
            Some(QueryParam {
                name,
                value: value.map(decode_component),
            })
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode(spaced.as_bytes())
}

fn percent_decode(raw: &[u8]) -> String {
    let bytes = urlencoding::decode_binary(raw);
    String::from_utf8_lossy(&bytes).into_owned()
}
