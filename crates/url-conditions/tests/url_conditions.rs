//! Integration tests for URL condition sets.
//!
//! These exercise the public API the way a mocking DSL drives it: build rules
//! through setters or YAML, compose them with `join`, freeze, then match
//! request URLs.

use proptest::prelude::*;
use std::sync::Arc;
use url_conditions::matcher::{any, equal_to, predicate, regex};
use url_conditions::{
    decode_query, MatchersList, MatchersMap, SharedMatcher, UrlConditions, UrlConditionsConfig,
};

fn api_rule() -> UrlConditions {
    let mut conditions = UrlConditions::new();
    conditions.host_conditions_mut().push(equal_to("example.com"));
    conditions.path_conditions_mut().push(equal_to("/api"));
    conditions
        .parameter_conditions_mut()
        .put("id".to_string(), equal_to("42"));
    conditions
}

#[test]
fn test_end_to_end_table() {
    let conditions = api_rule().freeze();

    let cases = [
        ("https://example.com/api?id=42", true),
        ("https://example.com/api?id=43", false),
        ("https://example.com/other?id=42", false),
        ("https://example.com/api", false),
        ("not a url", false),
    ];
    for (url, expected) in cases {
        assert_eq!(conditions.matches(url), expected, "url: {url}");
    }
}

#[test]
fn test_hierarchical_rule_composition() {
    // A server-wide rule narrowed by an endpoint rule
    let mut server = UrlConditions::new();
    server.host_conditions_mut().push(equal_to("api.example.com"));
    server.set_scheme_conditions(equal_to("https"));

    let mut endpoint = UrlConditions::new();
    endpoint.path_conditions_mut().push(regex(r"^/users/\d+$").unwrap());
    endpoint
        .parameter_conditions_mut()
        .put("fields".to_string(), equal_to("name"));
    endpoint
        .parameter_conditions_mut()
        .put("fields".to_string(), equal_to("email"));

    let mut rule = UrlConditions::new();
    rule.join(&server);
    rule.join(&endpoint);
    let rule = rule.freeze();

    // endpoint's default scheme ("any") overrode the server's "https"
    assert!(rule.matches("http://api.example.com/users/7?fields=name"));
    assert!(rule.matches("https://api.example.com/users/7?fields=email"));
    assert!(!rule.matches("https://api.example.com/users/7?fields=age"));
    assert!(!rule.matches("https://api.example.com/users/7"));
    assert!(!rule.matches("https://web.example.com/users/7?fields=name"));
    assert!(!rule.matches("https://api.example.com/users/me?fields=name"));
}

#[test]
fn test_yaml_rule_joined_with_programmatic_rule() {
    let yaml = r#"
host:
  - endsWith: .example.com
query:
  - name: v
    matches: "^[12]$"
"#;
    let mut rule = UrlConditionsConfig::from_yaml_str(yaml)
        .unwrap()
        .compile()
        .unwrap();

    let mut extra = UrlConditions::new();
    extra.port_conditions_mut().push(equal_to(8443u16));
    extra
        .parameter_conditions_mut()
        .put("v".to_string(), equal_to("3"));
    rule.join(&extra);

    assert!(rule.matches("https://a.example.com:8443/?v=1"));
    assert!(rule.matches("https://a.example.com:8443/?v=3"));
    assert!(!rule.matches("https://a.example.com:8443/?v=4"));
    assert!(!rule.matches("https://a.example.com/?v=1"));
}

#[test]
fn test_setters_accept_prebuilt_collections() {
    let hosts: MatchersList<str> = vec![equal_to("localhost")].into();
    let mut params: MatchersMap<String, str> = MatchersMap::new();
    params.put("debug".to_string(), any());

    let mut conditions = UrlConditions::new();
    conditions.set_host_conditions(hosts);
    conditions.set_parameter_conditions(params);

    assert!(conditions.matches("http://localhost/?debug"));
    assert!(!conditions.matches("http://localhost/"));
}

#[test]
fn test_join_is_order_sensitive_for_scalars() {
    let mut strict = UrlConditions::new();
    strict.set_fragment_conditions(equal_to("details"));
    let lenient = UrlConditions::new();

    let mut strict_then_lenient = UrlConditions::new();
    strict_then_lenient.join(&strict);
    strict_then_lenient.join(&lenient);

    let mut lenient_then_strict = UrlConditions::new();
    lenient_then_strict.join(&lenient);
    lenient_then_strict.join(&strict);

    let url = "http://localhost/page#details";
    assert!(!strict_then_lenient.matches(url));
    assert!(lenient_then_strict.matches(url));
}

#[test]
fn test_explicit_default_ports_and_semicolon_queries() {
    let mut rule = UrlConditions::new();
    rule.port_conditions_mut().push(equal_to(443u16));
    rule.parameter_conditions_mut()
        .put("page".to_string(), equal_to("2"));
    let rule = rule.freeze();

    assert!(rule.matches("https://Example.com:443/list?sort=asc;page=2"));
    assert!(!rule.matches("https://example.com/list?sort=asc;page=2"));
    assert!(!rule.matches("https://example.com:443/list?sort=asc;page=3"));
}

fn never() -> SharedMatcher<str> {
    predicate("never", |_: Option<&str>| false)
}

fn url_strategy() -> impl Strategy<Value = String> {
    let escape = "%[0-9A-Fa-f]{2}";
    (
        prop::sample::select(vec!["http", "https", "ftp"]),
        "[a-zA-Z]{1,10}(\\.[a-zA-Z]{2,5}){0,2}",
        prop::option::of(prop_oneof![Just(80u16), Just(443u16), Just(21u16), 1u16..]),
        prop::string::string_regex(&format!("(/([a-zA-Z0-9_.~-]|{escape}){{0,8}}){{0,4}}")).unwrap(),
        prop::collection::vec(
            (
                "[a-z]{1,5}",
                prop::string::string_regex(&format!("([a-zA-Z0-9+]|{escape}){{0,5}}")).unwrap(),
                prop::sample::select(vec!['&', ';']),
            ),
            0..4,
        ),
    )
        .prop_map(|(scheme, host, port, path, params)| {
            let port = port.map(|p| format!(":{p}")).unwrap_or_default();
            let mut query = String::new();
            for (i, (name, value, separator)) in params.iter().enumerate() {
                query.push(if i == 0 { '?' } else { *separator });
                query.push_str(&format!("{name}={value}"));
            }
            format!("{scheme}://{host}{port}{path}{query}")
        })
}

proptest! {
    #[test]
    fn prop_default_conditions_match_valid_urls(url in url_strategy()) {
        prop_assert!(UrlConditions::new().matches(&url));
    }

    #[test]
    fn prop_empty_list_is_vacuously_true(value in ".*") {
        let list: MatchersList<str> = MatchersList::new();
        prop_assert!(list.all_match(Some(value.as_str())));
    }

    #[test]
    fn prop_one_failing_matcher_fails_the_list(value in ".*", extra in 0usize..4) {
        let mut list: MatchersList<str> = MatchersList::new();
        for _ in 0..extra {
            list.push(any());
        }
        list.push(never());
        prop_assert!(!list.all_match(Some(value.as_str())));
    }

    #[test]
    fn prop_unregistered_key_always_matches(key in "[a-z]{1,6}", value in ".*") {
        let mut map: MatchersMap<String, str> = MatchersMap::new();
        map.put(format!("{key}_registered"), never());
        prop_assert!(map.matches(key.as_str(), Some(value.as_str())));
        prop_assert!(map.matches(key.as_str(), None));
    }

    #[test]
    fn prop_two_matchers_per_key_are_a_disjunction(
        first in "[a-c]{1,2}",
        second in "[a-c]{1,2}",
        value in "[a-c]{1,2}",
    ) {
        let m1: SharedMatcher<str> = equal_to(first.clone());
        let m2: SharedMatcher<str> = equal_to(second.clone());
        let mut map: MatchersMap<String, str> = MatchersMap::new();
        map.put("k".to_string(), Arc::clone(&m1));
        map.put("k".to_string(), Arc::clone(&m2));

        let expected = m1.matches(Some(value.as_str())) || m2.matches(Some(value.as_str()));
        prop_assert_eq!(map.matches("k", Some(value.as_str())), expected);
    }

    #[test]
    fn prop_registered_parameter_must_be_present(url in url_strategy()) {
        let mut conditions = UrlConditions::new();
        conditions
            .parameter_conditions_mut()
            .put("required_param".to_string(), any());
        prop_assert!(!conditions.matches(&url));
    }

    #[test]
    fn prop_join_concatenates_lists_in_order(left in 0usize..4, right in 0usize..4) {
        let mut a = UrlConditions::new();
        let mut b = UrlConditions::new();
        let a_hosts: Vec<SharedMatcher<str>> = (0..left).map(|_| any()).collect();
        let b_hosts: Vec<SharedMatcher<str>> = (0..right).map(|_| any()).collect();
        for m in &a_hosts {
            a.host_conditions_mut().push(Arc::clone(m));
        }
        for m in &b_hosts {
            b.host_conditions_mut().push(Arc::clone(m));
        }
        b.set_scheme_conditions(equal_to("https"));

        a.join(&b);

        prop_assert_eq!(a.host_conditions().len(), left + right);
        let expected_order = a_hosts.iter().chain(b_hosts.iter());
        for (actual, expected) in a.host_conditions().iter().zip(expected_order) {
            prop_assert!(Arc::ptr_eq(actual, expected));
        }
        prop_assert!(Arc::ptr_eq(a.scheme_conditions(), b.scheme_conditions()));
    }

    #[test]
    fn prop_decoded_query_preserves_pair_order(
        pairs in prop::collection::vec(("[a-z]{1,4}", "[a-z0-9 ]{0,4}"), 0..6)
    ) {
        let raw: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", v.replace(' ', "+")))
            .collect();
        let raw = raw.join("&");
        let decoded = decode_query(Some(&raw));

        prop_assert_eq!(decoded.len(), pairs.len());
        for (param, (name, value)) in decoded.iter().zip(pairs.iter()) {
            prop_assert_eq!(&param.name, name);
            prop_assert_eq!(param.value.as_deref(), Some(value.as_str()));
        }
    }
}
