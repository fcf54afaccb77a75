use super::*;
use crate::candidate::{Candidate, Submission};
use rstest::*;

fn config(target: &str) -> RunConfig {
    let mut config = RunConfig::new(target);
    config.validate().unwrap();
    config
}

fn urls(submissions: &[Submission]) -> Vec<String> {
    submissions
        .iter()
        .filter_map(Submission::candidate)
        .map(|c| c.url.clone())
        .collect()
}

fn ready(submissions: &[Submission]) -> Vec<&Candidate> {
    submissions.iter().filter_map(Submission::candidate).collect()
}

#[test]
fn test_registry_order() {
    let handler = TechniqueHandler::new();
    assert_eq!(
        handler.list(),
        vec!["methods", "headers", "endpaths", "midpaths", "capitalization"]
    );
}

#[test]
fn test_select_keeps_run_order() {
    let names = vec!["capitalization".to_string(), "methods".to_string()];
    let handler = TechniqueHandler::select(&names).unwrap();
    assert_eq!(handler.list(), vec!["methods", "capitalization"]);
}

#[test]
fn test_select_rejects_unknown() {
    let names = vec!["methods".to_string(), "smuggling".to_string()];
    let unknown = TechniqueHandler::select(&names).err().unwrap();
    assert_eq!(unknown, vec!["smuggling"]);
}

#[test]
fn test_methods_ignore_override() {
    let mut config = config("http://x/admin");
    config.set_http_method("PUT");
    let wordlists = Wordlists {
        http_methods: vec!["GET".into(), "POST".into(), "TRACE".into()],
        ..Default::default()
    };

    let submissions = methods::Methods.submissions(&config, &wordlists).unwrap();
    let methods: Vec<&str> = submissions
        .iter()
        .filter_map(Submission::candidate)
        .map(|c| c.method.as_str())
        .collect();
    assert_eq!(methods, vec!["GET", "POST", "TRACE"]);
    assert!(ready(&submissions).iter().all(|c| c.url == "http://x/admin"));
    assert_eq!(submissions[2].label(), "TRACE");
}

#[test]
fn test_headers_cartesian_and_simple() {
    let config = config("http://x/admin");
    let wordlists = Wordlists {
        headers: vec!["X-Forwarded-For".into(), "X-Real-IP".into()],
        ips: vec!["127.0.0.1".into(), "10.0.0.1".into(), "::1".into()],
        simple_headers: vec!["X-Custom 1".into(), "X-Original-URL /admin".into()],
        ..Default::default()
    };

    let submissions = headers::Headers.submissions(&config, &wordlists).unwrap();
    assert_eq!(submissions.len(), 2 * 3 + 2);
    assert_eq!(submissions[0].label(), "X-Forwarded-For: 127.0.0.1");
    assert_eq!(submissions[5].label(), "X-Real-IP: ::1");
    assert_eq!(submissions[7].label(), "X-Original-URL: /admin");
}

#[test]
fn test_headers_scenario_d() {
    let config = config("http://x/admin");
    let wordlists = Wordlists {
        headers: vec!["X-Forwarded-For".into()],
        ips: vec!["127.0.0.1".into()],
        simple_headers: vec!["X-Custom 1".into()],
        ..Default::default()
    };

    let submissions = headers::Headers.submissions(&config, &wordlists).unwrap();
    let labels: Vec<&str> = submissions.iter().map(Submission::label).collect();
    assert_eq!(labels, vec!["X-Forwarded-For: 127.0.0.1", "X-Custom: 1"]);
}

#[test]
fn test_headers_append_to_base_set() {
    let mut config = RunConfig::new("http://x/admin");
    config.add_header("Cookie: session=1").unwrap();
    config.set_http_method("post");
    config.validate().unwrap();
    let wordlists = Wordlists {
        headers: vec!["X-Forwarded-For".into()],
        ips: vec!["127.0.0.1".into()],
        ..Default::default()
    };

    let submissions = headers::Headers.submissions(&config, &wordlists).unwrap();
    let candidate = submissions[0].candidate().unwrap();
    let names: Vec<&str> = candidate.headers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["User-Agent", "Cookie", "X-Forwarded-For"]);
    assert_eq!(candidate.method, "POST");
}

#[test]
fn test_headers_operator_ip_replaces_wordlist() {
    let mut config = config("http://x/admin");
    config.set_bypass_ip(Some("192.168.0.1".into()));
    let wordlists = Wordlists {
        headers: vec!["X-Forwarded-For".into(), "X-Client-IP".into()],
        ips: vec!["127.0.0.1".into(), "10.0.0.1".into()],
        ..Default::default()
    };

    let submissions = headers::Headers.submissions(&config, &wordlists).unwrap();
    assert_eq!(submissions.len(), 2);
    assert!(submissions
        .iter()
        .all(|s| s.label().ends_with(": 192.168.0.1")));
}

#[test]
fn test_headers_malformed_simple_header_is_rejected() {
    let config = config("http://x/admin");
    let wordlists = Wordlists {
        simple_headers: vec!["X-Broken".into(), "X-Custom 1".into()],
        ..Default::default()
    };

    let submissions = headers::Headers.submissions(&config, &wordlists).unwrap();
    assert_eq!(submissions.len(), 2);
    assert!(matches!(
        &submissions[0],
        Submission::Rejected { label, .. } if label == "X-Broken"
    ));
    assert!(submissions[1].candidate().is_some());
}

#[rstest]
#[case("http://x/admin", "/.", "http://x/admin/.")]
#[case("http://x/admin/", "..;/", "http://x/admin/..;/")]
#[case("http://x", "%2e", "http://x/%2e")]
fn test_endpaths_concatenate(#[case] target: &str, #[case] entry: &str, #[case] expected: &str) {
    let config = config(target);
    let wordlists = Wordlists {
        end_paths: vec![entry.into()],
        ..Default::default()
    };

    let submissions = endpaths::EndPaths.submissions(&config, &wordlists).unwrap();
    assert_eq!(urls(&submissions), vec![expected]);
    assert_eq!(submissions[0].label(), expected);
}

#[test]
fn test_midpaths_scenario_b() {
    let config = config("http://x/admin/");
    let wordlists = Wordlists {
        mid_paths: vec!["..;/".into(), "%2e%2e/".into()],
        ..Default::default()
    };

    let submissions = midpaths::MidPaths.submissions(&config, &wordlists).unwrap();
    assert_eq!(
        urls(&submissions),
        vec!["http://x/..;/admin/", "http://x/%2e%2e/admin/"]
    );
}

#[test]
fn test_midpaths_without_trailing_slash() {
    let config = config("http://x/api/admin");
    let wordlists = Wordlists {
        mid_paths: vec!["./".into()],
        ..Default::default()
    };

    let submissions = midpaths::MidPaths.submissions(&config, &wordlists).unwrap();
    assert_eq!(urls(&submissions), vec!["http://x/api/./admin"]);
}

#[test]
fn test_midpaths_need_a_segment() {
    let config = config("http://x");
    let wordlists = Wordlists {
        mid_paths: vec!["./".into()],
        ..Default::default()
    };
    assert!(midpaths::MidPaths.submissions(&config, &wordlists).is_err());
}

#[test]
fn test_capitalization_scenario_c() {
    let config = config("http://x/Admin");
    let submissions = capitalization::Capitalization
        .submissions(&config, &Wordlists::default())
        .unwrap();

    assert_eq!(
        urls(&submissions),
        vec![
            "http://x/Admin",
            "http://x/ADmin",
            "http://x/AdMin",
            "http://x/AdmIn",
            "http://x/AdmiN",
        ]
    );
}

#[test]
fn test_capitalization_distinct_characters() {
    assert_eq!(
        capitalization::variants("aba"),
        vec!["AbA".to_string(), "aBa".to_string()]
    );
}

#[test]
fn test_capitalization_trailing_slash() {
    let config = config("http://x/ab/");
    let submissions = capitalization::Capitalization
        .submissions(&config, &Wordlists::default())
        .unwrap();
    assert_eq!(urls(&submissions), vec!["http://x/Ab/", "http://x/aB/"]);
}
