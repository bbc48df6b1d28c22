//! Integration tests for the robots.txt gate
//!
//! These tests use wiremock to serve robots.txt files and exercise the
//! full fetch, parse, cache, and evaluate cycle over real HTTP.

use robots_gate::config::{Config, EvaluationConfig, FetcherConfig, UserAgentConfig};
use robots_gate::{RobotsError, RobotsTxt};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PHP_NET_ROBOTS: &str = "\
# robots.txt for http://php.net/

User-agent: *
Disallow: /backend/
Disallow: /distributions/
Disallow: /stats/
Disallow: /server-status/
Disallow: /source.php
Disallow: /search.php
Disallow: /mod.php
Disallow: /manual/add-note.php
Disallow: /manual/vote-note.php

Disallow: /harming/humans
Disallow: /ignoring/human/orders
Disallow: /harm/to/self";

/// Creates a test configuration identifying as `token`
fn create_test_config(token: &str) -> Config {
    Config {
        user_agent: UserAgentConfig {
            token: token.to_string(),
        },
        fetcher: FetcherConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        evaluation: EvaluationConfig::default(),
    }
}

/// Starts a mock server serving `body` as its robots.txt, expecting `fetches` requests
async fn serve_robots(body: &str, fetches: u64) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(fetches)
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_get_disallowed_php_net() {
    let mock_server = serve_robots(PHP_NET_ROBOTS, 1).await;
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    let disallowed = robots.get_disallowed(&mock_server.uri()).await.unwrap();

    assert_eq!(
        disallowed,
        vec![
            "backend",
            "distributions",
            "stats",
            "server-status",
            "source.php",
            "search.php",
            "mod.php",
            "manual/add-note.php",
            "manual/vote-note.php",
            "harming/humans",
            "ignoring/human/orders",
            "harm/to/self",
        ]
    );
}

#[tokio::test]
async fn test_is_allowed_php_net() {
    // Every check below shares one origin, so robots.txt is fetched once
    let mock_server = serve_robots(PHP_NET_ROBOTS, 1).await;
    let base_url = mock_server.uri();
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    let cases = [
        ("/backend/", false),
        ("/distributions", false),
        ("/stats", false),
        ("/source.php", false),
        ("/manual/vote-note.php", false),
        ("/manual/other.php", true),
        ("/support.php", true),
        ("/sources.php", true),
    ];

    for (page, expected) in cases {
        let url = format!("{}{}", base_url, page);
        assert_eq!(
            robots.is_allowed(&url).await.unwrap(),
            expected,
            "unexpected verdict for {}",
            url
        );
    }

    assert_eq!(robots.cache().len(), 1);
}

#[tokio::test]
async fn test_repeated_checks_fetch_once() {
    let mock_server = serve_robots("User-agent: *\nDisallow: /backend\nDisallow: /stats", 1).await;
    let url = format!("{}/backend/", mock_server.uri());
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    let first = robots.is_allowed(&url).await.unwrap();
    let second = robots.is_allowed(&url).await.unwrap();

    assert!(!first);
    assert_eq!(first, second);
    // wiremock verifies the single fetch when the server is dropped
}

#[tokio::test]
async fn test_disallow_root_blocks_everything() {
    let mock_server = serve_robots("User-agent: *\nDisallow: /", 1).await;
    let base_url = mock_server.uri();
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    for page in ["/", "/index.html", "/deep/nested/page", "/?q=1"] {
        let url = format!("{}{}", base_url, page);
        assert!(!robots.is_allowed(&url).await.unwrap(), "{} should be blocked", url);
    }
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header("user-agent", "RobotsTxtBot/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut robots = RobotsTxt::from_config(&create_test_config("Unused/0.1")).unwrap();
    robots.set_user_agent("RobotsTxtBot/1.0");

    let url = format!("{}/private/data", mock_server.uri());
    assert!(!robots.is_allowed(&url).await.unwrap());
}

#[tokio::test]
async fn test_missing_robots_txt_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();
    let url = format!("{}/page", mock_server.uri());
    let expected_robots_url = format!("{}/robots.txt", mock_server.uri());

    // Failures are not cached: the second call fetches again
    for _ in 0..2 {
        match robots.is_allowed(&url).await {
            Err(RobotsError::MissingRobotsTxt { url, .. }) => assert_eq!(url, expected_robots_url),
            other => panic!("expected MissingRobotsTxt, got {:?}", other),
        }
    }

    assert!(robots.cache().is_empty());
}

#[tokio::test]
async fn test_server_error_is_missing_robots_txt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();
    let result = robots.get_disallowed(&mock_server.uri()).await;

    assert!(matches!(result, Err(RobotsError::MissingRobotsTxt { .. })));
}

#[tokio::test]
async fn test_unreachable_host_is_missing_robots_txt() {
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    let result = robots.is_allowed("https://no-such-site.invalid/page").await;

    match result {
        Err(RobotsError::MissingRobotsTxt { url, .. }) => {
            assert_eq!(url, "https://no-such-site.invalid/robots.txt");
        }
        other => panic!("expected MissingRobotsTxt, got {:?}", other),
    }
}

#[tokio::test]
async fn test_origins_are_cached_separately() {
    let site_a = serve_robots("User-agent: *\nDisallow: /a", 1).await;
    let site_b = serve_robots("User-agent: *\nDisallow: /b", 1).await;
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    assert!(!robots.is_allowed(&format!("{}/a", site_a.uri())).await.unwrap());
    assert!(robots.is_allowed(&format!("{}/b", site_a.uri())).await.unwrap());
    assert!(robots.is_allowed(&format!("{}/a", site_b.uri())).await.unwrap());
    assert!(!robots.is_allowed(&format!("{}/b", site_b.uri())).await.unwrap());

    assert_eq!(robots.cache().len(), 2);
}

#[tokio::test]
async fn test_specific_agent_group() {
    let content = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nDisallow: /admin";
    let mock_server = serve_robots(content, 1).await;
    let base_url = mock_server.uri();
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    let page = format!("{}/page", base_url);
    assert!(robots.is_allowed(&page).await.unwrap());
    assert!(!robots.is_allowed_for(&page, "badbot").await.unwrap());
    assert!(robots.is_allowed_for(&page, "GoodBot").await.unwrap());

    let disallowed = robots.get_disallowed_for(&base_url, "BadBot").await.unwrap();
    assert_eq!(disallowed, vec!["/"]);
}

#[tokio::test]
async fn test_wildcards_and_anchors() {
    let content = "User-agent: *\nDisallow: */account\nDisallow: /*.php$\nDisallow: /tmp*";
    let mock_server = serve_robots(content, 1).await;
    let base_url = mock_server.uri();
    let robots = RobotsTxt::from_config(&create_test_config("TestBot/1.0")).unwrap();

    let cases = [
        ("/user/account", false),
        ("/user/account/other-stuff", false),
        ("/index.php", false),
        ("/index.php/extra", true),
        ("/tmpfiles/x", false),
        ("/account", true),
        ("/about", true),
    ];

    for (page, expected) in cases {
        let url = format!("{}{}", base_url, page);
        assert_eq!(robots.is_allowed(&url).await.unwrap(), expected, "{}", url);
    }
}

#[tokio::test]
async fn test_honor_allow_from_config() {
    let content = "User-agent: *\nDisallow: /private\nAllow: /private/public";
    let mock_server = serve_robots(content, 1).await;

    let mut config = create_test_config("TestBot/1.0");
    config.evaluation.honor_allow = true;
    let robots = RobotsTxt::from_config(&config).unwrap();

    let public = format!("{}/private/public/page", mock_server.uri());
    let secret = format!("{}/private/secret", mock_server.uri());
    assert!(robots.is_allowed(&public).await.unwrap());
    assert!(!robots.is_allowed(&secret).await.unwrap());
}
