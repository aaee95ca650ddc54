//! HTTP surface tests: the router served on a real socket, backed by a
//! mocked Porkbun API.

mod helpers;

use std::time::{Duration, Instant};

use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::*;
use porkbun_exporter::build_state;
use porkbun_exporter::status_server::serve;

async fn spawn_exporter(config: &porkbun_exporter::Config) -> String {
    let state = build_state(config).expect("state should build");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(serve(listener, state));
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_metrics_endpoint_end_to_end() {
    let server = MockServer::start().await;
    mount_records(
        &server,
        "a.com",
        &[("A", "www", "1.1.1.1"), ("A", "www", "1.0.0.1")],
    )
    .await;
    mount_bundle(&server, "a.com").await;

    let config = test_config(&server, &["a.com"]);
    let base = spawn_exporter(&config).await;

    let response = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();

    let dns_line = body
        .lines()
        .find(|line| line.starts_with("porkbun_dns_type{"))
        .expect("dns series present");
    assert!(dns_line.contains(r#"domain="a.com""#));
    assert!(dns_line.contains(r#"type="A""#));
    assert!(dns_line.contains(r#"name="www""#));
    assert!(dns_line.ends_with(" 2"));
    assert!(body.contains(r#"porkbun_ssl_bundle{domain="a.com"} 1"#));
    assert!(body.contains("porkbun_exporter_build_info{"));
}

#[tokio::test]
async fn test_scrape_timeout_header_bounds_the_scrape() {
    let server = MockServer::start().await;
    mount_records(&server, "slow.com", &[("A", "slow.com", "1.1.1.1")]).await;
    Mock::given(method("POST"))
        .and(path("/ssl/retrieve/slow.com"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(8)))
        .mount(&server)
        .await;

    let config = test_config(&server, &["slow.com"]);
    let base = spawn_exporter(&config).await;

    let start = Instant::now();
    let body = reqwest::Client::new()
        .get(format!("{base}/metrics"))
        .header("X-Prometheus-Scrape-Timeout-Seconds", "1.5")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(start.elapsed() < Duration::from_secs(5));
    // The fast domain is served; the pending SSL probe is simply absent
    assert!(body.contains("porkbun_dns_type{"));
    assert!(!body.contains("porkbun_ssl_bundle{"));
}

#[tokio::test]
async fn test_healthz_never_calls_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server, &["a.com"]);
    let base = spawn_exporter(&config).await;

    let response = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}
