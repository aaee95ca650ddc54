//! Log output of a scrape with a failing domain.
//!
//! Kept in its own test binary because the `log` facade accepts one logger per
//! process.

mod helpers;

use std::sync::{Arc, Mutex};

use log::{Level, Log, Metadata, Record};
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

use helpers::*;
use porkbun_exporter::initialization::init_client;
use porkbun_exporter::{build_orchestrator, PorkbunClient, RegistrarApi};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

#[tokio::test]
async fn test_failed_domain_logs_one_warning() {
    log::set_logger(&LOGGER).expect("no other logger in this binary");
    log::set_max_level(log::LevelFilter::Warn);

    let server = MockServer::start().await;
    mount_records(&server, "a.com", &[("A", "www", "1.1.1.1")]).await;
    mount_api_error(&server, "dns", "b.com", "Invalid domain.").await;
    mount_bundle(&server, "a.com").await;
    mount_bundle(&server, "b.com").await;

    let config = test_config(&server, &["a.com", "b.com"]);
    let http = init_client(&config).expect("client should build");
    let client: Arc<dyn RegistrarApi> = Arc::new(PorkbunClient::new(
        http,
        config.api_base_url.as_str(),
        config.credentials.clone(),
    ));
    let result = build_orchestrator(&config, client)
        .collect(CancellationToken::new())
        .await;
    assert_eq!(result.stats.total_errors(), 1);

    let records = LOGGER.records.lock().expect("logger lock").clone();
    let b_failures: Vec<&(Level, String)> = records
        .iter()
        .filter(|(_, msg)| msg.contains("b.com") && msg.contains("retrieve records"))
        .collect();
    assert_eq!(b_failures.len(), 1, "captured: {records:?}");
    assert_eq!(b_failures[0].0, Level::Warn);
    assert!(b_failures[0].1.contains("Invalid domain."));
    assert!(!records.iter().any(|(_, msg)| msg.contains("a.com")));
}
