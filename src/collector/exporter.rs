//! Exporter process metadata.

use async_trait::async_trait;

use super::{build_fq_name, Collector, MetricDescriptor, Observation, ObservationSink, ScrapeContext};
use crate::config::{EXPORTER_SUBSYSTEM, METRIC_NAMESPACE};

/// Git commit the binary was built from; set `GIT_COMMIT` at build time.
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");
/// Kernel release of the build host; set `OS_VERSION` at build time.
pub const OS_VERSION: Option<&str> = option_env!("OS_VERSION");

/// Publishes build information and the exporter's start time.
pub struct ExporterCollector {
    version: String,
    git_commit: String,
    os_version: String,
    start_time: i64,
    build_info: MetricDescriptor,
    start_time_desc: MetricDescriptor,
}

impl ExporterCollector {
    /// `start_time` is a UNIX timestamp in seconds.
    pub fn new(version: &str, git_commit: &str, os_version: &str, start_time: i64) -> Self {
        ExporterCollector {
            version: version.to_string(),
            git_commit: git_commit.to_string(),
            os_version: os_version.to_string(),
            start_time,
            build_info: MetricDescriptor::new(
                build_fq_name(METRIC_NAMESPACE, EXPORTER_SUBSYSTEM, "build_info"),
                "A metric with a constant '1' value labeled by version, git commit and OS version",
                &["version", "git_commit", "os_version"],
            ),
            start_time_desc: MetricDescriptor::new(
                build_fq_name(METRIC_NAMESPACE, EXPORTER_SUBSYSTEM, "start_time"),
                "Exporter start time in Unix epoch seconds",
                &[],
            ),
        }
    }

    /// Builds the collector from compile-time metadata, starting now.
    pub fn from_build_env() -> Self {
        if GIT_COMMIT.is_none() {
            log::info!("[main] GitCommit value unchanged: expected to be set during build");
        }
        if OS_VERSION.is_none() {
            log::info!("[main] OSVersion value unchanged: expected to be set during build");
        }
        Self::new(
            env!("CARGO_PKG_VERSION"),
            GIT_COMMIT.unwrap_or_default(),
            OS_VERSION.unwrap_or_default(),
            chrono::Utc::now().timestamp(),
        )
    }
}

#[async_trait]
impl Collector for ExporterCollector {
    fn name(&self) -> &'static str {
        "ExporterCollector"
    }

    fn describe(&self) -> Vec<MetricDescriptor> {
        vec![self.build_info.clone(), self.start_time_desc.clone()]
    }

    async fn collect(&self, _ctx: &ScrapeContext, sink: &ObservationSink) {
        sink.emit(Observation::new(
            self.build_info.name.clone(),
            1.0,
            vec![
                self.version.clone(),
                self.git_commit.clone(),
                self.os_version.clone(),
            ],
        ));
        sink.emit(Observation::new(
            self.start_time_desc.name.clone(),
            self.start_time as f64,
            vec![],
        ));
    }
}
