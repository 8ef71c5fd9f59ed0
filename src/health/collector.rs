use std::path::PathBuf;

use super::client::{BackendClient, HttpBackendClient};
use super::metrics::{
    GaugeFamily, MetricsDocument, Sample, CHECK_STATUS, LAST_CHECK_SECONDS, LIVENESS, READINESS,
};
use super::models::CheckMap;
use crate::configuration::Settings;
use crate::error::CollectorError;
use crate::textfile::write_atomic;

pub const LIVENESS_PATH: &str = "/api/health";
pub const READINESS_PATH: &str = "/api/ready";

/// Polls liveness and readiness once and publishes the result as a
/// Prometheus textfile.
pub struct HealthCollector<C: BackendClient> {
    client: C,
    output_path: PathBuf,
}

impl HealthCollector<HttpBackendClient> {
    pub fn from_settings(settings: &Settings) -> Result<Self, CollectorError> {
        let client = HttpBackendClient::new(settings)?;
        Ok(Self::new(client, settings.output_path.clone()))
    }
}

impl<C: BackendClient> HealthCollector<C> {
    pub fn new(client: C, output_path: PathBuf) -> Self {
        Self {
            client,
            output_path,
        }
    }

    /// Probe the backend and build the metrics for a run stamped `timestamp`.
    pub fn collect(&self, timestamp: i64) -> MetricsDocument {
        let mut doc = MetricsDocument::new();

        let liveness = self.client.fetch(LIVENESS_PATH);
        doc.push(
            GaugeFamily::new(LIVENESS, "Liveness probe (1=ok,0=fail)")
                .with_sample(Sample::new(liveness.gauge()).at(timestamp)),
        );

        let readiness = self.client.fetch(READINESS_PATH);
        doc.push(
            GaugeFamily::new(READINESS, "Readiness probe (1=ok,0=fail)")
                .with_sample(Sample::new(readiness.gauge()).at(timestamp)),
        );

        // Bodies that are not `{"checks": {...}}` are skipped without a trace.
        let checks = if readiness.is_ok() {
            CheckMap::parse(&readiness.body)
        } else {
            None
        };
        if let Some(checks) = checks {
            let mut family = GaugeFamily::new(CHECK_STATUS, "Per-check status (1=ok,0!=ok)");
            for (name, ok) in checks.statuses() {
                family.push(
                    Sample::new(i64::from(ok))
                        .with_label("check", name)
                        .at(timestamp),
                );
            }
            doc.push(family);
        }

        doc.push(
            GaugeFamily::new(
                LAST_CHECK_SECONDS,
                "Unix timestamp of last synthetic check",
            )
            .with_sample(Sample::new(timestamp)),
        );

        tracing::info!(
            liveness = liveness.gauge(),
            readiness = readiness.gauge(),
            liveness_status = ?liveness.status,
            readiness_status = ?readiness.status,
            "Synthetic check collected"
        );

        doc
    }

    /// One full run: probe, render, replace the output file.
    /// Returns the timestamp the run was stamped with.
    #[tracing::instrument(name = "Synthetic health check", skip(self), fields(output = %self.output_path.display()))]
    pub fn run(&self) -> Result<i64, CollectorError> {
        let timestamp = chrono::Utc::now().timestamp();
        let doc = self.collect(timestamp);
        write_atomic(&self.output_path, &doc.render())?;
        Ok(timestamp)
    }
}
