mod client;
mod collector;
pub mod metrics;
mod models;

pub use client::{BackendClient, HttpBackendClient, USER_AGENT};
pub use collector::{HealthCollector, LIVENESS_PATH, READINESS_PATH};
pub use metrics::{GaugeFamily, MetricsDocument, Sample};
pub use models::{CheckMap, ProbeResult};
