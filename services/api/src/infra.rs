use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use rorschach_cs::config::ProtocolConfig;
use rorschach_cs::error::AppError;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Settings the summary handlers need per request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SummarySettings {
    pub(crate) min_responses: usize,
}

impl From<&ProtocolConfig> for SummarySettings {
    fn from(config: &ProtocolConfig) -> Self {
        Self {
            min_responses: config.min_responses,
        }
    }
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self::from(&ProtocolConfig::default())
    }
}

pub(crate) fn generated_at() -> DateTime<Utc> {
    Utc::now()
}

/// Writes to `path` when given, otherwise to stdout.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, AppError> {
    match path {
        Some(path) => Ok(Box::new(File::create(path)?)),
        None => Ok(Box::new(io::stdout().lock())),
    }
}
