use std::collections::HashMap;
use std::env::VarError;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CollectorError;

pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8201";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const METRICS_DIR: &str = "metrics";
pub const METRICS_FILE: &str = "system_health.prom";

/// Everything a collector run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: String,
    pub timeout: Duration,
    pub output_path: PathBuf,
}

#[derive(Debug, serde::Deserialize)]
struct EnvSettings {
    backend_url: String,
}

impl Settings {
    pub fn new(backend_url: &str, output_path: PathBuf) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            output_path,
        }
    }

    /// Resolve settings from an explicit variable map.
    pub fn from_env_source(
        source: HashMap<String, String>,
        output_path: PathBuf,
    ) -> Result<Self, CollectorError> {
        let settings = config::Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .add_source(config::Environment::default().source(Some(source)))
            .build()?;

        let env: EnvSettings = settings.try_deserialize()?;

        Ok(Self::new(&env.backend_url, output_path))
    }
}

/// `metrics/system_health.prom` next to the given executable.
pub fn output_path_for(executable: &Path) -> PathBuf {
    executable
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(METRICS_DIR)
        .join(METRICS_FILE)
}

/// Variable map holding only `BACKEND_URL`, if it is set.
///
/// The rest of the process environment is never enumerated, so unrelated
/// variables (including non-UTF-8 ones) cannot affect the run.
pub fn backend_url_source(
    value: Result<String, VarError>,
) -> Result<HashMap<String, String>, CollectorError> {
    let mut source = HashMap::new();
    match value {
        Ok(url) => {
            source.insert(BACKEND_URL_VAR.to_string(), url);
        }
        Err(VarError::NotPresent) => {}
        Err(VarError::NotUnicode(_)) => {
            return Err(CollectorError::Config(config::ConfigError::Message(format!(
                "{BACKEND_URL_VAR} is not valid unicode"
            ))));
        }
    }
    Ok(source)
}

pub fn get_configuration() -> Result<Settings, CollectorError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let source = backend_url_source(std::env::var(BACKEND_URL_VAR))?;
    let executable = std::env::current_exe()?;
    Settings::from_env_source(source, output_path_for(&executable))
}
