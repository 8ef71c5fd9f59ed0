use std::fmt;
use std::path::PathBuf;

/// Failures that escape a collector run.
///
/// Probe failures never show up here: a refused connection or a broken
/// readiness body becomes a `0` gauge, not an error. Only configuration and
/// filesystem problems abort the run.
#[derive(Debug)]
pub enum CollectorError {
    Config(config::ConfigError),
    HttpClient(reqwest::Error),
    CreateDir { path: PathBuf, source: std::io::Error },
    Persist { path: PathBuf, source: std::io::Error },
    Io(std::io::Error),
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "Configuration error: {err}"),
            Self::HttpClient(err) => write!(f, "HTTP client error: {err}"),
            Self::CreateDir { path, source } => {
                write!(f, "Failed to create {}: {source}", path.display())
            }
            Self::Persist { path, source } => {
                write!(f, "Failed to replace {}: {source}", path.display())
            }
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::HttpClient(err) => Some(err),
            Self::CreateDir { source, .. } | Self::Persist { source, .. } => Some(source),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<config::ConfigError> for CollectorError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpClient(err)
    }
}
