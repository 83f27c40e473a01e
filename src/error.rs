use std::fmt;
use std::time::Duration;

/// Errors surfaced by a traceroute request
#[derive(Debug)]
pub enum TraceError {
    /// The traceroute process did not finish in time
    Timeout(Duration),
    /// Target rejected before invoking the process
    InvalidTarget(String),
    /// Spawning or reading the process failed
    Io(std::io::Error),
    /// Configuration error
    Config(String),
    /// Other errors
    Other(String),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Timeout(limit) => {
                write!(f, "Traceroute timed out after {}s", limit.as_secs())
            }
            TraceError::InvalidTarget(msg) => write!(f, "Invalid target: {}", msg),
            TraceError::Io(err) => write!(f, "IO error: {}", err),
            TraceError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TraceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        TraceError::Io(err)
    }
}

impl From<anyhow::Error> for TraceError {
    fn from(err: anyhow::Error) -> Self {
        TraceError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;
