use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::error::{Result, TraceError};

/// Runs a traceroute and returns its raw text output.
pub trait Tracer: Send + Sync {
    fn trace(&self, target: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Invokes the platform traceroute binary with numeric-only output.
#[derive(Debug, Clone)]
pub struct SystemTracer {
    program: String,
    windows_style: bool,
    max_hops: Option<u8>,
    timeout: Duration,
}

impl SystemTracer {
    pub fn new(program: Option<&str>, max_hops: Option<u8>, timeout: Duration) -> Self {
        let windows_style = cfg!(target_os = "windows");
        let program = program
            .map(|p| p.to_string())
            .unwrap_or_else(|| default_program(windows_style).to_string());

        Self {
            program,
            windows_style,
            max_hops,
            timeout,
        }
    }

    fn args(&self, target: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if self.windows_style {
            args.push("-d".to_string());
            if let Some(hops) = self.max_hops {
                args.push("-h".to_string());
                args.push(hops.to_string());
            }
        } else {
            args.push("-n".to_string());
            if let Some(hops) = self.max_hops {
                args.push("-m".to_string());
                args.push(hops.to_string());
            }
        }
        args.push(target.to_string());
        args
    }
}

fn default_program(windows_style: bool) -> &'static str {
    if windows_style {
        "tracert"
    } else {
        "traceroute"
    }
}

/// Rejects targets the traceroute binary would read as an option.
pub fn validate_target(target: &str) -> Result<&str> {
    let target = target.trim();
    if target.is_empty() {
        return Err(TraceError::InvalidTarget("target must not be empty".to_string()));
    }
    if target.starts_with('-') {
        return Err(TraceError::InvalidTarget(format!(
            "'{}' must not start with '-'",
            target
        )));
    }
    if target.chars().any(char::is_whitespace) {
        return Err(TraceError::InvalidTarget(format!(
            "'{}' must not contain whitespace",
            target
        )));
    }
    Ok(target)
}

impl Tracer for SystemTracer {
    async fn trace(&self, target: &str) -> Result<String> {
        let target = validate_target(target)?;
        let args = self.args(target);
        debug!("Running {} {}", self.program, args.join(" "));

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!("Failed to start {}: {}", self.program, e);
                TraceError::Io(e)
            })?;

        // Dropping the wait future on timeout kills the child.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| TraceError::Timeout(self.timeout))??;

        if !output.status.success() {
            warn!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
