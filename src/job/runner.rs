//! Running the external generator as a child process.

use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Why a generator run produced no usable output stream.
#[derive(Debug)]
pub enum JobError {
    /// The process could not be started at all.
    Spawn(std::io::Error),
    /// Non-zero exit; carries the captured stderr text (may be empty).
    Failed { code: Option<i32>, stderr: String },
    /// The deadline expired; the child has been killed.
    TimedOut(Duration),
}

impl std::fmt::Display for JobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobError::Spawn(e) => write!(f, "failed to start generator: {}", e),
            JobError::Failed { stderr, .. } => {
                let msg = stderr.trim();
                if msg.is_empty() {
                    write!(f, "generation failed")
                } else {
                    write!(f, "{}", msg)
                }
            }
            JobError::TimedOut(limit) => {
                write!(f, "generation timed out after {}s", limit.as_secs())
            }
        }
    }
}

impl std::error::Error for JobError {}

/// Run the generator to completion and return its stdout text.
///
/// The child inherits the server's own working directory, so script paths
/// resolve relative to the server root, never a client-supplied location.
///
/// Output is never interpreted before the process has terminated: both
/// streams are collected in full, then the exit code decides success. The
/// child is spawned with `kill_on_drop`, so the deadline expiring (or the
/// caller's future being dropped on client disconnect) terminates it rather
/// than leaving it running.
pub async fn run_generator<S: AsRef<OsStr>>(
    command: &str,
    args: &[S],
    timeout: Duration,
) -> Result<String, JobError> {
    let child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(JobError::Spawn)?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(JobError::Spawn)?,
        Err(_) => {
            log::error!("generator timed out after {}s: {}", timeout.as_secs(), command);
            return Err(JobError::TimedOut(timeout));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        log::error!(
            "generator exited with code {:?}; stderr: {}",
            output.status.code(),
            stderr.trim()
        );
        return Err(JobError::Failed {
            code: output.status.code(),
            stderr,
        });
    }

    Ok(stdout)
}
