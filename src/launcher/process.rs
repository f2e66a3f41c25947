//! Child process execution

use crate::error::{LauncherError, LauncherResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs the resolved binary
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` to completion and return its exit code
    async fn run(&self, program: &Path, args: &[String]) -> LauncherResult<i32>;
}

/// Runs programs as child processes sharing this process's stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    /// Create a new runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> LauncherResult<i32> {
        debug!("Executing: {} {:?}", program.display(), args);

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| LauncherError::ProcessSpawn {
                command: program.display().to_string(),
                source: e,
            })?;

        status
            .code()
            .ok_or_else(|| LauncherError::ProcessSignaled(program.display().to_string()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_exit_code() {
        let runner = SystemProcessRunner::new();
        let args = vec!["-c".to_string(), "exit 7".to_string()];
        assert_eq!(runner.run(Path::new("/bin/sh"), &args).await.unwrap(), 7);
        assert_eq!(runner.run(Path::new("/bin/sh"), &["-c".into(), "true".into()]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let err = SystemProcessRunner::new()
            .run(Path::new("/nonexistent/mycli"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, LauncherError::ProcessSpawn { .. }), "{err}");
    }

    #[tokio::test]
    async fn signal_is_reported() {
        let args = vec!["-c".to_string(), "kill -9 $$".to_string()];
        let err = SystemProcessRunner::new()
            .run(Path::new("/bin/sh"), &args)
            .await
            .unwrap_err();
        assert!(matches!(err, LauncherError::ProcessSignaled(_)), "{err}");
    }
}
