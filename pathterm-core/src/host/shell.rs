//! Detached shell command execution.
//!
//! Commands are handed to the platform shell (`sh -c` / `cmd /C`) and left
//! running. Callers only learn whether the spawn itself worked.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Handle to a spawned, detached process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    /// OS process id of the shell, if the platform reported one.
    pub pid: Option<u32>,
}

/// Failure to start a shell command.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("working directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to spawn `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs shell command lines without waiting for them.
#[async_trait]
pub trait ShellExecutor: Send + Sync {
    /// Spawn `command` through the platform shell, optionally in
    /// `working_directory`, and return once the process has started.
    async fn spawn_detached(
        &self,
        command: &str,
        working_directory: Option<&Path>,
    ) -> Result<ProcessHandle, SpawnError>;
}

/// [`ShellExecutor`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

#[async_trait]
impl ShellExecutor for SystemShell {
    async fn spawn_detached(
        &self,
        command: &str,
        working_directory: Option<&Path>,
    ) -> Result<ProcessHandle, SpawnError> {
        let mut cmd = shell_command(command);

        if let Some(dir) = working_directory {
            if !dir.is_dir() {
                return Err(SpawnError::MissingDirectory(dir.to_path_buf()));
            }
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|source| SpawnError::Io {
            command: command.to_string(),
            source,
        })?;

        let pid = child.id();
        info!(command, ?pid, "Spawned detached shell command");

        // Reap the shell when it exits; the result is only logged.
        let command = command.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    debug!(command = %command, "Shell command exited");
                }
                Ok(status) => {
                    warn!(command = %command, code = ?status.code(), "Shell command exited with failure");
                }
                Err(e) => {
                    warn!(command = %command, error = %e, "Failed to wait for shell command");
                }
            }
        });

        Ok(ProcessHandle { pid })
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // cmd.exe does its own quote parsing; pass the line through untouched.
    let mut cmd = std::process::Command::new("cmd");
    cmd.arg("/C").raw_arg(command);
    Command::from(cmd)
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}
