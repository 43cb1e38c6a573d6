//! System command seams.
//!
//! The installer never calls `std::process::Command` directly. It asks a
//! [`CommandProbe`] whether an optional tool is installed and hands every
//! subprocess to a [`CommandRunner`], so tests can stub both.

use crate::error::{InstallError, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Answers whether a program can be found on `PATH`.
pub trait CommandProbe {
    fn is_available(&self, program: &str) -> bool;
}

/// Outcome of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit status as reported by the OS.
    pub status: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutcome {
    /// Turn a failed outcome into an error.
    pub fn into_result(self, program: &Path) -> Result<()> {
        if self.success {
            return Ok(());
        }

        Err(InstallError::CommandFailed {
            program: program.display().to_string(),
            status: self.status,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Runs a program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, optionally inside `cwd`, and wait for it.
    ///
    /// # Errors
    /// Returns an error if the process could not be spawned. A non-zero exit
    /// is reported through [`CommandOutcome::success`], not as an error.
    fn run(&self, program: &Path, args: &[OsString], cwd: Option<&Path>) -> Result<CommandOutcome>;
}

/// Probe backed by `which`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl CommandProbe for SystemProbe {
    fn is_available(&self, program: &str) -> bool {
        let found = Command::new("which")
            .arg(program)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        debug!("Command {} available: {}", program, found);
        found
    }
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> Result<CommandOutcome> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        debug!("Running {} {:?}", program.display(), args);

        let output = command
            .output()
            .map_err(|e| InstallError::io_action("spawn command", e, program))?;

        Ok(CommandOutcome {
            success: output.status.success(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_probe_missing_command() {
        assert!(!SystemProbe.is_available("definitely-not-a-real-command-7f3a"));
    }

    #[test]
    fn test_outcome_into_result() {
        let ok = CommandOutcome {
            success: true,
            status: "exit status: 0".to_string(),
            stderr: String::new(),
        };
        assert!(ok.into_result(Path::new("tool")).is_ok());

        let failed = CommandOutcome {
            success: false,
            status: "exit status: 2".to_string(),
            stderr: "bad input\n".to_string(),
        };
        match failed.into_result(Path::new("tool")) {
            Err(InstallError::CommandFailed { program, stderr, .. }) => {
                assert_eq!(program, "tool");
                assert_eq!(stderr, "bad input");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_runner_spawn_failure() {
        let missing = PathBuf::from("/nonexistent/bin/helper");
        let result = SystemRunner.run(&missing, &[], None);
        assert!(matches!(result, Err(InstallError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_reports_exit_status() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = SystemRunner
            .run(
                Path::new("/bin/sh"),
                &[OsString::from("-c"), OsString::from("echo oops >&2; exit 3")],
                Some(temp_dir.path()),
            )
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.stderr.trim(), "oops");
    }
}
