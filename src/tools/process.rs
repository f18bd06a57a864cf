use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{ReleaseError, Result};
use crate::tools::{ModuleProbe, ToolCommand, ToolRunner};

/// Runs tools as real child processes.
///
/// Build and upload output streams straight to the terminal so the user sees
/// the tool's own progress and prompts.
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner
    }
}

impl ToolRunner for ProcessRunner {
    fn probe_module(&self, python: &str, module: &str) -> Result<ModuleProbe> {
        if which::which(python).is_err() {
            warn!(python = %python, "python interpreter not found on PATH");
            return Ok(ModuleProbe::Missing);
        }

        let script = format!(
            "import {m}; print(getattr({m}, '__version__', ''))",
            m = module
        );
        let output = Command::new(python)
            .args(["-c", script.as_str()])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ReleaseError::ToolLaunch {
                tool: python.to_string(),
                source: e,
            })?;

        if !output.status.success() {
            debug!(
                module = %module,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "module import failed"
            );
            return Ok(ModuleProbe::Missing);
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(ModuleProbe::Found(if version.is_empty() {
            None
        } else {
            Some(version)
        }))
    }

    fn run(&self, command: &ToolCommand) -> Result<()> {
        debug!(command = %command.display_line(), "running tool");

        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|e| ReleaseError::ToolLaunch {
                tool: command.label.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(ReleaseError::ToolFailed {
                tool: command.label.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_fails_to_launch() {
        let runner = ProcessRunner::new();
        let command = ToolCommand::new("build", "/nonexistent/path/to/python", &[]);

        let err = runner.run(&command).unwrap_err();
        assert!(matches!(err, ReleaseError::ToolLaunch { .. }));
        assert!(err.to_string().contains("Failed to launch build"));
    }

    #[test]
    fn test_missing_interpreter_reports_module_missing() {
        let runner = ProcessRunner::new();
        let probe = runner
            .probe_module("definitely-not-a-python-interpreter", "build")
            .unwrap();
        assert_eq!(probe, ModuleProbe::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_propagated() {
        let runner = ProcessRunner::new();
        let command = ToolCommand::new(
            "build",
            "sh",
            &["-c".to_string(), "exit 7".to_string()],
        );

        let err = runner.run(&command).unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command() {
        let runner = ProcessRunner::new();
        let command = ToolCommand::new("build", "true", &[]);
        assert!(runner.run(&command).is_ok());
    }
}
