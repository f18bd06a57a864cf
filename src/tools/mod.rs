//! External tool abstraction layer
//!
//! Building and uploading the package, and probing for the Python modules
//! that do it, all go through the [ToolRunner] trait. The concrete
//! implementations are:
//!
//! - [process::ProcessRunner]: spawns the real interpreter
//! - [mock::MockRunner]: records invocations for tests
//!
//! Workflow code should depend on the trait so the release sequence can be
//! exercised without Python installed.

pub mod mock;
pub mod process;

pub use mock::MockRunner;
pub use process::ProcessRunner;

use tracing::{debug, info};

use crate::config::ToolsConfig;
use crate::error::{MissingDependency, ReleaseError, Result};

/// A single external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Short label used in messages ("build", "upload")
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(label: impl Into<String>, program: impl Into<String>, args: &[String]) -> Self {
        ToolCommand {
            label: label.into(),
            program: program.into(),
            args: args.to_vec(),
        }
    }

    /// Build step described by the configuration
    pub fn build(tools: &ToolsConfig) -> Self {
        Self::new("build", &tools.python, &tools.build_args)
    }

    /// Upload step described by the configuration
    pub fn upload(tools: &ToolsConfig) -> Self {
        Self::new("upload", &tools.python, &tools.upload_args)
    }

    /// Command line as the user would type it
    pub fn display_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of probing for a Python module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleProbe {
    /// Module imports; carries its `__version__` when it has one
    Found(Option<String>),
    Missing,
}

/// Runs the external tools a release needs
pub trait ToolRunner {
    /// Check whether `module` can be imported by `python`
    fn probe_module(&self, python: &str, module: &str) -> Result<ModuleProbe>;

    /// Run a command to completion, failing on a non-zero exit status
    fn run(&self, command: &ToolCommand) -> Result<()>;
}

/// A required module that was found, with its reported version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundDependency {
    pub name: String,
    pub version: Option<String>,
}

/// Verify every required module is importable.
///
/// All modules are probed before reporting, so a single run lists every
/// missing dependency at once.
pub fn check_dependencies<R: ToolRunner + ?Sized>(
    runner: &R,
    tools: &ToolsConfig,
) -> Result<Vec<FoundDependency>> {
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for module in &tools.required_modules {
        match runner.probe_module(&tools.python, module)? {
            ModuleProbe::Found(version) => {
                info!(module = %module, version = ?version, "dependency found");
                found.push(FoundDependency {
                    name: module.clone(),
                    version,
                });
            }
            ModuleProbe::Missing => {
                debug!(module = %module, "dependency missing");
                missing.push(MissingDependency {
                    name: module.clone(),
                });
            }
        }
    }

    if missing.is_empty() {
        Ok(found)
    } else {
        Err(ReleaseError::MissingDependencies(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_upload_commands_from_defaults() {
        let tools = ToolsConfig::default();

        let build = ToolCommand::build(&tools);
        assert_eq!(build.display_line(), "python -m build");

        let upload = ToolCommand::upload(&tools);
        assert_eq!(upload.display_line(), "python -m twine upload dist/*");
        assert_eq!(upload.label, "upload");
    }

    #[test]
    fn test_check_dependencies_all_present() {
        let runner = MockRunner::new()
            .with_module("build", Some("1.2.1"))
            .with_module("twine", Some("5.0.0"));

        let found = check_dependencies(&runner, &ToolsConfig::default()).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "build");
        assert_eq!(found[0].version.as_deref(), Some("1.2.1"));
    }

    #[test]
    fn test_check_dependencies_reports_every_missing_module() {
        let runner = MockRunner::new();

        let err = check_dependencies(&runner, &ToolsConfig::default()).unwrap_err();
        match err {
            ReleaseError::MissingDependencies(missing) => {
                let names: Vec<_> = missing.iter().map(|d| d.name.as_str()).collect();
                assert_eq!(names, vec!["build", "twine"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_check_dependencies_partial() {
        let runner = MockRunner::new().with_module("build", None);

        let err = check_dependencies(&runner, &ToolsConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Missing dependencies: twine");
        assert_eq!(err.exit_code(), 1);
    }
}
