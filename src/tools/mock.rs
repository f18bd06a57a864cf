use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{ReleaseError, Result};
use crate::tools::{ModuleProbe, ToolCommand, ToolRunner};

/// Mock runner for testing without spawning processes
#[derive(Debug, Default)]
pub struct MockRunner {
    modules: HashMap<String, Option<String>>,
    failures: HashMap<String, i32>,
    invocations: RefCell<Vec<ToolCommand>>,
}

impl MockRunner {
    /// Create a runner with no installed modules
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a module as importable, optionally with a version
    pub fn with_module(mut self, name: impl Into<String>, version: Option<&str>) -> Self {
        self.modules
            .insert(name.into(), version.map(str::to_string));
        self
    }

    /// Make commands with this label exit with `code`
    pub fn failing(mut self, label: impl Into<String>, code: i32) -> Self {
        self.failures.insert(label.into(), code);
        self
    }

    /// Every command passed to `run`, in order
    pub fn invocations(&self) -> Vec<ToolCommand> {
        self.invocations.borrow().clone()
    }

    /// Labels of the commands passed to `run`, in order
    pub fn labels(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|c| c.label.clone())
            .collect()
    }
}

impl ToolRunner for MockRunner {
    fn probe_module(&self, _python: &str, module: &str) -> Result<ModuleProbe> {
        Ok(match self.modules.get(module) {
            Some(version) => ModuleProbe::Found(version.clone()),
            None => ModuleProbe::Missing,
        })
    }

    fn run(&self, command: &ToolCommand) -> Result<()> {
        self.invocations.borrow_mut().push(command.clone());

        match self.failures.get(&command.label) {
            Some(code) => Err(ReleaseError::ToolFailed {
                tool: command.label.clone(),
                code: Some(*code),
            }),
            None => Ok(()),
        }
    }
}
