#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use pyrelease::ui::Prompter;
use pyrelease::Result;
use tempfile::TempDir;

/// Answers prompts from a fixed script and records what was asked.
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[bool]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

pub const MODULE_PATH: &str = "orunnerpool/__init__.py";

/// Temporary Python project with a pyproject.toml and a version module.
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new(version: &str) -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");

        fs::write(
            dir.path().join("pyproject.toml"),
            format!(
                "[project]\nname = \"orunnerpool-worker\"\nversion = \"{}\"\ndescription = \"Worker\"\n",
                version
            ),
        )
        .expect("Could not write pyproject.toml");

        fs::create_dir_all(dir.path().join("orunnerpool")).expect("Could not create package");
        fs::write(
            dir.path().join(MODULE_PATH),
            format!("\"\"\"Worker package.\"\"\"\n\n__version__ = \"{}\"\n", version),
        )
        .expect("Could not write __init__.py");

        TestProject { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("Could not read project file")
    }

    pub fn write(&self, relative: &str, contents: &str) {
        fs::write(self.path(relative), contents).expect("Could not write project file");
    }
}
