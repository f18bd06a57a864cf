//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive yes/no prompts

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_dependencies, display_dry_run, display_error, display_missing_dependencies,
    display_status, display_success, display_upload_skipped, display_version_change,
};

/// Asked before any file is modified.
pub const PROCEED_PROMPT: &str = "Do you want to proceed?";

/// Asked after a successful build, before uploading.
pub const UPLOAD_PROMPT: &str = "Do you want to upload to PyPI?";

/// Source of yes/no answers.
pub trait Prompter {
    /// Ask `prompt` and report whether the answer was affirmative
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Only a case-insensitive `y` counts as yes. Just the line terminator is
/// stripped, so surrounding spaces, an empty line or end of input are no.
pub fn is_affirmative(response: &str) -> bool {
    let answer = response
        .strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(response);
    answer.eq_ignore_ascii_case("y")
}

/// Prompts on an output stream and reads answers from an input stream.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        ConsolePrompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompter { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{} [y/N]: ", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        self.input.read_line(&mut input)?;

        Ok(is_affirmative(&input))
    }
}
