//! In-place editing of `<field> = "X.Y.Z"` assignments in text files.
//!
//! Only the quoted value is replaced. The assignment prefix, the quote style
//! and every other byte of the file are preserved.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::Version;
use crate::error::{ReleaseError, Result};

/// A `<name> = "<version>"` assignment to locate in a file
#[derive(Debug, Clone)]
pub struct VersionField {
    name: String,
    pattern: Regex,
}

impl VersionField {
    /// Field matching a line of the form `<name> = "<value>"` or `<name> = '<value>'`
    pub fn new(name: &str) -> Result<Self> {
        let pattern = format!(
            r#"(?m)^(?P<prefix>[ \t]*{}[ \t]*=[ \t]*)(?:"(?P<dq>[^"\r\n]*)"|'(?P<sq>[^'\r\n]*)')"#,
            regex::escape(name)
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| ReleaseError::config(format!("Invalid field name '{}': {}", name, e)))?;

        Ok(VersionField {
            name: name.to_string(),
            pattern,
        })
    }

    /// The `version = "..."` assignment of a pyproject.toml
    pub fn manifest() -> Self {
        Self::new("version").expect("static field name is a valid pattern")
    }

    /// The `__version__ = "..."` assignment of a Python module
    pub fn module() -> Self {
        Self::new("__version__").expect("static field name is a valid pattern")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw quoted value of the first matching assignment
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.name("dq").or_else(|| caps.name("sq")))
            .map(|m| m.as_str())
    }

    /// Parse the version held by the first matching assignment
    pub fn extract(&self, text: &str, path: &Path) -> Result<Version> {
        let raw = self.find(text).ok_or_else(|| self.not_found(path))?;
        Version::parse(raw)
    }

    /// Rewrite the matching assignments to hold `version`
    ///
    /// Only assignments whose value equals the first match are touched, so
    /// unrelated `version = "^1.0"` lines in dependency tables keep their value.
    pub fn replace(&self, text: &str, version: &Version, path: &Path) -> Result<String> {
        let current = self.find(text).ok_or_else(|| self.not_found(path))?;

        let rendered = version.to_string();
        let updated = self.pattern.replace_all(text, |caps: &Captures| {
            let (quote, value) = match caps.name("dq") {
                Some(m) => ('"', m.as_str()),
                None => ('\'', caps.name("sq").map_or("", |m| m.as_str())),
            };
            if value != current {
                return caps[0].to_string();
            }
            format!("{}{}{}{}", &caps["prefix"], quote, rendered, quote)
        });

        Ok(updated.into_owned())
    }

    fn not_found(&self, path: &Path) -> ReleaseError {
        ReleaseError::VersionNotFound {
            path: path.to_path_buf(),
            field: self.name.clone(),
        }
    }
}

/// A computed edit, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEdit {
    pub path: PathBuf,
    pub contents: String,
}

/// Reads and rewrites the version assignment of one file
#[derive(Debug, Clone)]
pub struct ManifestEditor {
    path: PathBuf,
    field: VersionField,
}

impl ManifestEditor {
    pub fn new(path: impl Into<PathBuf>, field: VersionField) -> Self {
        ManifestEditor {
            path: path.into(),
            field,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current version recorded in the file
    pub fn read_version(&self) -> Result<Version> {
        let text = self.read()?;
        self.field.extract(&text, &self.path)
    }

    /// Compute the new file contents without touching the disk
    pub fn plan(&self, version: &Version) -> Result<PlannedEdit> {
        let text = self.read()?;
        let contents = self.field.replace(&text, version, &self.path)?;

        debug!(
            path = %self.path.display(),
            field = self.field.name(),
            version = %version,
            "planned version edit"
        );

        Ok(PlannedEdit {
            path: self.path.clone(),
            contents,
        })
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            ReleaseError::config(format!("Cannot read {}: {}", self.path.display(), e))
        })
    }
}

impl PlannedEdit {
    /// Atomically replace the target file with the planned contents
    pub fn apply(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(self.contents.as_bytes())?;
        tmp.flush()?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), "wrote version edit");
        Ok(())
    }
}
