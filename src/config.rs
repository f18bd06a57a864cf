use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "pyrelease.toml";

/// Represents the complete configuration for pyrelease.
///
/// Names the files whose version is rewritten and the commands used to build
/// and upload the package.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("pyproject.toml")
}

fn default_version_module() -> PathBuf {
    PathBuf::from("orunnerpool/__init__.py")
}

/// Files holding the package version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    /// Holds the canonical `version = "..."` line
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Holds the `__version__ = "..."` line
    #[serde(default = "default_version_module")]
    pub version_module: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            manifest: default_manifest(),
            version_module: default_version_module(),
        }
    }
}

impl FilesConfig {
    /// Resolve both paths against a project root
    pub fn resolve(&self, root: &Path) -> (PathBuf, PathBuf) {
        (root.join(&self.manifest), root.join(&self.version_module))
    }
}

fn default_python() -> String {
    "python".to_string()
}

fn default_build_args() -> Vec<String> {
    vec!["-m".to_string(), "build".to_string()]
}

fn default_upload_args() -> Vec<String> {
    vec![
        "-m".to_string(),
        "twine".to_string(),
        "upload".to_string(),
        "dist/*".to_string(),
    ]
}

fn default_required_modules() -> Vec<String> {
    vec!["build".to_string(), "twine".to_string()]
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

/// External tool invocations.
///
/// Build and upload both run through the same interpreter; the arguments
/// are passed verbatim without shell expansion.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_python")]
    pub python: String,

    #[serde(default = "default_build_args")]
    pub build_args: Vec<String>,

    #[serde(default = "default_upload_args")]
    pub upload_args: Vec<String>,

    #[serde(default = "default_required_modules")]
    pub required_modules: Vec<String>,

    /// Where the build leaves its artifacts; only used in messages
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            python: default_python(),
            build_args: default_build_args(),
            upload_args: default_upload_args(),
            required_modules: default_required_modules(),
            dist_dir: default_dist_dir(),
        }
    }
}

impl Config {
    /// Reject configurations that could never drive a release
    pub fn validate(&self) -> Result<()> {
        if self.files.manifest.as_os_str().is_empty() {
            return Err(ReleaseError::config("files.manifest must not be empty"));
        }
        if self.files.version_module.as_os_str().is_empty() {
            return Err(ReleaseError::config(
                "files.version_module must not be empty",
            ));
        }
        if self.tools.python.trim().is_empty() {
            return Err(ReleaseError::config("tools.python must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pyrelease.toml` in current directory
/// 3. `pyrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let candidate = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    let config = match candidate {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let config_str = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            toml::from_str(&config_str).map_err(|e| {
                ReleaseError::config(format!("Invalid {}: {}", path.display(), e))
            })?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
