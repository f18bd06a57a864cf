//! Release workflow orchestration
//!
//! Holds the release sequence separately from CLI argument parsing so it can
//! be driven programmatically (and from tests) without clap.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::domain::{BumpKind, Version};
use crate::error::Result;
use crate::manifest::{ManifestEditor, VersionField};
use crate::tools::{check_dependencies, ToolCommand, ToolRunner};
use crate::ui::{self, Prompter, PROCEED_PROMPT, UPLOAD_PROMPT};

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Which version component to increment
    pub bump: BumpKind,

    /// Project root that configured file paths are relative to
    pub root: PathBuf,

    /// Preview mode - no prompts, edits or tool runs
    pub dry_run: bool,
}

/// How a release run ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStage {
    /// User declined the first prompt; nothing was modified
    Cancelled,
    /// Dry run; nothing was modified
    Previewed,
    /// Files rewritten and package built; upload declined
    Built,
    /// Files rewritten, package built and uploaded
    Uploaded,
}

/// Result of a release run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub previous: Version,
    pub version: Version,
    pub stage: ReleaseStage,
}

/// Main release workflow
///
/// 1. Check the Python build and upload modules are installed
/// 2. Read the current version from the manifest and compute the next one
/// 3. Confirm, then rewrite the manifest and the version module
/// 4. Build the package
/// 5. Confirm, then upload it
///
/// Both files are read and their edits computed before either is written, so
/// a missing or malformed version in either file aborts with nothing changed.
/// Failures after the first write are not rolled back.
pub fn run_release_workflow<R, P>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    runner: &R,
    prompter: &mut P,
) -> Result<WorkflowResult>
where
    R: ToolRunner + ?Sized,
    P: Prompter + ?Sized,
{
    let found = check_dependencies(runner, &config.tools)?;
    ui::display_dependencies(&found);

    let (manifest_path, module_path) = config.files.resolve(&args.root);
    let manifest = ManifestEditor::new(&manifest_path, VersionField::manifest());
    let module = ManifestEditor::new(&module_path, VersionField::module());

    let previous = manifest.read_version()?;
    let version = previous.bump(args.bump)?;
    info!(from = %previous, to = %version, kind = %args.bump, "computed release version");

    ui::display_version_change(&previous, &version);

    let edits = vec![manifest.plan(&version)?, module.plan(&version)?];

    if args.dry_run {
        let files: Vec<String> = edits
            .iter()
            .map(|edit| display_path(&edit.path, &args.root))
            .collect();
        ui::display_dry_run(&files, &version);
        return Ok(WorkflowResult {
            previous,
            version,
            stage: ReleaseStage::Previewed,
        });
    }

    if !prompter.confirm(PROCEED_PROMPT)? {
        println!("Release cancelled");
        return Ok(WorkflowResult {
            previous,
            version,
            stage: ReleaseStage::Cancelled,
        });
    }

    for edit in &edits {
        edit.apply()?;
        ui::display_success(&format!(
            "Updated {} with version {}",
            display_path(&edit.path, &args.root),
            version
        ));
    }

    ui::display_status("Building package...");
    runner.run(&ToolCommand::build(&config.tools))?;
    ui::display_success("Package built successfully");

    if !prompter.confirm(UPLOAD_PROMPT)? {
        ui::display_upload_skipped(&config.tools.dist_dir);
        return Ok(WorkflowResult {
            previous,
            version,
            stage: ReleaseStage::Built,
        });
    }

    ui::display_status("Uploading to PyPI...");
    runner.run(&ToolCommand::upload(&config.tools))?;
    ui::display_success("Package uploaded successfully");

    Ok(WorkflowResult {
        previous,
        version,
        stage: ReleaseStage::Uploaded,
    })
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_strips_root() {
        let root = Path::new("/project");
        assert_eq!(
            display_path(Path::new("/project/pyproject.toml"), root),
            "pyproject.toml"
        );
        assert_eq!(display_path(Path::new("/elsewhere/x.py"), root), "/elsewhere/x.py");
    }
}
