//! Pure formatting functions for UI output.
//!
//! This module contains all display logic separated from user interaction.

use console::style;

use crate::domain::Version;
use crate::error::ReleaseError;
use crate::tools::FoundDependency;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Report the modules found by the dependency check.
pub fn display_dependencies(found: &[FoundDependency]) {
    for dep in found {
        match &dep.version {
            Some(version) => println!("Found {} package version {}", dep.name, version),
            None => println!("Found {} package", dep.name),
        }
    }
}

/// Print one line per missing dependency when `err` is a dependency error.
///
/// Returns `false` for any other error so the caller can fall back to the
/// generic error line.
pub fn display_missing_dependencies(err: &ReleaseError) -> bool {
    match err {
        ReleaseError::MissingDependencies(missing) => {
            for dep in missing {
                println!("{} {}", style("Error:").red(), dep);
            }
            true
        }
        _ => false,
    }
}

/// Lines announcing the current and proposed versions.
pub fn version_change_lines(current: &Version, new: &Version) -> [String; 2] {
    [
        format!("Current version: {}", current),
        format!("New version: {}", style(new).green().bold()),
    ]
}

/// Show the current and proposed versions.
pub fn display_version_change(current: &Version, new: &Version) {
    for line in version_change_lines(current, new) {
        println!("{}", line);
    }
}

/// Show the files a release would rewrite without touching them.
pub fn display_dry_run(files: &[String], new: &Version) {
    display_status("Dry run:");
    for file in files {
        println!("  would update {} to {}", file, new);
    }
    println!("  would build the package and ask before uploading");
}

/// Explain where the built package was left after the upload was declined.
pub fn display_upload_skipped(dist_dir: &str) {
    println!(
        "Upload cancelled. Package has been built and is available in the {}/ directory.",
        dist_dir.trim_end_matches('/')
    );
}
