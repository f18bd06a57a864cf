use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use pyrelease::cli::{run_release_workflow, ReleaseWorkflowArgs};
use pyrelease::config;
use pyrelease::domain::BumpKind;
use pyrelease::tools::ProcessRunner;
use pyrelease::ui::{self, ConsolePrompter};
use pyrelease::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "pyrelease",
    version,
    about = "Bump the version of a Python package, build it and upload it to PyPI"
)]
struct Args {
    #[arg(value_enum, value_name = "major|minor|patch", help = "Version component to increment")]
    bump: BumpKind,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging on stderr")]
    verbose: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                println!("{}", Args::command().render_usage());
                std::process::exit(1);
            }
        },
    };

    init_tracing(args.verbose);

    let code = match run(args) {
        Ok(()) => 0,
        Err(err) => report(&err),
    };
    std::process::exit(code);
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let workflow_args = ReleaseWorkflowArgs {
        bump: args.bump,
        root: PathBuf::from("."),
        dry_run: args.dry_run,
    };

    let runner = ProcessRunner::new();
    let mut prompter = ConsolePrompter::stdio();
    let result = run_release_workflow(&workflow_args, &config, &runner, &mut prompter)?;

    tracing::debug!(stage = ?result.stage, version = %result.version, "release finished");
    Ok(())
}

/// Print `err` and pick the process exit status for it
fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ReleaseError>() {
        Some(release_err) => {
            if !ui::display_missing_dependencies(release_err) {
                ui::display_error(&format!("{:#}", err));
            }
            release_err.exit_code()
        }
        None => {
            ui::display_error(&format!("{:#}", err));
            1
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
