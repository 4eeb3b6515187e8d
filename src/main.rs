use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use auto_semver::boundary::BoundaryWarning;
use auto_semver::cli::{run_action, Action, WorkflowOptions};
use auto_semver::config::{load_conventions, Settings};
use auto_semver::git::Git2Repository;
use auto_semver::ui;

#[derive(clap::Parser, Debug)]
#[command(
    name = "auto-semver",
    version,
    about = "Semantic version tagging and release-tag protection for CI pipelines"
)]
struct Args {
    #[arg(help = "Action to perform: 'version' tags the next version, 'mark' moves the release tag")]
    action: String,

    #[arg(short, long, help = "Custom conventions file path")]
    config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Path inside the git repository"
    )]
    repo: PathBuf,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

/// Log level comes from `--debug`, then `RUST_LOG`, then defaults to INFO.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("auto_semver=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("auto_semver=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::from_env().context("Cannot read CI environment")?;
    let conventions =
        load_conventions(args.config.as_deref()).context("Cannot load conventions")?;

    let action = match Action::parse(&args.action) {
        Some(action) => action,
        None => {
            ui::display_boundary_warning(&BoundaryWarning::UnknownAction {
                action: args.action,
            });
            return Ok(());
        }
    };

    let mut repo = Git2Repository::open(&args.repo)?;
    let options = WorkflowOptions {
        dry_run: args.dry_run,
    };

    let result = run_action(action, &mut repo, &settings, &conventions, &options)
        .with_context(|| format!("Action '{}' failed", action))?;

    ui::display_workflow_result(&result);
    Ok(())
}
