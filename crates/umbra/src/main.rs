use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use umbra::Options;

use crate::cli::app::{App, Commands};
use crate::cli::commands;

mod cli;

/// Exit code for a source root nested inside another dependency tree.
const EXIT_AMBIGUOUS_ROOT: u8 = 3;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            match e.downcast_ref::<umbra::Error>() {
                Some(umbra::Error::AmbiguousRoot { .. }) => {
                    eprintln!(
                        "{} move the project out of the enclosing dependency tree or remove it",
                        style("Hint:").yellow()
                    );
                    ExitCode::from(EXIT_AMBIGUOUS_ROOT)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run() -> Result<()> {
    let app = App::parse();

    let source = match &app.source {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let mut options = Options::load(source, app.config.as_deref())?;
    if let Some(shadow) = &app.shadow {
        options = options.shadow_root(shadow);
    }
    if app.verbose > 0 {
        options = options.verbose(true);
    }

    init_logging(app.verbose.max(u8::from(options.verbose)));
    debug!(?options, "effective options");

    match &app.cmd {
        Commands::Mirror => commands::mirror(&options),
        Commands::Rebuild => commands::rebuild(&options),
        Commands::Resolve(arg) => commands::resolve(arg, &options),
        Commands::Zones => commands::zones(&options),
        Commands::Info => commands::info(&options),
    }
}

/// 0 = warn, 1 = info, 2+ = debug. `RUST_LOG` overrides.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
