//! luastub: generate Lua API stubs from a JSON declaration model.
//!
//! `luastub -d doc/stub build/declarations/*.json`
//!
//! Diagnostics are printed to stderr as `file:line: level: message [subject]`.
//! The exit status is non-zero if any error was reported, even though the
//! stubs are still written.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use luastub::diagnostics::TRACE_TARGET;
use luastub::{loader, Capabilities, Config, Level, Reporter};

#[derive(Parser)]
#[command(
    name = "luastub",
    about = "Generate Lua API-reference stubs from documented host declarations"
)]
struct Cli {
    /// Declaration model files, directories or glob patterns
    models: Vec<String>,

    /// Output directory (created if missing)
    #[arg(short = 'd', long, default_value = ".")]
    output: PathBuf,

    /// `@source` paths are written relative to this directory
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Accepted for compatibility with host documentation tools; ignored
    #[arg(long, hide = true)]
    doctitle: Option<String>,

    /// Accepted for compatibility with host documentation tools; ignored
    #[arg(long, hide = true)]
    windowtitle: Option<String>,

    /// Capability implemented by plain API modules
    #[arg(long, value_name = "NAME")]
    lua_api: Option<String>,

    /// Capability implemented by peripheral modules
    #[arg(long, value_name = "NAME")]
    peripheral: Option<String>,

    /// Capability implemented by generic peripheral sources
    #[arg(long, value_name = "NAME")]
    generic_source: Option<String>,

    /// Log pipeline progress
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let defaults = Capabilities::default();
        Config {
            output: self.output.clone(),
            project_root: self.project_root.clone(),
            capabilities: Capabilities {
                lua_api: self.lua_api.clone().unwrap_or(defaults.lua_api),
                peripheral: self.peripheral.clone().unwrap_or(defaults.peripheral),
                generic_source: self.generic_source.clone().unwrap_or(defaults.generic_source),
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the run was free of errors.
fn run(cli: &Cli) -> Result<bool> {
    let config = cli.config();
    if cli.doctitle.is_some() || cli.windowtitle.is_some() {
        tracing::debug!(doctitle = ?cli.doctitle, windowtitle = ?cli.windowtitle, "ignoring titles");
    }
    let inputs = loader::expand_inputs(&cli.models).context("failed to resolve inputs")?;
    if inputs.is_empty() {
        anyhow::bail!("no declaration models given");
    }

    let reporter = Reporter::new();
    let written = luastub::run(&inputs, &config, &reporter)
        .with_context(|| format!("failed to generate stubs in {}", config.output.display()))?;

    for diagnostic in reporter.diagnostics() {
        eprintln!("{diagnostic}");
    }
    tracing::debug!(
        written,
        errors = reporter.count(Level::Error),
        warnings = reporter.count(Level::Warning),
        "done"
    );
    Ok(!reporter.has_errors())
}

/// Diagnostics are printed directly, so their tracing events stay quiet unless asked for.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},{TRACE_TARGET}=off")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
