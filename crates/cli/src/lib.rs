// crates/cli/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

//! CLI layer for `polycount`: argument parsing, directory walking,
//! parallel measurement, and report formatting.

pub mod args;
pub mod config;
pub mod engine;
pub mod presentation;
pub mod walk;

pub use args::Args;
pub use config::{Config, ReportMode};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute the application using pre-parsed CLI arguments.
pub fn run_from_args(args: Args) -> anyhow::Result<()> {
    let config = Config::try_from(args)?;
    let result = engine::run(&config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    presentation::print_results(&mut out, &result, &config)
}
