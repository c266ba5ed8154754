// crates/cli/src/main.rs
#![allow(clippy::multiple_crate_versions)]

//! CLI entry point for the `polycount` application.

use clap::error::ErrorKind;
use clap::Parser;

use polycount_cli::Args;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 未知のオプションや競合するレポート指定は終了コード 1
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    polycount_cli::run_from_args(args)
}
