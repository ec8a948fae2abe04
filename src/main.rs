//! csef - Command-line tool for the Compact Sprite Encoding Format

use std::process::ExitCode;

use csef::cli;

fn main() -> ExitCode {
    // Warnings by default, RUST_LOG=debug for the decoder's skip log
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();

    cli::run()
}
