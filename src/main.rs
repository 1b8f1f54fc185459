use std::process::ExitCode;

use clap::Parser;
use termhist::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = &cli.log_level {
        logger.filter_level(level.parse().unwrap_or(log::LevelFilter::Warn));
    }
    logger.format_timestamp(None).init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("termhist: {e}");
            ExitCode::FAILURE
        }
    }
}
