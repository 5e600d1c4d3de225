use clap::Parser;
use ctxdump::logger::initialize_logger;
use ctxdump::{extract_code, WalkerConfig};
use std::process::ExitCode;
use tracing::error;

/// Dump every source file under the current directory into project_context.txt.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {}

fn main() -> ExitCode {
    CliArgs::parse();
    initialize_logger();

    let config = WalkerConfig {
        stats_model: Some("gpt-4o".to_owned()),
        ..WalkerConfig::default()
    };

    match extract_code(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Code extraction failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
