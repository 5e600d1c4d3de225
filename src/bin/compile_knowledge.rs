use clap::Parser;
use ctxdump::logger::initialize_logger;
use ctxdump::manifest::base_dir_from_executable;
use ctxdump::{compile_files, ManifestConfig};
use std::process::ExitCode;
use tracing::error;

/// Compile the fixed list of project files into compiled_project_knowledge.txt.
///
/// The project root is the parent of the directory holding this executable,
/// so install it as `<project>/scripts/compile-knowledge`.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {}

fn main() -> ExitCode {
    CliArgs::parse();
    initialize_logger();

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            error!("Could not locate the running executable: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match compile_files(ManifestConfig::new(base_dir_from_executable(&exe))) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Knowledge compilation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
