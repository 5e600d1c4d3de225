use crate::banner::{decode_lossy, walker_banner};
use crate::errors::DumpError;
use crate::ignore::IgnoreSets;
use crate::reporting::{print_stats, DumpReport, IncludedFile, TokenCounter};
use crate::ContextCompiler;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_OUTPUT_FILE: &str = "project_context.txt";

#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub root: PathBuf,
    pub output_path: PathBuf,
    pub ignore: IgnoreSets,
    /// Model whose tokenizer is used for the post-run token report.
    pub stats_model: Option<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        WalkerConfig {
            root: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            ignore: IgnoreSets::default(),
            stats_model: None,
        }
    }
}

/// Dumps every file under a root directory that survives the ignore sets.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        TreeWalker { config }
    }
}

impl ContextCompiler for TreeWalker {
    fn compile(&self) -> Result<DumpReport, DumpError> {
        let config = &self.config;
        info!("Starting code extraction...");

        let counter = config
            .stats_model
            .as_deref()
            .map(TokenCounter::for_model)
            .transpose()?;
        let ignore = config.ignore.clone().with_output_file(&config.output_path);

        let file = File::create(&config.output_path).map_err(|e| {
            DumpError::OutputError(format!("{}: {}", config.output_path.display(), e))
        })?;
        let mut out = BufWriter::new(file);
        let mut report = DumpReport::new(&config.output_path);

        let mut pruned = 0;
        let entries = WalkDir::new(&config.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let prune = is_ignored_folder(entry, &ignore);
                if prune {
                    trace!("Pruning folder: {}", entry.path().display());
                    pruned += 1;
                }
                !prune
            });

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| config.root.clone());
                    warn!("Failed to walk {}: {}", path.display(), err);
                    report.failed.push((path, err.to_string()));
                    continue;
                }
            };

            if is_directory(&entry) {
                continue;
            }
            if is_special_file(&entry) {
                debug!("Skipping non-regular file: {}", entry.path().display());
                report.skipped += 1;
                continue;
            }
            if ignore.ignores_file(entry.file_name()) {
                trace!("Skipping file: {}", entry.path().display());
                report.skipped += 1;
                continue;
            }

            let path = entry.path();
            debug!("Processing file: {}", path.display());
            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Failed to read file {}: {}", path.display(), e);
                    report.failed.push((path.to_path_buf(), e.to_string()));
                    continue;
                }
            };

            let block = format!("{}{}\n", walker_banner(path.display()), decode_lossy(&bytes));
            out.write_all(block.as_bytes())?;

            report.included.push(IncludedFile {
                path: path.to_path_buf(),
                bytes: bytes.len(),
                tokens: counter.as_ref().map(|c| c.count(&block)),
            });
        }
        out.flush()?;
        report.skipped += pruned;

        info!(
            "Extraction finished! All code was saved to \"{}\".",
            config.output_path.display()
        );
        report.log_summary();
        if counter.is_some() {
            print_stats(&report);
        }
        Ok(report)
    }
}

/// The root itself is never pruned, even if its name is on the list.
fn is_ignored_folder(entry: &DirEntry, ignore: &IgnoreSets) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && ignore.ignores_folder(&entry.file_name().to_string_lossy())
}

/// Symlinks to directories are listed but not descended into.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

/// FIFOs, sockets and devices can block or never end when read. Broken
/// symlinks are kept so the failed read gets reported.
fn is_special_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        fs::metadata(entry.path())
            .map(|meta| !meta.is_file())
            .unwrap_or(false)
    } else {
        !entry.file_type().is_file()
    }
}

pub fn extract_code(config: WalkerConfig) -> Result<DumpReport, DumpError> {
    TreeWalker::new(config).compile()
}
