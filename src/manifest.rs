use crate::banner::{manifest_banner, manifest_missing_banner};
use crate::errors::DumpError;
use crate::reporting::{print_stats, DumpReport, IncludedFile, TokenCounter};
use crate::ContextCompiler;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_OUTPUT_FILE: &str = "compiled_project_knowledge.txt";

/// Where the project root sits relative to the directory holding the executable.
pub const EXECUTABLE_OFFSET: &str = "..";

pub const DEFAULT_MANIFEST: &[&str] = &[
    "pages/api/interpret-dream.ts",
    "app/page.tsx",
    "app/(dashboard)/dashboard/decoder/page.tsx",
    "lib/services/dream-service.ts",
    "lib/services/profile-service.ts",
    "lib/types/database.types.ts",
    "types/dreams.ts",
    "lib/config/constants.ts",
    "lib/utils.ts",
    "components/chat/voiceflow-chat.tsx",
    "app/(dashboard)/dashboard/journal/page.tsx",
    "components/journal/dream-journal.tsx",
    "components/journal/dream-card.tsx",
    "components/journal/dream-grid.tsx",
    "components/journal/tag-selector.tsx",
];

#[derive(Debug, Clone)]
pub struct ManifestConfig {
    pub base_dir: PathBuf,
    pub output_path: PathBuf,
    /// Paths relative to `base_dir`, written in this order.
    pub files: Vec<String>,
    pub stats_model: Option<String>,
}

/// Base directory for an executable installed in `<project>/scripts/`.
pub fn base_dir_from_executable(exe: &Path) -> PathBuf {
    exe.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(EXECUTABLE_OFFSET)
}

impl ManifestConfig {
    /// Default manifest, with the output written inside `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        ManifestConfig {
            output_path: base_dir.join(DEFAULT_OUTPUT_FILE),
            base_dir,
            files: DEFAULT_MANIFEST.iter().map(|s| s.to_string()).collect(),
            stats_model: None,
        }
    }
}

/// Concatenates an explicit, ordered list of files.
pub struct ManifestCompiler {
    config: ManifestConfig,
}

impl ManifestCompiler {
    pub fn new(config: ManifestConfig) -> Self {
        ManifestCompiler { config }
    }
}

impl ContextCompiler for ManifestCompiler {
    fn compile(&self) -> Result<DumpReport, DumpError> {
        let config = &self.config;
        let counter = config
            .stats_model
            .as_deref()
            .map(TokenCounter::for_model)
            .transpose()?;

        let file = File::create(&config.output_path).map_err(|e| {
            DumpError::OutputError(format!("{}: {}", config.output_path.display(), e))
        })?;
        let mut out = BufWriter::new(file);
        let mut report = DumpReport::new(&config.output_path);

        for relative in &config.files {
            let full_path = config.base_dir.join(relative);
            if !full_path.exists() {
                debug!("{} not found", full_path.display());
                out.write_all(manifest_missing_banner(relative).as_bytes())?;
                report.missing.push(relative.clone());
                continue;
            }

            debug!("Reading {}", full_path.display());
            // No recovery here: an existing file that cannot be read aborts the run.
            let content = fs::read_to_string(&full_path).map_err(|e| {
                DumpError::FileReadError(format!("{}: {}", full_path.display(), e))
            })?;

            let block = format!("{}{}\n\n", manifest_banner(relative), content);
            out.write_all(block.as_bytes())?;

            report.included.push(IncludedFile {
                path: PathBuf::from(relative),
                bytes: content.len(),
                tokens: counter.as_ref().map(|c| c.count(&block)),
            });
        }
        out.flush()?;

        info!(
            "Compiled knowledge written to {}",
            config.output_path.display()
        );
        debug!("{}", report.summary());
        if counter.is_some() {
            print_stats(&report);
        }
        Ok(report)
    }
}

pub fn compile_files(config: ManifestConfig) -> Result<DumpReport, DumpError> {
    ManifestCompiler::new(config).compile()
}
