pub mod banner;
pub mod errors;
pub mod ignore;
pub mod logger;
pub mod manifest;
pub mod reporting;
pub mod trie;
pub mod walker;

pub use errors::DumpError;
pub use ignore::IgnoreSets;
pub use manifest::{compile_files, ManifestCompiler, ManifestConfig};
pub use reporting::DumpReport;
pub use walker::{extract_code, TreeWalker, WalkerConfig};

/// A single-pass job that writes one context dump and reports what went into it.
pub trait ContextCompiler {
    fn compile(&self) -> Result<DumpReport, DumpError>;
}
