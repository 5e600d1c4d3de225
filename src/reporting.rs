use crate::errors::DumpError;
use crate::trie::{TokenNode, TokenTree};
use std::path::{Path, PathBuf};
use tiktoken_rs::{get_bpe_from_model, CoreBPE};
use tracing::{debug, info};

/// A file whose content made it into the output document.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludedFile {
    pub path: PathBuf,
    pub bytes: usize,
    pub tokens: Option<usize>,
}

/// Outcome of one walker or manifest run.
#[derive(Debug, Default)]
pub struct DumpReport {
    pub output_path: PathBuf,
    pub included: Vec<IncludedFile>,
    /// Entries left out by the ignore sets. Pruned folders count once.
    pub skipped: usize,
    pub failed: Vec<(PathBuf, String)>,
    pub missing: Vec<String>,
}

impl DumpReport {
    pub fn new(output_path: &Path) -> Self {
        DumpReport {
            output_path: output_path.to_path_buf(),
            ..Default::default()
        }
    }

    pub fn included_paths(&self) -> Vec<&Path> {
        self.included.iter().map(|f| f.path.as_path()).collect()
    }

    /// `None` when the run was not tokenized.
    pub fn total_tokens(&self) -> Option<usize> {
        self.included
            .iter()
            .map(|f| f.tokens)
            .sum::<Option<usize>>()
            .filter(|_| !self.included.is_empty())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} included, {} skipped, {} failed, {} not found",
            self.included.len(),
            self.skipped,
            self.failed.len(),
            self.missing.len()
        )
    }

    pub fn log_summary(&self) {
        info!("{}", self.summary());
    }
}

/// Counts tokens the way the target model's tokenizer would.
pub struct TokenCounter {
    bpe: CoreBPE,
}

impl TokenCounter {
    pub fn for_model(model: &str) -> Result<Self, DumpError> {
        debug!("Loading tokenizer for model {}", model);
        let bpe = get_bpe_from_model(model)
            .map_err(|e| DumpError::TokenizerError(format!("{}: {}", model, e)))?;
        Ok(TokenCounter { bpe })
    }

    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Logs the token counts of every included file as a directory tree.
pub fn print_stats(report: &DumpReport) {
    let mut tree = TokenTree::new();
    for file in &report.included {
        if let Some(tokens) = file.tokens {
            tree.insert(&file.path, tokens);
        }
    }

    info!("Overall ({} tokens)", tree.root().total_tokens());
    print_tree(tree.root(), "");
}

fn print_tree(node: &TokenNode, prefix: &str) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };

        if let Some(tokens) = child.token_count {
            info!(
                "{}{} {} {} ({} tokens)",
                prefix,
                connector,
                get_file_icon(Path::new(name)),
                name,
                tokens
            );
        } else {
            info!(
                "{}{}📂 {} ({} tokens)",
                prefix,
                connector,
                name,
                child.total_tokens()
            );
            let child_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
            print_tree(child, &child_prefix);
        }
    }
}

pub fn get_file_icon(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ts") | Some("tsx") | Some("d") => "🔷",
        Some("js") | Some("mjs") | Some("cjs") => "🟨",
        Some("jsx") => "⚛️",
        Some("py") | Some("pyi") => "🐍",
        Some("rs") => "🦀",
        Some("html") | Some("htm") => "🌐",
        Some("css") | Some("scss") | Some("sass") => "🎨",
        Some("json") => "🔖",
        Some("yaml") | Some("yml") => "🗂️",
        Some("toml") | Some("ini") | Some("conf") => "⚙️",
        Some("md") | Some("mdx") => "📝",
        Some("sql") => "🗄️",
        Some("sh") | Some("bash") | Some("zsh") => "🐚",
        None => "📁",
        _ => "📄",
    }
}
