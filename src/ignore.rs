use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_IGNORED_FOLDERS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    ".vscode",
    "__pycache__",
    "out",
    "build",
];

pub const DEFAULT_IGNORED_FILES: &[&str] = &["package-lock.json", ".env.local"];

pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &[
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico",
    // Fonts
    ".woff", ".woff2", ".ttf", ".eot",
    // Video
    ".mp4", ".webm",
    // Lockfiles
    ".lock",
];

/// Folder names, file names and extensions the walker leaves out.
///
/// Extensions are stored lowercased with their leading dot, so `.PNG` and
/// `png` both end up as `.png`.
#[derive(Debug, Clone)]
pub struct IgnoreSets {
    folders: HashSet<String>,
    files: HashSet<String>,
    extensions: HashSet<String>,
}

impl IgnoreSets {
    pub fn new<F, N, E>(folders: F, files: N, extensions: E) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let sets = IgnoreSets {
            folders: folders.into_iter().map(Into::into).collect(),
            files: files.into_iter().map(Into::into).collect(),
            extensions: extensions
                .into_iter()
                .map(|ext| normalize_extension(&ext.into()))
                .collect(),
        };
        debug!("Using ignore sets: {:?}", sets);
        sets
    }

    /// Adds the output file's name to the ignored files so a dump written
    /// inside the walked tree is never read back in.
    pub fn with_output_file(mut self, output_path: &Path) -> Self {
        if let Some(name) = output_path.file_name() {
            self.files.insert(name.to_string_lossy().into_owned());
        }
        self
    }

    pub fn ignores_folder(&self, name: &str) -> bool {
        self.folders.contains(name)
    }

    pub fn ignores_file<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        let name_ignored = path
            .file_name()
            .map(|name| self.files.contains(name.to_string_lossy().as_ref()))
            .unwrap_or(false);

        name_ignored || self.ignores_extension(path)
    }

    fn ignores_extension(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => self
                .extensions
                .contains(&normalize_extension(&ext.to_string_lossy())),
            None => false,
        }
    }
}

impl Default for IgnoreSets {
    fn default() -> Self {
        IgnoreSets::new(
            DEFAULT_IGNORED_FOLDERS.iter().copied(),
            DEFAULT_IGNORED_FILES.iter().copied(),
            DEFAULT_IGNORED_EXTENSIONS.iter().copied(),
        )
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_match_is_case_insensitive() {
        let sets = IgnoreSets::default();
        assert!(sets.ignores_file("assets/logo.PNG"));
        assert!(sets.ignores_file("yarn.lock"));
        assert!(!sets.ignores_file("src/main.rs"));
    }

    #[test]
    fn extensions_without_dot_are_normalized() {
        let sets = IgnoreSets::new(Vec::<String>::new(), Vec::<String>::new(), ["TXT"]);
        assert!(sets.ignores_file("notes.txt"));
    }

    #[test]
    fn dotfiles_are_matched_by_name_not_extension() {
        let sets = IgnoreSets::default();
        assert!(sets.ignores_file(".env.local"));
        assert!(!sets.ignores_file(".env"));
    }

    #[test]
    fn output_file_name_is_ignored() {
        let sets = IgnoreSets::default().with_output_file(&PathBuf::from("out/context.txt"));
        assert!(sets.ignores_file("./context.txt"));
        assert!(sets.ignores_file("nested/context.txt"));
    }

    #[test]
    fn folders_match_exact_names() {
        let sets = IgnoreSets::default();
        assert!(sets.ignores_folder("node_modules"));
        assert!(!sets.ignores_folder("node_modules_backup"));
    }
}
