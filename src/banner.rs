use std::fmt::Display;

const RULE: &str = "# =================================================================";

/// Header block the walker writes in front of every file.
pub fn walker_banner(path: impl Display) -> String {
    format!("\n{RULE}\n# Arquivo: {path}\n{RULE}\n\n")
}

pub fn manifest_banner(path: &str) -> String {
    format!("// ===== File: {} =====\n", path)
}

pub fn manifest_missing_banner(path: &str) -> String {
    format!("// ===== File: {} NOT FOUND =====\n\n", path)
}

/// Decodes file bytes as UTF-8, replacing invalid sequences with U+FFFD
/// instead of failing.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
