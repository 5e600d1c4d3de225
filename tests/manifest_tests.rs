use ctxdump::errors::DumpError;
use ctxdump::manifest::{DEFAULT_MANIFEST, DEFAULT_OUTPUT_FILE};
use ctxdump::{compile_files, ManifestConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tracing_test::traced_test;

fn config_for(base: &Path, output: &Path, files: &[&str]) -> ManifestConfig {
    ManifestConfig {
        base_dir: base.to_path_buf(),
        output_path: output.to_path_buf(),
        files: files.iter().map(|s| s.to_string()).collect(),
        stats_model: None,
    }
}

#[test]
fn test_missing_file_gets_not_found_banner() {
    let base = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(base.path().join("a.ts"), "export const x=1;").unwrap();

    let output = out_dir.path().join("knowledge.txt");
    let report = compile_files(config_for(base.path(), &output, &["a.ts", "missing.ts"])).unwrap();

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(
        dump,
        "// ===== File: a.ts =====\n\
         export const x=1;\n\n\
         // ===== File: missing.ts NOT FOUND =====\n\n"
    );
    assert_eq!(report.missing, vec!["missing.ts".to_string()]);
    assert_eq!(report.included.len(), 1);
}

#[test]
fn test_output_follows_manifest_order() {
    let base = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::create_dir_all(base.path().join("lib")).unwrap();
    fs::write(base.path().join("a.ts"), "AAA").unwrap();
    fs::write(base.path().join("lib/m.ts"), "MMM").unwrap();
    fs::write(base.path().join("z.ts"), "ZZZ").unwrap();

    let output = out_dir.path().join("knowledge.txt");
    let report =
        compile_files(config_for(base.path(), &output, &["z.ts", "lib/m.ts", "a.ts"])).unwrap();

    let dump = fs::read_to_string(&output).unwrap();
    let z = dump.find("ZZZ").unwrap();
    let m = dump.find("MMM").unwrap();
    let a = dump.find("AAA").unwrap();
    assert!(z < m && m < a);
    assert!(dump.contains("// ===== File: lib/m.ts =====\n"));
    assert_eq!(
        report.included_paths(),
        vec![Path::new("z.ts"), Path::new("lib/m.ts"), Path::new("a.ts")]
    );
}

#[test]
fn test_duplicate_entries_are_written_twice() {
    let base = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(base.path().join("a.ts"), "AAA").unwrap();

    let output = out_dir.path().join("knowledge.txt");
    compile_files(config_for(base.path(), &output, &["a.ts", "a.ts"])).unwrap();

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(dump.matches("AAA").count(), 2);
}

#[test]
fn test_unreadable_existing_file_aborts() {
    let base = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(base.path().join("a.ts"), "AAA").unwrap();
    fs::write(base.path().join("bad.ts"), b"\xff\xfe\xfd").unwrap();
    fs::write(base.path().join("c.ts"), "CCC").unwrap();

    let output = out_dir.path().join("knowledge.txt");
    let result = compile_files(config_for(base.path(), &output, &["a.ts", "bad.ts", "c.ts"]));

    match result {
        Err(DumpError::FileReadError(message)) => assert!(message.contains("bad.ts")),
        other => panic!("Expected FileReadError, got {:?}", other),
    }
    let partial = fs::read_to_string(&output).unwrap();
    assert!(partial.contains("AAA"));
    assert!(!partial.contains("CCC"));
}

#[test]
fn test_directory_entry_aborts() {
    let base = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::create_dir_all(base.path().join("components")).unwrap();

    let output = out_dir.path().join("knowledge.txt");
    let result = compile_files(config_for(base.path(), &output, &["components"]));
    assert!(matches!(result, Err(DumpError::FileReadError(_))));
}

#[test]
fn test_default_manifest_in_empty_project() {
    let base = tempdir().unwrap();
    let config = ManifestConfig::new(base.path());
    assert_eq!(config.output_path, base.path().join(DEFAULT_OUTPUT_FILE));
    assert_eq!(config.files.len(), DEFAULT_MANIFEST.len());

    let report = compile_files(config).unwrap();

    let dump = fs::read_to_string(base.path().join(DEFAULT_OUTPUT_FILE)).unwrap();
    assert_eq!(dump.matches("NOT FOUND").count(), DEFAULT_MANIFEST.len());
    assert!(dump.starts_with("// ===== File: pages/api/interpret-dream.ts NOT FOUND =====\n\n"));
    assert_eq!(report.missing.len(), DEFAULT_MANIFEST.len());
    assert!(report.included.is_empty());
}

#[test]
fn test_output_in_missing_directory_is_fatal() {
    let base = tempdir().unwrap();
    let output = base.path().join("missing/knowledge.txt");
    let result = compile_files(config_for(base.path(), &output, &["a.ts"]));
    assert!(matches!(result, Err(DumpError::OutputError(_))));
}

#[test]
fn test_token_stats_for_manifest() {
    let base = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(base.path().join("a.ts"), "export const x=1;").unwrap();

    let output = out_dir.path().join("knowledge.txt");
    let config = ManifestConfig {
        stats_model: Some("gpt-4".to_owned()),
        ..config_for(base.path(), &output, &["a.ts", "missing.ts"])
    };
    let report = compile_files(config).unwrap();

    assert_eq!(report.included.len(), 1);
    assert!(report.included[0].tokens.unwrap() > 0);
    assert_eq!(report.included[0].bytes, "export const x=1;".len());
}

#[test]
#[traced_test]
fn test_default_run_logs_only_completion_line() {
    let base = tempdir().unwrap();
    fs::create_dir_all(base.path().join("app")).unwrap();
    fs::write(base.path().join("app/page.tsx"), "export default function Page() {}").unwrap();

    let report = compile_files(ManifestConfig::new(base.path())).unwrap();
    assert_eq!(report.missing.len(), DEFAULT_MANIFEST.len() - 1);

    logs_assert(|lines: &[&str]| {
        let visible: Vec<&&str> = lines
            .iter()
            .filter(|line| line.contains(" INFO ") || line.contains(" WARN "))
            .collect();
        match visible.as_slice() {
            [only] if only.contains("Compiled knowledge written to") => Ok(()),
            other => Err(format!("Expected one completion line, got {:?}", other)),
        }
    });
}
