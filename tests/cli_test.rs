//! Integration tests driving the compiled binary.

use std::process::Command;
use tempfile::TempDir;

fn sql_extractor_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sql-extractor"))
}

fn write_dump(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("dump.sql");
    std::fs::write(&path, content).unwrap();
    path
}

const MATERIALS_DUMP: &str = "\
INSERT INTO `trainer_program_unit_video_materials` VALUES
(1,4,900001,'2022-01-01','2022-01-01',NULL),
(2,4,900002,'2022-01-01','2022-01-01',NULL),
(3,7,900003,'2022-01-01','2022-01-01','2023-01-01');
";

#[test]
fn test_export_writes_json_and_summary() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, MATERIALS_DUMP);
    let output = dir.path().join("materials.json");

    let result = sql_extractor_bin()
        .arg("export")
        .arg(&dump)
        .arg("--table")
        .arg("video-materials")
        .arg("--output")
        .arg(&output)
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Found 3 records"));
    assert!(stdout.contains("Saved 3 records"));
    assert!(stdout.contains("Non-deleted records: 2"));
    assert!(stdout.contains("unit 4: 2 records"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[test]
fn test_export_default_output_name() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, MATERIALS_DUMP);

    let result = sql_extractor_bin()
        .current_dir(dir.path())
        .arg("export")
        .arg(&dump)
        .arg("--table")
        .arg("video-materials")
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success());
    assert!(dir.path().join("video_materials.json").exists());
}

#[test]
fn test_export_missing_marker_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, "INSERT INTO `users` VALUES (1);\n");

    let result = sql_extractor_bin()
        .arg("export")
        .arg(&dump)
        .arg("--table")
        .arg("programs")
        .arg("--output")
        .arg(dir.path().join("out.json"))
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("could not find"));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_export_unknown_table_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, MATERIALS_DUMP);

    let result = sql_extractor_bin()
        .arg("export")
        .arg(&dump)
        .arg("--table")
        .arg("invoices")
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("unknown table"));
}

#[test]
fn test_export_missing_input_exits_nonzero() {
    let result = sql_extractor_bin()
        .arg("export")
        .arg("/nonexistent/dump.sql")
        .arg("--table")
        .arg("programs")
        .output()
        .expect("Failed to execute command");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_export_dry_run() {
    let dir = TempDir::new().unwrap();
    let dump = write_dump(&dir, MATERIALS_DUMP);
    let output = dir.path().join("materials.json");

    let result = sql_extractor_bin()
        .arg("export")
        .arg(&dump)
        .arg("--table")
        .arg("video-materials")
        .arg("--output")
        .arg(&output)
        .arg("--dry-run")
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Dry run"));
    assert!(!output.exists());
}

#[test]
fn test_tables_lists_builtin_schemas() {
    let result = sql_extractor_bin()
        .arg("tables")
        .output()
        .expect("Failed to execute command");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("programs"));
    assert!(stdout.contains("trainer_programs"));
    assert!(stdout.contains("trainer_program_units"));
    assert!(stdout.contains("trainer_program_unit_video_materials"));
    assert!(stdout.contains("500"));
}
