//! Tests that run the `cantodb-ingest` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_binary(root: &Path, config_path: &Path) -> Output {
    let input_dir = root.join("archivio-canzoni");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("canto.tex"), "%identificatore{1}\n%titolo{Canto}").unwrap();
    fs::write(root.join("regex.txt"), "").unwrap();

    Command::new(env!("CARGO_BIN_EXE_cantodb-ingest"))
        .env_remove("RUST_LOG")
        .env_remove("CANTODB_CONFIG")
        .env_remove("CANTODB_INPUT_DIR")
        .env_remove("CANTODB_PATTERN_FILE")
        .env_remove("CANTODB_DATABASE")
        .env_remove("CANTODB_EXTENSION")
        .arg("--input-dir")
        .arg(&input_dir)
        .arg("--patterns")
        .arg(root.join("regex.txt"))
        .arg("--database")
        .arg(root.join("songs.db"))
        .arg("--config")
        .arg(config_path)
        .output()
        .unwrap()
}

#[test]
fn test_missing_config_file_warning_is_logged() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("absent.toml");

    let output = run_binary(root.path(), &missing);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Config file not found"),
        "stdout was: {}",
        stdout
    );
    assert!(stdout.contains("Starting cantodb-ingest"));
}

#[test]
fn test_config_file_log_level_is_applied() {
    let root = TempDir::new().unwrap();
    let config_path = root.path().join("config.toml");
    fs::write(&config_path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let output = run_binary(root.path(), &config_path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Starting cantodb-ingest"), "stdout was: {}", stdout);
}
