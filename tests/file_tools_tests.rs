// Integration tests for file tools
// Tests use REAL filesystem — no mocks

use compilab::file_tools::{self, FileReadError, FileWriteError, OUTPUT_FILE_NAME};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_file_read_existing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("program.txt");
    let content = "mientras x < 10:\n    x = x + 1\n";

    fs::write(&file_path, content).expect("Failed to write test file");

    let result = file_tools::file_read(&file_path);
    assert_eq!(result.unwrap(), content);
}

#[test]
fn test_file_read_missing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("nonexistent.txt");

    let result = file_tools::file_read(&file_path);
    assert!(matches!(result, Err(FileReadError::NotFound(_))));
}

#[test]
fn test_file_read_binary_does_not_fail() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("image.png");
    fs::write(&file_path, [0x89, b'P', b'N', b'G', 0x00, 0xfe]).expect("Failed to write");

    let text = file_tools::file_read(&file_path).expect("binary input passes through");
    assert!(text.contains("PNG"));
}

#[test]
fn test_file_write_overwrite() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("overwrite.txt");
    fs::write(&file_path, "Old content").expect("Failed to write initial content");

    file_tools::file_write(&file_path, "New content").expect("overwrite should succeed");

    let read_content = fs::read_to_string(&file_path).expect("Failed to read back");
    assert_eq!(read_content, "New content");
}

#[test]
fn test_file_write_missing_parent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("nonexistent").join("file.txt");

    let result = file_tools::file_write(&file_path, "Content");
    assert!(matches!(result, Err(FileWriteError::ParentNotFound(_))));
}

#[test]
fn test_write_output_replaces_previous_result() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    file_tools::write_output(temp_dir.path(), "primero\n").unwrap();
    let path = file_tools::write_output(temp_dir.path(), "segundo\n").unwrap();

    assert_eq!(path, temp_dir.path().join(OUTPUT_FILE_NAME));
    assert_eq!(fs::read_to_string(path).unwrap(), "segundo\n");
}
