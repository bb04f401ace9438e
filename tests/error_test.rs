//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use purus::analyzer::{AnalysisError, DOCUMENT_FAILED_MESSAGE, TREND_FAILED_MESSAGE};
use purus::app::SessionError;
use purus::documents::{self, SelectedFile};
use purus::error::PurusError;
use purus_common::AnalysisMode;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないファイルを選択した場合
#[test]
fn test_select_nonexistent_file() {
    let result = SelectedFile::from_path(Path::new("/nonexistent/path/12345.pdf"));
    assert!(matches!(result, Err(PurusError::FileNotFound(_))));
}

/// ディレクトリはファイルとして扱わない
#[test]
fn test_select_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = SelectedFile::from_path(dir.path());
    assert!(matches!(result, Err(PurusError::FileNotFound(_))));
}

/// 1件でも欠けていれば全体がエラー
#[test]
fn test_load_files_with_missing_entry() {
    let dir = tempdir().expect("Failed to create temp dir");
    let existing = dir.path().join("blood_test.png");
    std::fs::write(&existing, b"png").unwrap();

    let paths = vec![existing, PathBuf::from("/nonexistent/missing.jpg")];
    let err = documents::load_files(&paths).unwrap_err();
    assert!(err.to_string().contains("missing.jpg"));
}

/// 解析時に読めなくなったファイル
#[tokio::test]
async fn test_unreadable_file_at_analysis_time() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("scan.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();
    let file = SelectedFile::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(file.read_bytes().await.is_err());
}

/// PurusErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PurusError::Config("invalid config".to_string()),
        PurusError::MissingApiKey,
        PurusError::FileNotFound("test.jpg".to_string()),
        PurusError::AnalysisFailed("Too many requests.".to_string()),
        PurusError::PdfGeneration("font error".to_string()),
        PurusError::Session(SessionError::NoFilesSelected),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

/// ユーザー向けメッセージはモードごとに固定
#[test]
fn test_analysis_error_messages() {
    assert_eq!(AnalysisError::AnalysisFailed(AnalysisMode::Summary).to_string(), DOCUMENT_FAILED_MESSAGE);
    assert_eq!(AnalysisError::AnalysisFailed(AnalysisMode::Trend).to_string(), TREND_FAILED_MESSAGE);
    assert_eq!(
        PurusError::from(SessionError::NoFilesSelected).to_string(),
        "Please select at least one file."
    );
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PurusError = io_err.into();
    assert!(matches!(err, PurusError::Io(_)));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
    let err: PurusError = json_err.into();
    assert!(matches!(err, PurusError::JsonParse(_)));
}
