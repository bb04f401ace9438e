//! 選択文書モジュール
//!
//! ユーザーが選んだ文書（画像/PDF）を表す。
//! パス指定の場合、内容は解析時に非同期で読み込む。

use crate::error::{PurusError, Result};
use std::path::{Path, PathBuf};

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub source: FileSource,
}

impl SelectedFile {
    /// ディスク上のファイルから作成（MIMEタイプは拡張子から推定）
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PurusError::FileNotFound(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let media_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string());

        Ok(Self {
            name,
            media_type,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// 内容を読み込む
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

/// ファイル選択で想定している形式か（画像/PDF）
///
/// 判定は警告表示のみに使い、送信は拒否しない
pub fn is_supported_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/") || media_type == "application/pdf"
}

/// 複数パスをまとめて読み込む（入力順を維持）
pub fn load_files(paths: &[PathBuf]) -> Result<Vec<SelectedFile>> {
    paths.iter().map(|p| SelectedFile::from_path(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_media_type_from_extension() {
        let dir = tempdir().unwrap();
        let cases = [
            ("report.pdf", "application/pdf"),
            ("scan.PNG", "image/png"),
            ("ecg.jpg", "image/jpeg"),
            ("notes.unknownext", FALLBACK_MEDIA_TYPE),
        ];

        for (name, expected) in cases {
            let path = dir.path().join(name);
            std::fs::write(&path, b"dummy").unwrap();
            let file = SelectedFile::from_path(&path).unwrap();
            assert_eq!(file.name, name);
            assert_eq!(file.media_type, expected, "{}", name);
        }
    }

    #[test]
    fn test_missing_file() {
        let result = SelectedFile::from_path(Path::new("/nonexistent/lab-report.pdf"));
        assert!(matches!(result, Err(PurusError::FileNotFound(_))));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        assert!(SelectedFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn test_supported_media_types() {
        assert!(is_supported_media_type("image/png"));
        assert!(is_supported_media_type("application/pdf"));
        assert!(!is_supported_media_type("text/plain"));
        assert!(!is_supported_media_type(FALLBACK_MEDIA_TYPE));
    }

    #[test]
    fn test_load_files_keeps_order() {
        let dir = tempdir().unwrap();
        let paths: Vec<PathBuf> = ["c.pdf", "a.pdf", "b.pdf"]
            .iter()
            .map(|n| {
                let p = dir.path().join(n);
                std::fs::write(&p, n.as_bytes()).unwrap();
                p
            })
            .collect();

        let files = load_files(&paths).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["c.pdf", "a.pdf", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_read_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lab.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let from_disk = SelectedFile::from_path(&path).unwrap();
        assert_eq!(from_disk.read_bytes().await.unwrap(), b"%PDF-1.4");

        let in_memory = SelectedFile::from_bytes("x.png", "image/png", vec![1, 2, 3]);
        assert_eq!(in_memory.read_bytes().await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_read_after_delete_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.pdf");
        std::fs::write(&path, b"x").unwrap();
        let file = SelectedFile::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(file.read_bytes().await.is_err());
    }
}
