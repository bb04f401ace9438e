//! 文書解析モジュール
//!
//! - GenerativeModel: 外部AIモデルとの境界（テストでは差し替え可能）
//! - AnalysisClient: エンコード → プロンプト生成 → 1回のリクエスト → 応答
//! - GeminiModel: Gemini REST API アダプタ

mod client;
mod gemini;

pub use client::{effective_mode, AnalysisClient};
pub use gemini::GeminiModel;

use async_trait::async_trait;
use lazy_static::lazy_static;
use purus_common::{AnalysisMode, AnalysisRequest};
use regex::Regex;
use thiserror::Error;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";
pub const DOCUMENT_FAILED_MESSAGE: &str =
    "Failed to analyze the document with AI. Please check the file and try again.";
pub const TREND_FAILED_MESSAGE: &str =
    "Failed to analyze health trends with AI. Please check the files and try again.";
pub const SINGLE_FILE_TREND_WARNING: &str =
    "Trend analysis needs 2+ files; generating a single-document summary instead";

lazy_static! {
    static ref RATE_LIMIT_PATTERN: Regex =
        Regex::new(r"(?i)\b429\b|RESOURCE_EXHAUSTED|rate[ _-]?limit|quota").unwrap();
}

/// 外部AIモデル（指示テキスト + ファイルパート → テキスト）
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, ModelError>;
}

/// モデル呼び出しの生エラー（呼び出し元には公開しない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("model call failed (status {status:?}): {message}")]
pub struct ModelError {
    pub status: Option<u16>,
    pub message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into() }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self { status: Some(status), message: message.into() }
    }

    /// レート/クォータ制限によるエラーか
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(429) || RATE_LIMIT_PATTERN.is_match(&self.message)
    }
}

/// 解析エラー（ユーザー向けメッセージのみを持つ）
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    #[error("{}", failed_message(.0))]
    AnalysisFailed(AnalysisMode),

    #[error("Could not read file '{name}': {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Please select at least one file.")]
    NoFiles,
}

fn failed_message(mode: &AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Summary => DOCUMENT_FAILED_MESSAGE,
        AnalysisMode::Trend => TREND_FAILED_MESSAGE,
    }
}

impl AnalysisError {
    /// モデルエラーを2種類に分類
    pub fn classify(error: &ModelError, mode: AnalysisMode) -> Self {
        if error.is_rate_limited() {
            AnalysisError::RateLimited
        } else {
            AnalysisError::AnalysisFailed(mode)
        }
    }
}
