//! 解析リクエストの型定義
//!
//! CLIと他のフロントエンドで共有される型:
//! - AnalysisMode: 解析モード（単一文書サマリー / 複数文書トレンド）
//! - EncodedFilePart: 送信用にエンコードされた文書
//! - AnalysisRequest: AIモデルへ送る1回分のリクエスト

use serde::{Deserialize, Serialize};

/// 解析モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// 1文書のやさしいサマリー
    #[default]
    Summary,
    /// 2文書以上の経過トレンド
    Trend,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Summary => "summary",
            AnalysisMode::Trend => "trend",
        }
    }

    /// モード選択肢の表示名
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Summary => "Summary Generation (1 file)",
            AnalysisMode::Trend => "Health Trend Analysis (2+ files)",
        }
    }

    /// 複数ファイルを受け付けるか
    pub fn accepts_multiple(&self) -> bool {
        matches!(self, AnalysisMode::Trend)
    }
}

impl std::str::FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" | "s" => Ok(AnalysisMode::Summary),
            "trend" | "t" => Ok(AnalysisMode::Trend),
            _ => Err(format!("Unknown mode: {}. Use summary or trend", s)),
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 送信用にエンコードされた文書（Base64 + MIMEタイプ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFilePart {
    pub data: String,
    pub mime_type: String,
}

/// AIモデルへの1回分のリクエスト
///
/// 指示テキストの後にファイルパートが入力順で続く。
/// 呼び出しごとに組み立て、保存しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub parts: Vec<EncodedFilePart>,
}

impl AnalysisRequest {
    pub fn new(prompt: String, parts: Vec<EncodedFilePart>) -> Self {
        Self { prompt, parts }
    }
}
