//! レポート分割モジュール
//!
//! AIの出力を NEW_PAGE_MARKER の最初の出現位置で
//! 「メインレポート」と「トレンド解析レポート」に分ける。

use serde::{Deserialize, Serialize};

use crate::prompts::NEW_PAGE_MARKER;

/// セクション種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Primary,
    Trend,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Primary => "Analysis Report",
            SectionKind::Trend => "Health Trend Analysis",
        }
    }
}

/// 描画・出力の単位となる1セクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSection<'a> {
    pub kind: SectionKind,
    pub markdown: &'a str,
}

/// 分割結果
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSections {
    pub primary: String,
    pub trend: Option<String>,
}

impl ReportSections {
    pub fn has_trend(&self) -> bool {
        self.trend.is_some()
    }

    /// 存在するセクションを出現順（メイン → トレンド）で返す
    pub fn sections(&self) -> Vec<ReportSection<'_>> {
        let mut sections = vec![ReportSection {
            kind: SectionKind::Primary,
            markdown: &self.primary,
        }];
        if let Some(trend) = &self.trend {
            sections.push(ReportSection {
                kind: SectionKind::Trend,
                markdown: trend,
            });
        }
        sections
    }
}

/// 最初のマーカーで分割
///
/// マーカー以降はすべてトレンド側（2つ目以降のマーカーは本文として残る）。
/// トレンド側が空文字列だけでなく空白・改行のみの場合も「なし」とみなし、
/// 空のトレンドページは作らない。それ以外は前後の空白も含めそのまま返す。
pub fn split_report(text: &str) -> ReportSections {
    match text.split_once(NEW_PAGE_MARKER) {
        Some((primary, trend)) => ReportSections {
            primary: primary.to_string(),
            trend: (!trend.trim().is_empty()).then(|| trend.to_string()),
        },
        None => ReportSections {
            primary: text.to_string(),
            trend: None,
        },
    }
}
