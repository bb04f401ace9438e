//! レイアウト設定モジュール
//!
//! mm基準のページ定義と、フォントサイズからの行送り計算

use super::markdown::LineStyle;

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白（mm）
pub const MARGIN_MM: f32 = 15.0;
pub const USABLE_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0; // 180mm

/// ページヘッダー（タイトル行）の高さ（mm）
pub const HEADER_HEIGHT_MM: f32 = 14.0;

/// リスト1段あたりの字下げ（mm）
pub const INDENT_MM: f32 = 6.0;

/// pt → mm変換
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// 行送り倍率
const LINE_SPACING: f32 = 1.35;

/// Helveticaの平均文字幅（em比）。折り返し幅の見積もりに使う
const PROPORTIONAL_CHAR_EM: f32 = 0.52;
/// Courierの文字幅（em比、等幅）
const MONOSPACE_CHAR_EM: f32 = 0.6;

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * PT_TO_MM
}

/// 行種別ごとのフォント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Regular,
    Bold,
    Mono,
}

/// 行種別ごとのフォントとサイズ（pt）
pub fn font_for(style: LineStyle) -> (FontKind, f32) {
    match style {
        LineStyle::Heading(1) => (FontKind::Bold, 20.0),
        LineStyle::Heading(2) => (FontKind::Bold, 16.0),
        LineStyle::Heading(3) => (FontKind::Bold, 14.0),
        LineStyle::Heading(_) => (FontKind::Bold, 12.0),
        LineStyle::TableRow | LineStyle::TableRule | LineStyle::Code => (FontKind::Mono, 9.0),
        LineStyle::Body | LineStyle::Bullet | LineStyle::Rule | LineStyle::Blank => (FontKind::Regular, 11.0),
    }
}

/// 行送り（mm）
pub fn line_height_mm(size_pt: f32) -> f32 {
    pt_to_mm(size_pt * LINE_SPACING)
}

/// 指定幅に収まる文字数の見積もり
pub fn chars_per_line(width_mm: f32, font: FontKind, size_pt: f32) -> usize {
    let em = match font {
        FontKind::Mono => MONOSPACE_CHAR_EM,
        FontKind::Regular | FontKind::Bold => PROPORTIONAL_CHAR_EM,
    };
    let char_width_mm = pt_to_mm(size_pt * em);
    ((width_mm / char_width_mm).floor() as usize).max(1)
}

/// 単語単位で折り返す（1単語が幅を超える場合は文字単位で分割）
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
