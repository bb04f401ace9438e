//! PDFレポート出力
//!
//! 存在するセクションごとに1ページ（メイン → トレンド）。
//! ページ幅はA4固定、高さはセクションの内容に合わせて伸ばす。

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use purus_common::{ReportSection, ReportSections};
use std::path::Path;
use tracing::debug;

use super::layout::{
    chars_per_line, font_for, line_height_mm, wrap, FontKind, A4_HEIGHT_MM, A4_WIDTH_MM,
    HEADER_HEIGHT_MM, INDENT_MM, MARGIN_MM, USABLE_WIDTH_MM,
};
use super::markdown::{flatten, LineStyle};
use crate::error::{PurusError, Result};

const HEADER_FONT_SIZE: f32 = 10.0;

/// ページ上に配置する1行
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: FontKind,
    pub size_pt: f32,
    pub x_mm: f32,
    /// ページ上端からのベースライン位置
    pub top_mm: f32,
}

/// 1ページ分のレイアウト
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub height_mm: f32,
    pub header: String,
    pub lines: Vec<PlacedLine>,
}

/// セクションのMarkdownを1ページに配置する
pub fn layout_section(section: &ReportSection<'_>, title: &str) -> PageLayout {
    let mut placed = Vec::new();
    let mut cursor = MARGIN_MM + HEADER_HEIGHT_MM;

    for line in flatten(section.markdown) {
        let (font, size_pt) = font_for(line.style);
        let step = line_height_mm(size_pt);

        match line.style {
            LineStyle::Blank => {
                cursor += step * 0.6;
                continue;
            }
            LineStyle::Rule => {
                cursor += step;
                placed.push(PlacedLine {
                    text: "_".repeat(chars_per_line(USABLE_WIDTH_MM, font, size_pt) / 2),
                    font,
                    size_pt,
                    x_mm: MARGIN_MM,
                    top_mm: cursor,
                });
                continue;
            }
            LineStyle::Heading(_) => cursor += step * 0.4,
            _ => {}
        }

        let indent_mm = line.indent as f32 * INDENT_MM;
        let width = USABLE_WIDTH_MM - indent_mm;
        let max_chars = chars_per_line(width, font, size_pt);
        let text = to_pdf_text(&line.text);
        let pieces = if font == FontKind::Mono {
            chunk(&text, max_chars)
        } else {
            wrap(&text, max_chars)
        };

        for piece in pieces {
            cursor += step;
            placed.push(PlacedLine {
                text: piece,
                font,
                size_pt,
                x_mm: MARGIN_MM + indent_mm,
                top_mm: cursor,
            });
        }
    }

    PageLayout {
        height_mm: (cursor + MARGIN_MM).max(A4_HEIGHT_MM),
        header: format!("{} - {}", title, section.kind.title()),
        lines: placed,
    }
}

/// 等幅行は空白を保ったまま文字数で分割
fn chunk(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(max_chars.max(1)).map(|c| c.iter().collect()).collect()
}

/// WinAnsiEncoding の 0x80-0x9F に割り当てられた文字
const WIN_ANSI_EXTRA: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// 組み込みフォント（WinAnsiEncoding）で表示できない文字だけを置き換える
fn to_pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' => ' ',
            '−' => '-',
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            c if WIN_ANSI_EXTRA.contains(&c) => c,
            _ => '?',
        })
        .collect()
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| PurusError::PdfGeneration(format!("failed to add font: {:?}", e)))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            mono: add(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, kind: FontKind) -> &IndirectFontRef {
        match kind {
            FontKind::Regular => &self.regular,
            FontKind::Bold => &self.bold,
            FontKind::Mono => &self.mono,
        }
    }
}

fn draw_page(layer: &PdfLayerReference, page: &PageLayout, fonts: &Fonts) {
    layer.use_text(
        page.header.clone(),
        HEADER_FONT_SIZE,
        Mm(MARGIN_MM),
        Mm(page.height_mm - MARGIN_MM),
        fonts.get(FontKind::Bold),
    );

    for line in &page.lines {
        layer.use_text(
            line.text.clone(),
            line.size_pt,
            Mm(line.x_mm),
            Mm(page.height_mm - line.top_mm),
            fonts.get(line.font),
        );
    }
}

/// レポートPDFをバイト列として生成
pub fn render_report_pdf(sections: &ReportSections, title: &str) -> Result<Vec<u8>> {
    let pages: Vec<PageLayout> = sections
        .sections()
        .iter()
        .map(|section| layout_section(section, title))
        .collect();

    let first_height = pages.first().map(|p| p.height_mm).unwrap_or(A4_HEIGHT_MM);
    let (doc, page1, layer1) = PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(first_height), "Layer 1");
    let fonts = Fonts::load(&doc)?;

    let mut targets = vec![(page1, layer1)];
    for page in pages.iter().skip(1) {
        targets.push(doc.add_page(Mm(A4_WIDTH_MM), Mm(page.height_mm), "Layer 1"));
    }

    for (page, (page_index, layer_index)) in pages.iter().zip(targets) {
        let layer = doc.get_page(page_index).get_layer(layer_index);
        draw_page(&layer, page, &fonts);
        debug!(lines = page.lines.len(), height_mm = page.height_mm, "pdf page laid out");
    }

    doc.save_to_bytes()
        .map_err(|e| PurusError::PdfGeneration(format!("failed to save PDF: {:?}", e)))
}

/// レポートPDFをファイルに保存
pub fn generate_report_pdf(sections: &ReportSections, output_path: &Path, title: &str) -> Result<()> {
    let bytes = render_report_pdf(sections, title)?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}
