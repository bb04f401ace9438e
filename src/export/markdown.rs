//! Markdown → 行リスト変換
//!
//! pulldown-cmark（表組み有効）でMarkdownを平坦な行に変換し、
//! 端末表示とPDF出力の両方で使う。

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

/// 行の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading(u8),
    Body,
    Bullet,
    TableRow,
    TableRule,
    Code,
    Rule,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub style: LineStyle,
    pub text: String,
    /// リストのネスト深さ
    pub indent: u8,
}

impl Line {
    fn new(style: LineStyle, text: impl Into<String>, indent: u8) -> Self {
        Self { style, text: text.into(), indent }
    }

    fn blank() -> Self {
        Self::new(LineStyle::Blank, "", 0)
    }
}

#[derive(Default)]
struct Flattener {
    lines: Vec<Line>,
    buffer: String,
    heading: Option<u8>,
    /// 番号付きリストは次の番号、箇条書きは None
    lists: Vec<Option<u64>>,
    in_code_block: bool,
    table_rows: Vec<Vec<String>>,
    header_rows: usize,
    row: Vec<String>,
}

impl Flattener {
    fn indent(&self) -> u8 {
        self.lists.len().saturating_sub(1) as u8
    }

    fn flush(&mut self, style: LineStyle) {
        let text = self.buffer.trim().to_string();
        self.buffer.clear();
        if !text.is_empty() {
            let indent = if style == LineStyle::Bullet { self.indent() } else { 0 };
            self.lines.push(Line::new(style, text, indent));
        }
    }

    fn text_style(&self) -> LineStyle {
        if self.lists.is_empty() { LineStyle::Body } else { LineStyle::Bullet }
    }

    fn blank(&mut self) {
        if matches!(self.lines.last(), Some(line) if line.style != LineStyle::Blank) {
            self.lines.push(Line::blank());
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading(level, _, _) => {
                self.flush(self.text_style());
                self.blank();
                self.heading = Some(heading_level(level));
            }
            Tag::List(start) => {
                // 親項目のテキストをネスト前に確定
                self.flush(LineStyle::Bullet);
                self.lists.push(start);
            }
            Tag::Item => {
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "- ".to_string(),
                };
                self.buffer.push_str(&marker);
            }
            Tag::CodeBlock(_) => {
                self.flush(self.text_style());
                self.in_code_block = true;
            }
            Tag::Table(_) => {
                self.flush(self.text_style());
                self.table_rows.clear();
                self.header_rows = 0;
            }
            Tag::TableHead | Tag::TableRow => self.row.clear(),
            Tag::TableCell => self.buffer.clear(),
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag) {
        match tag {
            Tag::Heading(..) => {
                let level = self.heading.take().unwrap_or(1);
                self.flush(LineStyle::Heading(level));
            }
            Tag::Paragraph => {
                let style = self.text_style();
                self.flush(style);
                if style == LineStyle::Body {
                    self.blank();
                }
            }
            Tag::Item => self.flush(LineStyle::Bullet),
            Tag::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::CodeBlock(_) => {
                self.in_code_block = false;
                self.blank();
            }
            Tag::TableCell => {
                self.row.push(self.buffer.trim().to_string());
                self.buffer.clear();
            }
            Tag::TableHead => {
                self.table_rows.push(std::mem::take(&mut self.row));
                self.header_rows = self.table_rows.len();
            }
            Tag::TableRow => self.table_rows.push(std::mem::take(&mut self.row)),
            Tag::Table(_) => {
                let rows = std::mem::take(&mut self.table_rows);
                self.lines.extend(format_table(&rows, self.header_rows));
                self.blank();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                self.lines.push(Line::new(LineStyle::Code, line, 0));
            }
        } else {
            self.buffer.push_str(text);
        }
    }

    fn finish(mut self) -> Vec<Line> {
        self.flush(self.text_style());
        while matches!(self.lines.last(), Some(line) if line.style == LineStyle::Blank) {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// 列幅を揃えて表を行に変換
fn format_table(rows: &[Vec<String>], header_rows: usize) -> Vec<Line> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = width)
            })
            .collect();
        lines.push(Line::new(LineStyle::TableRow, cells.join(" | ").trim_end(), 0));

        if index + 1 == header_rows {
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w.max(1))).collect();
            lines.push(Line::new(LineStyle::TableRule, rule.join("-+-"), 0));
        }
    }
    lines
}

/// Markdownを行リストに変換
pub fn flatten(markdown: &str) -> Vec<Line> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut state = Flattener::default();

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(tag) => state.start(tag),
            Event::End(tag) => state.end(tag),
            Event::Text(text) => state.text(&text),
            Event::Code(code) => state.text(&code),
            Event::SoftBreak => state.buffer.push(' '),
            Event::HardBreak => {
                let style = state.heading.map(LineStyle::Heading).unwrap_or_else(|| state.text_style());
                state.flush(style);
            }
            Event::Rule => {
                state.flush(state.text_style());
                state.lines.push(Line::new(LineStyle::Rule, "", 0));
            }
            Event::TaskListMarker(done) => state.buffer.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    state.finish()
}

/// 端末表示用のプレーンテキスト
pub fn render_text(lines: &[Line]) -> String {
    let mut out = String::new();
    for line in lines {
        let indent = "  ".repeat(line.indent as usize);
        match line.style {
            LineStyle::Heading(level) => {
                out.push_str(&line.text);
                out.push('\n');
                if level <= 3 {
                    let underline = if level == 1 { '=' } else { '-' };
                    out.extend(std::iter::repeat(underline).take(line.text.chars().count()));
                    out.push('\n');
                }
            }
            LineStyle::Bullet => {
                out.push_str(&indent);
                out.push_str("  ");
                out.push_str(&line.text);
                out.push('\n');
            }
            LineStyle::Code => {
                out.push_str("    ");
                out.push_str(&line.text);
                out.push('\n');
            }
            LineStyle::Rule => out.push_str("----------------------------------------\n"),
            LineStyle::Blank => out.push('\n'),
            LineStyle::Body | LineStyle::TableRow | LineStyle::TableRule => {
                out.push_str(&line.text);
                out.push('\n');
            }
        }
    }
    out
}
