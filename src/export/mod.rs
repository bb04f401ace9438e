pub mod layout;
pub mod markdown;
pub mod pdf;

use crate::error::Result;
use purus_common::{ReportSections, SectionKind};
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "Purus Report";

/// 出力先がディレクトリ指定ならファイル名を補う
pub fn output_path_for_report(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// 端末表示用にレポートを整形（トレンドは区切り線の後に続ける）
pub fn render_report(sections: &ReportSections) -> String {
    let mut out = String::new();
    for section in sections.sections() {
        if section.kind == SectionKind::Trend {
            out.push('\n');
            out.push_str(&"=".repeat(60));
            out.push_str("\n\n");
        }
        out.push_str(&markdown::render_text(&markdown::flatten(section.markdown)));
    }
    out
}

pub fn print_report(sections: &ReportSections) {
    println!("{}", render_report(sections));
}

/// レポートをPDFとして保存し、保存先を返す
pub fn export_pdf(sections: &ReportSections, output: &Path, file_name: &str) -> Result<PathBuf> {
    let output_path = output_path_for_report(output, file_name);
    println!("- Generating PDF...");
    pdf::generate_report_pdf(sections, &output_path, REPORT_TITLE)?;
    println!("✔ PDF saved: {}", output_path.display());
    Ok(output_path)
}
