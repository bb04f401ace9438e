//! レポート出力の統合テスト

use purus::export::{self, pdf, REPORT_TITLE};
use purus_common::{split_report, NEW_PAGE_MARKER};
use tempfile::tempdir;

fn sample_report() -> String {
    format!(
        "### Latest Document Summary\n\
         Your cholesterol is slightly high.\n\n\
         | Marker | Value |\n|---|---|\n| LDL | 160 |\n\n\
         {}\n\
         ### Overall Trend Summary\n\
         * LDL has decreased since last year\n\
         * Blood sugar is stable\n",
        NEW_PAGE_MARKER
    )
}

#[test]
fn test_pdf_with_trend_section() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = sample_report();
    let sections = split_report(&report);
    assert!(sections.has_trend());

    let path = export::export_pdf(&sections, dir.path(), "Purus-Report.pdf").unwrap();
    assert_eq!(path, dir.path().join("Purus-Report.pdf"));

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_to_explicit_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("lab-results.pdf");
    let sections = split_report("### Key Summary\nAll values are within range.");

    let path = export::export_pdf(&sections, &output, "Purus-Report.pdf").unwrap();
    assert_eq!(path, output);
    assert!(output.exists());
}

#[test]
fn test_layout_one_page_per_section() {
    let report = sample_report();
    let sections = split_report(&report);

    let pages: Vec<_> = sections
        .sections()
        .iter()
        .map(|s| pdf::layout_section(s, REPORT_TITLE))
        .collect();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].header.ends_with("Analysis Report"));
    assert!(pages[1].header.ends_with("Health Trend Analysis"));
}

#[test]
fn test_terminal_rendering_keeps_content() {
    let report = sample_report();
    let rendered = export::render_report(&split_report(&report));

    assert!(rendered.contains("Latest Document Summary"));
    assert!(rendered.contains("LDL"));
    assert!(rendered.contains(&"=".repeat(60)));
    assert!(!rendered.contains(NEW_PAGE_MARKER));
}
