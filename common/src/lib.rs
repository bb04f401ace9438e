//! Purus Common Library
//!
//! CLIと他のフロントエンドで共有される型とロジック（I/Oなし）

pub mod types;
pub mod encoder;
pub mod prompts;
pub mod report;
pub mod gemini;
pub mod error;

pub use types::{AnalysisMode, AnalysisRequest, EncodedFilePart};
pub use encoder::{decode_payload, encode_bytes};
pub use prompts::{build_prompt, build_summary_prompt, build_trend_prompt, normalize_symptoms, NEW_PAGE_MARKER};
pub use report::{split_report, ReportSection, ReportSections, SectionKind};
pub use gemini::{build_generate_request, parse_generate_response};
pub use error::{Error, Result};
