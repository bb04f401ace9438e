use thiserror::Error;

use crate::app::SessionError;

#[derive(Error, Debug)]
pub enum PurusError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("API key is not set. Export GEMINI_API_KEY or run `purus config --set-api-key YOUR_KEY`")]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Analysis Failed: {0}")]
    AnalysisFailed(String),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, PurusError>;
