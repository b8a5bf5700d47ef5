//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The text source could not produce text for a document.
    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

impl ResumeAnalyzerError {
    /// True when the failure only concerns a single document and a batch may continue.
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            ResumeAnalyzerError::InputUnavailable(_)
                | ResumeAnalyzerError::PdfExtraction(_)
                | ResumeAnalyzerError::UnsupportedFormat(_)
                | ResumeAnalyzerError::Io(_)
        )
    }
}
