use thiserror::Error;

use crate::core::models::OutputFormat;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Network error: {0}")]
    Network(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("File is not valid UTF-8 text: {0}")]
    FileEncoding(String),

    #[error("No {0} payload available to export")]
    ExportUnavailable(OutputFormat),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("AnalyzerError: {0}")]
    Custom(String),
}

/// User-facing classification of an [`AnalyzerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    MalformedPayload,
    File,
    Export,
}

impl AnalyzerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzerError::Network(_) | AnalyzerError::HttpStatus { .. } => {
                ErrorKind::NetworkFailure
            }
            AnalyzerError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            AnalyzerError::Io(_) | AnalyzerError::FileEncoding(_) => ErrorKind::File,
            AnalyzerError::ExportUnavailable(_) | AnalyzerError::Json(_) => ErrorKind::Export,
            AnalyzerError::Custom(_) => ErrorKind::NetworkFailure,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AnalyzerError::MalformedPayload(message.into())
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(error: std::io::Error) -> Self {
        AnalyzerError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(error: reqwest::Error) -> Self {
        AnalyzerError::Network(Box::new(error))
    }
}
