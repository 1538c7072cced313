//! Conversion between server payloads, the canonical result and export files.
//!
//! Decoding tolerates partial responses: missing or non-numeric fields fall
//! back to zero or empty. Only payloads that are not valid JSON or
//! well-formed XML at all are rejected as malformed.

mod json;
mod xml;

use crate::core::{
    models::{
        AnalysisResult,
        CanonicalResult,
        OutputFormat,
        RawResponse,
    },
    AnalyzerError,
};

const EXPORT_FILE_STEM: &str = "analysis-results";

/// Bytes ready to be saved by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn export_file_name(format: OutputFormat) -> String {
    format!("{}.{}", EXPORT_FILE_STEM, format.extension())
}

/// Wraps a response body as a [`RawResponse`] for `format`.
pub fn parse_body(format: OutputFormat, body: String) -> Result<RawResponse, AnalyzerError> {
    match format {
        OutputFormat::Json => serde_json::from_str(&body)
            .map(RawResponse::Json)
            .map_err(|e| AnalyzerError::malformed(format!("invalid JSON: {e}"))),
        OutputFormat::Xml => Ok(RawResponse::Xml(body)),
    }
}

pub fn decode(raw: &RawResponse, format: OutputFormat) -> Result<CanonicalResult, AnalyzerError> {
    match (raw, format) {
        (RawResponse::Json(value), OutputFormat::Json) => json::decode(value),
        (RawResponse::Xml(text), OutputFormat::Xml) => xml::decode(text),
        (raw, format) => Err(AnalyzerError::malformed(format!(
            "expected a {} payload but received {}",
            format,
            raw.format()
        ))),
    }
}

/// JSON exports the canonical record pretty-printed. XML passes the server's
/// text through untouched; it is never synthesized from the record.
pub fn encode(
    result: &AnalysisResult,
    format: OutputFormat,
) -> Result<ExportPayload, AnalyzerError> {
    let bytes = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&result.canonical)?.into_bytes(),
        OutputFormat::Xml => match &result.raw {
            RawResponse::Xml(text) => text.clone().into_bytes(),
            RawResponse::Json(_) => return Err(AnalyzerError::ExportUnavailable(format)),
        },
    };

    Ok(ExportPayload { file_name: export_file_name(format), mime_type: format.mime_type(), bytes })
}
