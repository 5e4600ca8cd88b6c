//! Text extraction from uploaded files.
//!
//! Extraction is an injected capability: the ingestion pipeline
//! only depends on the [`TextExtractor`] trait, so binary formats
//! can be handled by whatever converter the deployment wires in.
//! Plain-text files are decoded in-process.

use std::fmt;

use crate::core::error::{AskdocError, Result};

/// Supported document formats, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Txt,
    Docx,
}

impl DocumentFormat {
    /// Determine the format from a file name.
    ///
    /// Matching is case-insensitive on the extension. Any other
    /// extension (or a missing one) is an unsupported format.
    pub fn from_name(name: &str) -> Result<Self> {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "txt" => Ok(DocumentFormat::Txt),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(AskdocError::UnsupportedFormat(name.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Txt => write!(f, "txt"),
            DocumentFormat::Docx => write!(f, "docx"),
        }
    }
}

/// Converts raw file bytes of a given format into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, format: DocumentFormat, bytes: &[u8]) -> Result<String>;
}

/// Built-in extractor.
///
/// Decodes `txt` as UTF-8 (lossy). `pdf` and `docx` need an
/// external converter implementation of [`TextExtractor`]; this
/// one reports them as extraction failures, which the pipeline
/// isolates to the offending file.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, format: DocumentFormat, bytes: &[u8]) -> Result<String> {
        match format {
            DocumentFormat::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
            DocumentFormat::Pdf | DocumentFormat::Docx => Err(AskdocError::ExtractionFailed(
                format!("no {format} converter configured"),
            )),
        }
    }
}
