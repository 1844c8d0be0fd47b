//! PDF text extraction
//!
//! Thin wrapper around `pdf-extract` turning a downloaded gazette PDF into
//! plain text for the filtering/chunking pipeline. No state, no on-disk
//! format of its own.

#![warn(missing_docs)]

use thiserror::Error;

/// Errors from PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The bytes could not be parsed as a PDF or contained no extractable text
    #[error("failed to extract text: {0}")]
    Extraction(String),
}

/// Extract all text from PDF bytes.
///
/// # Errors
///
/// Returns [`PdfError::Extraction`] when the document cannot be parsed.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| PdfError::Extraction(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bytes_error() {
        let result = extract_text(b"not a pdf");
        assert!(matches!(result, Err(PdfError::Extraction(_))));
    }
}
