//! Document text extraction
//!
//! Turns the base64 PDF payload of a validation request into the plain text
//! the validation engine scans. Everything happens in memory; the decoded PDF
//! is never written to disk.
//!
//! # Example
//! ```no_run
//! use shared_pdf::{text_from_base64, ExtractError};
//!
//! fn read(payload: &str) -> Result<(), ExtractError> {
//!     let text = text_from_base64(payload)?;
//!     println!("{} characters", text.chars().count());
//!     Ok(())
//! }
//! ```

use std::panic::{self, AssertUnwindSafe};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid base64 document: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF text extraction failed: {0}")]
    Extraction(String),
}

/// Decode a standard-alphabet base64 payload, ignoring surrounding whitespace.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, ExtractError> {
    let bytes = BASE64.decode(input.trim())?;
    if bytes.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    Ok(bytes)
}

/// Extract the plain text of every page of a PDF.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    if pdf_bytes.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    // pdf-extract panics on some malformed inputs instead of returning an error
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(pdf_bytes)
    }))
    .map_err(|_| ExtractError::InvalidPdf("parser aborted on malformed input".to_string()))?;

    let text = result.map_err(|e| classify(e.to_string()))?;
    debug!(bytes = pdf_bytes.len(), chars = text.chars().count(), "Extracted PDF text");
    Ok(text)
}

/// Decode then extract; the usual path for request payloads.
pub fn text_from_base64(input: &str) -> Result<String, ExtractError> {
    let bytes = decode_base64(input)?;
    extract_text(&bytes)
}

fn classify(message: String) -> ExtractError {
    let lower = message.to_lowercase();
    if lower.contains("encrypted") || lower.contains("password") {
        ExtractError::PasswordProtected
    } else if lower.contains("invalid")
        || lower.contains("malformed")
        || lower.contains("corrupt")
        || lower.contains("parse")
        || lower.contains("header")
    {
        ExtractError::InvalidPdf(message)
    } else {
        ExtractError::Extraction(message)
    }
}
