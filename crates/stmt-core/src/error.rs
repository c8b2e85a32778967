//! Error types for the stmt-core library.

use thiserror::Error;

/// Main error type for the stmt library.
#[derive(Error, Debug)]
pub enum StmtError {
    /// The issuer key is not present in the registry.
    #[error("unsupported issuer: {0}")]
    UnsupportedIssuer(String),

    /// The upstream text extraction failed.
    #[error("document unreadable: {0}")]
    DocumentUnreadable(#[from] PdfError),

    /// A format descriptor could not be compiled.
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while compiling a format descriptor from its spec.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The descriptor has an empty issuer key.
    #[error("descriptor key must not be empty")]
    EmptyKey,

    /// Two descriptors share the same issuer key.
    #[error("duplicate issuer key: {0}")]
    DuplicateKey(String),

    /// A field rule or transaction grammar failed to compile.
    #[error("invalid pattern for {issuer}/{target}: {source}")]
    Pattern {
        issuer: String,
        target: String,
        #[source]
        source: regex::Error,
    },

    /// The transaction grammar lacks a required named group.
    #[error("transaction grammar for {issuer} lacks named group '{group}'")]
    MissingGroup { issuer: String, group: &'static str },

    /// The transaction grammar declares no direction markers.
    #[error("transaction grammar for {issuer} declares no direction markers")]
    NoMarkers { issuer: String },
}

/// Result type for the stmt library.
pub type Result<T> = std::result::Result<T, StmtError>;
