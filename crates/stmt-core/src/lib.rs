//! Core library for credit-card statement extraction.
//!
//! This crate provides:
//! - PDF processing (page text extraction, empty-password decryption)
//! - Per-issuer format descriptors compiled from declarative specs
//! - Header field extraction (card number, dates, limits, dues, balances)
//! - Transaction line parsing and per-field extraction quality
//!
//! ```
//! use stmt_core::StatementParser;
//!
//! let text = "Credit Limit ₹ 50,000.00\nTotal Payment Due ₹ 12,345.67\n";
//! let statement = StatementParser::new().parse_text(text, "axis").unwrap();
//! assert_eq!(statement.available_credit.unwrap().to_string(), "37654.33");
//! ```

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{DescriptorError, PdfError, Result, StmtError};
pub use models::config::{ExtractionConfig, PdfConfig, StmtConfig};
pub use models::statement::{Direction, Field, Money, StatementRecord, TransactionRecord};
pub use models::summary::StatementSummary;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use statement::rules::{format_amount, normalize_amount};
pub use statement::{
    DescriptorSpec, ExtractionQuality, ExtractionResult, FormatDescriptor, Registry,
    StatementExtractor, StatementParser,
};
