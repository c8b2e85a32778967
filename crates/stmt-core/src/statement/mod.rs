//! Statement field extraction module.

pub mod descriptor;
mod issuers;
mod parser;
pub mod quality;
pub mod registry;
pub mod rules;

pub use descriptor::{DescriptorSpec, FormatDescriptor};
pub use issuers::builtin_specs;
pub use parser::{derive_available_credit, extract_statement, ExtractionResult, StatementParser};
pub use quality::ExtractionQuality;
pub use registry::{load_spec_file, Registry};

use crate::error::Result;
use crate::models::statement::StatementRecord;

/// Trait for statement extractors.
pub trait StatementExtractor {
    /// Extract a statement from already-rendered text.
    fn extract_from_text(&self, text: &str, issuer: &str) -> Result<StatementRecord>;

    /// Extract a statement from document bytes.
    fn extract_from_document(&self, data: &[u8], issuer: &str) -> Result<ExtractionResult>;
}
