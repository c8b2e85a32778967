//! Statement extraction: resolves the issuer descriptor and runs every
//! header-field cascade and the transaction grammar over the text.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::{PdfConfig, StmtConfig};
use crate::models::statement::{Field, Money, StatementRecord};
use crate::pdf::{PdfExtractor, PdfProcessor};

use super::descriptor::FormatDescriptor;
use super::quality::ExtractionQuality;
use super::registry::{load_spec_file, Registry};
use super::rules::{locate_field, locate_field_with, normalize_amount, parse_transactions};
use super::StatementExtractor;

/// Result of extracting a statement from a document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted statement.
    pub statement: StatementRecord,
    /// Pages in the source document.
    pub page_count: u32,
    /// Characters of text handed to the engine.
    pub text_length: usize,
    /// Header fields that stayed absent.
    pub missing_fields: Vec<Field>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Statement parser over a shared, read-only descriptor registry.
///
/// Holds no per-call state, so one parser can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct StatementParser {
    registry: Arc<Registry>,
    pdf: PdfConfig,
}

impl StatementParser {
    /// Create a parser over the built-in issuers.
    pub fn new() -> Self {
        Self {
            registry: Registry::builtin(),
            pdf: PdfConfig::default(),
        }
    }

    /// Build a parser from configuration, registering custom descriptor files.
    pub fn from_config(config: &StmtConfig) -> Result<Self> {
        let registry = if config.extraction.descriptor_files.is_empty() {
            Registry::builtin()
        } else {
            let mut specs = Vec::new();
            for path in &config.extraction.descriptor_files {
                specs.extend(load_spec_file(path)?);
            }
            Arc::new(Registry::with_specs(specs)?)
        };

        Ok(Self::new()
            .with_registry(registry)
            .with_pdf_config(config.pdf.clone()))
    }

    /// Use a different registry.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Set PDF handling options.
    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Extract a statement from already-rendered text.
    ///
    /// Fails only when the issuer key is unknown; missing fields are absent.
    pub fn parse_text(&self, text: &str, issuer: &str) -> Result<StatementRecord> {
        let descriptor = self.registry.lookup(issuer)?;
        Ok(extract_statement(text, descriptor))
    }

    /// Extract a statement from PDF bytes with the default extractor.
    pub fn parse_document(&self, data: &[u8], issuer: &str) -> Result<ExtractionResult> {
        let mut processor = PdfExtractor::with_config(&self.pdf);
        self.parse_with(&mut processor, data, issuer)
    }

    /// Extract a statement from document bytes with the given processor.
    ///
    /// The issuer is resolved before the document is touched.
    pub fn parse_with<P: PdfProcessor>(
        &self,
        processor: &mut P,
        data: &[u8],
        issuer: &str,
    ) -> Result<ExtractionResult> {
        let start = Instant::now();
        let descriptor = self.registry.lookup(issuer)?;

        processor.load(data)?;
        let text = processor.extract_blocks()?.join(&self.pdf.page_separator);

        let statement = extract_statement(&text, descriptor);
        let missing_fields = statement.extraction_quality.missing();

        Ok(ExtractionResult {
            page_count: processor.page_count(),
            text_length: text.chars().count(),
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
            statement,
        })
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementExtractor for StatementParser {
    fn extract_from_text(&self, text: &str, issuer: &str) -> Result<StatementRecord> {
        self.parse_text(text, issuer)
    }

    fn extract_from_document(&self, data: &[u8], issuer: &str) -> Result<ExtractionResult> {
        self.parse_document(data, issuer)
    }
}

/// Run one descriptor over the text. Every field is attempted exactly once.
pub fn extract_statement(text: &str, descriptor: &FormatDescriptor) -> StatementRecord {
    let mut record = StatementRecord::new(descriptor.display_name());

    for field in Field::ALL {
        let rules = descriptor.rules(field);
        if field.is_monetary() {
            let value = locate_field(text, rules).and_then(|raw| normalize_amount(&raw));
            set_amount(&mut record, field, value);
        } else if field.is_date() {
            // one- and two-character captures are page numbers, not dates
            let value = locate_field_with(text, rules, |v| v.chars().count() > 2);
            set_text(&mut record, field, value);
        } else {
            set_text(&mut record, field, locate_field(text, rules));
        }
        debug!(
            "{}: {} = {:?}",
            descriptor.key(),
            field,
            record.display_value(field)
        );
    }

    if record.available_credit.is_none() {
        record.available_credit =
            derive_available_credit(record.credit_limit, record.total_amount_due);
        if record.available_credit.is_some() {
            debug!("{}: available_credit derived from limit and total due", descriptor.key());
        }
    }

    let mut quality = ExtractionQuality::new();
    for field in Field::ALL {
        quality.record(field, record.has(field));
    }
    record.extraction_quality = quality;

    record.transactions = parse_transactions(text, descriptor.transactions());

    info!(
        "Parsed {} statement: {}/{} fields, {} transactions",
        descriptor.display_name(),
        record.extraction_quality.present(),
        record.extraction_quality.attempted(),
        record.transactions.len()
    );

    record
}

/// Credit limit minus total due, when both are known and the result is positive.
pub fn derive_available_credit(
    credit_limit: Option<Money>,
    total_amount_due: Option<Money>,
) -> Option<Money> {
    let (limit, due) = (credit_limit?, total_amount_due?);
    Some(limit - due).filter(|available| *available > Decimal::ZERO)
}

fn set_amount(record: &mut StatementRecord, field: Field, value: Option<Money>) {
    match field {
        Field::CreditLimit => record.credit_limit = value,
        Field::TotalAmountDue => record.total_amount_due = value,
        Field::MinimumAmountDue => record.minimum_amount_due = value,
        Field::PreviousBalance => record.previous_balance = value,
        Field::AvailableCredit => record.available_credit = value,
        Field::CardNumber | Field::StatementDate | Field::PaymentDueDate => {}
    }
}

fn set_text(record: &mut StatementRecord, field: Field, value: Option<String>) {
    match field {
        Field::CardNumber => record.card_number = value,
        Field::StatementDate => record.statement_date = value,
        Field::PaymentDueDate => record.payment_due_date = value,
        _ => {}
    }
}
