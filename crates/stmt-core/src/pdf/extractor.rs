//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    decrypt_with_empty_password: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            decrypt_with_empty_password: true,
        }
    }

    /// Create an extractor following the PDF section of the config.
    pub fn with_config(config: &PdfConfig) -> Self {
        Self::new().with_empty_password(config.decrypt_with_empty_password)
    }

    /// Whether to try the empty password on encrypted documents.
    pub fn with_empty_password(mut self, enabled: bool) -> Self {
        self.decrypt_with_empty_password = enabled;
        self
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        Ok(())
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Statements are commonly owner-locked with an empty user password
        if doc.is_encrypted() {
            if !self.decrypt_with_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.ensure_loaded()?;
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_blocks(&self) -> Result<Vec<String>> {
        self.ensure_loaded()?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        debug!(
            "Extracted {} text blocks, {} chars",
            pages.len(),
            pages.iter().map(String::len).sum::<usize>()
        );
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_before_load_fails() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_text(), Err(PdfError::Parse(_))));
        assert!(matches!(extractor.extract_blocks(), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_non_pdf() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"Credit Limit Rs. 50,000.00");
        assert!(matches!(result, Err(PdfError::Parse(_))));
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_with_config() {
        let config = PdfConfig {
            decrypt_with_empty_password: false,
            ..PdfConfig::default()
        };
        let extractor = PdfExtractor::with_config(&config);
        assert!(!extractor.decrypt_with_empty_password);
    }
}
