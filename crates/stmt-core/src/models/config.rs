//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StmtError};

/// Main configuration for the stmt pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StmtConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Statement extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try the empty password on encrypted (owner-locked) statements.
    pub decrypt_with_empty_password: bool,

    /// Separator placed between page text blocks.
    pub page_separator: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_with_empty_password: true,
            page_separator: "\n".to_string(),
        }
    }
}

/// Statement extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Issuer key used when none is given on the command line.
    pub default_issuer: Option<String>,

    /// Quality ratio below which a statement is reported as sparse (0.0 - 1.0).
    pub min_quality: f32,

    /// JSON files with additional issuer descriptors.
    pub descriptor_files: Vec<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_issuer: None,
            min_quality: 0.5,
            descriptor_files: Vec::new(),
        }
    }
}

impl StmtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            StmtError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| StmtError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
