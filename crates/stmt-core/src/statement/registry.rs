//! Registry of issuer format descriptors.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::debug;

use super::descriptor::{DescriptorSpec, FormatDescriptor};
use super::issuers::builtin_specs;
use crate::error::{DescriptorError, Result, StmtError};

lazy_static! {
    static ref BUILTIN: Arc<Registry> =
        Arc::new(Registry::from_specs(builtin_specs()).expect("built-in descriptors compile"));
}

/// Read-only mapping from issuer key to descriptor.
///
/// Built once at startup and shared; lookups never mutate it.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: BTreeMap<String, FormatDescriptor>,
}

impl Registry {
    /// The built-in issuers: axis, bob, kotak, sbi, yes.
    pub fn builtin() -> Arc<Registry> {
        Arc::clone(&BUILTIN)
    }

    /// Compile a registry from specs alone.
    pub fn from_specs<I>(specs: I) -> std::result::Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = DescriptorSpec>,
    {
        let mut registry = Registry::default();
        for spec in specs {
            registry.insert(&spec)?;
        }
        Ok(registry)
    }

    /// The built-in issuers plus custom specs. Keys must not collide.
    pub fn with_specs<I>(specs: I) -> std::result::Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = DescriptorSpec>,
    {
        let mut registry = BUILTIN.as_ref().clone();
        for spec in specs {
            registry.insert(&spec)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, spec: &DescriptorSpec) -> std::result::Result<(), DescriptorError> {
        let descriptor = FormatDescriptor::compile(spec)?;
        let key = descriptor.key().to_string();
        if self.descriptors.contains_key(&key) {
            return Err(DescriptorError::DuplicateKey(key));
        }
        debug!("Registered issuer {} ({})", key, descriptor.display_name());
        self.descriptors.insert(key, descriptor);
        Ok(())
    }

    /// Look up a descriptor by issuer key, case-insensitively.
    pub fn lookup(&self, key: &str) -> Result<&FormatDescriptor> {
        self.get(key)
            .ok_or_else(|| StmtError::UnsupportedIssuer(key.trim().to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&FormatDescriptor> {
        self.descriptors.get(&key.trim().to_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// `(key, display name)` pairs in key order.
    pub fn issuers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.descriptors
            .values()
            .map(|d| (d.key(), d.display_name()))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecFile {
    Many(Vec<DescriptorSpec>),
    One(DescriptorSpec),
}

/// Load descriptor specs from a JSON file holding one spec or an array of them.
pub fn load_spec_file(path: &Path) -> Result<Vec<DescriptorSpec>> {
    let content = std::fs::read_to_string(path)?;
    let parsed: SpecFile = serde_json::from_str(&content).map_err(|e| {
        StmtError::Config(format!("invalid descriptor file {}: {}", path.display(), e))
    })?;
    Ok(match parsed {
        SpecFile::Many(specs) => specs,
        SpecFile::One(spec) => vec![spec],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::{Direction, Field};
    use crate::statement::rules::{GrammarSpec, RuleSpec};

    fn custom_spec(key: &str) -> DescriptorSpec {
        DescriptorSpec::new(
            key,
            "Custom Bank",
            GrammarSpec::new(
                r"(?P<date>\d{2}\.\d{2})\s+(?P<description>.+?)\s+(?P<amount>[\d.]+)\s+(?P<direction>\+|-)",
            )
            .marker("+", Direction::Credit)
            .marker("-", Direction::Debit),
        )
        .field(Field::CreditLimit, vec![RuleSpec::line(r"Limit\s+([\d,.]+)")])
    }

    #[test]
    fn test_builtin_issuers() {
        let registry = Registry::builtin();
        let keys: Vec<&str> = registry.issuers().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["axis", "bob", "kotak", "sbi", "yes"]);
        assert_eq!(registry.lookup("axis").unwrap().display_name(), "Axis Bank");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::builtin();
        assert_eq!(registry.lookup("KOTAK").unwrap().key(), "kotak");
        assert_eq!(registry.lookup(" Sbi ").unwrap().key(), "sbi");
    }

    #[test]
    fn test_unknown_issuer() {
        let registry = Registry::builtin();
        match registry.lookup("unknownbank") {
            Err(StmtError::UnsupportedIssuer(key)) => assert_eq!(key, "unknownbank"),
            other => panic!("expected UnsupportedIssuer, got {:?}", other.map(|d| d.key())),
        }
    }

    #[test]
    fn test_with_specs_adds_custom_issuer() {
        let registry = Registry::with_specs(vec![custom_spec("custom")]).unwrap();
        assert_eq!(registry.len(), 6);
        assert!(registry.contains("custom"));
        assert!(registry.contains("axis"));
        // the shared built-in registry is untouched
        assert!(!Registry::builtin().contains("custom"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = Registry::with_specs(vec![custom_spec("Axis")]).unwrap_err();
        assert!(matches!(err, DescriptorError::DuplicateKey(key) if key == "axis"));
    }

    #[test]
    fn test_load_spec_file() {
        let dir = tempfile::tempdir().unwrap();
        let single = dir.path().join("one.json");
        let many = dir.path().join("many.json");
        std::fs::write(&single, serde_json::to_string(&custom_spec("one")).unwrap()).unwrap();
        std::fs::write(
            &many,
            serde_json::to_string(&vec![custom_spec("two"), custom_spec("three")]).unwrap(),
        )
        .unwrap();

        assert_eq!(load_spec_file(&single).unwrap().len(), 1);
        let specs = load_spec_file(&many).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].key, "three");
    }

    #[test]
    fn test_load_spec_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_spec_file(&path), Err(StmtError::Config(_))));
    }
}
