//! Issuer format descriptors: declarative specs and their compiled form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rules::{FieldRule, GrammarSpec, RuleSpec, TransactionGrammar};
use crate::error::DescriptorError;
use crate::models::statement::Field;

/// Declarative description of one issuer's statement layout.
///
/// This is the form descriptor files are written in; see
/// [`FormatDescriptor::compile`] for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorSpec {
    /// Issuer key used for lookup (matched case-insensitively).
    pub key: String,

    /// Display name placed on extracted statements.
    pub display_name: String,

    /// Candidate rules per header field, most specific first.
    #[serde(default)]
    pub fields: BTreeMap<Field, Vec<RuleSpec>>,

    /// Grammar for one transaction line.
    pub transactions: GrammarSpec,
}

impl DescriptorSpec {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        transactions: GrammarSpec,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            fields: BTreeMap::new(),
            transactions,
        }
    }

    /// Set the candidate rules for a field.
    pub fn field(mut self, field: Field, rules: Vec<RuleSpec>) -> Self {
        self.fields.insert(field, rules);
        self
    }
}

/// A compiled descriptor. Immutable once built.
#[derive(Debug, Clone)]
pub struct FormatDescriptor {
    key: String,
    display_name: String,
    fields: BTreeMap<Field, Vec<FieldRule>>,
    transactions: TransactionGrammar,
}

impl FormatDescriptor {
    /// Compile and validate a spec.
    pub fn compile(spec: &DescriptorSpec) -> Result<Self, DescriptorError> {
        let key = spec.key.trim().to_lowercase();
        if key.is_empty() {
            return Err(DescriptorError::EmptyKey);
        }

        let mut fields = BTreeMap::new();
        for (field, rule_specs) in &spec.fields {
            let rules = rule_specs
                .iter()
                .map(|rule| {
                    FieldRule::compile(rule).map_err(|source| DescriptorError::Pattern {
                        issuer: key.clone(),
                        target: field.name().to_string(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            fields.insert(*field, rules);
        }

        let transactions = TransactionGrammar::compile(&key, &spec.transactions)?;

        Ok(Self {
            key,
            display_name: spec.display_name.clone(),
            fields,
            transactions,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Candidate rules for a field, in declared order. Empty if none declared.
    pub fn rules(&self, field: Field) -> &[FieldRule] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the descriptor declares at least one rule for the field.
    pub fn has_rules(&self, field: Field) -> bool {
        !self.rules(field).is_empty()
    }

    pub fn transactions(&self) -> &TransactionGrammar {
        &self.transactions
    }
}
