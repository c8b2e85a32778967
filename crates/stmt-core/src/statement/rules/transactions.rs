//! Transaction line parsing driven by a per-issuer grammar.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::amounts::normalize_amount;
use crate::error::DescriptorError;
use crate::models::statement::{Direction, TransactionRecord};

/// Named groups every transaction grammar must declare.
pub const REQUIRED_GROUPS: [&str; 4] = ["date", "description", "amount", "direction"];

/// Declarative form of a transaction grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSpec {
    /// Pattern for one transaction line with named groups
    /// `date`, `description`, `amount` and `direction`.
    pub pattern: String,

    /// Marker token (as captured by `direction`) to direction.
    pub markers: BTreeMap<String, Direction>,
}

impl GrammarSpec {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            markers: BTreeMap::new(),
        }
    }

    /// Map a marker token to a direction.
    pub fn marker(mut self, token: impl Into<String>, direction: Direction) -> Self {
        self.markers.insert(token.into(), direction);
        self
    }
}

/// A compiled, validated transaction grammar.
#[derive(Debug, Clone)]
pub struct TransactionGrammar {
    regex: Regex,
    markers: BTreeMap<String, Direction>,
}

impl TransactionGrammar {
    /// Compile a grammar. Matching is case-sensitive so marker tokens map exactly.
    pub fn compile(issuer: &str, spec: &GrammarSpec) -> Result<Self, DescriptorError> {
        let regex = RegexBuilder::new(&spec.pattern)
            .multi_line(true)
            .build()
            .map_err(|source| DescriptorError::Pattern {
                issuer: issuer.to_string(),
                target: "transactions".to_string(),
                source,
            })?;

        for group in REQUIRED_GROUPS {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(DescriptorError::MissingGroup {
                    issuer: issuer.to_string(),
                    group,
                });
            }
        }

        if spec.markers.is_empty() {
            return Err(DescriptorError::NoMarkers {
                issuer: issuer.to_string(),
            });
        }

        Ok(Self {
            regex,
            markers: spec.markers.clone(),
        })
    }

    /// Direction for a captured marker token.
    pub fn direction(&self, marker: &str) -> Option<Direction> {
        self.markers
            .get(marker)
            .or_else(|| self.markers.get(marker.trim()))
            .copied()
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Scan the whole text for non-overlapping grammar matches, in source order.
///
/// Candidates whose amount does not normalize to a positive value are noise
/// and are dropped without error.
pub fn parse_transactions(text: &str, grammar: &TransactionGrammar) -> Vec<TransactionRecord> {
    let mut transactions = Vec::new();

    for caps in grammar.regex.captures_iter(text) {
        let (Some(date), Some(description), Some(amount), Some(marker)) = (
            caps.name("date"),
            caps.name("description"),
            caps.name("amount"),
            caps.name("direction"),
        ) else {
            continue;
        };

        let Some(value) = normalize_amount(amount.as_str()) else {
            debug!(
                "Dropping transaction candidate at {}: amount {:?} is not monetary",
                date.start(),
                amount.as_str()
            );
            continue;
        };

        let Some(direction) = grammar.direction(marker.as_str()) else {
            warn!(
                "Dropping transaction candidate at {}: marker {:?} has no direction",
                date.start(),
                marker.as_str()
            );
            continue;
        };

        transactions.push(TransactionRecord {
            date: date.as_str().trim().to_string(),
            description: description.as_str().trim().to_string(),
            amount: value,
            direction,
        });
    }

    transactions
}
