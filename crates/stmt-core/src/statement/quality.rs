//! Per-field extraction quality tracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::statement::Field;

/// Success flag for every attempted header field.
///
/// Advisory only: nothing in the engine gates or retries on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionQuality {
    fields: BTreeMap<Field, bool>,
}

impl ExtractionQuality {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one field. A later record for the same field wins.
    pub fn record(&mut self, field: Field, present: bool) {
        self.fields.insert(field, present);
    }

    /// Outcome for a field, `None` if it was not attempted.
    pub fn get(&self, field: Field) -> Option<bool> {
        self.fields.get(&field).copied()
    }

    /// Number of attempted fields.
    pub fn attempted(&self) -> usize {
        self.fields.len()
    }

    /// Number of fields that produced a value.
    pub fn present(&self) -> usize {
        self.fields.values().filter(|ok| **ok).count()
    }

    /// Fields that were attempted but stayed absent.
    pub fn missing(&self) -> Vec<Field> {
        self.fields
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(field, _)| *field)
            .collect()
    }

    /// Present / attempted, or 0.0 when nothing was attempted.
    pub fn ratio(&self) -> f32 {
        if self.fields.is_empty() {
            return 0.0;
        }
        self.present() as f32 / self.attempted() as f32
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        self.fields.iter().map(|(field, ok)| (*field, *ok))
    }
}
