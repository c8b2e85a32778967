//! Cascading field lookup over ordered candidate patterns.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Placeholder some renderings print in place of a value.
const PLACEHOLDER: &str = "not found";

/// Declarative form of one candidate pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regular expression; the first capture group is the value.
    pub pattern: String,

    /// Let `.` cross line breaks, for labels whose value lands on a later line.
    #[serde(default)]
    pub span_lines: bool,
}

impl RuleSpec {
    /// Rule whose `.` stays within a line.
    pub fn line(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            span_lines: false,
        }
    }

    /// Rule whose `.` may cross line breaks.
    pub fn spanning(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            span_lines: true,
        }
    }
}

/// A compiled candidate pattern for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    regex: Regex,
}

impl FieldRule {
    /// Compile a rule: case-insensitive, `^`/`$` at line boundaries.
    pub fn compile(spec: &RuleSpec) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .multi_line(true)
            .dot_matches_new_line(spec.span_lines)
            .build()?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Value of the first match: capture group 1 if the pattern has one,
    /// otherwise the whole match. Trimmed.
    pub fn apply<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.regex.captures(text)?;
        let m = if self.regex.captures_len() > 1 {
            caps.get(1)?
        } else {
            caps.get(0)?
        };
        Some(m.as_str().trim())
    }
}

/// Try `rules` in declared order and return the first usable capture.
///
/// A capture that is empty or the "not found" placeholder counts as a miss
/// and the cascade moves on to the next rule.
pub fn locate_field(text: &str, rules: &[FieldRule]) -> Option<String> {
    locate_field_with(text, rules, |_| true)
}

/// Like [`locate_field`], with an extra acceptance check on each capture.
pub fn locate_field_with<F>(text: &str, rules: &[FieldRule], accept: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    for (index, rule) in rules.iter().enumerate() {
        let Some(value) = rule.apply(text) else {
            trace!("rule {} did not match: {}", index, rule.as_str());
            continue;
        };

        if value.is_empty() || value.eq_ignore_ascii_case(PLACEHOLDER) || !accept(value) {
            trace!("rule {} matched unusable value {:?}", index, value);
            continue;
        }

        trace!("rule {} matched {:?}", index, value);
        return Some(value.to_string());
    }

    None
}
