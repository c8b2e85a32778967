//! Rule-based building blocks: amount normalization, field cascades,
//! and transaction grammars.

pub mod amounts;
pub mod locator;
pub mod transactions;

pub use amounts::{format_amount, normalize_amount};
pub use locator::{locate_field, locate_field_with, FieldRule, RuleSpec};
pub use transactions::{parse_transactions, GrammarSpec, TransactionGrammar, REQUIRED_GROUPS};
