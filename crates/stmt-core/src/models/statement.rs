//! Statement data models produced by the extraction engine.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::quality::ExtractionQuality;

/// Monetary value. Always strictly positive when present.
pub type Money = Decimal;

/// A complete credit-card statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Display name of the issuer, resolved from the issuer key.
    pub issuer_name: String,

    /// Masked card number as printed on the statement.
    pub card_number: Option<String>,

    /// Statement date or period, issuer-native.
    pub statement_date: Option<String>,

    /// Payment due date, issuer-native.
    pub payment_due_date: Option<String>,

    /// Credit limit.
    pub credit_limit: Option<Money>,

    /// Total amount due.
    pub total_amount_due: Option<Money>,

    /// Minimum amount due.
    pub minimum_amount_due: Option<Money>,

    /// Opening balance carried over from the previous statement.
    pub previous_balance: Option<Money>,

    /// Available credit, captured or derived from limit and total due.
    pub available_credit: Option<Money>,

    /// Transactions in order of first appearance.
    pub transactions: Vec<TransactionRecord>,

    /// Per-field success flags.
    pub extraction_quality: ExtractionQuality,
}

impl StatementRecord {
    /// Create an empty record for the given issuer.
    pub fn new(issuer_name: impl Into<String>) -> Self {
        Self {
            issuer_name: issuer_name.into(),
            card_number: None,
            statement_date: None,
            payment_due_date: None,
            credit_limit: None,
            total_amount_due: None,
            minimum_amount_due: None,
            previous_balance: None,
            available_credit: None,
            transactions: Vec::new(),
            extraction_quality: ExtractionQuality::default(),
        }
    }

    /// Monetary value of a field, `None` for text fields or absent values.
    pub fn amount(&self, field: Field) -> Option<Money> {
        match field {
            Field::CreditLimit => self.credit_limit,
            Field::TotalAmountDue => self.total_amount_due,
            Field::MinimumAmountDue => self.minimum_amount_due,
            Field::PreviousBalance => self.previous_balance,
            Field::AvailableCredit => self.available_credit,
            Field::CardNumber | Field::StatementDate | Field::PaymentDueDate => None,
        }
    }

    /// Text value of a field, `None` for monetary fields or absent values.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::CardNumber => self.card_number.as_deref(),
            Field::StatementDate => self.statement_date.as_deref(),
            Field::PaymentDueDate => self.payment_due_date.as_deref(),
            _ => None,
        }
    }

    /// Whether a value was obtained for the field.
    pub fn has(&self, field: Field) -> bool {
        if field.is_monetary() {
            self.amount(field).is_some()
        } else {
            self.text(field).is_some()
        }
    }

    /// Render any field as a display string.
    pub fn display_value(&self, field: Field) -> Option<String> {
        if field.is_monetary() {
            self.amount(field).map(|v| v.to_string())
        } else {
            self.text(field).map(str::to_string)
        }
    }
}

/// A single transaction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Issuer-native date.
    pub date: String,

    /// Trimmed description text.
    pub description: String,

    /// Strictly positive amount.
    pub amount: Money,

    /// Credit or debit.
    #[serde(rename = "type")]
    pub direction: Direction,
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Money returned to the card (payments, refunds).
    Credit,
    /// Money spent on the card.
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header fields extracted from a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardNumber,
    StatementDate,
    PaymentDueDate,
    CreditLimit,
    TotalAmountDue,
    MinimumAmountDue,
    PreviousBalance,
    AvailableCredit,
}

impl Field {
    /// All header fields in extraction order.
    pub const ALL: [Field; 8] = [
        Field::CardNumber,
        Field::StatementDate,
        Field::PaymentDueDate,
        Field::CreditLimit,
        Field::TotalAmountDue,
        Field::MinimumAmountDue,
        Field::PreviousBalance,
        Field::AvailableCredit,
    ];

    /// Snake-case field name, as used in quality maps and descriptor files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CardNumber => "card_number",
            Self::StatementDate => "statement_date",
            Self::PaymentDueDate => "payment_due_date",
            Self::CreditLimit => "credit_limit",
            Self::TotalAmountDue => "total_amount_due",
            Self::MinimumAmountDue => "minimum_amount_due",
            Self::PreviousBalance => "previous_balance",
            Self::AvailableCredit => "available_credit",
        }
    }

    /// Whether captures for this field go through the amount normalizer.
    pub fn is_monetary(&self) -> bool {
        matches!(
            self,
            Self::CreditLimit
                | Self::TotalAmountDue
                | Self::MinimumAmountDue
                | Self::PreviousBalance
                | Self::AvailableCredit
        )
    }

    /// Whether this field holds a date.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::StatementDate | Self::PaymentDueDate)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}
