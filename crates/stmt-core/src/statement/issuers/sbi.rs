//! SBI Card.
//!
//! The rupee glyph renders as a backtick, so labels read like
//! "Credit Limit ( ` ) 1,50,000.00". Each monetary field falls back to a
//! looser label-then-amount rule for pages where the glyph is dropped.

use crate::models::statement::{Direction, Field};
use crate::statement::descriptor::DescriptorSpec;
use crate::statement::rules::{GrammarSpec, RuleSpec};

pub(super) fn spec() -> DescriptorSpec {
    let transactions = GrammarSpec::new(
        r"(?P<date>\d{2}\s+\w{3}\s+\d{2})\s+(?P<description>.+?)\s+(?P<amount>[\d,]+\.?\d*)\s+(?P<direction>[CD])\b",
    )
    .marker("C", Direction::Credit)
    .marker("D", Direction::Debit);

    DescriptorSpec::new("sbi", "SBI Card", transactions)
        .field(
            Field::CardNumber,
            vec![
                RuleSpec::spanning(r"XXXX\s+XXXX\s+XXXX\s+(XX\d{2})"),
                RuleSpec::spanning(r"Credit Card Number.*?(XX\d{2})"),
            ],
        )
        .field(
            Field::StatementDate,
            vec![
                RuleSpec::line(
                    r"for Statement Period:\s+(\d{2}\s+\w{3}\s+\d{2}\s+to\s+\d{2}\s+\w{3}\s+\d{2})",
                ),
                RuleSpec::line(r"(\d{2}\s+\w{3}\s+\d{2})\s+to\s+\d{2}\s+\w{3}\s+\d{2}"),
            ],
        )
        .field(
            Field::PaymentDueDate,
            vec![
                RuleSpec::line(r"Payment Due Date\s+(\d{2}\s+\w{3}\s+\d{4})"),
                RuleSpec::line(r"(\d{2}\s+\w{3}\s+\d{4})"),
            ],
        )
        .field(
            Field::CreditLimit,
            vec![
                RuleSpec::line(r"Credit Limit\s+\(\s*`\s*\)\s*([\d,]+\.?\d*)"),
                RuleSpec::spanning(r"Credit Limit.*?([\d,]+\.00)"),
            ],
        )
        .field(
            Field::TotalAmountDue,
            vec![
                RuleSpec::line(r"\*Total Amount Due\s+\(\s*`\s*\)\s*([\d,]+\.?\d*)"),
                RuleSpec::spanning(r"Total Amount Due.*?([\d,]+\.\d{2})"),
            ],
        )
        .field(
            Field::MinimumAmountDue,
            vec![
                RuleSpec::line(r"\*\*Minimum Amount Due\s+\(\s*`\s*\)\s*([\d,]+\.?\d*)"),
                RuleSpec::spanning(r"Minimum Amount Due.*?([\d,]+\.00)"),
            ],
        )
        .field(
            Field::PreviousBalance,
            vec![
                RuleSpec::line(r"Previous Balance\s+\(\s*`\s*\)\s*([\d,]+\.?\d*)"),
                RuleSpec::spanning(r"Previous Balance.*?([\d,]+\.00)"),
            ],
        )
        .field(
            Field::AvailableCredit,
            vec![
                RuleSpec::line(r"Available Credit Limit\s+\(\s*`\s*\)\s*([\d,]+\.?\d*)"),
                RuleSpec::spanning(r"Available Credit Limit.*?([\d,]+\.00)"),
            ],
        )
}
