//! Axis Bank.

use crate::models::statement::{Direction, Field};
use crate::statement::descriptor::DescriptorSpec;
use crate::statement::rules::{GrammarSpec, RuleSpec};

pub(super) fn spec() -> DescriptorSpec {
    let transactions = GrammarSpec::new(
        r"(?P<date>\d{2}\s+\w+\s+'\d{2})\s+(?P<description>.+?)\s+₹\s*(?P<amount>[\d,]+\.?\d*)\s+(?P<direction>Credit|Debit)",
    )
    .marker("Credit", Direction::Credit)
    .marker("Debit", Direction::Debit);

    DescriptorSpec::new("axis", "Axis Bank", transactions)
        .field(
            Field::CardNumber,
            vec![
                RuleSpec::spanning(r"Credit Card Number:\s*(\d{4}X+\d{4})"),
                RuleSpec::spanning(r"Card Number:\s*(\d{4}[X*]+\d{4})"),
            ],
        )
        .field(
            Field::StatementDate,
            vec![
                RuleSpec::line(r"Selected Statement Month\s+(\w+\s+\d{4})"),
                RuleSpec::line(r"Statement Month\s+(\w+\s+\d{4})"),
            ],
        )
        .field(
            Field::PaymentDueDate,
            vec![
                RuleSpec::line(r"Payment Due Date\s+(\d{2}\s+\w+\s+'\d{2})"),
                RuleSpec::line(r"Due Date\s+(\d{2}\s+\w+\s+'\d{2})"),
            ],
        )
        .field(
            Field::CreditLimit,
            vec![RuleSpec::line(r"Credit Limit\s+₹\s*([\d,]+\.?\d*)")],
        )
        .field(
            Field::TotalAmountDue,
            vec![RuleSpec::line(r"Total Payment Due\s+₹\s*([\d,]+\.?\d*)")],
        )
        .field(
            Field::MinimumAmountDue,
            vec![RuleSpec::line(r"Minimum Payment Due\s+₹\s*([\d,]+\.?\d*)")],
        )
        .field(
            Field::PreviousBalance,
            vec![RuleSpec::line(r"Opening Balance\s+₹\s*([\d,]+\.?\d*)")],
        )
}
