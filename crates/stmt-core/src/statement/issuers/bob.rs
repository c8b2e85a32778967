//! Bank of Baroda.
//!
//! The summary block prints minimum and total due side by side as
//! `<minimum> <total> DR`, so both fields read from the same row.

use crate::models::statement::{Direction, Field};
use crate::statement::descriptor::DescriptorSpec;
use crate::statement::rules::{GrammarSpec, RuleSpec};

pub(super) fn spec() -> DescriptorSpec {
    // date, reference number, description, amount, INR, two balances, DR/CR
    let transactions = GrammarSpec::new(
        r"(?P<date>\d{2}/\d{2}/\d{4})\s+\d+\s+(?P<description>.+?)\s+(?P<amount>[\d,]+)\s+INR\s+[\d,]+\.00\s+[\d,]+\.00\s+(?P<direction>DR|CR)",
    )
    .marker("CR", Direction::Credit)
    .marker("DR", Direction::Debit);

    DescriptorSpec::new("bob", "Bank of Baroda", transactions)
        .field(
            Field::CardNumber,
            vec![
                RuleSpec::spanning(r"XXXXXX\*+(\d{4})"),
                RuleSpec::spanning(r"Card.*?(\d{4})\s*\n"),
                RuleSpec::spanning(r"PRIMARY CARD-(\d{4})"),
            ],
        )
        .field(
            Field::StatementDate,
            vec![
                RuleSpec::line(
                    r"(\d{2}/\d{2}/\d{4})\s+\d{2}\s+\w+,\s+\d{4}\s+To\s+\d{2}\s+\w+,\s+\d{4}",
                ),
                RuleSpec::line(r"^(\d{2}/\d{2}/\d{4})"),
            ],
        )
        .field(
            Field::PaymentDueDate,
            vec![
                // The due date sits on the line just above the page counter.
                RuleSpec::line(r"(\d{2}/\d{2}/\d{4})\s*\n.*?Page\s+\d+\s+of"),
                RuleSpec::line(r"(\d{2}/\d{2}/\d{4})\s+[\d,]+\.\d{2}\s+[\d,]+\.\d{2}"),
            ],
        )
        .field(
            Field::CreditLimit,
            vec![RuleSpec::spanning(
                r"Card\s*:\s*VISA.*?\n.*?([\d,]+\.00)\s+[\d,]+\.00\s+DR",
            )],
        )
        .field(
            Field::TotalAmountDue,
            vec![RuleSpec::line(r"[\d,]+\.00\s+([\d,]+\.00)\s+DR")],
        )
        .field(
            Field::MinimumAmountDue,
            vec![RuleSpec::line(r"([\d,]+\.00)\s+[\d,]+\.00\s+DR")],
        )
}
