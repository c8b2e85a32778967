//! Yes Bank.

use crate::models::statement::{Direction, Field};
use crate::statement::descriptor::DescriptorSpec;
use crate::statement::rules::{GrammarSpec, RuleSpec};

pub(super) fn spec() -> DescriptorSpec {
    // Only the utility-services ledger rows carry a parseable amount column.
    let transactions = GrammarSpec::new(
        r"(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<description>.+?)\s+Utility Services\s+(?P<amount>[\d,]+\.\d{2})\s+(?P<direction>Dr)",
    )
    .marker("Dr", Direction::Debit);

    DescriptorSpec::new("yes", "Yes Bank", transactions)
        .field(
            Field::CardNumber,
            vec![RuleSpec::line(
                r"Statement for YES BANK Card Number\s+(\d{4}X+\d{4})",
            )],
        )
        .field(
            Field::StatementDate,
            vec![RuleSpec::line(r"Statement Date:\s*(\d{2}/\d{2}/\d{4})")],
        )
        .field(
            Field::PaymentDueDate,
            vec![RuleSpec::line(r"Payment Due Date:\s*(\d{2}/\d{2}/\d{4})")],
        )
        .field(
            Field::CreditLimit,
            vec![RuleSpec::line(r"Credit Limit:\s*Rs\.\s*([\d,]+\.\d{2})")],
        )
        .field(
            Field::TotalAmountDue,
            vec![RuleSpec::line(r"Total Amount Due:\s*Rs\.\s*([\d,]+\.\d{2})")],
        )
        .field(
            Field::MinimumAmountDue,
            vec![RuleSpec::line(r"Minimum Amount Due:\s*Rs\.\s*([\d,]+\.\d{2})")],
        )
        .field(
            Field::PreviousBalance,
            vec![RuleSpec::line(r"Previous Balance:\s*Rs\.\s*([\d,]+\.\d{2})")],
        )
        .field(
            Field::AvailableCredit,
            vec![RuleSpec::line(
                r"Available Credit Limit:\s*Rs\.\s*([\d,]+\.\d{2})",
            )],
        )
}
