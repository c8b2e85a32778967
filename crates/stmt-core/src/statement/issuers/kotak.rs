//! Kotak Mahindra Bank.

use crate::models::statement::{Direction, Field};
use crate::statement::descriptor::DescriptorSpec;
use crate::statement::rules::{GrammarSpec, RuleSpec};

pub(super) fn spec() -> DescriptorSpec {
    let transactions = GrammarSpec::new(
        r"(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<description>.+?)\s+(?P<amount>[\d,]+\.?\d*)\s+(?P<direction>Cr|Dr)",
    )
    .marker("Cr", Direction::Credit)
    .marker("Dr", Direction::Debit);

    DescriptorSpec::new("kotak", "Kotak Mahindra Bank", transactions)
        .field(
            Field::CardNumber,
            vec![
                RuleSpec::spanning(r"Primary Card Number\s+(\d{4}\s+X+\s+X+\s+\d{4})"),
                RuleSpec::spanning(r"Card Number.*?(\d{4}\s+X+\s+X+\s+\d{4})"),
            ],
        )
        .field(
            Field::StatementDate,
            vec![
                RuleSpec::line(r"Statement Date\s+(\d{2}-\w{3}-\d{4})"),
                // generation timestamp printed in the footer
                RuleSpec::line(r"(\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2})"),
            ],
        )
        .field(
            Field::PaymentDueDate,
            vec![
                RuleSpec::line(r"Remember to pay by\s+(\d{2}-\w{3}-\d{4})"),
                RuleSpec::line(r"pay by\s+(\d{2}-\w{3}-\d{4})"),
            ],
        )
        .field(
            Field::CreditLimit,
            vec![RuleSpec::line(r"Total Credit Limit\s+Rs\.\s*([\d,]+\.?\d*)")],
        )
        .field(
            Field::TotalAmountDue,
            vec![
                RuleSpec::line(r"Total Amount Due \(TAD\)\s+Rs\.\s*([\d,]+\.?\d*)"),
                RuleSpec::spanning(r"Total\s+Amount Due.*?Rs\.\s*([\d,]+\.?\d*)"),
            ],
        )
        .field(
            Field::MinimumAmountDue,
            vec![
                RuleSpec::line(r"Minimum Amount Due \(MAD\)\s+Rs\.\s*([\d,]+\.?\d*)"),
                RuleSpec::spanning(r"Minimum\s+Amount Due.*?Rs\.\s*([\d,]+\.?\d*)"),
            ],
        )
        .field(
            Field::PreviousBalance,
            vec![RuleSpec::line(r"Previous\s+Amount Due\s+Rs\.\s*([\d,]+\.?\d*)")],
        )
        .field(
            Field::AvailableCredit,
            vec![RuleSpec::line(r"Available Credit Limit:\s+Rs\.\s*([\d,]+\.?\d*)")],
        )
}
