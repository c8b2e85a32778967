//! Aggregate figures over a batch of parsed statements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::statement::{Money, StatementRecord};

/// Totals across several statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Number of statements summarized.
    pub statement_count: usize,

    /// Transactions across all statements.
    pub transaction_count: usize,

    pub total_credit_limit: Money,
    pub total_amount_due: Money,
    pub total_minimum_due: Money,
    pub total_available_credit: Money,

    /// Total due as a percentage of total limit, two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_utilization: Option<Decimal>,
}

impl StatementSummary {
    /// Summarize statements. Absent amounts contribute nothing.
    ///
    /// Totals saturate at `Decimal::MAX`; utilization is absent when a total
    /// saturated or the ratio does not fit a decimal.
    pub fn from_statements(statements: &[StatementRecord]) -> Self {
        let mut summary = Self {
            statement_count: statements.len(),
            ..Self::default()
        };
        let mut saturated = false;

        for statement in statements {
            summary.transaction_count += statement.transactions.len();
            for (total, value) in [
                (&mut summary.total_credit_limit, statement.credit_limit),
                (&mut summary.total_amount_due, statement.total_amount_due),
                (&mut summary.total_minimum_due, statement.minimum_amount_due),
                (&mut summary.total_available_credit, statement.available_credit),
            ] {
                match total.checked_add(value.unwrap_or_default()) {
                    Some(sum) => *total = sum,
                    None => {
                        *total = Decimal::MAX;
                        saturated = true;
                    }
                }
            }
        }

        if saturated {
            warn!("Statement totals overflowed and were capped");
        } else if summary.total_credit_limit > Decimal::ZERO {
            summary.credit_utilization = summary
                .total_amount_due
                .checked_div(summary.total_credit_limit)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(|percent| percent.round_dp(2));
        }

        summary
    }
}
