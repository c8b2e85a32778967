//! End-to-end extraction over synthetic statement text for every built-in issuer.

use std::str::FromStr;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use stmt_core::{
    Direction, Field, Registry, StatementExtractor, StatementParser, StatementRecord,
    StatementSummary, StmtError, TransactionRecord,
};

const AXIS: &str = "\
Credit Card Number: 5432XXXXXXXX9876
Selected Statement Month March 2024
Payment Due Date 05 Apr '24
Credit Limit ₹ 1,00,000.00
Total Payment Due ₹ 25,000.00
Minimum Payment Due ₹ 1,250.00
Opening Balance ₹ 18,400.50
04 Mar '24 AMAZON PAY INDIA ₹ 2,499.00 Debit
10 Mar '24 PAYMENT RECEIVED ₹ 18,400.50 Credit
";

const BOB: &str = "\
BANK OF BARODA CREDIT CARD STATEMENT
XXXXXX******4321
15/03/2024 16 February, 2024 To 15 March, 2024
Minimum Due Total Due
600.00 30,000.00 DR
04/04/2024
Page 1 of 3
Card : VISA SELECT
2,00,000.00 1,70,000.00 DR
05/03/2024 884512 SWIGGY BANGALORE 450 INR 29,550.00 30,000.00 DR
08/03/2024 884513 PAYMENT THANK YOU 5,000 INR 30,000.00 25,000.00 CR
";

const KOTAK: &str = "\
Primary Card Number 4147 XXXX XXXX 1234
Statement Date 12-Mar-2024
Remember to pay by 01-Apr-2024
Total Credit Limit Rs. 1,50,000.00
Available Credit Limit: Rs. 1,20,000.00
Total Amount Due (TAD) Rs. 30,000.00
Minimum Amount Due (MAD) Rs. 1,500.00
Previous Amount Due Rs. 22,000.00
05/03/2024 UBER INDIA 350.00 Dr
09/03/2024 PAYMENT RECEIVED 22,000.00 Cr
";

const SBI: &str = "\
Credit Card Number XXXX XXXX XXXX XX34
for Statement Period: 16 Feb 24 to 15 Mar 24
Payment Due Date 04 Apr 2024
Credit Limit ( ` ) 1,50,000.00
Available Credit Limit ( ` ) 1,17,500.00
*Total Amount Due ( ` ) 32,500.00
**Minimum Amount Due ( ` ) 1,625.00
Previous Balance ( ` ) 20,000.00
18 Feb 24 FLIPKART INTERNET 4,999.00 D
02 Mar 24 PAYMENT RECEIVED 20,000.00 C
";

const YES: &str = "\
Statement for YES BANK Card Number 5313XXXXXXXX7788
Statement Date: 20/03/2024
Payment Due Date: 09/04/2024
Credit Limit: Rs. 2,00,000.00
Available Credit Limit: Rs. 1,55,000.00
Total Amount Due: Rs. 45,000.00
Minimum Amount Due: Rs. 2,250.00
Previous Balance: Rs. 38,000.00
02/03/2024 TATA POWER MUMBAI Utility Services 3,450.00 Dr
11/03/2024 BSES RAJDHANI Utility Services 1,200.50 Dr
14/03/2024 AMAZON RETAIL Shopping 999.00 Dr
";

fn dec(s: &str) -> Option<Decimal> {
    Some(Decimal::from_str(s).unwrap())
}

fn txn(date: &str, description: &str, amount: &str, direction: Direction) -> TransactionRecord {
    TransactionRecord {
        date: date.to_string(),
        description: description.to_string(),
        amount: Decimal::from_str(amount).unwrap(),
        direction,
    }
}

fn parse(text: &str, issuer: &str) -> StatementRecord {
    StatementParser::new().parse_text(text, issuer).unwrap()
}

#[test]
fn axis_statement() {
    let record = parse(AXIS, "axis");

    assert_eq!(record.issuer_name, "Axis Bank");
    assert_eq!(record.card_number.as_deref(), Some("5432XXXXXXXX9876"));
    assert_eq!(record.statement_date.as_deref(), Some("March 2024"));
    assert_eq!(record.payment_due_date.as_deref(), Some("05 Apr '24"));
    assert_eq!(record.credit_limit, dec("100000"));
    assert_eq!(record.total_amount_due, dec("25000"));
    assert_eq!(record.minimum_amount_due, dec("1250"));
    assert_eq!(record.previous_balance, dec("18400.50"));
    assert_eq!(record.available_credit, dec("75000"));
    assert_eq!(
        record.transactions,
        vec![
            txn("04 Mar '24", "AMAZON PAY INDIA", "2499.00", Direction::Debit),
            txn("10 Mar '24", "PAYMENT RECEIVED", "18400.50", Direction::Credit),
        ]
    );
    assert_eq!(record.extraction_quality.ratio(), 1.0);
}

#[test]
fn bob_statement() {
    let record = parse(BOB, "bob");

    assert_eq!(record.issuer_name, "Bank of Baroda");
    assert_eq!(record.card_number.as_deref(), Some("4321"));
    assert_eq!(record.statement_date.as_deref(), Some("15/03/2024"));
    assert_eq!(record.payment_due_date.as_deref(), Some("04/04/2024"));
    assert_eq!(record.credit_limit, dec("200000"));
    assert_eq!(record.minimum_amount_due, dec("600"));
    assert_eq!(record.total_amount_due, dec("30000"));
    assert_eq!(record.previous_balance, None);
    assert_eq!(record.available_credit, dec("170000"));
    assert_eq!(
        record.transactions,
        vec![
            txn("05/03/2024", "SWIGGY BANGALORE", "450", Direction::Debit),
            txn("08/03/2024", "PAYMENT THANK YOU", "5000", Direction::Credit),
        ]
    );
    assert_eq!(record.extraction_quality.missing(), vec![Field::PreviousBalance]);
}

#[test]
fn kotak_statement() {
    let record = parse(KOTAK, "kotak");

    assert_eq!(record.issuer_name, "Kotak Mahindra Bank");
    assert_eq!(record.card_number.as_deref(), Some("4147 XXXX XXXX 1234"));
    assert_eq!(record.statement_date.as_deref(), Some("12-Mar-2024"));
    assert_eq!(record.payment_due_date.as_deref(), Some("01-Apr-2024"));
    assert_eq!(record.credit_limit, dec("150000"));
    assert_eq!(record.total_amount_due, dec("30000"));
    assert_eq!(record.minimum_amount_due, dec("1500"));
    assert_eq!(record.previous_balance, dec("22000"));
    // captured directly, not derived
    assert_eq!(record.available_credit, dec("120000"));
    assert_eq!(
        record.transactions,
        vec![
            txn("05/03/2024", "UBER INDIA", "350.00", Direction::Debit),
            txn("09/03/2024", "PAYMENT RECEIVED", "22000.00", Direction::Credit),
        ]
    );
}

#[test]
fn sbi_statement() {
    let record = parse(SBI, "sbi");

    assert_eq!(record.issuer_name, "SBI Card");
    assert_eq!(record.card_number.as_deref(), Some("XX34"));
    assert_eq!(record.statement_date.as_deref(), Some("16 Feb 24 to 15 Mar 24"));
    assert_eq!(record.payment_due_date.as_deref(), Some("04 Apr 2024"));
    assert_eq!(record.credit_limit, dec("150000"));
    assert_eq!(record.available_credit, dec("117500"));
    assert_eq!(record.total_amount_due, dec("32500"));
    assert_eq!(record.minimum_amount_due, dec("1625"));
    assert_eq!(record.previous_balance, dec("20000"));
    assert_eq!(
        record.transactions,
        vec![
            txn("18 Feb 24", "FLIPKART INTERNET", "4999.00", Direction::Debit),
            txn("02 Mar 24", "PAYMENT RECEIVED", "20000.00", Direction::Credit),
        ]
    );
}

#[test]
fn yes_statement() {
    let record = parse(YES, "yes");

    assert_eq!(record.issuer_name, "Yes Bank");
    assert_eq!(record.card_number.as_deref(), Some("5313XXXXXXXX7788"));
    assert_eq!(record.statement_date.as_deref(), Some("20/03/2024"));
    assert_eq!(record.payment_due_date.as_deref(), Some("09/04/2024"));
    assert_eq!(record.credit_limit, dec("200000"));
    assert_eq!(record.available_credit, dec("155000"));
    assert_eq!(record.total_amount_due, dec("45000"));
    assert_eq!(record.minimum_amount_due, dec("2250"));
    assert_eq!(record.previous_balance, dec("38000"));
    // only utility-services rows are ledger lines
    assert_eq!(
        record.transactions,
        vec![
            txn("02/03/2024", "TATA POWER MUMBAI", "3450.00", Direction::Debit),
            txn("11/03/2024", "BSES RAJDHANI", "1200.50", Direction::Debit),
        ]
    );
}

#[test]
fn every_builtin_issuer_scores_every_field() {
    let registry = Registry::builtin();
    for (key, _) in registry.issuers() {
        let record = parse("", key);
        assert_eq!(record.extraction_quality.attempted(), Field::ALL.len(), "{}", key);
        assert_eq!(record.extraction_quality.present(), 0, "{}", key);
    }
}

#[test]
fn axis_end_to_end_scenario() {
    let text = "Statement summary\nCredit Limit ₹ 50,000.00\nTotal Payment Due ₹ 12,345.67\n";
    let record = parse(text, "axis");

    assert_eq!(record.credit_limit, dec("50000.00"));
    assert_eq!(record.total_amount_due, dec("12345.67"));
    assert_eq!(record.available_credit, dec("37654.33"));
    assert_eq!(record.extraction_quality.get(Field::CreditLimit), Some(true));
}

#[test]
fn available_credit_absent_unless_derivable() {
    let record = parse("Credit Limit ₹ 50,000.00\n", "axis");
    assert_eq!(record.credit_limit, dec("50000"));
    assert_eq!(record.available_credit, None);
    assert_eq!(record.extraction_quality.get(Field::AvailableCredit), Some(false));
}

#[test]
fn unknown_issuer_is_rejected() {
    let parser = StatementParser::new();
    for key in ["unknownbank", "", "axis bank"] {
        match parser.extract_from_text(AXIS, key) {
            Err(StmtError::UnsupportedIssuer(_)) => {}
            other => panic!("{:?}: expected UnsupportedIssuer, got {:?}", key, other),
        }
    }
}

#[test]
fn issuer_key_is_case_insensitive() {
    assert_eq!(parse(KOTAK, "KOTAK"), parse(KOTAK, "kotak"));
}

#[test]
fn parsing_is_idempotent() {
    let parser = StatementParser::new();
    let samples = [
        (AXIS, "axis"),
        (BOB, "bob"),
        (KOTAK, "kotak"),
        (SBI, "sbi"),
        (YES, "yes"),
    ];
    for (text, key) in samples {
        let first = parser.parse_text(text, key).unwrap();
        let second = parser.parse_text(text, key).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn malformed_transaction_lines_are_dropped_in_order() {
    let text = "\
01/03/2024 FIRST SHOP 100.00 Dr
02/03/2024 BROKEN ROW 0.00 Dr
03/03/2024 SECOND SHOP 200.00 Cr
04/03/2024 ANOTHER BROKEN , Dr
05/03/2024 THIRD SHOP 300.00 Dr
";
    let record = parse(text, "kotak");
    let descriptions: Vec<&str> = record
        .transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["FIRST SHOP", "SECOND SHOP", "THIRD SHOP"]);
}

#[test]
fn statement_serializes_to_nested_document() {
    let record = parse(KOTAK, "kotak");
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["issuer_name"], "Kotak Mahindra Bank");
    assert_eq!(value["extraction_quality"]["credit_limit"], true);
    assert_eq!(value["transactions"][0]["type"], "debit");
    assert_eq!(value["transactions"][1]["type"], "credit");
}

#[test]
fn concurrent_parses_share_the_registry() {
    let parser = StatementParser::new();
    std::thread::scope(|scope| {
        let handles: Vec<_> = [(AXIS, "axis"), (SBI, "sbi"), (YES, "yes")]
            .into_iter()
            .map(|(text, key)| {
                let parser = &parser;
                scope.spawn(move || parser.parse_text(text, key).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().extraction_quality.ratio() > 0.5);
        }
    });
}

#[test]
fn summary_of_extreme_amounts_does_not_overflow() {
    let record = parse(
        "Credit Limit ₹ 0.01\nTotal Payment Due ₹ 79,228,162,514,264,337,593,543,950,335",
        "axis",
    );
    assert_eq!(record.total_amount_due, Some(Decimal::MAX));

    let summary = StatementSummary::from_statements(&[record]);
    assert_eq!(summary.total_amount_due, Decimal::MAX);
    assert_eq!(summary.credit_utilization, None);
}
