//! Parse command - extract data from a single statement file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use stmt_core::{
    format_amount, ExtractionResult, Field, Money, StatementParser, StatementRecord, StmtConfig,
};

use super::config::load_config;

/// Transactions shown in the text rendering.
const TEXT_TRANSACTION_LIMIT: usize = 5;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Issuer key (e.g. axis, bob, kotak, sbi, yes)
    #[arg(short, long)]
    issuer: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show per-field extraction quality
    #[arg(long)]
    show_quality: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let parser = StatementParser::from_config(&config)?;
    let issuer = resolve_issuer(args.issuer.as_deref(), &config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Extracting {} statement...", issuer));

    let result = extract_file(&parser, &args.input, &issuer);
    pb.finish_and_clear();
    let result = result?;

    let output = format_statement(&result.statement, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let quality = &result.statement.extraction_quality;
    if quality.ratio() < config.extraction.min_quality {
        eprintln!(
            "{} Only {}/{} fields extracted; check the issuer or the document layout.",
            style("⚠").yellow(),
            quality.present(),
            quality.attempted()
        );
    }

    if args.show_quality {
        println!();
        for (field, present) in quality.iter() {
            let mark = if present { style("✓").green() } else { style("✗").red() };
            println!("  {} {}", mark, field);
        }
        println!(
            "{} Extraction quality: {:.1}%",
            style("ℹ").blue(),
            quality.ratio() * 100.0
        );
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Issuer from the command line, else the configured default.
pub fn resolve_issuer(issuer: Option<&str>, config: &StmtConfig) -> anyhow::Result<String> {
    match issuer.or(config.extraction.default_issuer.as_deref()) {
        Some(key) => Ok(key.to_string()),
        None => anyhow::bail!(
            "No issuer given. Pass --issuer or set extraction.default_issuer \
             (run 'stmt issuers' for the list)."
        ),
    }
}

/// Extract one statement file. PDFs go through text extraction; `.txt`
/// files are already rendered text.
pub fn extract_file(
    parser: &StatementParser,
    path: &Path,
    issuer: &str,
) -> anyhow::Result<ExtractionResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(parser.parse_document(&data, issuer)?)
        }
        "txt" => {
            let start = Instant::now();
            parser.registry().lookup(issuer)?;
            let text = fs::read_to_string(path)?;
            let statement = parser.parse_text(&text, issuer)?;
            Ok(ExtractionResult {
                missing_fields: statement.extraction_quality.missing(),
                page_count: 1,
                text_length: text.chars().count(),
                processing_time_ms: start.elapsed().as_millis() as u64,
                statement,
            })
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub fn format_statement(
    statement: &StatementRecord,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(statement)?),
        OutputFormat::Csv => format_csv(statement),
        OutputFormat::Text => Ok(format_text(statement)),
    }
}

fn format_csv(statement: &StatementRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["issuer_name"];
    header.extend(Field::ALL.iter().map(|f| f.name()));
    header.extend(["transaction_count", "quality"]);
    wtr.write_record(&header)?;

    let mut row = vec![statement.issuer_name.clone()];
    row.extend(
        Field::ALL
            .iter()
            .map(|f| statement.display_value(*f).unwrap_or_default()),
    );
    row.push(statement.transactions.len().to_string());
    row.push(format!("{:.2}", statement.extraction_quality.ratio()));
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn money(value: Option<Money>) -> String {
    value
        .map(|v| format!("₹{}", format_amount(v)))
        .unwrap_or_else(|| "N/A".to_string())
}

fn format_text(statement: &StatementRecord) -> String {
    let text = |value: Option<&String>| value.cloned().unwrap_or_else(|| "N/A".to_string());
    let mut output = String::new();

    output.push_str(&format!("{}\n", statement.issuer_name));
    let card = text(statement.card_number.as_ref());
    let statement_date = text(statement.statement_date.as_ref());
    let payment_due = text(statement.payment_due_date.as_ref());
    output.push_str(&format!("  Card:             {}\n", card));
    output.push_str(&format!("  Statement date:   {}\n", statement_date));
    output.push_str(&format!("  Payment due:      {}\n", payment_due));
    output.push('\n');

    output.push_str(&format!("  Credit limit:     {}\n", money(statement.credit_limit)));
    output.push_str(&format!("  Total due:        {}\n", money(statement.total_amount_due)));
    output.push_str(&format!("  Minimum due:      {}\n", money(statement.minimum_amount_due)));
    output.push_str(&format!("  Previous balance: {}\n", money(statement.previous_balance)));
    output.push_str(&format!("  Available credit: {}\n", money(statement.available_credit)));
    output.push('\n');

    output.push_str(&format!("Transactions: {}\n", statement.transactions.len()));
    for txn in statement.transactions.iter().take(TEXT_TRANSACTION_LIMIT) {
        output.push_str(&format!(
            "  {}  {:<40} {:>14} {}\n",
            txn.date,
            txn.description,
            format!("₹{}", format_amount(txn.amount)),
            txn.direction
        ));
    }
    if statement.transactions.len() > TEXT_TRANSACTION_LIMIT {
        output.push_str(&format!(
            "  ... and {} more\n",
            statement.transactions.len() - TEXT_TRANSACTION_LIMIT
        ));
    }

    output
}
