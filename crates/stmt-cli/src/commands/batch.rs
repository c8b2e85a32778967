//! Batch processing command for multiple statement files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use stmt_core::{
    format_amount, ExtractionResult, Money, StatementParser, StatementRecord, StatementSummary,
};

use super::config::load_config;
use super::parse::{extract_file, format_statement, resolve_issuer, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Issuer key shared by every file
    #[arg(short, long)]
    issuer: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<ExtractionResult, String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let parser = Arc::new(StatementParser::from_config(&config)?);
    let issuer = resolve_issuer(args.issuer.as_deref(), &config)?;

    // Every file shares the issuer, so reject an unknown one up front
    parser.registry().lookup(&issuer)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
            )?
            .progress_chars("=>-"),
    );

    // Each file is an independent parse; the semaphore bounds blocking workers
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let parser = Arc::clone(&parser);
        let semaphore = Arc::clone(&semaphore);
        let issuer = issuer.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let file_start = Instant::now();
            let task_path = path.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                extract_file(&parser, &task_path, &issuer)
            })
            .await?;

            Ok::<_, anyhow::Error>(FileResult {
                path,
                outcome: outcome.map_err(|e| e.to_string()),
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            })
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await??;

        match &result.outcome {
            Ok(extraction) => {
                let quality = &extraction.statement.extraction_quality;
                overall_pb.println(format!(
                    "{} {} | Quality: {:.1}% | {}",
                    style("✓").green(),
                    issuer.to_uppercase(),
                    quality.ratio() * 100.0,
                    result.path.display()
                ));
                if quality.ratio() < config.extraction.min_quality {
                    warn!(
                        "{}: only {}/{} fields extracted",
                        result.path.display(),
                        quality.present(),
                        quality.attempted()
                    );
                }
            }
            Err(e) => {
                if !args.continue_on_error {
                    error!("Failed to process {}: {}", result.path.display(), e);
                    overall_pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", result.path.display(), e);
                }
                overall_pb.println(format!(
                    "{} {}: {}",
                    style("✗").red(),
                    result.path.display(),
                    e
                ));
            }
        }

        overall_pb.inc(1);
        results.push(result);
    }

    overall_pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Ok(extraction) = &result.outcome {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("statement");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_statement(&extraction.statement, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let statements: Vec<StatementRecord> = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|e| e.statement.clone())
        .collect();
    let failed: Vec<&FileResult> = results.iter().filter(|r| r.outcome.is_err()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(statements.len()).green(),
        style(failed.len()).red()
    );
    print_overall_summary(&StatementSummary::from_statements(&statements));

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(e) = &result.outcome {
                println!("  - {}: {}", result.path.display(), e);
            }
        }
    }

    Ok(())
}

fn print_overall_summary(summary: &StatementSummary) {
    if summary.statement_count == 0 {
        return;
    }

    println!();
    println!("{}", style("Overall summary:").bold());
    println!("  Statements:             {}", summary.statement_count);
    println!("  Transactions:           {}", summary.transaction_count);
    println!("  Total credit limit:     ₹{}", format_amount(summary.total_credit_limit));
    println!("  Total amount due:       ₹{}", format_amount(summary.total_amount_due));
    println!("  Total minimum due:      ₹{}", format_amount(summary.total_minimum_due));
    println!("  Total available credit: ₹{}", format_amount(summary.total_available_credit));
    if let Some(utilization) = summary.credit_utilization {
        println!("  Credit utilization:     {}%", utilization);
    }
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "issuer_name",
        "card_number",
        "statement_date",
        "payment_due_date",
        "credit_limit",
        "total_amount_due",
        "minimum_amount_due",
        "available_credit",
        "transaction_count",
        "quality",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        match &result.outcome {
            Ok(extraction) => {
                let s = &extraction.statement;
                let amount = |v: Option<Money>| v.map(|v| v.to_string()).unwrap_or_default();
                wtr.write_record([
                    filename,
                    "success",
                    &s.issuer_name,
                    s.card_number.as_deref().unwrap_or(""),
                    s.statement_date.as_deref().unwrap_or(""),
                    s.payment_due_date.as_deref().unwrap_or(""),
                    &amount(s.credit_limit),
                    &amount(s.total_amount_due),
                    &amount(s.minimum_amount_due),
                    &amount(s.available_credit),
                    &s.transactions.len().to_string(),
                    &format!("{:.2}", s.extraction_quality.ratio()),
                    &time,
                    "",
                ])?;
            }
            Err(e) => {
                wtr.write_record([
                    filename, "error", "", "", "", "", "", "", "", "", "", "", &time, e,
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
