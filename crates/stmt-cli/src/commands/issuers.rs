//! Issuers command - list supported statement layouts.

use clap::Args;
use console::style;

use stmt_core::StatementParser;

use super::config::load_config;

/// Arguments for the issuers command.
#[derive(Args)]
pub struct IssuersArgs {
    /// Print the list as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: IssuersArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = StatementParser::from_config(&config)?;
    let registry = parser.registry();

    if args.json {
        let list: Vec<serde_json::Value> = registry
            .issuers()
            .map(|(key, name)| serde_json::json!({ "key": key, "display_name": name }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!("{}", style("Supported issuers:").bold());
    for (key, name) in registry.issuers() {
        println!("  {:<8} {}", style(key).cyan(), name);
    }

    Ok(())
}
