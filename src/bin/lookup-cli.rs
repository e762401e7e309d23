#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for scraping labeled Gmail messages (read-only)

use clap::{Parser, Subcommand};
use gmail_lookup::{GmailClient, GmailConfig, LookupSetConfig, decode, pipeline};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lookup-cli")]
#[command(
    about = "Scrape labeled Gmail messages with paired regex rules"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a label's messages and run the lookup rules
    Scan {
        /// Path to a JSON rules file
        #[arg(long)]
        rules: PathBuf,

        /// Gmail label to scan (defaults to the rules file's label)
        #[arg(long)]
        label: Option<String>,
    },

    /// List Gmail labels
    Labels,

    /// Show a single message by ID
    Show {
        /// Gmail message ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = GmailConfig::from_env()?;
    let client = GmailClient::new(config);

    match &args.command {
        Command::Scan { rules, label } => {
            cmd_scan(&client, &args, rules, label.as_deref()).await?;
        }
        Command::Labels => {
            cmd_labels(&client, &args).await?;
        }
        Command::Show { id } => {
            cmd_show(&client, &args, id).await?;
        }
    }

    Ok(())
}

async fn cmd_scan(
    client: &GmailClient,
    args: &Args,
    rules_path: &Path,
    label_override: Option<&str>,
) -> anyhow::Result<()> {
    let set = LookupSetConfig::load(rules_path)?.compile()?;

    let label = label_override.unwrap_or_else(|| set.gmail_label());
    let messages = client.fetch_by_label(label).await?;
    let results = pipeline::run(&messages, &set)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No results.");
    } else {
        for result in &results {
            println!("{}: {}", result.label, result.data);
        }
    }

    Ok(())
}

async fn cmd_labels(
    client: &GmailClient,
    args: &Args,
) -> anyhow::Result<()> {
    let labels = client.list_labels().await?;

    if args.json {
        let names: Vec<&str> =
            labels.iter().map(|l| l.name.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for label in &labels {
            println!("{}", label.name);
        }
    }

    Ok(())
}

async fn cmd_show(
    client: &GmailClient,
    args: &Args,
    id: &str,
) -> anyhow::Result<()> {
    let message = client.get_message(id).await?;
    let email = message.to_email();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&email)?);
        return Ok(());
    }

    println!("ID:      {}", email.id);
    if let Some(date) = message.date() {
        println!("Date:    {}", date.format("%Y-%m-%d %H:%M:%S"));
    }
    println!("From:    {}", email.sender);
    println!("Subject: {}", email.subject);

    println!("\n--- Body ---\n");
    println!("{}", decode::decode_body(&email.body)?);

    Ok(())
}
