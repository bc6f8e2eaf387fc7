//! tally: personal-finance ledger and analytics from the terminal
//!
//! Usage:
//!   tally seed                      Add demo transactions
//!   tally add --amount -4.50 --notes "Coffee" --category food
//!   tally analyze --timeframe 7D    Trends, categories and insights
//!   tally import --csv export.csv   Merge a CSV export into the ledger

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_core::fmt::money;
use tally_core::{analyze, CalendarZone, Timeframe, TransactionRecord};
use tally_ingest::{
    import_csv, parse_date, sample_transactions, JsonLedgerFile, Ledger, NewTransaction,
    TransactionPatch,
};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

mod config;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")"),
    about = "Personal finance ledger and analytics"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ledger file (default: ~/.tally/ledger.json or analytics.ledger_path)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate the ledger over a timeframe and print the report
    Analyze {
        /// 7D, 30D, 90D or 1Y (default from config)
        #[arg(long)]
        timeframe: Option<Timeframe>,

        /// Analyze this CSV instead of the ledger
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a transaction (negative amount = expense)
    Add {
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,

        #[arg(long)]
        notes: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        merchant: Option<String>,

        /// RFC 3339 or YYYY-MM-DD (default: now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change fields of an existing transaction
    Edit {
        id: Uuid,

        #[arg(long, allow_hyphen_values = true)]
        amount: Option<f64>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        merchant: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Remove a transaction
    Delete { id: Uuid },

    /// List transactions, newest first
    List {
        /// Case-insensitive regex over notes, merchant and category
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show balance, income and expense totals
    Balance,

    /// Merge a CSV export (date,amount,category,merchant,notes) into the ledger
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Add the demo transaction set
    Seed,

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let cfg = config::load_config()?;
    let ledger_file = JsonLedgerFile::new(match cli.ledger {
        Some(p) => p,
        None => cfg.ledger_path()?,
    });

    match cli.command {
        Command::Analyze { timeframe, csv, json } => {
            let timeframe = timeframe.unwrap_or(cfg.analytics.default_timeframe);
            let analytics = cfg.analytics_config()?;
            let now = Utc::now();

            let records = match csv {
                Some(path) => {
                    let all = import_csv(&path, &analytics.zone)
                        .with_context(|| format!("parsing {}", path.display()))?;
                    Ledger::from_records(all).records_in_window(timeframe, now)
                }
                None => load_or_empty(&ledger_file).records_in_window(timeframe, now),
            };

            let report = analyze(&records, timeframe, &analytics);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report::render(&report));
            }
        }

        Command::Add {
            amount,
            notes,
            category,
            merchant,
            date,
        } => {
            let zone = cfg.analytics_config()?.zone;
            let mut tx = NewTransaction::new(amount, notes, resolve_date(date.as_deref(), &zone)?);
            tx.category = category;
            tx.merchant = merchant;

            let mut ledger = ledger_file.load()?;
            let id = ledger.add(tx)?;
            ledger_file.save(&ledger)?;
            println!("Added {id}");
        }

        Command::Edit {
            id,
            amount,
            notes,
            category,
            merchant,
            date,
        } => {
            let zone = cfg.analytics_config()?.zone;
            let date = match date {
                Some(d) => Some(resolve_date(Some(&d), &zone)?),
                None => None,
            };
            let patch = TransactionPatch {
                amount,
                description: notes,
                category,
                date,
                merchant,
            };

            let mut ledger = ledger_file.load()?;
            let updated = ledger.update(id, patch)?.clone();
            ledger_file.save(&ledger)?;
            print_record(&updated);
        }

        Command::Delete { id } => {
            let mut ledger = ledger_file.load()?;
            let removed = ledger.delete(id)?;
            ledger_file.save(&ledger)?;
            println!("Deleted {}", removed.id);
        }

        Command::List { search, limit } => {
            let ledger = ledger_file.load()?;
            let rows = match search.as_deref() {
                Some(pattern) => ledger.search(pattern)?,
                None => ledger.list(),
            };
            if rows.is_empty() {
                println!("No transactions.");
            }
            for r in rows.into_iter().take(limit) {
                print_record(r);
            }
        }

        Command::Balance => {
            let b = ledger_file.load()?.balance();
            println!("Balance:  {}", money(b.total_balance));
            println!("Income:   {}", money(b.total_income));
            println!("Expenses: {}", money(b.total_expenses.abs()));
            println!("Transactions: {}", b.transaction_count);
        }

        Command::Import { csv } => {
            if !csv.exists() {
                bail!("CSV not found: {} (pass --csv <path>)", csv.display());
            }
            let zone = cfg.analytics_config()?.zone;
            let records = import_csv(&csv, &zone)
                .with_context(|| format!("parsing {}", csv.display()))?;
            let parsed = records.len();

            let mut ledger = ledger_file.load()?;
            let added = ledger.extend(records);
            ledger_file.save(&ledger)?;
            println!(
                "Imported {added} of {parsed} transactions from {} ({} already in the ledger)",
                csv.display(),
                parsed - added
            );
        }

        Command::Seed => {
            let mut ledger = ledger_file.load()?;
            for tx in sample_transactions(Utc::now()) {
                ledger.add(tx)?;
            }
            ledger_file.save(&ledger)?;
            println!("Ledger now has {} transactions", ledger.len());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                println!("# ledger: {}", ledger_file.path().display());
            }
        },
    }

    Ok(())
}

/// A ledger that can't be read is analyzed as empty rather than aborting.
fn load_or_empty(file: &JsonLedgerFile) -> Ledger {
    match file.load() {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!(error = %e, "analyzing an empty ledger");
            eprintln!("Could not load transactions: {e}. Try again once the ledger is readable.");
            Ledger::new()
        }
    }
}

fn resolve_date(input: Option<&str>, zone: &CalendarZone) -> Result<chrono::DateTime<Utc>> {
    match input {
        None => Ok(Utc::now()),
        Some(s) => parse_date(s, zone)
            .with_context(|| format!("invalid date '{s}' (use RFC 3339 or YYYY-MM-DD)")),
    }
}

fn print_record(r: &TransactionRecord) {
    println!(
        "{} | {} | {:>12} | {} | {} | {}",
        r.id,
        r.date.format("%Y-%m-%d %H:%M"),
        money(r.amount),
        r.category_label(),
        r.merchant.as_deref().unwrap_or("-"),
        r.notes.as_deref().unwrap_or("")
    );
}
