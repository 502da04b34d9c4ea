use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledgerlift_core::{TransactionRecord, grid_to_csv, transactions_to_csv};
use ledgerlift_ingest::LocalPipeline;
use ledgerlift_remote::{RemoteClient, convert_remote};
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod input;
mod state;

use config::{API_KEY_ENV, Config};

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlift",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERLIFT_BUILD_SHA"), ")"),
    about = "Convert bank statement PDFs into CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Directory for the CSV (default: output.dir from config)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the CSV instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement PDF locally
    Convert {
        pdf: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract transactions from already-extracted statement text
    ConvertText {
        text: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert a statement PDF through the remote document service
    Remote {
        pdf: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage ~/.ledgerlift/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { pdf, output } => {
            let cfg = config::load_config()?;
            input::validate_pdf(&pdf, cfg.output.max_file_bytes())?;

            let records = LocalPipeline::new()?
                .convert_pdf_path(&pdf)
                .with_context(|| format!("converting {}", pdf.display()))?;
            report_records(&pdf, &records);
            emit(&cfg, &output, &pdf, &transactions_to_csv(&records)?)?;
        }

        Command::ConvertText { text, output } => {
            let cfg = config::load_config()?;
            let body = fs::read_to_string(&text)
                .with_context(|| format!("read {}", text.display()))?;

            let records = LocalPipeline::new()?.convert_text(&body);
            report_records(&text, &records);
            emit(&cfg, &output, &text, &transactions_to_csv(&records)?)?;
        }

        Command::Remote { pdf, output } => {
            let cfg = config::load_config()?;
            input::validate_pdf(&pdf, cfg.output.max_file_bytes())?;

            let remote = cfg
                .remote
                .to_remote_config(std::env::var(API_KEY_ENV).ok());
            let client = RemoteClient::new(remote)?;

            let bytes = fs::read(&pdf).with_context(|| format!("read {}", pdf.display()))?;
            let filename = pdf
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "statement.pdf".to_string());

            let grid = convert_remote(&client, bytes, &filename)
                .await
                .with_context(|| format!("remote conversion of {}", pdf.display()))?;
            eprintln!(
                "Extracted {} rows x {} columns from {}",
                grid.rows.len(),
                grid.width(),
                pdf.display()
            );
            emit(&cfg, &output, &pdf, &grid_to_csv(&grid)?)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let path = config::config_path()?;
                let cfg = config::load_config_from(&path)?;
                println!("# {}", path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn report_records(source: &Path, records: &[TransactionRecord]) {
    if records.is_empty() {
        log::warn!("no records extracted from {}", source.display());
        eprintln!(
            "No transactions found in {} (is there a \"Transaction History\" section?)",
            source.display()
        );
        return;
    }

    let undated = records.iter().filter(|r| r.date.is_none()).count();
    let debits = records.iter().filter(|r| r.is_debit()).count();
    eprintln!(
        "Parsed {} transactions from {} (debits: {}, undated: {})",
        records.len(),
        source.display(),
        debits,
        undated
    );
}

fn emit(cfg: &Config, output: &OutputArgs, source: &Path, csv: &str) -> Result<()> {
    if output.stdout {
        print!("{csv}");
        return Ok(());
    }

    let out_dir = output.out_dir.as_deref().unwrap_or(cfg.output.dir.as_path());
    let path = input::csv_output_path(out_dir, source)?;
    input::write_output(&path, csv)?;
    println!("Wrote {}", path.display());
    Ok(())
}
