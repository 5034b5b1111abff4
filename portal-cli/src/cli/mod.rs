//! Command-line interface for the portal catalog tools

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::catalog::repository;
use crate::import;

#[derive(Parser)]
#[command(
    name = "portal-cli",
    about = "Staff tools for the transparency-portal catalog",
    version
)]
pub struct Cli {
    /// Path to the catalog database
    #[arg(short, long, default_value = "portal.db", global = true)]
    pub database: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import catalog entries from an .xlsx spreadsheet
    Import {
        /// Spreadsheet with columns: secao, titulo, descricao, link, ordem, ativo
        file: PathBuf,
    },
    /// List catalog entries
    List {
        /// Restrict to one section (canonical code or any accepted spelling)
        #[arg(short, long)]
        section: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let pool = connect(&cli.database).await?;
    match cli.command {
        Commands::Import { file } => import_command(&pool, &file).await,
        Commands::List { section, json } => list_command(&pool, section.as_deref(), json).await,
    }
}

async fn connect(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open catalog database: {}", path.display()))?;
    repository::init_schema(&pool).await?;
    Ok(pool)
}

async fn import_command(pool: &SqlitePool, file: &Path) -> Result<()> {
    // Same gate the upload form applies: only .xlsx reaches the engine
    let name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if !name.to_lowercase().ends_with(".xlsx") {
        bail!("invalid format: expected an .xlsx spreadsheet");
    }

    let handle =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let report = import::import_spreadsheet(BufReader::new(handle), pool).await?;

    println!("Import finished. Entries created: {}", report.created);
    if report.skipped_blank > 0 {
        println!("Blank rows skipped: {}", report.skipped_blank);
    }
    Ok(())
}

async fn list_command(pool: &SqlitePool, section: Option<&str>, json: bool) -> Result<()> {
    let filter = match section {
        Some(label) => match import::normalize_section(label) {
            Some(section) => Some(section),
            None => bail!("unknown section: {}", label),
        },
        None => None,
    };

    let entries = repository::list_entries(pool, filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let status = if entry.active { "ativo" } else { "inativo" };
        println!(
            "[{}] {:>3}  {:<7}  {}",
            entry.section.code(),
            entry.order,
            status,
            entry.title
        );
        if let Some(link) = &entry.link {
            println!("      {}", link);
        }
    }
    println!("{} entries", entries.len());
    Ok(())
}
