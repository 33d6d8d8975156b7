pub mod config;
pub mod export;
pub mod interactive;
pub mod scan;
pub mod search;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::fmt::decimal;
use crate::ingest::{ingest_dir, IngestOptions, IngestReport, Ingestion};
use crate::models::CanonicalRecord;
use crate::report::COLUMNS;
use crate::settings::{load_settings, settings_path, Settings};

#[derive(Parser)]
#[command(
    name = "pricelist",
    about = "Merge price-list CSVs and search products by unit price."
)]
pub struct Cli {
    /// Directory with price-list files (default from settings: docs)
    #[arg(long, global = true)]
    pub dir: Option<String>,
    /// Settings file (default: ~/.config/pricelist/settings.json)
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// File-name pattern selecting price lists (default from settings: price)
    #[arg(long, global = true)]
    pub pattern: Option<String>,
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search products once and print them sorted by unit price.
    Search {
        /// Text to look for in product names
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Write the full catalog to a report file.
    Export {
        /// Output file path (default from settings: output.html)
        #[arg(long)]
        output: Option<String>,
        /// Report format: html, csv (default: by file extension)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show which files were loaded or skipped, and why.
    Scan,
    /// Show the effective settings.
    Config {
        /// Write default settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

/// Settings plus command-line overrides, shared by every command.
pub struct Context {
    pub settings: Settings,
    pub settings_path: PathBuf,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings_path = cli
            .config
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(settings_path);
        let mut settings = load_settings(&settings_path)?;
        if let Some(dir) = &cli.dir {
            settings.source_dir = dir.clone();
        }
        if let Some(pattern) = &cli.pattern {
            settings.file_pattern = pattern.clone();
        }
        Ok(Self {
            settings,
            settings_path,
        })
    }

    pub fn source_dir(&self) -> PathBuf {
        PathBuf::from(&self.settings.source_dir)
    }

    /// Ingest the source directory and print the timing line.
    pub fn ingest(&self) -> Result<Ingestion> {
        let opts = IngestOptions::from_settings(&self.settings)?;
        let started = Instant::now();
        let ingestion = ingest_dir(&self.source_dir(), &opts)?;
        let elapsed = started.elapsed();
        println!(
            "Loaded {} records from {} file(s) in {:.3}s",
            ingestion.catalog.len(),
            ingestion.report.loaded_files(),
            elapsed.as_secs_f64()
        );
        Ok(ingestion)
    }

    /// Ingest, print diagnostics, keep only the catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let ingestion = self.ingest()?;
        print_diagnostics(&ingestion.report);
        Ok(ingestion.catalog)
    }
}

/// One stderr line per skipped file or row.
pub(crate) fn print_diagnostics(report: &IngestReport) {
    for (file, err) in report.failed_files() {
        eprintln!("{} {file}: {err}", "Skipping file".yellow());
    }
    for (file, skip) in report.skipped_rows() {
        eprintln!("{} {file}:{}: {}", "Skipping row".yellow(), skip.line, skip.error);
    }
}

pub(crate) fn results_table(records: &[&CanonicalRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(COLUMNS.to_vec());
    for (idx, r) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&r.name),
            Cell::new(decimal(r.price)),
            Cell::new(decimal(r.weight)),
            Cell::new(&r.source_file),
            Cell::new(decimal(r.unit_price)),
        ]);
    }
    table
}

/// Render search results, or a notice when nothing matched.
pub(crate) fn format_results(query: &str, records: &[&CanonicalRecord]) -> String {
    if records.is_empty() {
        return format!("No products matching '{query}'.");
    }
    results_table(records).to_string()
}
