use colored::Colorize;
use comfy_table::{Cell, Table};

use super::{print_diagnostics, Context};
use crate::error::Result;
use crate::ingest::FileStatus;

pub fn run(ctx: &Context) -> Result<()> {
    let ingestion = ctx.ingest()?;
    let report = &ingestion.report;

    if report.files.is_empty() {
        println!(
            "No files matching '{}' in {}",
            ctx.settings.file_pattern,
            ctx.source_dir().display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["File", "Status", "Records", "Skipped rows"]);
    for outcome in &report.files {
        let row = match &outcome.status {
            FileStatus::Loaded { records, skipped_rows } => vec![
                Cell::new(&outcome.file),
                Cell::new("loaded".green()),
                Cell::new(records),
                Cell::new(skipped_rows.len()),
            ],
            FileStatus::Failed(e) => vec![
                Cell::new(&outcome.file),
                Cell::new(format!("{}: {e}", "skipped".red())),
                Cell::new(0),
                Cell::new(""),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
    print_diagnostics(report);
    Ok(())
}
