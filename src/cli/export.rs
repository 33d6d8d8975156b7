use std::path::{Path, PathBuf};

use super::Context;
use crate::error::Result;
use crate::models::CanonicalRecord;
use crate::report::{write_report, ReportFormat};

/// Write `records` to `path` and announce it.
pub(crate) fn export_records(
    records: &[CanonicalRecord],
    path: &Path,
    format: Option<&str>,
) -> Result<PathBuf> {
    let format = match format {
        Some(key) => ReportFormat::from_key(key)?,
        None => ReportFormat::from_path(path),
    };
    let written = write_report(records, path, format)?;
    println!("Wrote {}", written.display());
    Ok(written)
}

pub fn run(ctx: &Context, output: Option<String>, format: Option<&str>) -> Result<()> {
    // Validate the format before spending time on ingestion.
    if let Some(key) = format {
        ReportFormat::from_key(key)?;
    }
    let catalog = ctx.load_catalog()?;
    let path = PathBuf::from(output.unwrap_or_else(|| ctx.settings.report_path.clone()));
    export_records(catalog.records(), &path, format)?;
    Ok(())
}
