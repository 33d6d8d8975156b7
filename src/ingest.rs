use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{FileError, PriceError, Result, RowError};
use crate::headers::resolve_headers;
use crate::models::CanonicalRecord;
use crate::normalizer::{normalize_row, NormalizeOptions, RawRow};
use crate::settings::{Settings, SynonymTable};

// ---------------------------------------------------------------------------
// Candidate selection
// ---------------------------------------------------------------------------

/// Decides which directory entries are price lists, by file name.
#[derive(Debug, Clone)]
pub enum FileFilter {
    /// Case-insensitive substring.
    Contains(String),
    Regex(Regex),
}

impl FileFilter {
    pub fn new(pattern: &str, match_type: &str) -> Result<Self> {
        match match_type {
            "contains" => Ok(Self::Contains(pattern.to_lowercase())),
            "regex" => Ok(Self::Regex(
                RegexBuilder::new(pattern).case_insensitive(true).build()?,
            )),
            other => Err(PriceError::Settings(format!(
                "unknown match type '{other}' (expected contains or regex)"
            ))),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            Self::Contains(needle) => file_name.to_lowercase().contains(needle.as_str()),
            Self::Regex(re) => re.is_match(file_name),
        }
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::Contains("price".to_string())
    }
}

/// Regular files directly inside `dir` accepted by `filter`, sorted by name.
pub fn discover_candidates(dir: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if filter.matches(&name.to_string_lossy()) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

// ---------------------------------------------------------------------------
// Ingestion report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RowSkip {
    /// 1-based line in the source file.
    pub line: u64,
    pub error: RowError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    Loaded {
        records: usize,
        skipped_rows: Vec<RowSkip>,
    },
    Failed(FileError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub file: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub files: Vec<FileOutcome>,
}

impl IngestReport {
    pub fn loaded_files(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Loaded { .. }))
            .count()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = (&str, &FileError)> {
        self.files.iter().filter_map(|f| match &f.status {
            FileStatus::Failed(e) => Some((f.file.as_str(), e)),
            FileStatus::Loaded { .. } => None,
        })
    }

    pub fn skipped_rows(&self) -> impl Iterator<Item = (&str, &RowSkip)> {
        self.files.iter().flat_map(|f| {
            let rows: &[RowSkip] = match &f.status {
                FileStatus::Loaded { skipped_rows, .. } => skipped_rows,
                FileStatus::Failed(_) => &[],
            };
            rows.iter().map(move |r| (f.file.as_str(), r))
        })
    }
}

// ---------------------------------------------------------------------------
// ingest_dir
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub filter: FileFilter,
    pub delimiter: u8,
    pub synonyms: SynonymTable,
    pub normalize: NormalizeOptions,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            filter: FileFilter::default(),
            delimiter: b',',
            synonyms: SynonymTable::default(),
            normalize: NormalizeOptions::default(),
        }
    }
}

impl IngestOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            filter: FileFilter::new(&settings.file_pattern, &settings.match_type)?,
            delimiter: settings.delimiter_byte()?,
            synonyms: settings.synonyms.clone(),
            normalize: NormalizeOptions {
                allow_zero_price: settings.allow_zero_price,
            },
        })
    }
}

pub struct Ingestion {
    pub catalog: Catalog,
    pub report: IngestReport,
}

struct FileRows {
    records: Vec<CanonicalRecord>,
    skipped: Vec<RowSkip>,
}

fn access_error(e: impl std::fmt::Display) -> FileError {
    FileError::Access(e.to_string())
}

/// Read one table. Any table-level failure discards the whole file, so a
/// file is either fully represented (minus bad rows) or absent.
fn read_price_file(
    path: &Path,
    file_name: &str,
    opts: &IngestOptions,
) -> std::result::Result<FileRows, FileError> {
    let file = std::fs::File::open(path).map_err(access_error)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(opts.delimiter)
        .from_reader(std::io::BufReader::new(file));

    let headers = rdr.headers().map_err(access_error)?.clone();
    let mapping = resolve_headers(headers.iter(), &opts.synonyms)
        .resolved()
        .map_err(|missing| FileError::Schema { missing })?;
    debug!(file = file_name, ?mapping, "resolved columns");

    let mut rows = FileRows {
        records: Vec::new(),
        skipped: Vec::new(),
    };
    for result in rdr.records() {
        let record = result.map_err(access_error)?;
        let line = record.position().map_or(0, |p| p.line());
        match normalize_row(&RawRow::new(&headers, &record), &mapping, file_name, opts.normalize) {
            Ok(rec) => rows.records.push(rec),
            Err(error) => {
                debug!(file = file_name, line, %error, "row skipped");
                rows.skipped.push(RowSkip { line, error });
            }
        }
    }
    Ok(rows)
}

/// Build a catalog from every price list in `dir`. Only a failure to list
/// the directory itself is returned as an error.
pub fn ingest_dir(dir: &Path, opts: &IngestOptions) -> Result<Ingestion> {
    let candidates = discover_candidates(dir, &opts.filter)?;
    debug!(dir = %dir.display(), candidates = candidates.len(), "discovered price files");

    let mut catalog = Catalog::new();
    let mut report = IngestReport::default();

    for path in &candidates {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let status = match read_price_file(path, &file_name, opts) {
            Ok(rows) => {
                let count = rows.records.len();
                catalog.extend(rows.records);
                FileStatus::Loaded {
                    records: count,
                    skipped_rows: rows.skipped,
                }
            }
            Err(e) => {
                debug!(file = %file_name, error = %e, "file skipped");
                FileStatus::Failed(e)
            }
        };
        report.files.push(FileOutcome {
            file: file_name,
            status,
        });
    }

    info!(
        records = catalog.len(),
        files = report.loaded_files(),
        skipped_files = report.failed_files().count(),
        skipped_rows = report.skipped_rows().count(),
        "ingestion finished"
    );
    Ok(Ingestion { catalog, report })
}
