use std::path::{Path, PathBuf};

use html_escape::encode_text;

use crate::error::{PriceError, Result};
use crate::fmt::decimal;
use crate::models::CanonicalRecord;

pub const COLUMNS: [&str; 6] = ["#", "Name", "Price", "Weight", "File", "Unit price"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportFormat {
    Html,
    Csv,
}

impl ReportFormat {
    pub fn from_key(key: &str) -> Result<Self> {
        match key.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "csv" => Ok(Self::Csv),
            other => Err(PriceError::Other(format!(
                "unknown report format '{other}' (expected html or csv)"
            ))),
        }
    }

    /// `.csv` selects CSV; everything else is HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Html,
        }
    }
}

fn cells(idx: usize, r: &CanonicalRecord) -> [String; 6] {
    [
        (idx + 1).to_string(),
        r.name.clone(),
        decimal(r.price),
        decimal(r.weight),
        r.source_file.clone(),
        decimal(r.unit_price),
    ]
}

const HTML_HEAD: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Product positions</title>
</head>
<body>
<table border=\"1\">
<thead>
<tr>";

pub fn render_html(records: &[CanonicalRecord]) -> String {
    let mut out = String::from(HTML_HEAD);
    for col in COLUMNS {
        out.push_str(&format!("<th>{}</th>", encode_text(col)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for (idx, r) in records.iter().enumerate() {
        out.push_str("<tr>");
        for cell in cells(idx, r) {
            out.push_str(&format!("<td>{}</td>", encode_text(&cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}

pub fn render_csv(records: &[CanonicalRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(COLUMNS)?;
    for (idx, r) in records.iter().enumerate() {
        wtr.write_record(cells(idx, r))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| PriceError::Other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PriceError::Other(e.to_string()))
}

/// Render and write `records`, creating parent directories. Returns the
/// written path.
pub fn write_report(records: &[CanonicalRecord], path: &Path, format: ReportFormat) -> Result<PathBuf> {
    let body = match format {
        ReportFormat::Html => render_html(records),
        ReportFormat::Csv => render_csv(records)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CanonicalRecord> {
        vec![
            CanonicalRecord::new("Яблоко".into(), 100.0, 2.0, "price_1.csv".into()),
            CanonicalRecord::new("<b>Tom & Jerry</b>".into(), 10.0, 4.0, "price_2.csv".into()),
        ]
    }

    #[test]
    fn test_html_contains_numbered_rows() {
        let html = render_html(&sample());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            "<tr><td>1</td><td>Яблоко</td><td>100.0</td><td>2.0</td><td>price_1.csv</td><td>50.0</td></tr>"
        ));
        assert!(html.contains("<td>2</td>"));
        assert!(html.contains("<td>2.5</td>"));
    }

    #[test]
    fn test_html_escapes_markup() {
        let html = render_html(&sample());
        assert!(html.contains("&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
        assert!(!html.contains("<b>Tom"));
    }

    #[test]
    fn test_empty_catalog_renders_document() {
        let html = render_html(&[]);
        assert!(html.contains("<tbody>\n</tbody>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert_eq!(html.matches("<tr>").count(), 1);
    }

    #[test]
    fn test_csv_render() {
        let csv = render_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("#,Name,Price,Weight,File,Unit price"));
        assert_eq!(lines.next(), Some("1,Яблоко,100.0,2.0,price_1.csv,50.0"));
        assert_eq!(lines.next(), Some("2,<b>Tom & Jerry</b>,10.0,4.0,price_2.csv,2.5"));
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(ReportFormat::from_path(Path::new("out/report.CSV")), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_path(Path::new("output.html")), ReportFormat::Html);
        assert_eq!(ReportFormat::from_path(Path::new("output")), ReportFormat::Html);
        assert_eq!(ReportFormat::from_key("CSV").unwrap(), ReportFormat::Csv);
        assert!(ReportFormat::from_key("pdf").is_err());
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("output.html");
        let written = write_report(&sample(), &path, ReportFormat::Html).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Яблоко"));
    }

    #[test]
    fn test_write_report_propagates_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let result = write_report(&sample(), &blocker.join("output.html"), ReportFormat::Html);
        assert!(matches!(result, Err(PriceError::Io(_))));
    }
}
