use csv::StringRecord;

use crate::error::RowError;
use crate::models::{CanonicalRecord, ResolvedMapping};

/// One data row seen as a header -> cell mapping.
pub struct RawRow<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    pub fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// `None` when the header is unknown or the row is too short to reach it.
    pub fn get(&self, header: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == header)?;
        self.record.get(idx)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub allow_zero_price: bool,
}

/// Parse a decimal cell. Surrounding whitespace is ignored and a single
/// comma is accepted as the decimal separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let parsed = match s.parse::<f64>() {
        Ok(v) => v,
        Err(_) if s.matches(',').count() == 1 && !s.contains('.') => {
            s.replace(',', ".").parse::<f64>().ok()?
        }
        Err(_) => return None,
    };
    parsed.is_finite().then_some(parsed)
}

fn cell<'a>(row: &RawRow<'a>, column: &str) -> Result<&'a str, RowError> {
    row.get(column).ok_or_else(|| RowError::MissingField {
        column: column.to_string(),
    })
}

fn number(row: &RawRow<'_>, column: &str) -> Result<f64, RowError> {
    let raw = cell(row, column)?;
    let value = parse_decimal(raw).ok_or_else(|| RowError::InvalidNumber {
        column: column.to_string(),
        value: raw.trim().to_string(),
    })?;
    if value < 0.0 {
        return Err(RowError::Negative {
            column: column.to_string(),
            value: raw.trim().to_string(),
        });
    }
    Ok(value)
}

/// Turn one raw row into a canonical record.
pub fn normalize_row(
    row: &RawRow<'_>,
    mapping: &ResolvedMapping,
    source_file: &str,
    opts: NormalizeOptions,
) -> Result<CanonicalRecord, RowError> {
    let name = cell(row, &mapping.product)?.trim();
    if name.is_empty() {
        return Err(RowError::MissingField {
            column: mapping.product.clone(),
        });
    }

    let price = number(row, &mapping.price)?;
    let weight = number(row, &mapping.weight)?;

    if weight == 0.0 {
        return Err(RowError::ZeroWeight);
    }
    if price == 0.0 && !opts.allow_zero_price {
        return Err(RowError::ZeroPrice);
    }

    let record = CanonicalRecord::new(name.to_string(), price, weight, source_file.to_string());
    if !record.unit_price.is_finite() {
        return Err(RowError::UnitPriceOutOfRange {
            price: cell(row, &mapping.price)?.trim().to_string(),
            weight: cell(row, &mapping.weight)?.trim().to_string(),
        });
    }
    Ok(record)
}
