use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::GeneratorError;

/// First-column value of the header row. Rows above it are sheet metadata.
pub const HEADER_LABEL: &str = "ID Label";

const LABEL_COLUMN: usize = 0;
const ALLOCATION_COLUMN: usize = 1;
const ADDRESS_COLUMN: usize = 3;
const CLIFF_COLUMN: usize = 4;
const VESTING_COLUMN: usize = 5;
const MIN_COLUMNS: usize = VESTING_COLUMN + 1;

/// An account row of a distribution ledger, with its fields cleaned up but
/// not yet validated against the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub label: String,
    pub allocation: String,
    pub address: String,
    pub cliff_months: u32,
    pub vesting_months: u32,
}

/// Lists the ledger files under `path` in sorted order. A plain file is
/// returned on its own.
pub fn collect_files(path: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
    let mut files = vec![];
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn read_ledger(path: &Path) -> Result<Vec<LedgerRecord>, GeneratorError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    parse_records(&path.display().to_string(), &rows)
}

/// Extracts account records from raw CSV rows. Everything before the
/// `ID Label` header is ignored, as are header repeats, rows with an empty
/// label and rows without an address.
pub fn parse_records(file: &str, rows: &[StringRecord]) -> Result<Vec<LedgerRecord>, GeneratorError> {
    let start = rows.iter().position(is_header).unwrap_or(0);

    let mut records = vec![];
    for (index, row) in rows.iter().enumerate().skip(start) {
        let label = row.get(LABEL_COLUMN).unwrap_or_default().trim();
        if label.is_empty() || is_header(row) {
            continue;
        }
        if row.len() < MIN_COLUMNS {
            return Err(GeneratorError::MalformedRow {
                file: file.to_string(),
                row: index + 1,
                expected: MIN_COLUMNS,
                got: row.len(),
            });
        }

        let address = row[ADDRESS_COLUMN].trim();
        if address.is_empty() {
            warn!(label, file, "Skipping account without address");
            continue;
        }

        records.push(LedgerRecord {
            label: label.to_string(),
            allocation: sanitize_allocation(&row[ALLOCATION_COLUMN]),
            address: address.to_string(),
            cliff_months: parse_months(label, "cliff", &row[CLIFF_COLUMN])?,
            vesting_months: parse_months(label, "vesting", &row[VESTING_COLUMN])?,
        });
    }

    Ok(records)
}

fn is_header(row: &StringRecord) -> bool {
    row.get(LABEL_COLUMN)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(HEADER_LABEL))
}

/// Strips thousands separators, e.g. `1,234.5` -> `1234.5`.
fn sanitize_allocation(raw: &str) -> String {
    raw.trim().replace(',', "")
}

/// A dash or an empty cell means no months.
fn parse_months(label: &str, field: &str, raw: &str) -> Result<u32, GeneratorError> {
    let value = raw.trim();
    if value.is_empty() || value == "-" {
        return Ok(0);
    }
    value.parse().map_err(|_| GeneratorError::InvalidMonths {
        label: label.to_string(),
        field: field.to_string(),
        value: raw.to_string(),
    })
}
