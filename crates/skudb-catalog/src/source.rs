//! CSV parsing for catalog sources.
//!
//! The whole document is parsed up front so that a malformed file fails
//! before any row reaches the store.

use std::io::Read;

use skudb_core::RawProductRow;

use crate::ImportError;

/// Row number of the first data record; row 1 is the header.
pub const FIRST_DATA_ROW: usize = 2;

/// One parsed record with its display row number.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub row_number: usize,
    pub raw: RawProductRow,
}

/// Parses a catalog CSV into raw rows in file order.
///
/// Every field (headers included) is trimmed and quoted values are supported.
/// Lines that are empty after trimming are skipped and do not consume a row
/// number. Row numbers count data records from [`FIRST_DATA_ROW`].
///
/// # Errors
///
/// Returns [`ImportError::Parse`] for malformed CSV (e.g. invalid UTF-8),
/// [`ImportError::FieldCount`] for a non-blank record whose width differs
/// from the header, and [`ImportError::MissingHeader`] for an empty document.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<SourceRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(ImportError::Parse)?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(ImportError::MissingHeader);
    }

    let mut rows = Vec::new();
    let mut row_number = FIRST_DATA_ROW;
    for record in csv_reader.records() {
        let record = record.map_err(ImportError::Parse)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(ImportError::FieldCount {
                row_number,
                expected: headers.len(),
                found: record.len(),
            });
        }
        rows.push(SourceRow {
            row_number,
            raw: RawProductRow::from_pairs(headers.iter().zip(record.iter())),
        });
        row_number += 1;
    }

    Ok(rows)
}
