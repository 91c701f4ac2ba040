//! Spreadsheet export.
//!
//! Writes a workbook with a single `Results` sheet: a header row with the
//! field names followed by one row per result, in collection order.

use crate::error::Result;
use crate::models::{ResultSet, FIELD_NAMES};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const REPORT_FILENAME: &str = "search_results.xlsx";
pub const SHEET_NAME: &str = "Results";

/// Write `results` to `search_results.xlsx` in `output_dir`.
///
/// # Arguments
///
/// * `results` - Rows to write, in collection order
/// * `output_dir` - Existing directory for the workbook
///
/// # Returns
///
/// The path of the saved workbook.
///
/// # Errors
///
/// Returns [`HarvestError::Spreadsheet`](crate::error::HarvestError::Spreadsheet)
/// if a cell cannot be written or the file cannot be saved.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), rows = results.len()))]
pub fn write_report(results: &ResultSet, output_dir: &Path) -> Result<PathBuf> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, name) in FIELD_NAMES.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, row) in results.rows().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.title)?;
        sheet.write_string(r, 1, &row.date)?;
        sheet.write_string(r, 2, &row.description)?;
        sheet.write_string(r, 3, &row.picture)?;
        sheet.write_number(r, 4, row.count_search_phrases as f64)?;
        sheet.write_boolean(r, 5, row.description_contains_money)?;
    }

    let path = output_dir.join(REPORT_FILENAME);
    workbook.save(&path)?;
    info!(path = %path.display(), "Results saved to spreadsheet");
    Ok(path)
}
