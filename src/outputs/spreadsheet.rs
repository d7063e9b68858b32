//! Spreadsheet export.
//!
//! Writes a single worksheet with the header row
//! `Title | Date | Description | Money in Title/Description` followed by one
//! row per article, each at the row number carried by its [`IndexedRecord`].
//! Any file already at the target path is removed first.

use crate::error::Result;
use crate::models::IndexedRecord;
use rust_xlsxwriter::{Format, Workbook};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

pub const HEADERS: [&str; 4] = ["Title", "Date", "Description", "Money in Title/Description"];

const COLUMN_WIDTHS: [f64; 4] = [60.0, 24.0, 80.0, 28.0];

/// Write `rows` to a fresh workbook at `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = rows.len()))]
pub async fn write_spreadsheet(rows: &[IndexedRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    match fs::remove_file(path).await {
        Ok(()) => info!("Removed previous spreadsheet"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let buffer = build_workbook(rows)?.save_to_buffer()?;
    fs::write(path, buffer).await?;
    info!("Wrote spreadsheet");
    Ok(())
}

fn build_workbook(rows: &[IndexedRecord]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, (header, width)) in (0u16..).zip(HEADERS.iter().zip(COLUMN_WIDTHS)) {
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, width)?;
    }

    for IndexedRecord { row, record } in rows {
        // rust_xlsxwriter rows are zero-based
        let r = row.saturating_sub(1);
        sheet.write_string(r, 0, record.title())?;
        if let Some(date) = record.date() {
            sheet.write_string(r, 1, date)?;
        }
        sheet.write_string(r, 2, record.description())?;
        sheet.write_boolean(r, 3, record.has_money_mention())?;
    }

    Ok(workbook)
}
