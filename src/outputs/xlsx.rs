//! Spreadsheet output.

use crate::errors::OutputError;
use crate::models::SummaryRecord;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};
use std::path::Path;
use tracing::{info, instrument};

const FIXED_COLUMNS: [&str; 3] = ["Title", "Summary", "Link"];

/// Write `records` to a workbook at `path`, replacing any existing file.
///
/// Columns are `Title, Summary, Link` followed by one column per entry of
/// `languages`, in order. Missing titles and translations that did not
/// succeed are left blank.
///
/// # Errors
///
/// Returns [`OutputError`] if the workbook cannot be built or saved.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = records.len()))]
pub fn write_workbook(
    records: &[SummaryRecord],
    languages: &[&str],
    path: &Path,
) -> Result<(), OutputError> {
    let mut workbook = Workbook::new();

    // A fixed creation time keeps repeated runs byte-identical.
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in FIXED_COLUMNS.iter().chain(languages.iter()).enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 60)?;
    worksheet.set_column_width(2, 50)?;

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        if let Some(title) = &record.title {
            worksheet.write_string(row, 0, title)?;
        }
        worksheet.write_string(row, 1, &record.summary)?;
        worksheet.write_string(row, 2, &record.link)?;

        for (offset, language) in languages.iter().enumerate() {
            let col = (FIXED_COLUMNS.len() + offset) as u16;
            if let Some(text) = record.translation(language).and_then(|t| t.value()) {
                worksheet.write_string(row, col, text)?;
            }
        }
    }

    workbook.save(path)?;
    info!("Summaries and translations saved");
    Ok(())
}
