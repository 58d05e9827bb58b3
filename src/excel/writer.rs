//! Output workbook writing

use std::path::{Path, PathBuf};

use regex::Regex;
use rust_xlsxwriter::{Workbook, Worksheet};
use uuid::Uuid;

use super::template::{
    TemplateWorkbook, CAMPAIGN_HEADER_ROWS, CAMPAIGN_SHEET, OCCURRENCE_HEADER_ROWS,
    OCCURRENCE_SHEET, STATION_HEADER_ROWS, STATION_SHEET,
};
use crate::error::{ExportError, ExportResult};
use crate::mapper::schema::{ColumnSpec, CAMPAIGN_COLUMNS, RECORD_COLUMNS, STATION_COLUMNS};
use crate::types::CellValue;

/// Data start row (0-based) per sheet, right below the template headers.
const CAMPAIGN_START_ROW: u32 = CAMPAIGN_HEADER_ROWS as u32;
const STATION_START_ROW: u32 = STATION_HEADER_ROWS as u32;
const OCCURRENCE_START_ROW: u32 = OCCURRENCE_HEADER_ROWS as u32;

/// Write the three mapped tables into a fresh workbook built from the
/// template headers, saved under a unique name in `out_dir`.
///
/// Returns the full path of the saved file. The workbook is saved exactly
/// once at the end, so a failure never leaves a partial file behind.
pub fn write_export(
    template: &TemplateWorkbook,
    out_dir: &Path,
    campaign_id: &str,
    campaign: &[Vec<CellValue>],
    stations: &[Vec<CellValue>],
    records: &[Vec<CellValue>],
) -> ExportResult<PathBuf> {
    let mut workbook = Workbook::new();

    write_sheet(
        workbook.add_worksheet(),
        CAMPAIGN_SHEET,
        &template.campaign_header,
        CAMPAIGN_COLUMNS,
        campaign,
        CAMPAIGN_START_ROW,
    )?;
    write_sheet(
        workbook.add_worksheet(),
        STATION_SHEET,
        &template.station_header,
        STATION_COLUMNS,
        stations,
        STATION_START_ROW,
    )?;
    write_sheet(
        workbook.add_worksheet(),
        OCCURRENCE_SHEET,
        &template.occurrence_header,
        RECORD_COLUMNS,
        records,
        OCCURRENCE_START_ROW,
    )?;

    std::fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join(unique_filename(campaign_id)?);
    workbook
        .save(&out_path)
        .map_err(|e| ExportError::Workbook(format!("failed to save workbook: {e}")))?;
    Ok(out_path)
}

/// Copy the template header rows, then place each data cell at its declared
/// column. Positions are walked in declared (ascending) order, so a position
/// declared twice resolves to the later entry.
fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    header: &[Vec<CellValue>],
    columns: &[ColumnSpec],
    rows: &[Vec<CellValue>],
    start_row: u32,
) -> ExportResult<()> {
    worksheet
        .set_name(name)
        .map_err(|e| ExportError::Workbook(format!("failed to name sheet '{name}': {e}")))?;

    for (r, cells) in header.iter().enumerate() {
        for (c, cell) in cells.iter().enumerate() {
            write_cell(worksheet, r as u32, c as u16, cell)?;
        }
    }

    for (r, row) in rows.iter().enumerate() {
        let sheet_row = start_row + r as u32;
        for (spec, cell) in columns.iter().zip(row) {
            write_cell(worksheet, sheet_row, spec.column - 1, cell)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> ExportResult<()> {
    let result = match cell {
        // absent values become explicit empty cells, not holes
        CellValue::Empty => worksheet.write_string(row, col, ""),
        CellValue::Text(s) => worksheet.write_string(row, col, s),
        CellValue::Int(i) => worksheet.write_number(row, col, *i as f64),
        CellValue::Float(f) => worksheet.write_number(row, col, *f),
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
        CellValue::DateTime(dt) => {
            worksheet.write_string(row, col, dt.format("%Y-%m-%d %H:%M:%S").to_string())
        }
    };
    result.map_err(|e| ExportError::Workbook(format!("failed to write cell: {e}")))?;
    Ok(())
}

/// `Flora_<sanitized-id>_<6-hex>.xlsx`; the random suffix keeps concurrent
/// exports for the same campaign from colliding.
fn unique_filename(campaign_id: &str) -> ExportResult<String> {
    let suffix = Uuid::new_v4().simple().to_string();
    Ok(format!(
        "Flora_{}_{}.xlsx",
        safe_filename(campaign_id)?,
        &suffix[..6]
    ))
}

/// Collapse every run of characters outside `[\w-]` into a single dash.
pub fn safe_filename(raw: &str) -> ExportResult<String> {
    let pattern = Regex::new(r"[^\w\-]+")
        .map_err(|e| ExportError::Workbook(format!("regex error: {e}")))?;
    let cleaned = pattern.replace_all(raw, "-");
    let trimmed = cleaned.trim_matches('-');
    Ok(if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Filename Tests ====================

    #[test]
    fn test_safe_filename_keeps_word_characters() {
        assert_eq!(safe_filename("camp_01-A").unwrap(), "camp_01-A");
    }

    #[test]
    fn test_safe_filename_collapses_runs() {
        assert_eq!(safe_filename("campaña de otoño").unwrap(), "campaña-de-otoño");
        assert_eq!(safe_filename("a / b / c").unwrap(), "a-b-c");
    }

    #[test]
    fn test_safe_filename_trims_dashes() {
        assert_eq!(safe_filename("  camp  ").unwrap(), "camp");
        assert_eq!(safe_filename("***").unwrap(), "file");
        assert_eq!(safe_filename("").unwrap(), "file");
    }

    #[test]
    fn test_unique_filename_shape() {
        let name = unique_filename("camp 1").unwrap();
        assert!(name.starts_with("Flora_camp-1_"));
        assert!(name.ends_with(".xlsx"));
        // prefix + dash-joined id + 6 hex chars + extension
        let suffix = name
            .trim_end_matches(".xlsx")
            .rsplit('_')
            .next()
            .unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unique_filenames_differ() {
        let a = unique_filename("camp").unwrap();
        let b = unique_filename("camp").unwrap();
        assert_ne!(a, b);
    }
}
