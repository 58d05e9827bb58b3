//! Template workbook reading

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::error::{ExportError, ExportResult};
use crate::types::CellValue;

/// Sheet names fixed by the reporting format.
pub const CAMPAIGN_SHEET: &str = "Campaña";
pub const STATION_SHEET: &str = "EstacionReplica";
pub const OCCURRENCE_SHEET: &str = "Ocurrencia";

/// Header depth per sheet; data rows start right below.
pub const CAMPAIGN_HEADER_ROWS: usize = 2;
pub const STATION_HEADER_ROWS: usize = 1;
pub const OCCURRENCE_HEADER_ROWS: usize = 2;

/// Header rows lifted from the fixed template workbook.
#[derive(Debug)]
pub struct TemplateWorkbook {
    pub campaign_header: Vec<Vec<CellValue>>,
    pub station_header: Vec<Vec<CellValue>>,
    pub occurrence_header: Vec<Vec<CellValue>>,
}

impl TemplateWorkbook {
    /// Open the template and capture each sheet's header rows.
    pub fn open(path: &Path) -> ExportResult<Self> {
        if !path.exists() {
            return Err(ExportError::TemplateMissing(path.to_path_buf()));
        }
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e| ExportError::Workbook(format!("failed to open template: {e}")))?;

        Ok(Self {
            campaign_header: header_rows(&mut workbook, CAMPAIGN_SHEET, CAMPAIGN_HEADER_ROWS)?,
            station_header: header_rows(&mut workbook, STATION_SHEET, STATION_HEADER_ROWS)?,
            occurrence_header: header_rows(
                &mut workbook,
                OCCURRENCE_SHEET,
                OCCURRENCE_HEADER_ROWS,
            )?,
        })
    }
}

fn header_rows(
    workbook: &mut Xlsx<BufReader<File>>,
    sheet: &str,
    depth: usize,
) -> ExportResult<Vec<Vec<CellValue>>> {
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ExportError::Workbook(format!("template sheet '{sheet}': {e}")))?;

    let mut header = Vec::with_capacity(depth);
    for row in range.rows().take(depth) {
        header.push(row.iter().map(cell_from_data).collect());
    }
    Ok(header)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
