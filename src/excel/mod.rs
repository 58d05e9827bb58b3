//! Spreadsheet handling
//!
//! Reading the fixed template workbook and writing the export output:
//! - Template: header rows lifted with `calamine`
//! - Output: rebuilt with `rust_xlsxwriter` from the template headers plus
//!   the mapped data rows, so each sheet's data region starts empty

mod template;
mod writer;

pub use template::{
    TemplateWorkbook, CAMPAIGN_SHEET, OCCURRENCE_SHEET, STATION_SHEET,
};
pub use writer::{safe_filename, write_export};
