//! Occurrence sheet pass

use super::schema::{Fill, RECORD_COLUMNS, STATION_ID_FIELD};
use super::station::StationTable;
use super::{copy_field, id_string};
use crate::types::{latitude_of, longitude_of, CellValue, Document};

/// Map record documents in fetch order.
///
/// Each record first takes the replicate number of the station whose
/// identifier equals (string-compared) its own `estacionID`; that joined
/// value feeds the "ID EstacionReplica" column. Unmatched or missing ids
/// leave it empty.
pub fn map_records(docs: &[Document], stations: &StationTable) -> Vec<Vec<CellValue>> {
    docs.iter()
        .map(|doc| {
            let replicate = doc
                .get(STATION_ID_FIELD)
                .and_then(id_string)
                .and_then(|id| stations.replicate_for(&id));

            RECORD_COLUMNS
                .iter()
                .map(|spec| match spec.fill {
                    Fill::Const(n) => CellValue::Int(n),
                    Fill::ConstText(text) => CellValue::Text(text.to_string()),
                    Fill::Replicate => {
                        replicate.map(CellValue::Int).unwrap_or(CellValue::Empty)
                    }
                    Fill::Latitude(field) => cell_from(latitude_of(doc.get(field))),
                    Fill::Longitude(field) => cell_from(longitude_of(doc.get(field))),
                    Fill::Space => CellValue::Text(" ".to_string()),
                    Fill::Field(field) => copy_field(doc, field),
                    Fill::Empty | Fill::RowIndex | Fill::DatePart(..) => CellValue::Empty,
                })
                .collect()
        })
        .collect()
}

fn cell_from(coordinate: Option<f64>) -> CellValue {
    coordinate.map(CellValue::Float).unwrap_or(CellValue::Empty)
}
