//! Station sheet pass

use std::collections::HashMap;

use super::schema::{Fill, STATION_COLUMNS, STATION_ID_FIELD};
use super::{copy_field, id_string};
use crate::types::{latitude_of, longitude_of, CellValue, Document};

/// Mapped station rows plus the join inputs the record pass needs.
pub struct StationTable {
    /// One entry per station in fetch order, aligned with
    /// [`STATION_COLUMNS`](super::schema::STATION_COLUMNS).
    pub rows: Vec<Vec<CellValue>>,
    station_ids: Vec<Option<String>>,
    replicates: Vec<i64>,
}

impl StationTable {
    /// Replicate number of the first station whose identifier matches.
    pub fn replicate_for(&self, station_id: &str) -> Option<i64> {
        self.station_ids
            .iter()
            .position(|id| id.as_deref() == Some(station_id))
            .map(|idx| self.replicates[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Map station documents in fetch order.
///
/// Replicate numbers are assigned once all rows exist: a 1-based counter
/// within groups sharing a display name, in row order, no reordering.
pub fn map_stations(docs: &[Document]) -> StationTable {
    let names: Vec<Option<String>> = docs
        .iter()
        .map(|doc| {
            doc.get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .collect();

    let mut counters: HashMap<Option<&str>, i64> = HashMap::new();
    let mut replicates = Vec::with_capacity(docs.len());
    for name in &names {
        let counter = counters.entry(name.as_deref()).or_insert(0);
        *counter += 1;
        replicates.push(*counter);
    }

    let rows = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            STATION_COLUMNS
                .iter()
                .map(|spec| match spec.fill {
                    Fill::RowIndex => CellValue::Int(i as i64 + 1),
                    Fill::Replicate => CellValue::Int(replicates[i]),
                    Fill::Latitude(field) => cell_from(latitude_of(doc.get(field))),
                    Fill::Longitude(field) => cell_from(longitude_of(doc.get(field))),
                    Fill::Field(field) => copy_field(doc, field),
                    _ => CellValue::Empty,
                })
                .collect()
        })
        .collect();

    let station_ids = docs
        .iter()
        .map(|doc| doc.get(STATION_ID_FIELD).and_then(id_string))
        .collect();

    StationTable {
        rows,
        station_ids,
        replicates,
    }
}

fn cell_from(coordinate: Option<f64>) -> CellValue {
    coordinate.map(CellValue::Float).unwrap_or(CellValue::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocValue;

    fn station(name: &str, station_id: &str) -> Document {
        vec![
            ("name".to_string(), DocValue::Text(name.to_string())),
            (
                STATION_ID_FIELD.to_string(),
                DocValue::Text(station_id.to_string()),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn cell<'a>(row: &'a [CellValue], name: &str) -> &'a CellValue {
        let idx = STATION_COLUMNS
            .iter()
            .position(|c| c.name == name)
            .expect("known column");
        &row[idx]
    }

    // ==================== Replicate Numbering Tests ====================

    #[test]
    fn test_replicates_count_within_name_groups() {
        let docs = vec![station("A", "s1"), station("B", "s2"), station("A", "s3")];
        let table = map_stations(&docs);
        let replicates: Vec<&CellValue> = table
            .rows
            .iter()
            .map(|row| cell(row, "Número Réplica"))
            .collect();
        assert_eq!(
            replicates,
            vec![&CellValue::Int(1), &CellValue::Int(1), &CellValue::Int(2)]
        );
    }

    #[test]
    fn test_row_index_runs_in_fetch_order() {
        let docs = vec![station("A", "s1"), station("B", "s2"), station("A", "s3")];
        let table = map_stations(&docs);
        let indices: Vec<&CellValue> = table
            .rows
            .iter()
            .map(|row| cell(row, "ID Campaña"))
            .collect();
        assert_eq!(
            indices,
            vec![&CellValue::Int(1), &CellValue::Int(2), &CellValue::Int(3)]
        );
    }

    #[test]
    fn test_replicate_lookup_by_station_id() {
        let docs = vec![station("A", "s1"), station("B", "s2"), station("A", "s3")];
        let table = map_stations(&docs);
        assert_eq!(table.replicate_for("s1"), Some(1));
        assert_eq!(table.replicate_for("s2"), Some(1));
        assert_eq!(table.replicate_for("s3"), Some(2));
        assert_eq!(table.replicate_for("nope"), None);
    }

    // ==================== Field Mapping Tests ====================

    #[test]
    fn test_coordinates_from_geo_point() {
        let mut doc = station("A", "s1");
        doc.insert(
            "coordinatesPlani".to_string(),
            DocValue::GeoPoint {
                latitude: -33.45,
                longitude: -70.66,
            },
        );
        let table = map_stations(&[doc]);
        assert_eq!(
            cell(&table.rows[0], "Latitud decimal central"),
            &CellValue::Float(-33.45)
        );
        assert_eq!(
            cell(&table.rows[0], "Longitud decimal central"),
            &CellValue::Float(-70.66)
        );
    }

    #[test]
    fn test_missing_geo_point_leaves_coordinates_empty() {
        let table = map_stations(&[station("A", "s1")]);
        assert_eq!(
            cell(&table.rows[0], "Latitud decimal central"),
            &CellValue::Empty
        );
        assert_eq!(
            cell(&table.rows[0], "Longitud decimal central"),
            &CellValue::Empty
        );
    }

    #[test]
    fn test_absent_source_fields_stay_empty() {
        let table = map_stations(&[station("A", "s1")]);
        assert_eq!(cell(&table.rows[0], "Región"), &CellValue::Empty);
        assert_eq!(cell(&table.rows[0], "Ecosistema nivel 2"), &CellValue::Empty);
    }

    #[test]
    fn test_renamed_copies() {
        let mut doc = station("A", "s1");
        doc.insert(
            "tipoMonitoreo".to_string(),
            DocValue::Text("vegetación".to_string()),
        );
        doc.insert("tamano".to_string(), DocValue::Double(25.0));
        let table = map_stations(&[doc]);
        assert_eq!(
            cell(&table.rows[0], "Tipo de monitoreo"),
            &CellValue::Text("vegetación".to_string())
        );
        assert_eq!(
            cell(&table.rows[0], "Superficie (m2)"),
            &CellValue::Float(25.0)
        );
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let table = map_stations(&[]);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_numeric_station_ids_compare_as_strings() {
        let mut doc = station("A", "ignored");
        doc.insert(STATION_ID_FIELD.to_string(), DocValue::Integer(12));
        let table = map_stations(&[doc]);
        assert_eq!(table.replicate_for("12"), Some(1));
    }
}
