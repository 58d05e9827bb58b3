//! Template Mapper
//!
//! Pure transformation from fetched documents to the three destination sheet
//! tables. Each pass emits rows aligned with its schema in [`schema`]; the
//! writer places cell `i` of a row at `schema[i].column`. No I/O happens
//! here, so mapping the same input twice yields identical tables.

pub mod schema;

mod campaign;
mod record;
mod station;

pub use campaign::map_campaign;
pub use record::map_records;
pub use station::{map_stations, StationTable};

use crate::types::{CellValue, DocValue, Document};

/// Verbatim field copy: present and non-null → value, otherwise empty.
fn copy_field(doc: &Document, field: &str) -> CellValue {
    match doc.get(field) {
        Some(value) if !value.is_null() => CellValue::from(value),
        _ => CellValue::Empty,
    }
}

/// String form used for identifier comparison, so ids match regardless of
/// whether they were stored as text or numbers.
fn id_string(value: &DocValue) -> Option<String> {
    match value {
        DocValue::Text(s) => Some(s.clone()),
        DocValue::Integer(i) => Some(i.to_string()),
        DocValue::Double(f) => Some(f.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn doc(fields: Vec<(&str, DocValue)>) -> Document {
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn test_copy_field_present() {
        let d = doc(vec![("name", DocValue::Text("A".to_string()))]);
        assert_eq!(copy_field(&d, "name"), CellValue::Text("A".to_string()));
    }

    #[test]
    fn test_copy_field_absent_or_null() {
        let d = doc(vec![("name", DocValue::Null)]);
        assert_eq!(copy_field(&d, "name"), CellValue::Empty);
        assert_eq!(copy_field(&d, "missing"), CellValue::Empty);
    }

    #[test]
    fn test_id_string_shapes() {
        assert_eq!(
            id_string(&DocValue::Text("s1".to_string())),
            Some("s1".to_string())
        );
        assert_eq!(id_string(&DocValue::Integer(12)), Some("12".to_string()));
        assert_eq!(id_string(&DocValue::Null), None);
        assert_eq!(id_string(&DocValue::Map(HashMap::new())), None);
    }
}
