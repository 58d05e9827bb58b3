//! Campaign sheet pass

use chrono::{Datelike, NaiveDateTime};

use super::copy_field;
use super::schema::{DatePart, Fill, CAMPAIGN_COLUMNS};
use crate::types::{CellValue, Document};

/// Map the campaign document onto the one-row campaign table.
///
/// Start/end dates are parsed permissively and decomposed into year, month
/// and day; unparseable or absent dates decompose to empty cells. The two
/// narrative columns have no source and stay empty.
pub fn map_campaign(doc: &Document) -> Vec<Vec<CellValue>> {
    let row = CAMPAIGN_COLUMNS
        .iter()
        .map(|spec| match spec.fill {
            Fill::Const(n) => CellValue::Int(n),
            Fill::Field(field) => copy_field(doc, field),
            Fill::DatePart(field, part) => {
                date_part(doc.get(field).and_then(|v| v.as_datetime()), part)
            }
            _ => CellValue::Empty,
        })
        .collect();
    vec![row]
}

fn date_part(dt: Option<NaiveDateTime>, part: DatePart) -> CellValue {
    match dt {
        Some(dt) => CellValue::Int(match part {
            DatePart::Year => i64::from(dt.year()),
            DatePart::Month => i64::from(dt.month()),
            DatePart::Day => i64::from(dt.day()),
        }),
        None => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocValue;
    use chrono::NaiveDate;

    fn doc(fields: Vec<(&str, DocValue)>) -> Document {
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    fn cell<'a>(row: &'a [CellValue], name: &str) -> &'a CellValue {
        let idx = CAMPAIGN_COLUMNS
            .iter()
            .position(|c| c.name == name)
            .expect("known column");
        &row[idx]
    }

    #[test]
    fn test_single_row_with_constant_id() {
        let table = map_campaign(&doc(vec![(
            "name",
            DocValue::Text("Campaña Otoño".to_string()),
        )]));
        assert_eq!(table.len(), 1);
        assert_eq!(cell(&table[0], "ID Campaña"), &CellValue::Int(1));
        assert_eq!(
            cell(&table[0], "Nombre campaña"),
            &CellValue::Text("Campaña Otoño".to_string())
        );
    }

    #[test]
    fn test_date_decomposition() {
        let start = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let table = map_campaign(&doc(vec![("startDateCamp", DocValue::Timestamp(start))]));
        assert_eq!(cell(&table[0], "Año inicio"), &CellValue::Int(2023));
        assert_eq!(cell(&table[0], "Mes inicio"), &CellValue::Int(6));
        assert_eq!(cell(&table[0], "Día inicio"), &CellValue::Int(15));
    }

    #[test]
    fn test_absent_date_decomposes_to_empty() {
        let table = map_campaign(&doc(vec![]));
        for name in ["Año término", "Mes término", "Día término"] {
            assert_eq!(cell(&table[0], name), &CellValue::Empty);
        }
    }

    #[test]
    fn test_unparseable_date_decomposes_to_empty() {
        let table = map_campaign(&doc(vec![(
            "endDateCamp",
            DocValue::Text("sometime soon".to_string()),
        )]));
        for name in ["Año término", "Mes término", "Día término"] {
            assert_eq!(cell(&table[0], name), &CellValue::Empty);
        }
    }

    #[test]
    fn test_string_date_is_parsed() {
        let table = map_campaign(&doc(vec![(
            "startDateCamp",
            DocValue::Text("2024-01-03".to_string()),
        )]));
        assert_eq!(cell(&table[0], "Año inicio"), &CellValue::Int(2024));
        assert_eq!(cell(&table[0], "Mes inicio"), &CellValue::Int(1));
        assert_eq!(cell(&table[0], "Día inicio"), &CellValue::Int(3));
    }

    #[test]
    fn test_narrative_columns_stay_empty() {
        let table = map_campaign(&doc(vec![(
            "name",
            DocValue::Text("Campaña".to_string()),
        )]));
        assert_eq!(cell(&table[0], "Objetivo de la campaña"), &CellValue::Empty);
        assert_eq!(
            cell(&table[0], "Comentarios adicionales"),
            &CellValue::Empty
        );
    }
}
