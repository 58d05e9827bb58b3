//! Destination sheet schemas
//!
//! One ordered table per sheet: display name, fixed 1-based column number in
//! the template, and the fill policy producing the cell. The mapper and the
//! writer both consume these tables, so layout and behavior cannot drift
//! apart.

/// Component of a decomposed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// How a destination cell is produced from a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Copy the named source field verbatim when present and non-null.
    Field(&'static str),
    /// 1-based row position in fetch order.
    RowIndex,
    /// Fixed integer regardless of source.
    Const(i64),
    /// Fixed text regardless of any source value.
    ConstText(&'static str),
    /// Latitude of a geo-point-shaped source field.
    Latitude(&'static str),
    /// Longitude of a geo-point-shaped source field.
    Longitude(&'static str),
    /// Decomposed component of a permissively parsed source date.
    DatePart(&'static str, DatePart),
    /// Per-station replicate counter, or its joined value on record rows.
    Replicate,
    /// Cosmetic single-space placeholder with no source.
    Space,
    /// No source at all; the cell stays empty.
    Empty,
}

/// One destination column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column: u16,
    pub fill: Fill,
}

const fn col(name: &'static str, column: u16, fill: Fill) -> ColumnSpec {
    ColumnSpec { name, column, fill }
}

/// Fixed attribution stamped on every record row.
pub const IDENTIFIED_BY: &str = "AMS Consultores";

/// Source field carrying the station identifier used by the record join.
/// Present in the source documents but never written to a sheet.
pub const STATION_ID_FIELD: &str = "estacionID";

/// "Campaña" sheet: a single row decomposing the campaign dates.
pub static CAMPAIGN_COLUMNS: &[ColumnSpec] = &[
    col("ID Campaña", 1, Fill::Const(1)),
    col("Nombre campaña", 2, Fill::Field("name")),
    col("Número de campaña", 3, Fill::Field("ncampana")),
    col("Año inicio", 4, Fill::DatePart("startDateCamp", DatePart::Year)),
    col("Mes inicio", 5, Fill::DatePart("startDateCamp", DatePart::Month)),
    col("Día inicio", 6, Fill::DatePart("startDateCamp", DatePart::Day)),
    col("Año término", 7, Fill::DatePart("endDateCamp", DatePart::Year)),
    col("Mes término", 8, Fill::DatePart("endDateCamp", DatePart::Month)),
    col("Día término", 9, Fill::DatePart("endDateCamp", DatePart::Day)),
    col("Objetivo de la campaña", 10, Fill::Empty),
    col("Comentarios adicionales", 11, Fill::Empty),
];

/// "EstacionReplica" sheet: one row per station in fetch order.
pub static STATION_COLUMNS: &[ColumnSpec] = &[
    col("ID Campaña", 1, Fill::RowIndex),
    col("Nombre estación", 2, Fill::Field("name")),
    col("Tipo de monitoreo", 3, Fill::Field("tipoMonitoreo")),
    col("Número Réplica", 4, Fill::Replicate),
    col("Descripción EstacionReplica", 5, Fill::Field("comentario")),
    col("Superficie (m2)", 9, Fill::Field("tamano")),
    col("Latitud decimal central", 10, Fill::Latitude("coordinatesPlani")),
    col("Longitud decimal central", 11, Fill::Longitude("coordinatesPlani")),
    col("Región", 16, Fill::Field("region")),
    col("Provincia", 17, Fill::Field("provincia")),
    col("Comuna", 18, Fill::Field("comuna")),
    col("Localidad", 19, Fill::Field("localidad")),
    col("Ecosistema nivel 1", 20, Fill::Field("cobertura1")),
    col("Ecosistema nivel 2", 21, Fill::Field("cobertura2")),
];

/// "Ocurrencia" sheet: one row per record in fetch order.
///
/// Column 43 is declared twice, matching the v5.2 format revision this
/// exporter targets; the writer walks positions in ascending order, so
/// "Muestreado por" is the entry that lands in the cell. Column 44 is never
/// written.
pub static RECORD_COLUMNS: &[ColumnSpec] = &[
    col("ID Campaña", 1, Fill::Const(1)),
    col("AUTOCOMPLETADO NombreCampaña", 2, Fill::Field("valor")),
    col("ID EstacionReplica", 3, Fill::Replicate),
    col(
        "AUTOCOMPLETADO NombreEstacion-Número Replica-Tipo de monitoreo",
        4,
        Fill::Empty,
    ),
    col("Año del evento", 5, Fill::Field("registroAnoDate")),
    col("Mes del evento", 6, Fill::Field("registrosMesDate")),
    col("Día del evento", 7, Fill::Field("registrosDiaDate")),
    col("Hora inicio evento (hh:mm)", 8, Fill::Field("registrosHoraDate")),
    col("Protocolo de muestreo", 9, Fill::Field("protocoloMuestreo")),
    col("Tamaño de la muestra", 10, Fill::Field("tamanoEst")),
    col(
        "Unidad del tamaño de la muestra",
        11,
        Fill::Field("unidadDeLaMuestra"),
    ),
    col("Esfuerzo de muestreo", 12, Fill::Space),
    col("Profundidad (m)", 13, Fill::Space),
    col("Comentarios del evento", 14, Fill::Field("comentarios")),
    col("Reino", 15, Fill::Field("Reino")),
    col("Filo o división", 16, Fill::Space),
    col("Clase", 17, Fill::Field("clase")),
    col("Orden", 18, Fill::Space),
    col("Familia", 19, Fill::Field("familia")),
    col("Género", 20, Fill::Field("genero")),
    col("Subgénero", 21, Fill::Space),
    col("Epíteto específico", 22, Fill::Space),
    col("Epíteto infraespecífico", 23, Fill::Space),
    col("Nombre común", 24, Fill::Space),
    col("Comentarios del taxón", 25, Fill::Space),
    col("Estado del organismo", 26, Fill::Field("estadoDelOrganismo")),
    col("Tipo de componente abiótico", 27, Fill::Field("tipoDeComponente")),
    col("Parámetro", 28, Fill::Field("parametro")),
    col("Tipo de cuantificación", 29, Fill::Field("tipoCuantificacion")),
    col("Valor", 30, Fill::Field("nInd")),
    col("Unidad de valor", 31, Fill::Field("unidadDeValor")),
    col("Latitud decimal registro", 32, Fill::Latitude("coordinatesReg")),
    col("Longitud decimal registro", 33, Fill::Longitude("coordinatesReg")),
    col("Hora registro", 34, Fill::Field("registrosHoraDate")),
    col("Condición reproductiva", 35, Fill::Space),
    col("Sexo (Fauna)", 36, Fill::Space),
    col("Etapa de vida (Fauna)", 37, Fill::Space),
    col("Comportamiento (Fauna)", 38, Fill::Space),
    col("Hábito de crecimiento (Flora)", 39, Fill::Field("habito")),
    col("Propiedades dinámicas", 40, Fill::Field("valor")),
    col("Tipo de registro", 41, Fill::Field("tipoDeRegistro")),
    col("Código individuo", 42, Fill::Space),
    col("Comentarios del registro biológico", 43, Fill::Space),
    col("Muestreado por", 43, Fill::Space),
    col("Identificado por", 45, Fill::ConstText(IDENTIFIED_BY)),
    col(
        "Comentarios de la Identificación",
        46,
        Fill::ConstText(IDENTIFIED_BY),
    ),
    col("Observaciones adicionales", 47, Fill::Space),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_columns_are_contiguous() {
        let positions: Vec<u16> = CAMPAIGN_COLUMNS.iter().map(|c| c.column).collect();
        assert_eq!(positions, (1..=11).collect::<Vec<u16>>());
    }

    #[test]
    fn test_station_columns_ascend() {
        let positions: Vec<u16> = STATION_COLUMNS.iter().map(|c| c.column).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert_eq!(positions.first(), Some(&1));
        assert_eq!(positions.last(), Some(&21));
    }

    #[test]
    fn test_record_position_43_is_declared_twice() {
        let at_43: Vec<&str> = RECORD_COLUMNS
            .iter()
            .filter(|c| c.column == 43)
            .map(|c| c.name)
            .collect();
        assert_eq!(
            at_43,
            vec!["Comentarios del registro biológico", "Muestreado por"]
        );
        // 44 is the hole the duplicate leaves behind
        assert!(!RECORD_COLUMNS.iter().any(|c| c.column == 44));
    }

    #[test]
    fn test_record_columns_never_descend() {
        let positions: Vec<u16> = RECORD_COLUMNS.iter().map(|c| c.column).collect();
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_identification_columns_carry_the_fixed_constant() {
        for name in ["Identificado por", "Comentarios de la Identificación"] {
            let spec = RECORD_COLUMNS
                .iter()
                .find(|c| c.name == name)
                .expect("spec present");
            assert_eq!(spec.fill, Fill::ConstText(IDENTIFIED_BY));
        }
    }

    #[test]
    fn test_space_placeholder_count() {
        let spaces = RECORD_COLUMNS
            .iter()
            .filter(|c| c.fill == Fill::Space)
            .count();
        assert_eq!(spaces, 17);
    }
}
