//! Export orchestration: fetch, map, write

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::excel::{write_export, TemplateWorkbook};
use crate::mapper::{map_campaign, map_records, map_stations};
use crate::store::DocumentStore;

/// Source collection names.
pub const CAMPAIGN_COLLECTION: &str = "campana";
pub const STATION_COLLECTION: &str = "estacion";
pub const RECORD_COLLECTION: &str = "registro";

/// Run one full export and return the path of the saved workbook.
///
/// The campaign collection must be non-empty; stations and records may be
/// empty, in which case their sheets carry no data rows but the workbook is
/// still produced.
pub async fn generate_export(
    store: &dyn DocumentStore,
    template_path: &Path,
    output_dir: &Path,
    campaign_id: &str,
) -> ExportResult<PathBuf> {
    let campaign_id = campaign_id.trim_matches('"');

    let campaigns = store
        .fetch_by_campaign(CAMPAIGN_COLLECTION, campaign_id)
        .await?;
    if campaigns.is_empty() {
        return Err(ExportError::CampaignNotFound(campaign_id.to_string()));
    }
    let stations = store
        .fetch_by_campaign(STATION_COLLECTION, campaign_id)
        .await?;
    let records = store
        .fetch_by_campaign(RECORD_COLLECTION, campaign_id)
        .await?;
    info!(
        campaign_id,
        stations = stations.len(),
        records = records.len(),
        "mapping export tables"
    );

    let campaign_table = map_campaign(&campaigns[0]);
    let station_table = map_stations(&stations);
    let record_table = map_records(&records, &station_table);

    let template = TemplateWorkbook::open(template_path)?;
    let out_path = write_export(
        &template,
        output_dir,
        campaign_id,
        &campaign_table,
        &station_table.rows,
        &record_table,
    )?;
    info!(path = %out_path.display(), "export workbook saved");
    Ok(out_path)
}
