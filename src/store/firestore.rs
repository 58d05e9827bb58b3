//! Firestore REST client
//!
//! Queries each collection through the `runQuery` endpoint with a single
//! equality filter on the campaign id, and decodes Firestore's typed values
//! into [`DocValue`]. Zone-aware timestamps are converted to the local zone
//! and stripped of zone info at decode time.

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{json, Value};

use super::{DocumentStore, CAMPAIGN_ID_FIELD};
use crate::error::{ExportError, ExportResult};
use crate::types::{DocValue, Document, DOC_ID_KEY, LOCAL_TZ};

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

/// Client over one project's `(default)` database.
pub struct FirestoreClient {
    http: reqwest::Client,
    project_id: String,
    api_key: Option<String>,
}

impl FirestoreClient {
    pub fn new(project_id: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            project_id: project_id.into(),
            api_key,
        }
    }

    fn run_query_url(&self) -> String {
        format!(
            "{FIRESTORE_BASE}/projects/{}/databases/(default)/documents:runQuery",
            self.project_id
        )
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn fetch_by_campaign(
        &self,
        collection: &str,
        campaign_id: &str,
    ) -> ExportResult<Vec<Document>> {
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": CAMPAIGN_ID_FIELD },
                        "op": "EQUAL",
                        "value": { "stringValue": campaign_id },
                    }
                }
            }
        });

        let mut request = self.http.post(self.run_query_url()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExportError::Store(format!("query '{collection}' failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ExportError::Store(format!(
                "query '{collection}' returned {status}: {detail}"
            )));
        }

        let results: Vec<Value> = response
            .json()
            .await
            .map_err(|e| ExportError::Store(format!("query '{collection}' bad response: {e}")))?;

        // Entries without a "document" key are read-time markers; skip them.
        Ok(results
            .iter()
            .filter_map(|entry| entry.get("document"))
            .map(decode_document)
            .collect())
    }
}

/// Decode one Firestore document: its fields plus the reserved id key.
fn decode_document(doc: &Value) -> Document {
    let mut fields: Document = doc
        .get("fields")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(name, value)| (name.clone(), decode_value(value)))
                .collect()
        })
        .unwrap_or_default();

    // Document id is the last segment of the resource name.
    if let Some(id) = doc
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
    {
        fields.insert(DOC_ID_KEY.to_string(), DocValue::Text(id.to_string()));
    }
    fields
}

/// Decode a Firestore typed value wrapper into a [`DocValue`].
fn decode_value(value: &Value) -> DocValue {
    let Some(obj) = value.as_object() else {
        return DocValue::Null;
    };
    if let Some(s) = obj.get("stringValue").and_then(Value::as_str) {
        return DocValue::Text(s.to_string());
    }
    if let Some(raw) = obj.get("integerValue").and_then(Value::as_str) {
        // integers travel as strings on the wire
        return raw.parse().map(DocValue::Integer).unwrap_or(DocValue::Null);
    }
    if let Some(n) = obj.get("doubleValue").and_then(Value::as_f64) {
        return DocValue::Double(n);
    }
    if let Some(b) = obj.get("booleanValue").and_then(Value::as_bool) {
        return DocValue::Bool(b);
    }
    if let Some(raw) = obj.get("timestampValue").and_then(Value::as_str) {
        return decode_timestamp(raw);
    }
    if let Some(point) = obj.get("geoPointValue").and_then(Value::as_object) {
        return DocValue::GeoPoint {
            latitude: point.get("latitude").and_then(Value::as_f64).unwrap_or(0.0),
            longitude: point
                .get("longitude")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        };
    }
    if let Some(values) = obj
        .get("arrayValue")
        .and_then(|a| a.get("values"))
        .and_then(Value::as_array)
    {
        return DocValue::Array(values.iter().map(decode_value).collect());
    }
    if let Some(fields) = obj
        .get("mapValue")
        .and_then(|m| m.get("fields"))
        .and_then(Value::as_object)
    {
        return DocValue::Map(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), decode_value(value)))
                .collect(),
        );
    }
    // nullValue or an unknown wrapper
    DocValue::Null
}

/// Convert a zone-aware timestamp to naive local wall-clock; strings that do
/// not parse as RFC 3339 pass through as text.
fn decode_timestamp(raw: &str) -> DocValue {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => DocValue::Timestamp(dt.with_timezone(&LOCAL_TZ).naive_local()),
        Err(_) => DocValue::Text(raw.to_string()),
    }
}
