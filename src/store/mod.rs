//! Document store access
//!
//! The export path depends only on the [`DocumentStore`] trait; the concrete
//! Firestore client is built once at startup and injected, which keeps the
//! mapper and writer pure and testable against a stub.

mod firestore;

pub use firestore::FirestoreClient;

use async_trait::async_trait;

use crate::error::ExportResult;
use crate::types::Document;

/// Field every source collection is filtered on.
pub const CAMPAIGN_ID_FIELD: &str = "campanaID";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in `collection` whose campaign-identifier field
    /// equals `campaign_id`, in server order, each carrying its own document
    /// id under the reserved key. An empty result is not an error.
    async fn fetch_by_campaign(
        &self,
        collection: &str,
        campaign_id: &str,
    ) -> ExportResult<Vec<Document>>;
}
