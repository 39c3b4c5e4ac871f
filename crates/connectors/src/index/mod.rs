use crate::error::IndexStoreError;
use async_trait::async_trait;
use model::index::{document::IndexDocument, state::IndexedState, update::UpdatePayload};
use std::collections::HashMap;

pub mod query;
pub mod solr;

/// Write and lookup access to the search index.
///
/// Implementations backed by blocking clients must run their calls on a
/// blocking worker so they never stall the async runtime.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Returns the minimal state of every id found in the index. Ids that
    /// are not indexed are simply absent from the map.
    async fn fetch_minimal_by_ids(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, IndexedState>, IndexStoreError>;

    /// Inserts or replaces whole documents and commits before returning.
    async fn upsert_many(&self, docs: Vec<IndexDocument>) -> Result<(), IndexStoreError>;

    /// Applies partial set-style updates.
    async fn atomic_update_many(&self, payloads: Vec<UpdatePayload>)
    -> Result<(), IndexStoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<IndexedState>, IndexStoreError>;
}
