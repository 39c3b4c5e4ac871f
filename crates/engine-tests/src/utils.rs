use async_trait::async_trait;
use connectors::{
    error::{IndexStoreError, SourceError},
    index::IndexStore,
    source::TenderSource,
};
use engine_core::context::SyncContext;
use model::{
    index::{document::IndexDocument, state::IndexedState, update::UpdatePayload},
    tender::{
        category::Category,
        detail::{Buyer, ItemList, Tender, TenderDates},
        summary::TenderSummary,
    },
};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

pub fn summary(id: &str, status_code: i64) -> TenderSummary {
    TenderSummary::new(id, status_code)
}

pub fn tender(id: &str, status_code: i64) -> Tender {
    Tender {
        id: id.to_string(),
        name: format!("Tender {id}"),
        status_code,
        status: String::new(),
        description: String::new(),
        buyer: Buyer {
            organization_name: "Municipalidad de Valdivia".to_string(),
            region: "Región de Los Ríos".to_string(),
            ..Buyer::default()
        },
        dates: TenderDates {
            closing: Some("2026-02-16T15:00:00".to_string()),
            ..TenderDates::default()
        },
        items: ItemList::default(),
        currency: None,
        estimated_amount: Some(1_500_000.0),
        complaints_count: 0,
        tender_type: "LE".to_string(),
    }
}

/// In-memory catalog. Every detail request is recorded.
#[derive(Default)]
pub struct FakeSource {
    listings: Mutex<HashMap<Category, Vec<TenderSummary>>>,
    details: Mutex<HashMap<String, Tender>>,
    failing: Mutex<HashSet<Category>>,
    pub detail_calls: Mutex<Vec<String>>,
    pub listing_calls: Mutex<Vec<Category>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists `summaries` under `category` and serves a matching detail for each.
    pub fn with_listing(self, category: Category, summaries: Vec<TenderSummary>) -> Self {
        {
            let mut details = self.details.lock().unwrap();
            for s in &summaries {
                details.insert(s.id.clone(), tender(&s.id, s.status_code));
            }
        }
        self.listings.lock().unwrap().insert(category, summaries);
        self
    }

    pub fn without_detail(self, id: &str) -> Self {
        self.details.lock().unwrap().remove(id);
        self
    }

    pub fn failing(self, category: Category) -> Self {
        self.failing.lock().unwrap().insert(category);
        self
    }

    pub fn set_listing(&self, category: Category, summaries: Vec<TenderSummary>) {
        self.listings.lock().unwrap().insert(category, summaries);
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TenderSource for FakeSource {
    async fn fetch_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<TenderSummary>, SourceError> {
        self.listing_calls.lock().unwrap().push(category);

        if self.failing.lock().unwrap().contains(&category) {
            return Err(SourceError::Status {
                endpoint: "licitaciones.json".to_string(),
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_detail(&self, id: &str) -> Result<Option<Tender>, SourceError> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        Ok(self.details.lock().unwrap().get(id).cloned())
    }
}

/// In-memory index that records the size of every call it receives.
/// Upsert and update calls can be made to fail by their 1-based position.
#[derive(Default)]
pub struct FakeIndex {
    docs: Mutex<HashMap<String, IndexedState>>,
    pub lookup_calls: Mutex<Vec<usize>>,
    pub upsert_calls: Mutex<Vec<usize>>,
    pub update_calls: Mutex<Vec<Vec<UpdatePayload>>>,
    fail_upserts: Mutex<HashSet<usize>>,
    fail_updates: Mutex<HashSet<usize>>,
    fail_lookups: Mutex<bool>,
}

impl FakeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indexed(self, pairs: &[(&str, i64)]) -> Self {
        {
            let mut docs = self.docs.lock().unwrap();
            for (id, code) in pairs {
                docs.insert(id.to_string(), IndexedState::new(*id, *code));
            }
        }
        self
    }

    pub fn failing_upsert(self, call: usize) -> Self {
        self.fail_upserts.lock().unwrap().insert(call);
        self
    }

    pub fn failing_update(self, call: usize) -> Self {
        self.fail_updates.lock().unwrap().insert(call);
        self
    }

    pub fn failing_lookups(self) -> Self {
        *self.fail_lookups.lock().unwrap() = true;
        self
    }

    pub fn status_of(&self, id: &str) -> Option<i64> {
        self.docs.lock().unwrap().get(id).map(|s| s.status_code)
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn lookup_sizes(&self) -> Vec<usize> {
        self.lookup_calls.lock().unwrap().clone()
    }

    pub fn upsert_sizes(&self) -> Vec<usize> {
        self.upsert_calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<Vec<UpdatePayload>> {
        self.update_calls.lock().unwrap().clone()
    }
}

fn rejected(operation: &'static str) -> IndexStoreError {
    IndexStoreError::Status {
        operation,
        status: 500,
        body: "solr unavailable".to_string(),
    }
}

#[async_trait]
impl IndexStore for FakeIndex {
    async fn fetch_minimal_by_ids(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, IndexedState>, IndexStoreError> {
        self.lookup_calls.lock().unwrap().push(ids.len());
        if *self.fail_lookups.lock().unwrap() {
            return Err(rejected("fetch_minimal_by_ids"));
        }

        let docs = self.docs.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| docs.get(id).map(|s| (id.clone(), s.clone())))
            .collect())
    }

    async fn upsert_many(&self, batch: Vec<IndexDocument>) -> Result<(), IndexStoreError> {
        let call = {
            let mut calls = self.upsert_calls.lock().unwrap();
            calls.push(batch.len());
            calls.len()
        };
        if self.fail_upserts.lock().unwrap().contains(&call) {
            return Err(rejected("upsert_many"));
        }

        let mut docs = self.docs.lock().unwrap();
        for doc in batch {
            let mut state = IndexedState::new(doc.id.clone(), doc.status_code);
            state.closing_date = doc.closing_date.clone();
            docs.insert(doc.id, state);
        }
        Ok(())
    }

    async fn atomic_update_many(
        &self,
        payloads: Vec<UpdatePayload>,
    ) -> Result<(), IndexStoreError> {
        let call = {
            let mut calls = self.update_calls.lock().unwrap();
            calls.push(payloads.clone());
            calls.len()
        };
        if self.fail_updates.lock().unwrap().contains(&call) {
            return Err(rejected("atomic_update_many"));
        }

        let mut docs = self.docs.lock().unwrap();
        for payload in payloads {
            if let Some(state) = docs.get_mut(&payload.id) {
                state.status_code = payload.status_code.set;
            }
        }
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<IndexedState>, IndexStoreError> {
        Ok(self.docs.lock().unwrap().get(id).cloned())
    }
}

pub fn context(source: &Arc<FakeSource>, index: &Arc<FakeIndex>) -> SyncContext {
    SyncContext::new(source.clone(), index.clone())
}
