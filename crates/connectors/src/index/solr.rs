use crate::{
    config::SolrConfig,
    error::{IndexStoreError, truncate_body},
    index::{IndexStore, query::ids_query},
};
use async_trait::async_trait;
use model::index::{
    document::IndexDocument,
    state::{IndexedState, MINIMAL_FIELDS},
    update::UpdatePayload,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

/// Soft commit window for atomic updates, in milliseconds.
const UPDATE_COMMIT_WITHIN_MS: &str = "1000";

/// Solr-backed index store.
///
/// Uses the blocking HTTP client; every call is moved to tokio's blocking
/// pool through [`SolrIndexStore::offload`].
#[derive(Clone)]
pub struct SolrIndexStore {
    inner: Arc<SolrHttp>,
}

struct SolrHttp {
    http: Client,
    core_url: String,
    credentials: Option<(String, String)>,
}

impl SolrIndexStore {
    /// Builds the blocking client on the blocking pool, since it owns an
    /// internal runtime that can't be created from async code.
    pub async fn connect(config: SolrConfig) -> Result<Self, IndexStoreError> {
        let timeout = config.timeout;
        let http = tokio::task::spawn_blocking(move || Client::builder().timeout(timeout).build())
            .await
            .map_err(|e| IndexStoreError::Worker {
                operation: "connect",
                message: e.to_string(),
            })?
            .map_err(|e| IndexStoreError::Config(e.to_string()))?;

        let credentials = config.credentials();
        info!(
            core_url = %config.core_url(),
            auth = credentials.is_some(),
            "Solr index store initialized"
        );

        Ok(Self {
            inner: Arc::new(SolrHttp {
                http,
                core_url: config.core_url(),
                credentials,
            }),
        })
    }

    async fn offload<T, F>(&self, operation: &'static str, call: F) -> Result<T, IndexStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&SolrHttp) -> Result<T, IndexStoreError> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || call(&inner))
            .await
            .map_err(|e| IndexStoreError::Worker {
                operation,
                message: e.to_string(),
            })?
    }
}

impl SolrHttp {
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((user, pass)) => builder.basic_auth(user, Some(pass)),
            None => builder,
        }
    }

    fn send(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<Response, IndexStoreError> {
        let response = self
            .authorized(builder)
            .send()
            .map_err(|e| IndexStoreError::Network {
                operation,
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = truncate_body(response.text().unwrap_or_default());
            return Err(IndexStoreError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn send_json(&self, operation: &'static str, builder: RequestBuilder) -> Result<Value, IndexStoreError> {
        self.send(operation, builder)?
            .json::<Value>()
            .map_err(|e| IndexStoreError::Decode {
                operation,
                message: e.to_string(),
            })
    }

    fn post_update<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<(), IndexStoreError> {
        let builder = self
            .http
            .post(format!("{}/update", self.core_url))
            .query(params)
            .json(body);
        self.send(operation, builder).map(|_| ())
    }

    fn select_minimal(&self, ids: &[String]) -> Result<HashMap<String, IndexedState>, IndexStoreError> {
        const OP: &str = "fetch_minimal_by_ids";

        let rows = ids.len().to_string();
        let query = ids_query(ids);
        let params = [
            ("q", query.as_str()),
            ("fl", MINIMAL_FIELDS),
            ("rows", rows.as_str()),
            ("wt", "json"),
        ];

        let builder = self
            .http
            .post(format!("{}/select", self.core_url))
            .form(&params);
        let body = self.send_json(OP, builder)?;

        let docs = body
            .pointer("/response/docs")
            .and_then(Value::as_array)
            .ok_or_else(|| IndexStoreError::Decode {
                operation: OP,
                message: "missing response.docs".to_string(),
            })?;

        Ok(docs
            .iter()
            .filter_map(Value::as_object)
            .filter_map(IndexedState::from_document)
            .map(|state| (state.id.clone(), state))
            .collect())
    }

    fn realtime_get(&self, id: &str) -> Result<Option<IndexedState>, IndexStoreError> {
        const OP: &str = "get_by_id";

        let builder = self
            .http
            .get(format!("{}/get", self.core_url))
            .query(&[("id", id), ("fl", MINIMAL_FIELDS), ("wt", "json")]);
        let body = self.send_json(OP, builder)?;

        Ok(body
            .get("doc")
            .and_then(Value::as_object)
            .and_then(IndexedState::from_document))
    }
}

#[async_trait]
impl IndexStore for SolrIndexStore {
    async fn fetch_minimal_by_ids(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, IndexedState>, IndexStoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids = ids.to_vec();
        debug!(ids = ids.len(), "Looking up indexed state");
        self.offload("fetch_minimal_by_ids", move |solr| solr.select_minimal(&ids))
            .await
    }

    async fn upsert_many(&self, docs: Vec<IndexDocument>) -> Result<(), IndexStoreError> {
        if docs.is_empty() {
            return Ok(());
        }

        debug!(docs = docs.len(), "Upserting documents");
        self.offload("upsert_many", move |solr| {
            solr.post_update("upsert_many", &[("commit", "true")], &docs)
        })
        .await
    }

    async fn atomic_update_many(
        &self,
        payloads: Vec<UpdatePayload>,
    ) -> Result<(), IndexStoreError> {
        if payloads.is_empty() {
            return Ok(());
        }

        debug!(payloads = payloads.len(), "Applying atomic updates");
        self.offload("atomic_update_many", move |solr| {
            solr.post_update(
                "atomic_update_many",
                &[("commitWithin", UPDATE_COMMIT_WITHIN_MS)],
                &payloads,
            )
        })
        .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<IndexedState>, IndexStoreError> {
        let id = id.to_string();
        self.offload("get_by_id", move |solr| solr.realtime_get(&id))
            .await
    }
}
