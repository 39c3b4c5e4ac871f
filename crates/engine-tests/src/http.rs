#[cfg(test)]
mod tests {
    use connectors::{
        config::{CatalogConfig, SolrConfig},
        error::{IndexStoreError, SourceError},
        index::{IndexStore, solr::SolrIndexStore},
        source::{TenderSource, mercado_publico::MercadoPublicoClient},
    };
    use engine_core::{metrics::Metrics, retry::RetryPolicy};
    use engine_processing::{source::RetryingSource, transform::to_index_document};
    use model::{index::update::UpdatePayload, tender::category::Category};
    use serde_json::json;
    use tracing_test::traced_test;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::utils::tender;

    const TICKET: &str = "F8537A18-6766-4DEF-9E59-426B4FEE2844";

    fn catalog(server: &MockServer) -> MercadoPublicoClient {
        MercadoPublicoClient::new(CatalogConfig::new(server.uri(), TICKET)).unwrap()
    }

    async fn solr(server: &MockServer) -> SolrIndexStore {
        let config = SolrConfig::new(format!("{}/solr", server.uri()), "licitaciones")
            .with_credentials(Some("solr".to_string()), Some("secret".to_string()));
        SolrIndexStore::connect(config).await.unwrap()
    }

    fn listing_body() -> serde_json::Value {
        json!({
            "Cantidad": 2,
            "FechaCreacion": "2026-02-10T08:00:00.000",
            "Version": "v1",
            "Listado": [
                {"CodigoExterno": "1509-5-L126", "Nombre": "Insumos", "CodigoEstado": 5, "FechaCierre": "2026-02-16T15:00:00"},
                {"CodigoExterno": "2732-49-LE25", "Nombre": "Aseo", "CodigoEstado": 6, "FechaCierre": null}
            ]
        })
    }

    // =========================================================================
    // Catalog client
    // =========================================================================

    #[tokio::test]
    async fn catalog_lists_category_with_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/licitaciones.json"))
            .and(query_param("estado", "activas"))
            .and(query_param("ticket", TICKET))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
            .expect(1)
            .mount(&server)
            .await;

        let summaries = catalog(&server)
            .fetch_by_category(Category::Active)
            .await
            .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "1509-5-L126");
        assert_eq!(summaries[1].status_code, 6);
        assert_eq!(summaries[1].closing_date, None);
    }

    #[tokio::test]
    async fn catalog_detail_absent_when_listing_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/licitaciones.json"))
            .and(query_param("codigo", "UNKNOWN"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"Cantidad": 0, "Listado": []})),
            )
            .mount(&server)
            .await;

        let detail = catalog(&server).fetch_detail("UNKNOWN").await.unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn catalog_error_kinds_are_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("estado", "cerrada"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("estado", "publicada"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = catalog(&server);

        let status = client.fetch_by_category(Category::Closed).await.unwrap_err();
        assert!(matches!(status, SourceError::Status { status: 500, .. }));

        let decode = client
            .fetch_by_category(Category::Published)
            .await
            .unwrap_err();
        assert!(matches!(decode, SourceError::UpstreamResponse { .. }));
    }

    #[tokio::test]
    async fn catalog_error_body_with_ok_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/licitaciones.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Codigo": 203,
                "Mensaje": "Ticket no valido."
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = catalog(&server);

        let listing = client.fetch_by_category(Category::Active).await.unwrap_err();
        match listing {
            SourceError::UpstreamResponse { message, .. } => {
                assert!(message.contains("Cantidad"), "unexpected message: {message}")
            }
            other => panic!("expected UpstreamResponse, got {other:?}"),
        }

        let detail = client.fetch_detail("1509-5-L126").await.unwrap_err();
        assert!(matches!(detail, SourceError::UpstreamResponse { .. }));
    }

    #[traced_test]
    #[tokio::test]
    async fn retrying_source_recovers_from_transient_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("estado", "adjudicada"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("estado", "adjudicada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
            .expect(1)
            .mount(&server)
            .await;

        let metrics = Metrics::new();
        let source = RetryingSource::new(catalog(&server), RetryPolicy::immediate(5))
            .with_metrics(metrics.clone());

        let summaries = source.fetch_by_category(Category::Awarded).await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(metrics.snapshot().retry_count, 2);
        assert!(logs_contain("Retryable failure, backing off"));
    }

    #[tokio::test]
    async fn retrying_source_gives_up_after_five_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .expect(5)
            .mount(&server)
            .await;

        let source = RetryingSource::new(catalog(&server), RetryPolicy::immediate(5));
        let err = source.fetch_detail("X").await.unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn retrying_source_does_not_retry_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let source = RetryingSource::new(catalog(&server), RetryPolicy::immediate(5));
        let err = source.fetch_detail("X").await.unwrap_err();

        assert!(matches!(err, SourceError::UpstreamResponse { .. }));
    }

    // =========================================================================
    // Solr adapter
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn solr_minimal_lookup_normalizes_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/solr/licitaciones/select"))
            .and(header("authorization", "Basic c29scjpzZWNyZXQ="))
            .and(body_string_contains("fl=id%2Cstatus_code%2Cclosing_date"))
            .and(body_string_contains("rows=3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseHeader": {"status": 0},
                "response": {"numFound": 2, "docs": [
                    {"id": "A", "status_code": [5], "closing_date": ["2026-02-16T15:00:00Z"]},
                    {"id": "B"}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ids = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let found = solr(&server).await.fetch_minimal_by_ids(&ids).await.unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found["A"].status_code, 5);
        assert_eq!(
            found["A"].closing_date.as_deref(),
            Some("2026-02-16T15:00:00Z")
        );
        assert_eq!(found["B"].status_code, -1);
        assert!(!found.contains_key("C"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn solr_upsert_commits_synchronously() {
        let server = MockServer::start().await;
        let docs = vec![to_index_document(&tender("1509-5-L126", 5))];

        Mock::given(method("POST"))
            .and(path("/solr/licitaciones/update"))
            .and(query_param("commit", "true"))
            .and(body_json(&docs))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responseHeader": {"status": 0}})))
            .expect(1)
            .mount(&server)
            .await;

        solr(&server).await.upsert_many(docs).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn solr_atomic_update_sends_set_payloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/solr/licitaciones/update"))
            .and(query_param("commitWithin", "1000"))
            .and(body_json(json!([{"id": "X", "status_code": {"set": 8}}])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        solr(&server)
            .await
            .atomic_update_many(vec![UpdatePayload::set_status("X", 8)])
            .await
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn solr_get_by_id_handles_missing_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/solr/licitaciones/get"))
            .and(query_param("id", "X"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "doc": {"id": "X", "status_code": 8}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/solr/licitaciones/get"))
            .and(query_param("id", "Y"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"doc": null})))
            .mount(&server)
            .await;

        let store = solr(&server).await;

        let found = store.get_by_id("X").await.unwrap();
        assert_eq!(found.map(|s| s.status_code), Some(8));
        assert!(store.get_by_id("Y").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn solr_error_status_names_the_operation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/solr/licitaciones/update"))
            .respond_with(ResponseTemplate::new(500).set_body_string("core is loading"))
            .mount(&server)
            .await;

        let err = solr(&server)
            .await
            .upsert_many(vec![to_index_document(&tender("Z", 5))])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IndexStoreError::Status {
                operation: "upsert_many",
                status: 500,
                ..
            }
        ));
    }
}
