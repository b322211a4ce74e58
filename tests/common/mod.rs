//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use rdf_uri_resolver::config::{EntityConfig, FacetItemConfig, ResolverConfig, WorkflowConfig};
use rdf_uri_resolver::identifier::{Identifier, IdentifierCodec, UrlSafeCodec};
use rdf_uri_resolver::HttpServer;

pub const BASE_URL: &str = "https://joinup.example.eu";
pub const COLLECTION_ID: &str = "http://data.europa.eu/w21/collection-interop";
pub const SOLUTION_ID: &str = "http://data.europa.eu/w21/solution-adms";
pub const OTHER_COLLECTION_ID: &str = "http://data.europa.eu/w21/collection-semic";
/// A stored identifier that is itself a URL on the site.
pub const SAME_SITE_ID: &str = "https://joinup.example.eu/data/abc";

fn entity(id: &str, bundle: &str, label: &str) -> EntityConfig {
    EntityConfig {
        id: id.to_string(),
        bundle: bundle.to_string(),
        label: label.to_string(),
    }
}

/// Configuration with a few entities, one facet plugin and one workflow.
pub fn test_config() -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.site.base_url = BASE_URL.to_string();
    config.entities = vec![
        entity(COLLECTION_ID, "collection", "Interoperability collection"),
        entity(OTHER_COLLECTION_ID, "collection", "SEMIC collection"),
        entity(SOLUTION_ID, "solution", "ADMS solution"),
        entity("abc123", "solution", "Short id solution"),
        entity(SAME_SITE_ID, "solution", "Same-site solution"),
    ];

    let mut items = std::collections::BTreeMap::new();
    items.insert(
        "solutions".to_string(),
        FacetItemConfig {
            label: "Solutions".to_string(),
            field_name: "entity_bundle".to_string(),
            field_condition: "solution".to_string(),
            field_operator: None,
        },
    );
    config.facets.insert("content_type".to_string(), items);

    let workflow: WorkflowConfig = toml::from_str(
        r#"
        [transitions.validated]
        draft = ["facilitator"]

        [transitions.proposed]
        draft = ["authenticated"]
        "#,
    )
    .expect("workflow fixture parses");
    config.workflow.insert("event".to_string(), workflow);

    config
}

pub fn app() -> Router {
    HttpServer::new(test_config()).expect("fixture config is valid").router()
}

pub fn encode(id: &str) -> String {
    UrlSafeCodec
        .encode(&Identifier::new(id).expect("non-empty id"))
        .as_str()
        .to_string()
}

pub fn canonical_url(id: &str) -> String {
    format!("{}/rdf_entity/{}", BASE_URL, encode(id))
}

pub fn form_request(value: &str) -> Request<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("rdf_entity_id", value)
        .finish();
    Request::builder()
        .method("POST")
        .uri("/resolve")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Drive the router once and collect status, headers and body text.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}
