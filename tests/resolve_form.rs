//! End-to-end tests for the converter form.

use axum::http::{header, StatusCode};

mod common;

use common::{
    app, canonical_url, encode, form_request, get_request, send, BASE_URL, SAME_SITE_ID,
    SOLUTION_ID,
};

#[tokio::test]
async fn test_form_renders() {
    let (status, _, body) = send(app(), get_request("/resolve")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("RDF entity ID or a URL"));
    assert!(body.contains("name=\"rdf_entity_id\""));
    assert!(body.contains("value=\"Go!\""));
}

#[tokio::test]
async fn test_known_identifier_redirects_to_canonical_page() {
    let (status, headers, _) = send(app(), form_request(SOLUTION_ID)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        canonical_url(SOLUTION_ID)
    );
}

#[tokio::test]
async fn test_bare_identifier_redirects() {
    let (status, headers, _) = send(app(), form_request("abc123")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        headers.get(header::LOCATION).unwrap().to_str().unwrap(),
        canonical_url("abc123")
    );
}

#[tokio::test]
async fn test_entity_url_displays_identifier() {
    let (status, _, body) = send(app(), form_request(&canonical_url(SOLUTION_ID))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("<pre class=\"rdf-entity-id\">{}</pre>", SOLUTION_ID)));
}

#[tokio::test]
async fn test_relative_path_with_noise_displays_identifier() {
    let input = format!("  /rdf_entity/{}/edit/  ", encode(SOLUTION_ID));
    let (status, _, body) = send(app(), form_request(&input)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(SOLUTION_ID));
}

#[tokio::test]
async fn test_unknown_foreign_url_is_field_error() {
    let (status, _, body) = send(app(), form_request("http://example.org/some/random/path")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Not a valid RDF ID: http://example.org/some/random/path."));
    // The input is preserved in the field.
    assert!(body.contains("value=\"http://example.org/some/random/path\""));
}

#[tokio::test]
async fn test_same_host_unrouted_url_is_field_error() {
    let input = format!("{}/does/not/exist", BASE_URL);
    let (status, _, body) = send(app(), form_request(&input)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("is neither a valid RDF entity ID, nor a RDF entity URL."));
}

#[tokio::test]
async fn test_same_host_known_identifier_is_not_looked_up() {
    let (status, _, body) = send(app(), form_request(SAME_SITE_ID)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains(&format!(
        "The entered value ({}) is neither a valid RDF entity ID, nor a RDF entity URL.",
        SAME_SITE_ID
    )));
}

#[tokio::test]
async fn test_routed_path_without_entity_is_field_error() {
    let (status, _, body) = send(app(), form_request("/node/12")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("(/node/12)"));
}

#[tokio::test]
async fn test_error_message_is_escaped() {
    let (status, _, body) = send(app(), form_request("<b>bold</b>")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!body.contains("<b>bold</b>"));
    assert!(body.contains("&lt;b&gt;bold&lt;/b&gt;"));
}

#[tokio::test]
async fn test_request_id_is_assigned_and_echoed() {
    let (_, headers, _) = send(app(), get_request("/health")).await;
    assert!(headers.get("x-request-id").is_some());

    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "test-req-1")
        .body(axum::body::Body::empty())
        .unwrap();
    let (_, headers, _) = send(app(), request).await;
    assert_eq!(headers.get("x-request-id").unwrap(), "test-req-1");
}
