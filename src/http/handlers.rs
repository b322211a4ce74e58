//! Request handlers.

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::constraints::SharedInValidator;
use crate::facets::{FacetQuery, FacetSettings, RawFacetResult, SearchQuery};
use crate::http::pages;
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::resolve_with_deadline;
use crate::resolver::{classify, Report, ResolutionOutcome};
use crate::routing::RouteTable;
use crate::workflow::TransitionGuard;

/// Body of the converter form.
#[derive(Debug, Deserialize)]
pub struct ResolveForm {
    #[serde(default)]
    pub rdf_entity_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub input: String,
    #[serde(flatten)]
    pub report: Report,
}

pub async fn form() -> Html<String> {
    Html(pages::form_page("", None))
}

/// Resolve input against the current snapshot and report on it.
async fn resolve_and_report(state: &AppState, headers: &HeaderMap, input: &str) -> Report {
    let start = Instant::now();
    let snapshot = state.snapshot();
    let deadline = Duration::from_millis(snapshot.config.timeouts.resolve_ms);
    let input_kind = classify(input.trim(), snapshot.resolver.site()).label();

    let outcome = resolve_with_deadline(
        snapshot.resolver.clone(),
        input.to_string(),
        deadline,
        state.resolutions.clone(),
    )
    .await;
    metrics::record_resolution(outcome.label(), input_kind, start);

    let request_id = request_id(headers);
    match &outcome {
        ResolutionOutcome::Unresolved(reason) => tracing::info!(
            request_id = %request_id,
            input_kind,
            reason = %reason,
            "Input not resolved"
        ),
        resolved => tracing::info!(
            request_id = %request_id,
            input_kind,
            outcome = resolved.label(),
            "Input resolved"
        ),
    }

    snapshot.reporter.report(input, &outcome)
}

pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ResolveForm>,
) -> Response {
    match resolve_and_report(&state, &headers, &form.rdf_entity_id).await {
        Report::Redirect { location } => Redirect::to(&location).into_response(),
        Report::Display { text } => Html(pages::identifier_page(&text)).into_response(),
        Report::FieldError { message, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::form_page(&form.rdf_entity_id, Some(&message))),
        )
            .into_response(),
    }
}

pub async fn api_resolve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ResolveRequest>,
) -> Json<ResolveResponse> {
    let report = resolve_and_report(&state, &headers, &request.input).await;
    Json(ResolveResponse {
        input: request.input,
        report,
    })
}

/// Canonical entity pages; everything else is a 404.
pub async fn entity_page(State(state): State<AppState>, uri: Uri) -> Response {
    let snapshot = state.snapshot();
    let path = uri.path().trim_matches('/');
    let matched = snapshot.router.match_path(path);

    let entity = matched
        .route
        .as_deref()
        .filter(|route| *route == snapshot.config.site.canonical_route)
        .and_then(|_| matched.param(&snapshot.config.site.entity_parameter))
        .and_then(|raw| snapshot.resolver.codec().decode(raw).ok())
        .and_then(|id| snapshot.store.get(id.as_str()));

    match entity {
        Some(entity) => Html(pages::entity_page(&entity)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response(),
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn facet_query(
    State(state): State<AppState>,
    Json(settings): Json<FacetSettings>,
) -> Response {
    let snapshot = state.snapshot();
    let mut query = SearchQuery::default();
    match FacetQuery::new(&settings, &snapshot.facets).execute(&mut query) {
        Ok(()) => Json(query).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct FacetResultsRequest {
    pub settings: FacetSettings,
    pub results: Vec<RawFacetResult>,
}

pub async fn facet_results(
    State(state): State<AppState>,
    Json(request): Json<FacetResultsRequest>,
) -> Response {
    let snapshot = state.snapshot();
    match FacetQuery::new(&request.settings, &snapshot.facets).build(&request.results) {
        Ok(results) => Json(results).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetsQuery {
    pub from: String,
    /// Comma-separated role list.
    #[serde(default)]
    pub roles: String,
}

pub async fn workflow_targets(
    State(state): State<AppState>,
    Path(bundle): Path<String>,
    Query(query): Query<TargetsQuery>,
) -> Json<Vec<String>> {
    let snapshot = state.snapshot();
    let guard = TransitionGuard::for_bundle(&snapshot.config.workflow, &bundle);
    let roles: Vec<&str> = query
        .roles
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();
    Json(
        guard
            .allowed_targets(&query.from, &roles)
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
pub struct SharedInRequest {
    #[serde(default = "default_shared_in_label")]
    pub field_label: String,
    pub parent: Option<String>,
    pub items: Vec<String>,
}

fn default_shared_in_label() -> String {
    "Shared in".to_string()
}

pub async fn shared_in(
    State(state): State<AppState>,
    Json(request): Json<SharedInRequest>,
) -> Response {
    let snapshot = state.snapshot();
    let unknown = |id: &str| (StatusCode::BAD_REQUEST, format!("Unknown entity: {}", id)).into_response();

    let parent = match request.parent.as_deref() {
        Some(id) => match snapshot.store.get(id) {
            Some(record) => Some(record),
            None => return unknown(id),
        },
        None => None,
    };

    let mut items = Vec::with_capacity(request.items.len());
    for id in &request.items {
        match snapshot.store.get(id) {
            Some(record) => items.push(record),
            None => return unknown(id.as_str()),
        }
    }

    let violations = SharedInValidator::default().validate(&request.field_label, parent.as_ref(), &items);
    Json(violations).into_response()
}
