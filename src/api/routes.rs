use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::config::{Config, DEFAULT_SAMPLE_COUNT};
use crate::db::store::MatchStore;
use crate::error::AppError;
use crate::export;
use crate::fetcher::{self, FetchParams};
use crate::types::{FilterCriteria, MatchPatch, MatchRecord};

#[derive(Clone)]
pub struct ApiState {
    pub store: MatchStore,
    pub cfg: Config,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/matches", get(list_matches))
        .route("/matches/export.csv", get(export_csv))
        .route(
            "/matches/:id",
            get(get_match).patch(update_match).delete(delete_match),
        )
        .route("/teams", get(list_teams))
        .route("/leagues", get(list_leagues))
        .route("/fetch", post(trigger_fetch))
        .route("/sample", post(load_sample))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct FetchResponse {
    pub api_total: usize,
    pub normalized: usize,
    pub inserted: usize,
}

#[derive(Deserialize)]
pub struct SampleBody {
    #[serde(default = "default_sample_count")]
    pub count: usize,
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

#[derive(Serialize)]
pub struct SampleResponse {
    pub inserted: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_matches(
    State(state): State<ApiState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    Ok(Json(state.store.find(&criteria).await?))
}

async fn get_match(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MatchRecord>, AppError> {
    Ok(Json(state.store.find_by_id(&id).await?))
}

async fn update_match(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(patch): Json<MatchPatch>,
) -> Result<StatusCode, AppError> {
    state.store.update(&id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_match(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_teams(State(state): State<ApiState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.store.distinct_teams().await?))
}

async fn list_leagues(State(state): State<ApiState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.store.distinct_leagues().await?))
}

/// Same record set the list endpoint returns, serialized as CSV. Filters
/// apply identically so the export matches what the dashboard shows.
async fn export_csv(
    State(state): State<ApiState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<impl IntoResponse, AppError> {
    let records = state.store.find(&criteria).await?;
    let body = export::to_csv(&records);
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    ))
}

/// Pull fixtures from API-Football and persist them. Fails fast with a
/// configuration error when no API key is set.
async fn trigger_fetch(
    State(state): State<ApiState>,
    Json(params): Json<FetchParams>,
) -> Result<Json<FetchResponse>, AppError> {
    let (matches, stats) = fetcher::fetch_fixtures(&state.cfg, &params).await?;
    let inserted = state.store.insert_many(&matches).await?;
    Ok(Json(FetchResponse {
        api_total: stats.api_total,
        normalized: stats.normalized,
        inserted,
    }))
}

/// Insert generated sample matches so the dashboard has data without an
/// API key.
async fn load_sample(
    State(state): State<ApiState>,
    Json(body): Json<SampleBody>,
) -> Result<Json<SampleResponse>, AppError> {
    let matches = fetcher::sample_matches(body.count);
    let inserted = state.store.insert_many(&matches).await?;
    Ok(Json(SampleResponse { inserted }))
}
