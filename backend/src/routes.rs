use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use rocket::fs::NamedFile;
use rocket::http::{ContentType, Status};
use rocket::response::status::Created;
use rocket::serde::json::{self, Json};
use rocket::{Responder, State, delete, get, post, put};
use serde::Serialize;
use shared::models::*;
use tracing::{instrument, warn};
use crate::{
    config::MissingVote,
    error::ApiError,
    metrics::Metrics,
    store::{Store, StoreError},
    utils::{parse_vote_id, unix_millis},
};

pub struct AppState {
    pub store: Store,
    pub metrics: Arc<Metrics>,
    pub missing_vote: MissingVote,
}

impl AppState {
    pub fn new(store: Store, metrics: Arc<Metrics>, missing_vote: MissingVote) -> Self {
        Self { store, metrics, missing_vote }
    }

    pub async fn refresh_gauges(&self) {
        self.metrics.set_votes_stored(self.store.len().await);
    }

    fn reject(&self, err: StoreError) -> ApiError {
        if matches!(err, StoreError::Persistence(_)) {
            self.metrics.record_save_failure();
        }
        ApiError::from(err)
    }
}

/// Directory the browser UI is served from.
pub struct StaticDir(pub PathBuf);

/// Answer for a lookup by id.
#[derive(Responder)]
pub enum VoteLookup {
    Found(Json<VoteRecord>),
    Empty(Json<EmptyObject>),
}

/// Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct EmptyObject {}

fn body<T>(data: Result<Json<T>, json::Error<'_>>) -> Result<T, ApiError> {
    match data {
        Ok(Json(value)) => Ok(value),
        Err(json::Error::Io(e)) => Err(ApiError::BadRequest(format!("Failed to read request body: {}", e))),
        Err(json::Error::Parse(_, e)) => Err(ApiError::BadRequest(format!("Invalid JSON body: {}", e))),
    }
}

#[get("/")]
pub fn index() -> Json<ApiInfo> {
    let endpoints = [
        ("GET /", "API information"),
        ("GET /votes", "Get all votes"),
        ("GET /votes/:id", "Get vote by ID"),
        ("POST /votes", "Create a new vote (requires: title, content)"),
        ("PUT /votes/:id", "Update a vote"),
        ("DELETE /votes/:id", "Delete a vote"),
        ("GET /health", "Health check"),
        ("GET /metrics", "Prometheus metrics"),
        ("GET /ui", "Browser UI"),
    ];

    Json(ApiInfo {
        message: "Voting System API".into(),
        endpoints: endpoints
            .into_iter()
            .map(|(route, about)| (route.to_string(), about.to_string()))
            .collect::<BTreeMap<_, _>>(),
    })
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".into(),
        timestamp: unix_millis(),
    })
}

#[get("/metrics")]
pub fn prometheus_metrics(state: &State<AppState>) -> Result<(ContentType, String), ApiError> {
    state.metrics.sample_process();
    let text = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(format!("metrics encoding failed: {}", e)))?;

    let content_type = ContentType::new("application", "openmetrics-text")
        .with_params([("version", "1.0.0"), ("charset", "utf-8")]);
    Ok((content_type, text))
}

#[get("/votes")]
pub async fn list_votes(state: &State<AppState>) -> Json<Vec<VoteRecord>> {
    Json(state.store.list().await)
}

#[instrument(skip(state, request))]
#[post("/votes", data = "<request>")]
pub async fn create_vote(
    state: &State<AppState>,
    request: Result<Json<CreateVoteRequest>, json::Error<'_>>,
) -> Result<Created<Json<VoteRecord>>, ApiError> {
    let request = body(request)?;

    let vote = match state.store.create(&request).await {
        Ok(vote) => vote,
        Err(e) => return Err(state.reject(e)),
    };
    state.refresh_gauges().await;

    Ok(Created::new(format!("/votes/{}", vote.id)).body(Json(vote)))
}

#[get("/votes/<id>")]
pub async fn get_vote(state: &State<AppState>, id: &str) -> Result<VoteLookup, ApiError> {
    let found = match parse_vote_id(id) {
        Some(id) => state.store.get(id).await,
        None => None,
    };

    match (found, state.missing_vote) {
        (Some(vote), _) => Ok(VoteLookup::Found(Json(vote))),
        (None, MissingVote::Empty) => Ok(VoteLookup::Empty(Json(EmptyObject {}))),
        (None, MissingVote::NotFound) => Err(ApiError::NotFound),
    }
}

#[instrument(skip(state, request))]
#[put("/votes/<id>", data = "<request>")]
pub async fn update_vote(
    state: &State<AppState>,
    id: &str,
    request: Result<Json<UpdateVoteRequest>, json::Error<'_>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = body(request)?;
    let Some(id) = parse_vote_id(id) else {
        return Err(ApiError::NotFound);
    };

    if let Err(e) = state.store.update(id, &request).await {
        return Err(state.reject(e));
    }

    Ok(Json(MessageResponse::new("Vote updated")))
}

#[instrument(skip(state))]
#[delete("/votes/<id>")]
pub async fn delete_vote(state: &State<AppState>, id: &str) -> Result<Json<MessageResponse>, ApiError> {
    let Some(id) = parse_vote_id(id) else {
        return Err(ApiError::NotFound);
    };

    if let Err(e) = state.store.delete(id).await {
        return Err(state.reject(e));
    }
    state.refresh_gauges().await;

    Ok(Json(MessageResponse::new("Vote deleted")))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

/// Serves the built UI; unknown paths get `index.html` so client-side
/// routes survive a reload.
#[get("/ui/<path..>")]
pub async fn ui(path: PathBuf, static_dir: &State<StaticDir>) -> Option<NamedFile> {
    let file_path = static_dir.0.join(&path);
    if file_path.is_file() {
        return NamedFile::open(&file_path).await.ok();
    }

    let index = static_dir.0.join("index.html");
    match NamedFile::open(&index).await {
        Ok(file) => Some(file),
        Err(e) => {
            warn!(path = %index.display(), "UI not available: {}", e);
            None
        }
    }
}
