// Axum API Server Module
//
// Purpose: JSON API over the loaded site catalog. Every page the site renders
// has an endpoint returning its view model; detail views are cached in Moka.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::{ListFilters, NotFoundError, RecordKind, SiteCatalog};
use crate::config::CatalogConfig;
use crate::presentation::{self, NotFoundPage};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteCatalog>,
    pub config: Arc<CatalogConfig>,
    /// Serialized detail views keyed by "{kind}:{slug}"
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    pub fn new(site: SiteCatalog, config: CatalogConfig) -> Self {
        tracing::info!("Initializing Moka cache (capacity {})...", config.cache_capacity);
        let cache = Cache::builder().max_capacity(config.cache_capacity).build();

        Self {
            site: Arc::new(site),
            config: Arc::new(config),
            cache,
        }
    }

    /// Load the catalogs named by `config` and build the state.
    pub fn load(config: CatalogConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading site catalog...");
        let site = SiteCatalog::load_from_dir(&config.data_dir, config.load_policy)?;
        Ok(Self::new(site, config))
    }
}

// ============================================================================
// Router Configuration
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Pages
        .route("/api/home", get(get_home))
        .route("/api/interviews", get(list_interviews))
        .route("/api/interviews/:slug", get(get_interview))
        .route("/api/work", get(list_work))
        .route("/api/work/:slug", get(get_work))
        .route("/api/play", get(list_play))
        .route("/api/play/:slug", get(get_play))

        // Static generation support
        .route("/api/routes", get(get_routes))
        .route("/api/resolve", get(resolve_path))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_home(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let page = presentation::home_page(&state.site, state.config.latest_limit);
    Ok(Json(to_json(&page)?))
}

async fn list_interviews(
    State(state): State<AppState>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<serde_json::Value>, AppError> {
    let start = std::time::Instant::now();
    let page = presentation::list_page(state.site.interviews(), &filters);
    tracing::debug!("Listed {} interviews in {:?}", page.items.len(), start.elapsed());
    Ok(Json(to_json(&page)?))
}

async fn list_work(
    State(state): State<AppState>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<serde_json::Value>, AppError> {
    let start = std::time::Instant::now();
    let page = presentation::list_page(state.site.work(), &filters);
    tracing::debug!("Listed {} work in {:?}", page.items.len(), start.elapsed());
    Ok(Json(to_json(&page)?))
}

async fn list_play(
    State(state): State<AppState>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<serde_json::Value>, AppError> {
    let start = std::time::Instant::now();
    let page = presentation::list_page(state.site.play(), &filters);
    tracing::debug!("Listed {} play in {:?}", page.items.len(), start.elapsed());
    Ok(Json(to_json(&page)?))
}

async fn get_interview(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    cached_detail(&state, RecordKind::Interview, &slug, |site, limit| {
        to_json(&presentation::interview_page(site.interviews(), &slug, limit)?)
    })
    .await
}

async fn get_work(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    cached_detail(&state, RecordKind::Work, &slug, |site, limit| {
        to_json(&presentation::work_page(site.work(), &slug, limit)?)
    })
    .await
}

async fn get_play(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    cached_detail(&state, RecordKind::Play, &slug, |site, limit| {
        to_json(&presentation::play_page(site.play(), &slug, limit)?)
    })
    .await
}

async fn get_routes(State(state): State<AppState>) -> Json<serde_json::Value> {
    let routes = state.site.static_routes();
    Json(serde_json::json!({
        "count": routes.len(),
        "routes": routes,
    }))
}

#[derive(Debug, Deserialize)]
struct ResolveQuery {
    path: String,
}

async fn resolve_path(
    State(state): State<AppState>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let route = state.site.resolve(&params.path).map_err(|e| {
        tracing::warn!("Rejected route {}: {}", params.path, e);
        e
    })?;
    let kind = route.kind();
    Ok(Json(serde_json::json!({
        "route": route,
        "kind": kind,
    })))
}

// ============================================================================
// Helpers
// ============================================================================

/// Serve a detail view from cache, building and caching it on a miss.
/// Not-found results are never cached.
async fn cached_detail<F>(
    state: &AppState,
    kind: RecordKind,
    slug: &str,
    build: F,
) -> Result<Json<serde_json::Value>, AppError>
where
    F: FnOnce(&SiteCatalog, usize) -> Result<serde_json::Value, AppError>,
{
    let cache_key = format!("{}:{}", kind, slug);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return Ok(Json(cached));
    }

    tracing::debug!("Building {} view for {}", kind, slug);
    let view = build(&state.site, state.config.related_limit)?;
    state.cache.insert(cache_key, view.clone()).await;

    Ok(Json(view))
}

fn to_json<T: Serialize>(view: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(view).map_err(|e| AppError::Internal(e.to_string()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(NotFoundError),
    Internal(String),
}

impl From<NotFoundError> for AppError {
    fn from(err: NotFoundError) -> Self {
        AppError::NotFound(err)
    }
}

/// 404 body: the error message plus the not-found page view.
#[derive(Serialize)]
struct NotFoundBody {
    error: String,
    page: NotFoundPage,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(err) => {
                let body = NotFoundBody {
                    error: err.to_string(),
                    page: presentation::not_found_page(&err),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let body = Json(serde_json::json!({
                    "error": msg
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
