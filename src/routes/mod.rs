use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    db::{CatalogRepository, InMemoryStore, SignalRecorder, SignalRepository},
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::RecommendationService,
};

pub mod cars;
pub mod recommendations;
pub mod signals;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommendations: RecommendationService,
    pub catalog: Arc<dyn CatalogRepository>,
    pub signals: Arc<dyn SignalRepository>,
    pub recorder: Arc<dyn SignalRecorder>,
    pub default_car_limit: usize,
}

impl AppState {
    /// State backed by an in-memory store holding the demo catalog
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(InMemoryStore::with_demo_catalog(config.history_window));
        Self::from_store(store, config)
    }

    /// State backed by the given store
    pub fn from_store(store: Arc<InMemoryStore>, config: &Config) -> Self {
        let recommendations = RecommendationService::new(store.clone(), store.clone())
            .with_weights(config.scoring_weights());

        Self {
            recommendations,
            catalog: store.clone(),
            signals: store.clone(),
            recorder: store,
            default_car_limit: config.default_car_limit,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Catalog
        .route("/cars", get(cars::list_cars))
        .route("/cars/:car_id/categories", get(cars::list_categories))
        // Shopper signals
        .route("/shoppers/:shopper_id/signals", get(signals::get_signals))
        .route("/shoppers/:shopper_id/preferences", put(signals::set_preference))
        .route("/shoppers/:shopper_id/history", post(signals::record_browsing))
        .route(
            "/shoppers/:shopper_id/configurations",
            post(signals::save_configuration),
        )
        .route(
            "/shoppers/:shopper_id/configurations/:configuration_id",
            delete(signals::delete_configuration),
        )
        // Recommendations
        .route(
            "/shoppers/:shopper_id/recommendations/cars",
            get(recommendations::recommend_cars),
        )
        .route(
            "/shoppers/:shopper_id/recommendations/cars/:car_id/options",
            get(recommendations::recommend_options),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Rejects non-positive limits before they reach the ranker
pub(crate) fn validate_limit(limit: Option<i64>) -> AppResult<Option<usize>> {
    match limit {
        None => Ok(None),
        Some(n) if n > 0 => Ok(Some(n as usize)),
        Some(n) => Err(AppError::InvalidInput(format!(
            "limit must be a positive integer, got {}",
            n
        ))),
    }
}

/// Current time in epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
