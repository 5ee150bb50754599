use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{RankedCategory, ScoredCar},
    routes::{now_millis, validate_limit, AppState},
};

#[derive(Debug, Deserialize)]
pub struct CarRecommendationQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OptionRecommendationQuery {
    pub category: Option<String>,
    pub limit: Option<i64>,
}

/// Handler for the recommended cars panel
pub async fn recommend_cars(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(shopper_id): Path<String>,
    Query(params): Query<CarRecommendationQuery>,
) -> AppResult<Json<Vec<ScoredCar>>> {
    let limit = validate_limit(params.limit)?.unwrap_or(state.default_car_limit);

    tracing::info!(
        request_id = %request_id,
        shopper_id = %shopper_id,
        limit = limit,
        "Processing car recommendation request"
    );

    let cars = state
        .recommendations
        .recommend_cars(&shopper_id, limit, now_millis())
        .await?;

    Ok(Json(cars))
}

/// Handler for the recommended options panel of one car
pub async fn recommend_options(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((shopper_id, car_id)): Path<(String, String)>,
    Query(params): Query<OptionRecommendationQuery>,
) -> AppResult<Json<Vec<RankedCategory>>> {
    let limit = validate_limit(params.limit)?;

    tracing::info!(
        request_id = %request_id,
        shopper_id = %shopper_id,
        car_id = %car_id,
        category = ?params.category,
        "Processing option recommendation request"
    );

    let categories = state
        .recommendations
        .recommend_options(&shopper_id, &car_id, params.category.as_deref(), limit)
        .await?;

    Ok(Json(categories))
}
