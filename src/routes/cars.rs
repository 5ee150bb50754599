use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Car, ConfigCategory},
    routes::AppState,
};

/// Lists the cars in display order
pub async fn list_cars(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Car>>> {
    let cars = state.catalog.list_cars().await?;
    Ok(Json(cars))
}

/// Lists the configuration categories of one car
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Path(car_id): Path<String>,
) -> AppResult<Json<Vec<ConfigCategory>>> {
    let categories = state.catalog.config_categories(&car_id).await?;
    Ok(Json(categories))
}
