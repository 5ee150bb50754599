use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Preference, SavedConfiguration, ShopperSignals},
    routes::{now_millis, AppState},
    services::feature_catalog::feature_name,
};

#[derive(Debug, Deserialize)]
pub struct SetPreferenceRequest {
    pub id: String,
    pub name: Option<String>,
    /// Clamped to 0-5
    pub value: i64,
}

#[derive(Debug, Deserialize)]
pub struct RecordBrowsingRequest {
    pub car_id: String,
    pub duration_seconds: u32,
}

#[derive(Debug, Deserialize)]
pub struct SaveConfigurationRequest {
    pub car_id: String,
    pub options: HashMap<String, String>,
}

/// Returns everything recorded about a shopper
pub async fn get_signals(
    State(state): State<Arc<AppState>>,
    Path(shopper_id): Path<String>,
) -> AppResult<Json<ShopperSignals>> {
    let signals = state.signals.get_by_shopper_id(&shopper_id).await?;
    Ok(Json(signals))
}

/// Creates or updates one feature preference
pub async fn set_preference(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(shopper_id): Path<String>,
    Json(request): Json<SetPreferenceRequest>,
) -> AppResult<Json<Preference>> {
    if request.id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Preference id cannot be empty".to_string(),
        ));
    }

    let name = request
        .name
        .or_else(|| feature_name(&request.id).map(str::to_string))
        .unwrap_or_else(|| request.id.clone());
    let preference = Preference::new(request.id, name, request.value);

    tracing::info!(
        request_id = %request_id,
        shopper_id = %shopper_id,
        feature = %preference.id,
        value = preference.value,
        "Setting preference"
    );

    state
        .recorder
        .set_preference(&shopper_id, preference.clone())
        .await?;

    Ok(Json(preference))
}

/// Records a visit to a car's page
pub async fn record_browsing(
    State(state): State<Arc<AppState>>,
    Path(shopper_id): Path<String>,
    Json(request): Json<RecordBrowsingRequest>,
) -> AppResult<StatusCode> {
    state
        .recorder
        .record_browsing_event(
            &shopper_id,
            &request.car_id,
            request.duration_seconds,
            now_millis(),
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// Saves a configuration for later
pub async fn save_configuration(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(shopper_id): Path<String>,
    Json(request): Json<SaveConfigurationRequest>,
) -> AppResult<(StatusCode, Json<SavedConfiguration>)> {
    tracing::info!(
        request_id = %request_id,
        shopper_id = %shopper_id,
        car_id = %request.car_id,
        options = request.options.len(),
        "Saving configuration"
    );

    let saved = state
        .recorder
        .save_configuration(&shopper_id, &request.car_id, request.options, now_millis())
        .await?;

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Deletes a saved configuration
pub async fn delete_configuration(
    State(state): State<Arc<AppState>>,
    Path((shopper_id, configuration_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state
        .recorder
        .delete_configuration(&shopper_id, &configuration_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
