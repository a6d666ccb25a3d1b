//! Request handlers: health, predict, and the root metadata page.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use profitcast_model::{PredictError, ProfitInput};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::AppState;
use crate::error::ApiError;

/// A successful prediction.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_profit: f64,
    pub confidence: Option<String>,
}

/// Liveness probe. Deliberately ignores artifact state: orchestrators use
/// this to decide whether the process is reachable, not whether it is ready.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "service online" }))
}

/// Service metadata and endpoint listing (Root mount only). `ready` reports
/// whether the artifacts loaded, which `/health` does not.
pub async fn index(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": "Startup Profit Predictor",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": { "health": "/health", "predict": "/predict" },
        "ready": state.predictor.is_some(),
    }))
}

/// Predict profit for one request.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ProfitInput>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Some(predictor) = state.predictor.as_ref() else {
        warn!("predict requested while models are not loaded");
        return Err(ApiError::not_ready());
    };

    let profit = predictor.predict(&input).map_err(|err| {
        match &err {
            PredictError::UnknownState { given, .. } => {
                warn!(state = %given, "prediction rejected")
            }
            PredictError::FeatureMismatch(detail) => {
                error!(%detail, "prediction failed")
            }
        }
        ApiError::from(err)
    })?;

    Ok(Json(PredictionResponse {
        predicted_profit: profit,
        confidence: Some("high".into()),
    }))
}
