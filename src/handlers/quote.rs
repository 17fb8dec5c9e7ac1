use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::duration::parse_duration;
use crate::error::AppError;
use crate::handlers::AppState;
use crate::pricing::CostModel;
use crate::quote::{Quote, QuoteRequest};

/// Handle /v1/quote endpoint
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<Quote>, AppError> {
    debug!("Quote request from {} input", request.input.source_name());
    let quote = state.service.quote(&request)?;
    Ok(Json(quote))
}

/// Handle /v1/cost-model endpoint
pub async fn get_cost_model(State(state): State<AppState>) -> Json<CostModel> {
    Json(*state.service.cost_model())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DurationRequest {
    pub duration: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DurationResponse {
    pub hours: f64,
}

/// Handle /v1/duration/parse endpoint
pub async fn parse_duration_text(
    Json(request): Json<DurationRequest>,
) -> Result<Json<DurationResponse>, AppError> {
    let hours = parse_duration(&request.duration)?;
    Ok(Json(DurationResponse { hours }))
}
