use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::categories::option_sets;
use super::client::PredictionTransport;
use super::profile::ApplicantForm;
use super::ScoringService;
use crate::error::AppError;
use crate::workflows::history::months_between;

/// Date pair typed into the history calculator.
#[derive(Debug, Deserialize)]
pub struct HistoryLengthRequest {
    pub start: String,
    pub end: String,
}

/// Router builder exposing the form options, the history calculator, and submission.
pub fn scoring_router<T>(service: Arc<ScoringService<T>>) -> Router
where
    T: PredictionTransport + 'static,
{
    Router::new()
        .route("/api/v1/options", get(options_handler))
        .route("/api/v1/history-length", post(history_length_handler))
        .route("/api/v1/predictions", post(prediction_handler::<T>))
        .with_state(service)
}

pub(crate) async fn options_handler() -> Response {
    (StatusCode::OK, Json(option_sets())).into_response()
}

pub(crate) async fn history_length_handler(
    Json(request): Json<HistoryLengthRequest>,
) -> Result<Json<Value>, AppError> {
    let length = months_between(&request.start, &request.end)?;
    Ok(Json(json!({
        "months": length.months,
        "message": length.advisory(),
    })))
}

pub(crate) async fn prediction_handler<T>(
    State(service): State<Arc<ScoringService<T>>>,
    Json(form): Json<ApplicantForm>,
) -> Result<Json<Value>, AppError>
where
    T: PredictionTransport + 'static,
{
    let result = service.submit(form).await?;

    Ok(Json(json!({
        "card": result.card(),
        "prediction": result,
    })))
}
