use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::history::HistoryError;
use crate::workflows::scoring::ScoringError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Server(axum::Error),
    History(HistoryError),
    Scoring(ScoringError),
}

impl AppError {
    /// Message suitable for the person filling the form, when the failure is theirs to fix.
    pub fn user_message(&self) -> Option<String> {
        match self {
            AppError::History(err) => Some(err.user_message().to_string()),
            AppError::Scoring(err) => err.user_message(),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid form data: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::History(err) => write!(f, "history calculator error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::History(err) => Some(err),
            AppError::Scoring(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Json(_) | AppError::History(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Scoring(ScoringError::Profile(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Scoring(ScoringError::Prediction(_)) => StatusCode::BAD_GATEWAY,
            AppError::Scoring(ScoringError::Lookup(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self
            .user_message()
            .unwrap_or_else(|| "internal error".to_string());
        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<HistoryError> for AppError {
    fn from(value: HistoryError) -> Self {
        Self::History(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::scoring::{LookupFailure, PredictionError};

    #[test]
    fn remote_failures_map_to_bad_gateway() {
        let error = AppError::from(ScoringError::from(PredictionError::Remote { status: 500 }));
        assert!(error.user_message().is_some());
        assert_eq!(error.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn lookup_failures_stay_internal() {
        let error = AppError::from(ScoringError::from(LookupFailure {
            field: "tipos_emprestimos",
            label: "Boat Loan".to_string(),
        }));
        assert_eq!(error.user_message(), None);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn history_errors_keep_their_message() {
        let error = AppError::from(HistoryError::Range { months: -3 });
        assert!(error
            .user_message()
            .expect("user facing")
            .contains("posterior"));
    }
}
