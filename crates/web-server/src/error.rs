use analytics::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Strategy '{strategy}' not found.")]
    StrategyNotFound {
        strategy: String,
        available: Vec<String>,
    },
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::StrategyNotFound {
                strategy,
                available,
            } => AppError::StrategyNotFound {
                strategy,
                available,
            },
            AnalyticsError::Storage(db_err) => AppError::Database(db_err),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            AppError::StrategyNotFound { available, .. } => {
                let body = Json(json!({
                    "error": message,
                    "available_strategies": available,
                }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                let body = Json(json!({ "error": message }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
