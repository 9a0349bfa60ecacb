use crate::model::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fiftyfifty_core::StorageError;
use fiftyfifty_service::ServiceError;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    NotFound,
    Service(ServiceError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "video set not found"),
            AppError::Service(ServiceError::Validation(errors)) => {
                let body = serde_json::json!({ "errors": errors.messages() });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            AppError::Service(ServiceError::Conflict(id)) => {
                warn!(set_id = %id, "rejecting create after id collision");
                (StatusCode::CONFLICT, "video set id collision, please retry")
            }
            AppError::Service(ServiceError::Storage(
                err @ (StorageError::Unavailable(_) | StorageError::Timeout(_)),
            )) => {
                error!(error = %err, "storage unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "service temporarily unavailable")
            }
            AppError::Service(err) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
