mod sets;

use serde::Serialize;

pub use sets::{CreateSetForm, CreatedSetResponse, ResolvedVideoResponse, ValidationFailedResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}
