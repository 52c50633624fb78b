//! Review submit: `POST /api/submit`.

use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{SubmitRequest, SubmitResponse};
use crate::form::FormState;

/// Validate the working record and return its canonical form.
pub async fn submit(Json(request): Json<SubmitRequest>) -> Result<Json<SubmitResponse>, ApiError> {
    let mut form = FormState::with_working(request.extracted, request.working);
    let record = form.submit().map_err(ApiError::Validation)?;
    Ok(Json(SubmitResponse { record }))
}
