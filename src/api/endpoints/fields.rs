//! Keystroke/blur helper: `POST /api/fields/check`.

use axum::Json;

use crate::api::types::{FieldCheckRequest, FieldCheckResponse};
use crate::validation::IdentifierField;

/// Sanitize a value and, for identifier fields, validate it.
pub async fn check(Json(request): Json<FieldCheckRequest>) -> Json<FieldCheckResponse> {
    let identifier = IdentifierField::from_record_field(request.field);

    let sanitized = match identifier {
        Some(identifier) => identifier.sanitize(&request.value),
        None => request.value,
    };

    let validation = identifier
        .filter(|_| !sanitized.is_empty())
        .map(|identifier| identifier.validate(Some(&sanitized)));

    Json(FieldCheckResponse {
        field: request.field,
        sanitized,
        validation,
    })
}
