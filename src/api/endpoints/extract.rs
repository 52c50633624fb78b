//! Upload and extract endpoint: `POST /api/extract`.
//!
//! Receives one or more `files` parts, builds the upload list, runs one
//! merge over it and returns the extracted record with per-document status.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ExtractResponse};
use crate::models::{DocumentStatus, UploadList, UploadedDocument};
use crate::pipeline::merge::MergeEngine;

/// Multipart field name carrying document files.
const FILES_FIELD: &str = "files";

pub async fn extract(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mut uploads = UploadList::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            tracing::debug!(name = ?field.name(), "Ignoring multipart field");
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        uploads.add(UploadedDocument::from_upload(&file_name, bytes.to_vec())?);
    }

    if uploads.is_empty() {
        return Err(ApiError::NoDocuments);
    }

    uploads
        .set_all(DocumentStatus::Uploading, DocumentStatus::Processing)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let engine = MergeEngine::new(ctx.extractor.clone());
    let outcome = engine.merge(uploads.documents()).await?;

    let ids: Vec<_> = uploads.documents().iter().map(|d| d.id).collect();
    for id in ids {
        let status = if outcome.document_succeeded(id) {
            DocumentStatus::Completed
        } else {
            DocumentStatus::Error
        };
        uploads
            .set_status(id, status)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    Ok(Json(ExtractResponse {
        status: outcome.status,
        working: outcome.extracted.clone(),
        extracted: outcome.extracted,
        documents: uploads.documents().to_vec(),
        attempts: outcome.attempts,
        fallback_used: outcome.fallback_used,
    }))
}
