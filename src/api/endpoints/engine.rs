//! OCR engine endpoint: `POST /extract-document`.
//!
//! One image in, one `{success, data, error}` envelope out. Limit errors keep
//! their status (429/402); every other failure answers 500.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use base64::Engine;

use crate::api::types::ApiContext;
use crate::models::document::MIME_JPEG;
use crate::pipeline::extraction::{ExtractionEnvelope, ExtractionRequest};

pub async fn extract(
    State(ctx): State<ApiContext>,
    Json(request): Json<ExtractionRequest>,
) -> (StatusCode, Json<ExtractionEnvelope>) {
    let image = match decode_image(&request.image_base64) {
        Ok(image) => image,
        Err(detail) => {
            tracing::warn!(detail = %detail, "Rejected undecodable image payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ExtractionEnvelope {
                    success: false,
                    data: None,
                    error: Some(format!("Invalid image data: {detail}")),
                }),
            );
        }
    };

    let class = request.document_class();
    let mime_type = request.mime_type.as_deref().unwrap_or(MIME_JPEG);

    tracing::info!(
        document_type = %request.document_type,
        mode = request.extraction_mode.as_str(),
        image_size = image.len(),
        "Extract-document request"
    );

    match ctx
        .extractor
        .extract(&image, class, mime_type, request.extraction_mode)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(ExtractionEnvelope::ok(record))),
        Err(e) => {
            tracing::warn!(error = %e, "Extract-document failed");
            let status =
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ExtractionEnvelope::failed(&e)))
        }
    }
}

/// Decode raw base64 or a `data:` URL. An empty payload decodes to no bytes,
/// which the extractor reports as a missing image.
fn decode_image(payload: &str) -> Result<Vec<u8>, String> {
    let data = match payload.find(',') {
        Some(idx) if payload.starts_with("data:") => &payload[idx + 1..],
        _ => payload,
    };
    let data = data.trim();
    if data.is_empty() {
        return Ok(Vec::new());
    }
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| format!("Base64 decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_raw_and_data_url() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_image("data:image/png;base64,aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn empty_payload_is_empty_image() {
        assert!(decode_image("").unwrap().is_empty());
        assert!(decode_image("data:image/png;base64,").unwrap().is_empty());
    }

    #[test]
    fn invalid_base64_rejected() {
        assert!(decode_image("not-valid-base64!!!").is_err());
    }
}
