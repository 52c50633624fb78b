//! Client for a deployed `/extract-document` endpoint.
//!
//! Lets one docfill process act as the front end for another that holds
//! the gateway credentials.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;

use super::types::{DocumentExtractor, ExtractionEnvelope, ExtractionRequest};
use super::ExtractionError;
use crate::models::{DocumentClass, ExtractedRecord, ExtractionMode};

pub struct RemoteExtractor {
    client: reqwest::Client,
    url: String,
    timeout_secs: u64,
}

impl RemoteExtractor {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ExtractionError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DocumentExtractor for RemoteExtractor {
    async fn extract(
        &self,
        image: &[u8],
        class: DocumentClass,
        mime_type: &str,
        mode: ExtractionMode,
    ) -> Result<ExtractedRecord, ExtractionError> {
        if image.is_empty() {
            return Err(ExtractionError::MissingImage);
        }

        let request = ExtractionRequest {
            image_base64: base64::engine::general_purpose::STANDARD.encode(image),
            document_type: class.as_str().to_string(),
            mime_type: Some(mime_type.to_string()).filter(|m| !m.is_empty()),
            extraction_mode: mode,
        };

        tracing::debug!(url = %self.url, class = class.as_str(), mode = mode.as_str(), "Remote extraction");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        match status.as_u16() {
            429 => return Err(ExtractionError::RateLimited),
            402 => return Err(ExtractionError::UsageLimit),
            _ => {}
        }

        // Failed extractions still answer with an envelope; keep its message.
        let envelope: ExtractionEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ExtractionError::Http(format!("Invalid extraction response: {e}")));
            }
            Err(_) => return Err(ExtractionError::Gateway { status: status.as_u16() }),
        };

        envelope.into_result().inspect_err(|e| {
            tracing::warn!(status = status.as_u16(), error = %e, "Remote extraction failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_endpoint(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/extract-document")
    }

    fn replying_with(status: StatusCode, body: serde_json::Value) -> Router {
        Router::new().route(
            "/extract-document",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    #[tokio::test]
    async fn forwards_request_fields() {
        let router = Router::new().route(
            "/extract-document",
            post(|Json(req): Json<ExtractionRequest>| async move {
                Json(json!({
                    "success": true,
                    "data": {
                        "name": req.document_type,
                        "state": req.extraction_mode.as_str(),
                        "district": req.mime_type,
                        "address": req.image_base64,
                    }
                }))
            }),
        );
        let extractor = RemoteExtractor::new(spawn_endpoint(router).await, 5).unwrap();

        let record = extractor
            .extract(b"img", DocumentClass::VoterId, "image/png", ExtractionMode::VoterOnly)
            .await
            .unwrap();
        assert_eq!(record.name.as_deref(), Some("voterId"));
        assert_eq!(record.state.as_deref(), Some("voter_only"));
        assert_eq!(record.district.as_deref(), Some("image/png"));
        assert_eq!(record.address.as_deref(), Some("aW1n"));
    }

    #[tokio::test]
    async fn limit_statuses_map_to_typed_errors() {
        let url = spawn_endpoint(replying_with(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "success": false, "error": "Rate limit exceeded." }),
        ))
        .await;
        let err = RemoteExtractor::new(url, 5)
            .unwrap()
            .extract(b"img", DocumentClass::Pan, "image/jpeg", ExtractionMode::Full)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::RateLimited);

        let url = spawn_endpoint(replying_with(
            StatusCode::PAYMENT_REQUIRED,
            json!({ "success": false, "error": "Usage limit reached." }),
        ))
        .await;
        let err = RemoteExtractor::new(url, 5)
            .unwrap()
            .extract(b"img", DocumentClass::Pan, "image/jpeg", ExtractionMode::Full)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::UsageLimit);
    }

    #[tokio::test]
    async fn failed_envelope_keeps_message() {
        let url = spawn_endpoint(replying_with(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "error": "No content in AI response" }),
        ))
        .await;
        let err = RemoteExtractor::new(url, 5)
            .unwrap()
            .extract(b"img", DocumentClass::Other, "image/jpeg", ExtractionMode::Full)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::Rejected("No content in AI response".into()));
    }

    #[tokio::test]
    async fn non_json_error_is_gateway_status() {
        let router = Router::new().route(
            "/extract-document",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let err = RemoteExtractor::new(spawn_endpoint(router).await, 5)
            .unwrap()
            .extract(b"img", DocumentClass::Other, "image/jpeg", ExtractionMode::Full)
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::Gateway { status: 503 });
    }
}
