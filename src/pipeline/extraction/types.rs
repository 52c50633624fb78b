use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ExtractionError;
use crate::models::{DocumentClass, ExtractedRecord, ExtractionMode};

/// The one capability the merge engine needs: read fields off an image.
///
/// Each call is attempted at most once. Timeouts belong to the transport
/// and surface as errors like any other failure.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(
        &self,
        image: &[u8],
        class: DocumentClass,
        mime_type: &str,
        mode: ExtractionMode,
    ) -> Result<ExtractedRecord, ExtractionError>;
}

/// Body of `POST /extract-document`.
///
/// `documentType` stays a free string on the wire; unknown values are
/// treated as `other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    #[serde(default)]
    pub image_base64: String,
    #[serde(default)]
    pub document_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub extraction_mode: ExtractionMode,
}

impl ExtractionRequest {
    pub fn document_class(&self) -> DocumentClass {
        self.document_type.parse().unwrap_or(DocumentClass::Other)
    }
}

/// Response of `POST /extract-document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionEnvelope {
    pub fn ok(data: ExtractedRecord) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: &ExtractionError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    /// Collapse the envelope into the extractor's result type.
    pub fn into_result(self) -> Result<ExtractedRecord, ExtractionError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ExtractionError::Rejected(
                self.error.unwrap_or_else(|| "Failed to extract document".to_string()),
            )),
        }
    }
}
