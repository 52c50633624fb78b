//! Shared state and wire types for the HTTP API.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::export::Locale;
use crate::models::{ExtractedRecord, RecordField, UploadedDocument};
use crate::pipeline::extraction::DocumentExtractor;
use crate::pipeline::merge::{ExtractionAttempt, MergeStatus};
use crate::validation::FieldValidation;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Which OCR backend the service is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    Gateway,
    Remote,
    Scripted,
}

/// Shared context for all routes. Immutable after startup.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    pub extractor: Arc<dyn DocumentExtractor>,
    pub extractor_kind: ExtractorKind,
}

impl ApiContext {
    pub fn new(
        config: Arc<AppConfig>,
        extractor: Arc<dyn DocumentExtractor>,
        extractor_kind: ExtractorKind,
    ) -> Self {
        Self {
            config,
            extractor,
            extractor_kind,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Request / response bodies
// ═══════════════════════════════════════════════════════════

/// Response of `POST /api/extract`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub status: MergeStatus,
    /// Pristine merge result.
    pub extracted: ExtractedRecord,
    /// Initial working copy for the review form.
    pub working: ExtractedRecord,
    pub documents: Vec<UploadedDocument>,
    pub attempts: Vec<ExtractionAttempt>,
    pub fallback_used: bool,
}

#[derive(Debug, Deserialize)]
pub struct FieldCheckRequest {
    pub field: RecordField,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct FieldCheckResponse {
    pub field: RecordField,
    pub sanitized: String,
    /// Absent for fields without a format rule or when the value is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub extracted: ExtractedRecord,
    pub working: ExtractedRecord,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub record: ExtractedRecord,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub record: ExtractedRecord,
    #[serde(default)]
    pub locale: Locale,
    /// Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
