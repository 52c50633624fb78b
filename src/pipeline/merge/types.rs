use serde::Serialize;
use uuid::Uuid;

use crate::models::{DocumentClass, ExtractedRecord, ExtractionMode};

/// How one extraction result is folded into the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FoldRole {
    /// Aadhaar side: personal fields first-non-empty-wins, latest confidence.
    Aadhaar,
    /// First document of a batch without any Aadhaar: becomes the base record.
    SoleSource,
    /// Contributes its own identifier only (plus the PAN father-name rule,
    /// or the `other` overlay).
    Secondary {
        class: DocumentClass,
        aadhaar_in_batch: bool,
    },
}

/// One entry of the processing plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStep {
    pub position: usize,
    /// Index in the upload order.
    pub original_index: usize,
    pub class: DocumentClass,
    pub is_primary: bool,
    pub mode: ExtractionMode,
    pub role: FoldRole,
}

/// Record of one OCR call made during a merge run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionAttempt {
    pub document_id: Uuid,
    pub file_name: String,
    pub class: DocumentClass,
    pub mode: ExtractionMode,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStatus {
    /// At least one field was extracted.
    Extracted,
    /// The run completed but produced nothing usable.
    NothingExtracted,
}

/// Result of a merge run. Always produced once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    pub status: MergeStatus,
    pub extracted: ExtractedRecord,
    pub attempts: Vec<ExtractionAttempt>,
    pub fallback_used: bool,
}

impl MergeOutcome {
    pub fn is_empty(&self) -> bool {
        self.status == MergeStatus::NothingExtracted
    }

    /// Whether any OCR call for `document_id` succeeded.
    pub fn document_succeeded(&self, document_id: Uuid) -> bool {
        self.attempts
            .iter()
            .any(|a| a.document_id == document_id && a.succeeded)
    }
}
