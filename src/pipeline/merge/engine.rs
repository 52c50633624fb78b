//! MergeEngine: runs the per-document OCR calls and folds them into one
//! record.
//!
//! Calls are strictly sequential. A failed document is logged and skipped;
//! the run itself only fails on an empty batch.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use super::fold::{fallback_snapshot, fold};
use super::plan::{contains_aadhaar, plan_processing};
use super::types::{ExtractionAttempt, MergeOutcome, MergeStatus};
use super::MergeError;
use crate::models::{DocumentClass, ExtractedRecord, ExtractionMode, RecordField, UploadedDocument};
use crate::pipeline::extraction::{DocumentExtractor, ExtractionError};
use crate::validation::validate_aadhaar;

pub struct MergeEngine {
    extractor: Arc<dyn DocumentExtractor>,
}

impl MergeEngine {
    pub fn new(extractor: Arc<dyn DocumentExtractor>) -> Self {
        Self { extractor }
    }

    /// Merge a batch, in upload order, into one record.
    pub async fn merge(&self, documents: &[UploadedDocument]) -> Result<MergeOutcome, MergeError> {
        if documents.is_empty() {
            return Err(MergeError::NoDocuments);
        }

        let start = Instant::now();
        let classes: Vec<DocumentClass> = documents.iter().map(|d| d.class).collect();
        let plan = plan_processing(&classes);

        tracing::info!(
            documents = documents.len(),
            aadhaar = classes.iter().filter(|c| **c == DocumentClass::Aadhaar).count(),
            "Merge run started"
        );

        let mut acc = ExtractedRecord::default();
        let mut attempts = Vec::with_capacity(plan.len() + 1);

        for step in &plan {
            let document = &documents[step.original_index];
            match self.extract_one(document, step.mode, step.position).await {
                Ok(record) => {
                    acc = fold(acc, step.role, &record);
                    attempts.push(attempt(document, step.mode, None, false));
                }
                Err(e) => {
                    attempts.push(attempt(document, step.mode, Some(&e), false));
                }
            }
        }

        let mut fallback_used = false;
        if !contains_aadhaar(&classes) && !acc.has(RecordField::Name) {
            let first = &documents[0];
            if plan
                .iter()
                .any(|s| s.original_index == 0 && s.mode == ExtractionMode::Full)
            {
                tracing::debug!(
                    document_id = %first.id,
                    "Fallback repeats a full-mode extraction already made"
                );
            }

            fallback_used = true;
            match self.extract_one(first, ExtractionMode::Full, 0).await {
                Ok(record) => {
                    acc = fallback_snapshot(&record);
                    attempts.push(attempt(first, ExtractionMode::Full, None, true));
                }
                Err(e) => {
                    attempts.push(attempt(first, ExtractionMode::Full, Some(&e), true));
                }
            }
        }

        normalize_aadhaar(&mut acc);

        let status = if acc.is_empty() {
            MergeStatus::NothingExtracted
        } else {
            MergeStatus::Extracted
        };

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            calls = attempts.len(),
            failed = attempts.iter().filter(|a| !a.succeeded).count(),
            fallback_used,
            fields = ?acc.present_fields(),
            "Merge run complete"
        );

        Ok(MergeOutcome {
            status,
            extracted: acc,
            attempts,
            fallback_used,
        })
    }

    async fn extract_one(
        &self,
        document: &UploadedDocument,
        mode: ExtractionMode,
        position: usize,
    ) -> Result<ExtractedRecord, ExtractionError> {
        let span = tracing::info_span!(
            "extract_document",
            document_id = %document.id,
            class = document.class.as_str(),
            mode = mode.as_str(),
            position,
        );

        async {
            let result = self
                .extractor
                .extract(document.content(), document.class, &document.mime_type, mode)
                .await;
            if let Err(e) = &result {
                tracing::warn!(
                    file_name = %document.file_name,
                    error = %e,
                    "Extraction failed, skipping document"
                );
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Replace a valid Aadhaar number with its grouped form. Invalid values stay.
fn normalize_aadhaar(record: &mut ExtractedRecord) {
    let Some(number) = record.get(RecordField::AadhaarNumber) else {
        return;
    };
    let validation = validate_aadhaar(Some(number));
    if validation.is_valid {
        if let Some(canonical) = validation.canonical_form {
            record.aadhaar_number = Some(canonical);
        }
    } else {
        tracing::debug!(
            reason = ?validation.error_message,
            "Extracted Aadhaar number left as read"
        );
    }
}

fn attempt(
    document: &UploadedDocument,
    mode: ExtractionMode,
    error: Option<&ExtractionError>,
    fallback: bool,
) -> ExtractionAttempt {
    ExtractionAttempt {
        document_id: document.id,
        file_name: document.file_name.clone(),
        class: document.class,
        mode,
        succeeded: error.is_none(),
        error: error.map(ToString::to_string),
        fallback,
    }
}
