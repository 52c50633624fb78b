//! Folding one extraction into the merge accumulator.
//!
//! Pure functions over `ExtractedRecord`; the engine owns the accumulator and
//! calls `fold` once per successful extraction.

use super::types::FoldRole;
use crate::models::{DocumentClass, ExtractedRecord, RecordField};

/// Minimum father-name length (in tokens) for a PAN reading to replace the
/// current one.
pub const PAN_FATHER_NAME_MIN_TOKENS: usize = 3;

pub fn fold(acc: ExtractedRecord, role: FoldRole, extracted: &ExtractedRecord) -> ExtractedRecord {
    match role {
        FoldRole::Aadhaar => fold_aadhaar(acc, extracted),
        FoldRole::SoleSource => personal_snapshot(extracted),
        FoldRole::Secondary {
            class,
            aadhaar_in_batch,
        } => fold_secondary(acc, class, aadhaar_in_batch, extracted),
    }
}

fn fold_aadhaar(mut acc: ExtractedRecord, extracted: &ExtractedRecord) -> ExtractedRecord {
    for field in RecordField::PERSONAL {
        if !acc.has(field) {
            acc.copy_field_from(extracted, field);
        }
    }
    if let Some(confidence) = extracted.reported_confidence() {
        acc.confidence = Some(confidence);
    }
    acc
}

fn fold_secondary(
    mut acc: ExtractedRecord,
    class: DocumentClass,
    aadhaar_in_batch: bool,
    extracted: &ExtractedRecord,
) -> ExtractedRecord {
    match class {
        DocumentClass::Aadhaar => return fold_aadhaar(acc, extracted),
        DocumentClass::Pan => {
            overwrite_if_present(&mut acc, extracted, RecordField::PanNumber);
            if let Some(candidate) = extracted.get(RecordField::FatherName) {
                let candidate_tokens = token_count(Some(candidate));
                let current_tokens = token_count(acc.get(RecordField::FatherName));
                if candidate_tokens >= PAN_FATHER_NAME_MIN_TOKENS && candidate_tokens > current_tokens {
                    tracing::debug!(
                        candidate_tokens,
                        current_tokens,
                        "Using PAN father name (more complete)"
                    );
                    acc.father_name = Some(candidate.to_string());
                }
            }
        }
        DocumentClass::VoterId => {
            overwrite_if_present(&mut acc, extracted, RecordField::VoterIdNumber);
        }
        DocumentClass::DrivingLicense => {
            overwrite_if_present(&mut acc, extracted, RecordField::DrivingLicenseNumber);
        }
        DocumentClass::Other => {
            if !aadhaar_in_batch && !acc.has(RecordField::Name) {
                for field in RecordField::ALL {
                    overwrite_if_present(&mut acc, extracted, field);
                }
                if let Some(confidence) = extracted.reported_confidence() {
                    acc.confidence = Some(confidence);
                }
            }
        }
    }
    acc
}

/// Personal/address fields and confidence only. Document numbers are dropped.
pub fn personal_snapshot(extracted: &ExtractedRecord) -> ExtractedRecord {
    let mut record = ExtractedRecord::default();
    for field in RecordField::PERSONAL {
        record.copy_field_from(extracted, field);
    }
    record.confidence = extracted.confidence;
    record
}

/// Everything a full re-extraction yields, used by the fallback pass.
pub fn fallback_snapshot(extracted: &ExtractedRecord) -> ExtractedRecord {
    let mut record = personal_snapshot(extracted);
    for field in [
        RecordField::PanNumber,
        RecordField::VoterIdNumber,
        RecordField::DrivingLicenseNumber,
    ] {
        record.copy_field_from(extracted, field);
    }
    record
}

fn overwrite_if_present(acc: &mut ExtractedRecord, extracted: &ExtractedRecord, field: RecordField) {
    if extracted.has(field) {
        acc.copy_field_from(extracted, field);
    }
}

fn token_count(value: Option<&str>) -> usize {
    value.map_or(0, |v| v.split_whitespace().count())
}
