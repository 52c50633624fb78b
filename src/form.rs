//! Review form state: the extracted record, the user's working copy and the
//! rules for when validation errors become visible.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{ExtractedRecord, RecordField};
use crate::validation::IdentifierField;

/// A validation failure scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: RecordField,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    extracted: ExtractedRecord,
    working: ExtractedRecord,
    touched: HashSet<RecordField>,
    submit_attempted: bool,
}

impl FormState {
    /// Start a review from a merge result. The working copy starts identical.
    pub fn new(extracted: ExtractedRecord) -> Self {
        Self {
            working: extracted.clone(),
            extracted,
            ..Default::default()
        }
    }

    /// Resume a review where the working copy already diverged.
    pub fn with_working(extracted: ExtractedRecord, working: ExtractedRecord) -> Self {
        Self {
            extracted,
            working,
            ..Default::default()
        }
    }

    pub fn extracted(&self) -> &ExtractedRecord {
        &self.extracted
    }

    pub fn working(&self) -> &ExtractedRecord {
        &self.working
    }

    /// Apply a user edit. Identifier fields are sanitized; blank clears.
    pub fn edit(&mut self, field: RecordField, value: &str) -> Result<(), FieldError> {
        let value = match IdentifierField::from_record_field(field) {
            Some(identifier) => identifier.sanitize(value),
            None => value.to_string(),
        };

        self.working
            .set(field, Some(value.clone()))
            .map_err(|_| FieldError {
                field,
                message: format!("Invalid gender: {value}. Expected male, female or other"),
            })?;

        if !value.trim().is_empty() {
            self.touched.insert(field);
        }
        Ok(())
    }

    /// Error to display next to `field`, if any.
    ///
    /// Nothing shows until the field has held user input or a submit was
    /// attempted. Empty fields are never flagged.
    pub fn visible_error(&self, field: RecordField) -> Option<String> {
        if !self.submit_attempted && !self.touched.contains(&field) {
            return None;
        }
        let identifier = IdentifierField::from_record_field(field)?;
        let value = self.working.get(field)?;
        identifier.validate(Some(value)).error_message
    }

    pub fn visible_errors(&self) -> Vec<FieldError> {
        RecordField::ALL
            .iter()
            .filter_map(|&field| {
                self.visible_error(field)
                    .map(|message| FieldError { field, message })
            })
            .collect()
    }

    /// Whether the merge supplied a value for `field`.
    pub fn is_auto_filled(&self, field: RecordField) -> bool {
        self.extracted.has(field)
    }

    pub fn is_edited(&self, field: RecordField) -> bool {
        self.extracted.get(field) != self.working.get(field)
    }

    /// Validate every filled identifier and canonicalize on success.
    ///
    /// On failure the working copy is left exactly as it was.
    pub fn submit(&mut self) -> Result<ExtractedRecord, Vec<FieldError>> {
        self.submit_attempted = true;

        let mut errors = Vec::new();
        let mut canonical = Vec::new();
        for identifier in IdentifierField::ALL {
            let field = identifier.record_field();
            let Some(value) = self.working.get(field) else {
                continue;
            };
            let validation = identifier.validate(Some(value));
            if validation.is_valid {
                canonical.push((field, validation.canonical_form));
            } else {
                errors.push(FieldError {
                    field,
                    message: validation
                        .error_message
                        .unwrap_or_else(|| format!("Invalid {field}")),
                });
            }
        }

        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "Submit blocked by field errors");
            return Err(errors);
        }

        for (field, value) in canonical {
            if value.is_some() {
                // Identifier fields are plain strings; only gender can reject a value.
                let _ = self.working.set(field, value);
            }
        }
        Ok(self.working.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn extracted() -> ExtractedRecord {
        ExtractedRecord {
            name: Some("Priya Deshmukh".into()),
            aadhaar_number: Some("2345 6789 0123".into()),
            pincode: Some("411001".into()),
            ..Default::default()
        }
    }

    #[test]
    fn working_starts_as_copy() {
        let form = FormState::new(extracted());
        assert_eq!(form.working(), form.extracted());
        assert!(form.is_auto_filled(RecordField::Name));
        assert!(!form.is_auto_filled(RecordField::PanNumber));
    }

    #[test]
    fn edit_sanitizes_identifiers() {
        let mut form = FormState::new(ExtractedRecord::default());
        form.edit(RecordField::PanNumber, "abcde 1234f").unwrap();
        form.edit(RecordField::Pincode, "41-10-01-99").unwrap();
        form.edit(RecordField::AadhaarNumber, "2345a6789").unwrap();

        assert_eq!(form.working().pan_number.as_deref(), Some("ABCDE1234F"));
        assert_eq!(form.working().pincode.as_deref(), Some("411001"));
        assert_eq!(form.working().aadhaar_number.as_deref(), Some("23456789"));
    }

    #[test]
    fn edits_leave_extracted_untouched() {
        let mut form = FormState::new(extracted());
        form.edit(RecordField::Name, "Priya S Deshmukh").unwrap();
        assert_eq!(form.extracted().name.as_deref(), Some("Priya Deshmukh"));
        assert!(form.is_edited(RecordField::Name));
        assert!(form.is_auto_filled(RecordField::Name));
    }

    #[test]
    fn blank_edit_clears_field() {
        let mut form = FormState::new(extracted());
        form.edit(RecordField::Pincode, "").unwrap();
        assert_eq!(form.working().pincode, None);
    }

    #[test]
    fn gender_is_case_insensitive() {
        let mut form = FormState::new(ExtractedRecord::default());
        form.edit(RecordField::Gender, "Female").unwrap();
        assert_eq!(form.working().gender, Some(Gender::Female));

        let err = form.edit(RecordField::Gender, "unknown").unwrap_err();
        assert_eq!(err.field, RecordField::Gender);
        assert_eq!(form.working().gender, Some(Gender::Female));
    }

    #[test]
    fn errors_hidden_until_touched() {
        let mut form = FormState::with_working(
            ExtractedRecord::default(),
            ExtractedRecord {
                pincode: Some("011234".into()),
                ..Default::default()
            },
        );
        assert_eq!(form.visible_error(RecordField::Pincode), None);

        form.edit(RecordField::Pincode, "011234").unwrap();
        assert_eq!(
            form.visible_error(RecordField::Pincode).as_deref(),
            Some("Pincode cannot start with 0")
        );
    }

    #[test]
    fn errors_visible_after_submit_attempt() {
        let mut form = FormState::with_working(
            ExtractedRecord::default(),
            ExtractedRecord {
                voter_id_number: Some("AB12".into()),
                ..Default::default()
            },
        );
        assert!(form.visible_errors().is_empty());

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, RecordField::VoterIdNumber);
        assert_eq!(form.visible_errors(), errors);
    }

    #[test]
    fn failed_submit_keeps_working_copy() {
        let working = ExtractedRecord {
            aadhaar_number: Some("234567890123".into()),
            pan_number: Some("ABCD1234F".into()),
            ..Default::default()
        };
        let mut form = FormState::with_working(ExtractedRecord::default(), working.clone());

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, RecordField::PanNumber);
        assert_eq!(form.working(), &working);
    }

    #[test]
    fn successful_submit_canonicalizes() {
        let mut form = FormState::with_working(
            ExtractedRecord::default(),
            ExtractedRecord {
                name: Some("Vikram Singh".into()),
                aadhaar_number: Some("234567890123".into()),
                pan_number: Some("abcde1234f".into()),
                driving_license_number: Some("mh1220110012345".into()),
                pincode: Some("411001".into()),
                ..Default::default()
            },
        );

        let record = form.submit().unwrap();
        assert_eq!(record.aadhaar_number.as_deref(), Some("2345 6789 0123"));
        assert_eq!(record.pan_number.as_deref(), Some("ABCDE1234F"));
        assert_eq!(record.driving_license_number.as_deref(), Some("MH1220110012345"));
        assert_eq!(record.name.as_deref(), Some("Vikram Singh"));
        assert_eq!(form.working(), &record);
    }

    #[test]
    fn empty_identifiers_are_not_required() {
        let mut form = FormState::new(ExtractedRecord {
            name: Some("Only Name".into()),
            ..Default::default()
        });
        assert!(form.submit().is_ok());
    }
}
