//! Identifier field sanitizers and validators.
//!
//! Each identifier has a sanitizer, applied on every keystroke, and a
//! validator, applied on blur or submit. Validators never fail with an error
//! value: they report validity, the canonical form and a message the form
//! shows next to the field.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::RecordField;

static PAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$").expect("valid PAN regex"));
static DL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{13}$").expect("valid DL regex"));
static VOTER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{7}$").expect("valid Voter ID regex"));

const AADHAAR_DIGITS: usize = 12;
const PINCODE_DIGITS: usize = 6;

/// Outcome of validating one field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FieldValidation {
    fn valid(canonical: String) -> Self {
        Self {
            is_valid: true,
            canonical_form: Some(canonical),
            error_message: None,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            canonical_form: None,
            error_message: Some(message.into()),
        }
    }
}

/// The record fields that carry a format rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierField {
    AadhaarNumber,
    PanNumber,
    DrivingLicenseNumber,
    VoterIdNumber,
    Pincode,
}

impl IdentifierField {
    pub const ALL: [IdentifierField; 5] = [
        Self::AadhaarNumber,
        Self::PanNumber,
        Self::DrivingLicenseNumber,
        Self::Pincode,
        Self::VoterIdNumber,
    ];

    pub fn from_record_field(field: RecordField) -> Option<Self> {
        match field {
            RecordField::AadhaarNumber => Some(Self::AadhaarNumber),
            RecordField::PanNumber => Some(Self::PanNumber),
            RecordField::DrivingLicenseNumber => Some(Self::DrivingLicenseNumber),
            RecordField::VoterIdNumber => Some(Self::VoterIdNumber),
            RecordField::Pincode => Some(Self::Pincode),
            _ => None,
        }
    }

    pub fn record_field(self) -> RecordField {
        match self {
            Self::AadhaarNumber => RecordField::AadhaarNumber,
            Self::PanNumber => RecordField::PanNumber,
            Self::DrivingLicenseNumber => RecordField::DrivingLicenseNumber,
            Self::VoterIdNumber => RecordField::VoterIdNumber,
            Self::Pincode => RecordField::Pincode,
        }
    }

    /// Keystroke-time cleanup.
    pub fn sanitize(self, value: &str) -> String {
        match self {
            Self::AadhaarNumber => sanitize_aadhaar(value),
            Self::PanNumber | Self::DrivingLicenseNumber | Self::VoterIdNumber => {
                uppercase_compact(value)
            }
            Self::Pincode => sanitize_pincode(value),
        }
    }

    /// Blur/submit-time validation. `None` and empty strings are "required" failures.
    pub fn validate(self, value: Option<&str>) -> FieldValidation {
        match self {
            Self::AadhaarNumber => validate_aadhaar(value),
            Self::PanNumber => validate_pan(value),
            Self::DrivingLicenseNumber => validate_driving_license(value),
            Self::VoterIdNumber => validate_voter_id(value),
            Self::Pincode => validate_pincode(value),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Uppercase and drop all whitespace.
fn uppercase_compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

// ──────────────────────────────────────────────
// Aadhaar
// ──────────────────────────────────────────────

/// Strip letters as the user types; spaces and digits stay.
pub fn sanitize_aadhaar(value: &str) -> String {
    value.chars().filter(|c| !c.is_ascii_alphabetic()).collect()
}

pub fn validate_aadhaar(value: Option<&str>) -> FieldValidation {
    let Some(value) = present(value) else {
        return FieldValidation::invalid("Aadhaar number is required");
    };
    if value.chars().any(|c| c.is_ascii_alphabetic()) {
        return FieldValidation::invalid("Aadhaar number should only contain digits");
    }

    let digits = digits_only(value);
    if digits.len() != AADHAAR_DIGITS {
        return FieldValidation::invalid(format!(
            "Aadhaar number must be exactly 12 digits (found {} digits)",
            digits.len()
        ));
    }

    FieldValidation::valid(format!("{} {} {}", &digits[0..4], &digits[4..8], &digits[8..12]))
}

// ──────────────────────────────────────────────
// PAN / Driving License / Voter ID
// ──────────────────────────────────────────────

pub fn sanitize_pan(value: &str) -> String {
    uppercase_compact(value)
}

pub fn validate_pan(value: Option<&str>) -> FieldValidation {
    validate_pattern(
        value,
        &PAN_PATTERN,
        "PAN number is required",
        "PAN must be 5 letters, 4 digits, 1 letter (e.g., ABCDE1234F)",
    )
}

pub fn sanitize_driving_license(value: &str) -> String {
    uppercase_compact(value)
}

pub fn validate_driving_license(value: Option<&str>) -> FieldValidation {
    validate_pattern(
        value,
        &DL_PATTERN,
        "Driving License number is required",
        "DL must be 2 letters + 13 digits (e.g., MH1234567890123)",
    )
}

pub fn sanitize_voter_id(value: &str) -> String {
    uppercase_compact(value)
}

pub fn validate_voter_id(value: Option<&str>) -> FieldValidation {
    validate_pattern(
        value,
        &VOTER_ID_PATTERN,
        "Voter ID number is required",
        "Voter ID must be 3 letters + 7 digits (e.g., ABC1234567)",
    )
}

fn validate_pattern(
    value: Option<&str>,
    pattern: &Regex,
    required: &str,
    mismatch: &str,
) -> FieldValidation {
    let Some(value) = present(value) else {
        return FieldValidation::invalid(required);
    };
    let cleaned = uppercase_compact(value);
    if !pattern.is_match(&cleaned) {
        return FieldValidation::invalid(mismatch);
    }
    FieldValidation::valid(cleaned)
}

// ──────────────────────────────────────────────
// Pincode
// ──────────────────────────────────────────────

/// Keep digits only, at most six.
pub fn sanitize_pincode(value: &str) -> String {
    digits_only(value).chars().take(PINCODE_DIGITS).collect()
}

pub fn validate_pincode(value: Option<&str>) -> FieldValidation {
    let Some(value) = present(value) else {
        return FieldValidation::invalid("Pincode is required");
    };

    let digits = digits_only(value);
    if digits.len() != PINCODE_DIGITS {
        return FieldValidation::invalid(format!(
            "Pincode must be exactly 6 digits (found {} digits)",
            digits.len()
        ));
    }
    if digits.starts_with('0') {
        return FieldValidation::invalid("Pincode cannot start with 0");
    }

    FieldValidation::valid(digits)
}
