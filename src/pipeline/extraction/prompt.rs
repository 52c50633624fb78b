//! Prompt templates for the vision gateway.
//!
//! The system prompt narrows the field set per extraction mode; the user
//! prompt adds document-specific reading instructions. Both demand English
//! output so regional-script names come back transliterated.

use crate::models::{DocumentClass, ExtractionMode};

const SYSTEM_ENGLISH_RULE: &str = "CRITICAL: ALL extracted text MUST be in ENGLISH only. \
If the document contains text in Hindi, Marathi, or any other Indian regional language, \
you MUST transliterate/translate it to English.";

const USER_ENGLISH_RULE: &str = "IMPORTANT: Output ALL text in ENGLISH only - \
transliterate any Hindi/Marathi/regional text to English.";

/// System prompt for an extraction mode.
pub fn system_prompt(mode: ExtractionMode) -> String {
    match mode {
        ExtractionMode::PanOnly => format!(
            "You are an OCR assistant for Indian PAN cards. {SYSTEM_ENGLISH_RULE} \
             Extract ONLY the PAN number and father's name. \
             Return JSON: {{\"panNumber\": \"...\", \"fatherName\": \"...\", \"confidence\": 0.0-1.0}}"
        ),
        ExtractionMode::VoterOnly => format!(
            "You are an OCR assistant for Indian Voter ID. {SYSTEM_ENGLISH_RULE} \
             Extract ONLY the Voter ID number. \
             Return JSON: {{\"voterIdNumber\": \"...\", \"confidence\": 0.0-1.0}}"
        ),
        ExtractionMode::DlOnly => format!(
            "You are an OCR assistant for Indian Driving Licenses. {SYSTEM_ENGLISH_RULE} \
             Extract ONLY the DL number. \
             Return JSON: {{\"drivingLicenseNumber\": \"...\", \"confidence\": 0.0-1.0}}"
        ),
        ExtractionMode::Full => format!(
            "You are an OCR assistant for Indian government documents. {SYSTEM_ENGLISH_RULE} \
             Extract personal information. IMPORTANT: Aadhaar must be exactly 12 digits \
             (format: XXXX XXXX XXXX). Return JSON with: name, fatherName, dateOfBirth (YYYY-MM-DD), \
             gender (male/female/other), address, district, state, pincode (6 digits), \
             aadhaarNumber (12 digits), panNumber, voterIdNumber, drivingLicenseNumber, confidence."
        ),
    }
}

/// User prompt for a document class under an extraction mode.
///
/// Narrow modes ignore the class: the system prompt already names the card.
pub fn user_prompt(class: DocumentClass, mode: ExtractionMode) -> String {
    match mode {
        ExtractionMode::PanOnly => format!(
            "Extract PAN number (10 chars) and complete father's name from this PAN card. {USER_ENGLISH_RULE}"
        ),
        ExtractionMode::VoterOnly => format!(
            "Extract the EPIC/Voter ID number from this Voter ID card. {USER_ENGLISH_RULE}"
        ),
        ExtractionMode::DlOnly => format!(
            "Extract the Driving License number from this document. {USER_ENGLISH_RULE}"
        ),
        ExtractionMode::Full => {
            let instructions = match class {
                DocumentClass::Aadhaar => {
                    "This is an Aadhaar Card. Extract ALL visible information. CRITICAL: The Aadhaar \
                     number MUST be exactly 12 digits (format: XXXX XXXX XXXX). Look for S/O, D/O, W/O, \
                     C/O for father's/husband's name. Extract full address from back side."
                }
                DocumentClass::Pan => {
                    "This is a PAN Card. Extract full name, father's name (complete), date of birth, \
                     and 10-character PAN number."
                }
                DocumentClass::VoterId => {
                    "This is a Voter ID Card. Extract full name, father's name, date of birth, gender, \
                     address, and EPIC number."
                }
                DocumentClass::DrivingLicense => {
                    "This is a Driving License. Extract full name, father's name, date of birth, \
                     address, and DL number."
                }
                DocumentClass::Other => {
                    "This is an Indian government ID document. Extract all visible personal information \
                     including name, father's name, DOB, gender, address, and any ID numbers. Aadhaar \
                     must be exactly 12 digits."
                }
            };
            format!("{instructions} {USER_ENGLISH_RULE}")
        }
    }
}
