use crate::models::{DocumentClass, ExtractionMode};

/// Pick the extraction mode for a document.
///
/// A primary document is always read in full. Secondary documents of a known
/// class are only scanned for their own identifier; unrecognized documents
/// get a full read because nothing else is known about them.
pub fn mode_for(class: DocumentClass, is_primary: bool) -> ExtractionMode {
    if is_primary {
        return ExtractionMode::Full;
    }
    match class {
        DocumentClass::Pan => ExtractionMode::PanOnly,
        DocumentClass::VoterId => ExtractionMode::VoterOnly,
        DocumentClass::DrivingLicense => ExtractionMode::DlOnly,
        DocumentClass::Aadhaar | DocumentClass::Other => ExtractionMode::Full,
    }
}
