//! Uploaded identity documents and the upload list that owns them.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::enums::{DocumentClass, DocumentStatus};

/// Filename keywords per class, checked in this order.
const AADHAAR_ALIASES: &[&str] = &["aadhaar", "aadhar", "addhar", "adhar", "aadhr", "uidai"];
const PAN_ALIASES: &[&str] = &["pan"];
const VOTER_ALIASES: &[&str] = &["voter", "epic"];
const LICENSE_ALIASES: &[&str] = &["license", "dl"];

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("Unsupported file type for {file_name}: only PDF, JPG and PNG are accepted")]
    UnsupportedFileType { file_name: String },

    #[error("File is empty: {0}")]
    EmptyFile(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },

    #[error("Document not found: {0}")]
    NotFound(Uuid),
}

/// Infer the document class from a file name.
///
/// Case-insensitive substring match. "pan" is checked before "dl", so
/// `pan_dl.jpg` is a PAN card; Aadhaar aliases win over everything.
pub fn classify_filename(file_name: &str) -> DocumentClass {
    let lower = file_name.to_lowercase();
    let matches = |aliases: &[&str]| aliases.iter().any(|a| lower.contains(a));

    if matches(AADHAAR_ALIASES) {
        DocumentClass::Aadhaar
    } else if matches(PAN_ALIASES) {
        DocumentClass::Pan
    } else if matches(VOTER_ALIASES) {
        DocumentClass::VoterId
    } else if matches(LICENSE_ALIASES) {
        DocumentClass::DrivingLicense
    } else {
        DocumentClass::Other
    }
}

/// Detect the MIME type of an upload.
///
/// Magic bytes first; the file extension is only consulted when the header
/// is inconclusive. Returns `None` for anything other than PDF/JPEG/PNG.
pub fn detect_mime(file_name: &str, content: &[u8]) -> Option<&'static str> {
    match content {
        [0x25, 0x50, 0x44, 0x46, ..] => return Some(MIME_PDF),
        [0xFF, 0xD8, 0xFF, ..] => return Some(MIME_JPEG),
        [0x89, 0x50, 0x4E, 0x47, ..] => return Some(MIME_PNG),
        _ => {}
    }

    let guessed = mime_guess::from_path(file_name).first()?;
    match guessed.essence_str() {
        MIME_PDF => Some(MIME_PDF),
        MIME_JPEG => Some(MIME_JPEG),
        MIME_PNG => Some(MIME_PNG),
        _ => None,
    }
}

/// One uploaded file.
///
/// The content is shared and immutable; only the status changes after
/// creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub id: Uuid,
    pub file_name: String,
    pub mime_type: String,
    pub class: DocumentClass,
    pub status: DocumentStatus,
    pub size_bytes: usize,
    #[serde(skip)]
    content: Arc<[u8]>,
}

impl UploadedDocument {
    /// Accept an upload, inferring MIME type and class.
    pub fn from_upload(file_name: &str, content: Vec<u8>) -> Result<Self, DocumentError> {
        if content.is_empty() {
            return Err(DocumentError::EmptyFile(file_name.to_string()));
        }
        let mime_type = detect_mime(file_name, &content).ok_or_else(|| {
            DocumentError::UnsupportedFileType {
                file_name: file_name.to_string(),
            }
        })?;

        Ok(Self::with_class(
            file_name,
            mime_type,
            classify_filename(file_name),
            content,
        ))
    }

    /// Build a document with an explicit class (user override or tests).
    pub fn with_class(
        file_name: &str,
        mime_type: &str,
        class: DocumentClass,
        content: Vec<u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            class,
            status: DocumentStatus::Uploading,
            size_bytes: content.len(),
            content: Arc::from(content),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Move to `next`, enforcing `uploading → processing → completed | error`.
    ///
    /// A finished document may be processed again (re-running extraction).
    pub fn transition(&mut self, next: DocumentStatus) -> Result<(), DocumentError> {
        use DocumentStatus::*;
        let allowed = matches!(
            (self.status, next),
            (Uploading, Completed)
                | (Uploading, Processing)
                | (Uploading, Error)
                | (Processing, Completed)
                | (Processing, Error)
                | (Completed, Processing)
                | (Error, Processing)
        );
        if !allowed {
            return Err(DocumentError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// The user's upload list. Exclusive owner of its documents.
#[derive(Debug, Default)]
pub struct UploadList {
    documents: Vec<UploadedDocument>,
}

impl UploadList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an upload; arrival order is preserved.
    pub fn add(&mut self, document: UploadedDocument) -> Uuid {
        let id = document.id;
        tracing::debug!(
            document_id = %id,
            class = document.class.as_str(),
            mime = %document.mime_type,
            size = document.size_bytes,
            "Document added to upload list"
        );
        self.documents.push(document);
        id
    }

    pub fn remove(&mut self, id: Uuid) -> Result<UploadedDocument, DocumentError> {
        let index = self
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or(DocumentError::NotFound(id))?;
        Ok(self.documents.remove(index))
    }

    pub fn set_status(&mut self, id: Uuid, status: DocumentStatus) -> Result<(), DocumentError> {
        self.documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(DocumentError::NotFound(id))?
            .transition(status)
    }

    /// Mark every document in `from` as `to`, skipping the ones already there.
    pub fn set_all(&mut self, from: DocumentStatus, to: DocumentStatus) -> Result<(), DocumentError> {
        for doc in self.documents.iter_mut().filter(|d| d.status == from) {
            doc.transition(to)?;
        }
        Ok(())
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
