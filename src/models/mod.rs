pub mod document;
pub mod enums;
pub mod record;

pub use document::{classify_filename, detect_mime, DocumentError, UploadList, UploadedDocument};
pub use enums::{DocumentClass, DocumentStatus, ExtractionMode, Gender, InvalidEnumValue, RecordField};
pub use record::ExtractedRecord;
