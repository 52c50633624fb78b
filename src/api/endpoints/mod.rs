//! API endpoint handlers.
//!
//! One module per step of the upload → extract → review → export flow,
//! plus the OCR engine endpoint.

pub mod engine;
pub mod export;
pub mod extract;
pub mod fields;
pub mod health;
pub mod submit;
