//! Multi-document merge: order the batch, pick an extraction mode per
//! document, fold the results into one `ExtractedRecord`.

pub mod engine;
pub mod fold;
pub mod plan;
pub mod types;

pub use engine::MergeEngine;
pub use fold::fold;
pub use plan::plan_processing;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("No documents to process")]
    NoDocuments,
}
