//! HTTP API.
//!
//! Serves the OCR engine contract (`/extract-document`) and the document
//! flow under `/api/`. The router is composable: `api_router()` returns a
//! `Router` that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer, ServerError};
pub use types::{ApiContext, ExtractorKind};
