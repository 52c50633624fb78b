//! Extraction client: one OCR call per document image.
//!
//! The merge engine only sees the `DocumentExtractor` trait. Three
//! implementations live here:
//! - `VisionGatewayExtractor`: builds the prompt and calls the vision
//!   chat-completions gateway directly
//! - `RemoteExtractor`: calls a deployed `/extract-document` endpoint
//! - `ScriptedExtractor`: replays canned results for tests

pub mod gateway;
pub mod mock;
pub mod mode;
pub mod parser;
pub mod prompt;
pub mod remote;
pub mod types;

pub use gateway::VisionGatewayExtractor;
pub use mock::{RecordedCall, ScriptedExtractor};
pub use mode::mode_for;
pub use remote::RemoteExtractor;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("No image data provided")]
    MissingImage,

    #[error("Rate limit exceeded.")]
    RateLimited,

    #[error("Usage limit reached.")]
    UsageLimit,

    #[error("AI Gateway error: {status}")]
    Gateway { status: u16 },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("No content in AI response")]
    EmptyContent,

    #[error("Failed to parse extracted data: {0}")]
    Parse(String),

    #[error("Extraction rejected: {0}")]
    Rejected(String),
}

impl ExtractionError {
    /// HTTP status the `/extract-document` endpoint answers with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::RateLimited => 429,
            Self::UsageLimit => 402,
            _ => 500,
        }
    }

    /// Map a non-2xx gateway status to the error taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            402 => Self::UsageLimit,
            status => Self::Gateway { status },
        }
    }

    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ExtractionError::from_status(429), ExtractionError::RateLimited);
        assert_eq!(ExtractionError::from_status(402), ExtractionError::UsageLimit);
        assert_eq!(
            ExtractionError::from_status(503),
            ExtractionError::Gateway { status: 503 }
        );
    }

    #[test]
    fn messages_carry_limit_indicators() {
        assert!(ExtractionError::RateLimited.to_string().contains("Rate limit"));
        assert!(ExtractionError::UsageLimit.to_string().contains("Usage limit"));
        assert_eq!(
            ExtractionError::Gateway { status: 500 }.to_string(),
            "AI Gateway error: 500"
        );
    }

    #[test]
    fn endpoint_status_codes() {
        assert_eq!(ExtractionError::RateLimited.http_status(), 429);
        assert_eq!(ExtractionError::UsageLimit.http_status(), 402);
        assert_eq!(ExtractionError::EmptyContent.http_status(), 500);
        assert_eq!(ExtractionError::MissingImage.http_status(), 500);
    }
}
