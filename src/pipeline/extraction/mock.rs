use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::types::DocumentExtractor;
use super::ExtractionError;
use crate::models::{DocumentClass, ExtractedRecord, ExtractionMode};

/// One call observed by `ScriptedExtractor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub class: DocumentClass,
    pub mode: ExtractionMode,
    pub mime_type: String,
    pub image_len: usize,
}

/// Extractor that replays a fixed script of results in call order.
///
/// Used by merge and API tests. An exhausted script fails every further call.
#[derive(Default)]
pub struct ScriptedExtractor {
    script: Mutex<VecDeque<Result<ExtractedRecord, ExtractionError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(self, record: ExtractedRecord) -> Self {
        self.push(Ok(record));
        self
    }

    pub fn then_err(self, error: ExtractionError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, result: Result<ExtractedRecord, ExtractionError>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(result);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl DocumentExtractor for ScriptedExtractor {
    async fn extract(
        &self,
        image: &[u8],
        class: DocumentClass,
        mime_type: &str,
        mode: ExtractionMode,
    ) -> Result<ExtractedRecord, ExtractionError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                class,
                mode,
                mime_type: mime_type.to_string(),
                image_len: image.len(),
            });

        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(ExtractionError::Rejected("script exhausted".into())))
    }
}
