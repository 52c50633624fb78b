use super::ExtractionError;
use crate::models::ExtractedRecord;

/// Extract the JSON block from model output.
///
/// Prefers a ```json fenced block, then a bare ``` fence holding an object,
/// then the span from the first `{` to the last `}`. Falls back to the whole
/// trimmed text so the JSON parser reports the real problem.
pub fn extract_json_block(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            let block = after_fence[..end].trim();
            if block.starts_with('{') {
                return block;
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Parse model output into a record. Only a JSON object is accepted.
pub fn parse_extracted_record(content: &str) -> Result<ExtractedRecord, ExtractionError> {
    let json_str = extract_json_block(content);
    let value: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    if !value.is_object() {
        return Err(ExtractionError::Parse("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| ExtractionError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn parses_fenced_json() {
        let content = "Here you go:\n```json\n{\"name\": \"Sunita Patil\", \"gender\": \"female\"}\n```\nDone.";
        let record = parse_extracted_record(content).unwrap();
        assert_eq!(record.name.as_deref(), Some("Sunita Patil"));
        assert_eq!(record.gender, Some(Gender::Female));
    }

    #[test]
    fn parses_bare_fence() {
        let content = "```\n{\"panNumber\": \"ABCDE1234F\"}\n```";
        let record = parse_extracted_record(content).unwrap();
        assert_eq!(record.pan_number.as_deref(), Some("ABCDE1234F"));
    }

    #[test]
    fn parses_json_with_preamble() {
        let content = "The card reads {\"voterIdNumber\": \"ABC1234567\", \"confidence\": 0.8} as shown.";
        let record = parse_extracted_record(content).unwrap();
        assert_eq!(record.voter_id_number.as_deref(), Some("ABC1234567"));
        assert_eq!(record.confidence, Some(0.8));
    }

    #[test]
    fn parses_plain_json() {
        let record = parse_extracted_record("{\"state\": \"Maharashtra\"}").unwrap();
        assert_eq!(record.state.as_deref(), Some("Maharashtra"));
    }

    #[test]
    fn rejects_prose() {
        let err = parse_extracted_record("I could not read this image.").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse extracted data"));
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(parse_extracted_record("[1, 2, 3]").is_err());
    }

    #[test]
    fn unclosed_fence_falls_back_to_braces() {
        assert_eq!(extract_json_block("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }
}
