//! Extract a JSON document from a model response.
//!
//! Models constrained with a schema usually return bare JSON, but some wrap
//! it in a markdown fence or surround it with prose. Parsing tries bare JSON
//! first, then a ```json fence, then the outermost brace span.

use serde_json::Value;

use super::CompletionError;

pub fn extract_json(response: &str) -> Result<Value, CompletionError> {
    let trimmed = response.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    if let Some(fenced) = fenced_json(trimmed) {
        return serde_json::from_str(fenced)
            .map_err(|e| CompletionError::JsonParsing(format!("fenced block: {e}")));
    }

    if let Some(span) = brace_span(trimmed) {
        return serde_json::from_str(span)
            .map_err(|e| CompletionError::JsonParsing(format!("brace span: {e}")));
    }

    Err(CompletionError::JsonParsing(
        "no JSON document found in response".to_string(),
    ))
}

fn fenced_json(response: &str) -> Option<&str> {
    let lower = response.to_lowercase();
    let start = lower.find("```json")? + "```json".len();
    let end = response[start..].find("```")?;
    Some(response[start..start + end].trim())
}

fn brace_span(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let value = extract_json(r#"{"conclusion": "stable"}"#).unwrap();
        assert_eq!(value["conclusion"], "stable");
    }

    #[test]
    fn parses_fenced_json() {
        let response = "Here is the report:\n```json\n{\"conclusion\": \"stable\"}\n```\nDone.";
        let value = extract_json(response).unwrap();
        assert_eq!(value["conclusion"], "stable");
    }

    #[test]
    fn fence_marker_is_case_insensitive() {
        let response = "```JSON\n{\"a\": 1}\n```";
        let value = extract_json(response).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let response = "The structured output is {\"a\": {\"b\": 2}} as requested.";
        let value = extract_json(response).unwrap();
        assert_eq!(value["a"]["b"], 2);
    }

    #[test]
    fn rejects_response_without_json() {
        let err = extract_json("I could not process the request.").unwrap_err();
        assert!(matches!(err, CompletionError::JsonParsing(_)));
    }

    #[test]
    fn rejects_broken_fenced_json() {
        let err = extract_json("```json\n{ broken\n```").unwrap_err();
        assert!(matches!(err, CompletionError::JsonParsing(_)));
    }
}
