//! OpenAI response parsing

use serde_json::Value as JsonValue;

use crate::adapters::AdapterError;

/// Parse OpenAI chat completion JSON response
pub fn parse_chat_completion(response: &str) -> Result<String, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    let content = json["choices"]
        .get(0)
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            AdapterError::InvalidResponse("Missing choices[0].message.content".to_string())
        })?;

    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_completion_valid() {
        let json = r#"{"choices":[{"message":{"content":"test content"}}]}"#;
        let result = parse_chat_completion(json);
        assert_eq!(result.unwrap(), "test content");
    }

    #[test]
    fn test_parse_chat_completion_missing_choices() {
        let json = r#"{"model":"gpt-4"}"#;
        assert!(matches!(
            parse_chat_completion(json),
            Err(AdapterError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_chat_completion_not_json() {
        assert!(matches!(
            parse_chat_completion("<html>bad gateway</html>"),
            Err(AdapterError::Json(_))
        ));
    }
}
