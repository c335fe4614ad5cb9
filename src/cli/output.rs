use serde::Serialize;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format_error(&e))
}

/// Format a result as indented JSON, for output meant to be read by people.
pub fn format_pretty<T: Serialize>(result: &T) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| format_error(&e))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn format_json_minified() {
        let data = TestData {
            name: "test".into(),
            value: 42,
        };
        let json = format_json(&data);
        assert!(!json.contains('\n'));
        assert!(json.contains("\"name\":\"test\""));
    }

    #[test]
    fn format_pretty_indents() {
        let data = TestData {
            name: "test".into(),
            value: 42,
        };
        let json = format_pretty(&data);
        assert!(json.contains("\n  \"value\": 42"));
    }

    #[test]
    fn format_error_escapes_backslashes_and_newlines() {
        let err = "not found: C:\\docs\\ref.md\nline2";
        let json = format_error(&err);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], err);
    }

    #[test]
    fn format_error_escapes_quotes() {
        let err = "bad \"thing\"";
        let json = format_error(&err);
        assert_eq!(json, "{\"error\":\"bad \\\"thing\\\"\"}");
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }
}
