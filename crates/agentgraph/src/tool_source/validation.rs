//! Argument validation against JSON Schema (minimal).
//!
//! - `validate_args(schema, args)`: checks that `args` is an object with every required field.
//! - Used by `ToolRegistry::call_tool`; failures surface as `ToolSourceError::InvalidInput`.

use serde_json::Value;

use crate::error::ValidationError;

/// Validates `args` against the minimal schema: `args` must be an object
/// containing every key in `schema["required"]`, and required keys declared as
/// `"type": "string"` must hold strings.
pub fn validate_args(schema: &Value, args: &Value) -> Result<(), ValidationError> {
    let Some(obj) = args.as_object() else {
        return Err(ValidationError("args must be an object".into()));
    };
    let Some(required) = schema.get("required").and_then(Value::as_array) else {
        return Ok(());
    };
    for key in required.iter().filter_map(Value::as_str) {
        let Some(value) = obj.get(key) else {
            return Err(ValidationError(format!("missing required field: {}", key)));
        };
        let declared = schema
            .get("properties")
            .and_then(|p| p.get(key))
            .and_then(|p| p.get("type"))
            .and_then(Value::as_str);
        if declared == Some("string") && !value.is_string() {
            return Err(ValidationError(format!("field '{}' must be a string", key)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_args_no_required() {
        let schema = serde_json::json!({"type": "object"});
        let args = serde_json::json!({});
        assert!(validate_args(&schema, &args).is_ok());
    }

    #[test]
    fn validate_args_required_ok() {
        let schema = serde_json::json!({"required": ["a", "b"]});
        let args = serde_json::json!({"a": 1, "b": 2});
        assert!(validate_args(&schema, &args).is_ok());
    }

    #[test]
    fn validate_args_missing_field() {
        let schema = serde_json::json!({"required": ["a", "b"]});
        let args = serde_json::json!({"a": 1});
        let e = validate_args(&schema, &args).unwrap_err();
        assert!(e.0.contains("b"));
    }

    #[test]
    fn validate_args_not_object() {
        let schema = serde_json::json!({"required": ["a"]});
        let e = validate_args(&schema, &serde_json::json!("ABC")).unwrap_err();
        assert!(e.0.contains("object"));
    }

    #[test]
    fn validate_args_wrong_type() {
        let schema = serde_json::json!({
            "properties": {"symbol": {"type": "string"}},
            "required": ["symbol"]
        });
        let e = validate_args(&schema, &serde_json::json!({"symbol": 42})).unwrap_err();
        assert!(e.0.contains("symbol"));
    }
}
