//! Field-presence and type validation over raw JSON bodies.
//!
//! Handlers validate once, before any store call, and the first failing
//! field wins. Messages always name the offending field.

use serde_json::Value;

use super::error::ApiError;

/// Required non-empty text field.
pub fn require_text(body: &Value, field: &'static str) -> Result<String, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ApiError::MissingField(field)),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ApiError::InvalidField(format!(
            "{field} must be non-empty text"
        ))),
        Some(_) => Err(ApiError::InvalidField(format!("{field} must be text"))),
    }
}

/// Required text field that may be empty (free-form values like "10ml").
pub fn require_string(body: &Value, field: &'static str) -> Result<String, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ApiError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ApiError::InvalidField(format!("{field} must be text"))),
    }
}

/// Required strictly positive integer. Rejects floats like `7.5`.
pub fn require_positive_int(body: &Value, field: &'static str) -> Result<i64, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ApiError::MissingField(field)),
        Some(value) => value.as_i64().filter(|n| *n > 0).ok_or_else(|| {
            ApiError::InvalidField(format!("{field} must be a positive integer"))
        }),
    }
}

/// Required strictly positive number (integer or float).
pub fn require_positive_number(body: &Value, field: &'static str) -> Result<f64, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ApiError::MissingField(field)),
        Some(value) => value
            .as_f64()
            .filter(|n| *n > 0.0)
            .ok_or_else(|| ApiError::InvalidField(format!("{field} must be a positive number"))),
    }
}

/// Optional non-empty text field; `None` when absent.
pub fn optional_text(body: &Value, field: &'static str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
        Some(Value::String(_)) => Err(ApiError::InvalidField(format!(
            "{field} must be non-empty text"
        ))),
        Some(_) => Err(ApiError::InvalidField(format!("{field} must be text"))),
    }
}

/// Optional strictly positive integer; `None` when absent.
pub fn optional_positive_int(body: &Value, field: &'static str) -> Result<Option<i64>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .filter(|n| *n > 0)
            .map(Some)
            .ok_or_else(|| {
                ApiError::InvalidField(format!("{field} must be a positive integer"))
            }),
    }
}

/// Optional free-text note; defaults to the empty string.
pub fn optional_note(body: &Value, field: &'static str) -> Result<String, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ApiError::InvalidField(format!("{field} must be text"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_text_accepts_non_empty_strings() {
        let body = json!({"nombre": "Monstera"});
        assert_eq!(require_text(&body, "nombre").unwrap(), "Monstera");
    }

    #[test]
    fn require_text_rejects_missing_empty_and_non_string() {
        assert!(matches!(
            require_text(&json!({}), "nombre"),
            Err(ApiError::MissingField("nombre"))
        ));
        assert!(require_text(&json!({"nombre": "  "}), "nombre").is_err());
        assert!(require_text(&json!({"nombre": 3}), "nombre").is_err());
        assert!(matches!(
            require_text(&json!({"nombre": null}), "nombre"),
            Err(ApiError::MissingField("nombre"))
        ));
    }

    #[test]
    fn require_positive_int_rejects_zero_negative_and_floats() {
        assert_eq!(
            require_positive_int(&json!({"n": 7}), "n").unwrap(),
            7
        );
        assert!(require_positive_int(&json!({"n": 0}), "n").is_err());
        assert!(require_positive_int(&json!({"n": -3}), "n").is_err());
        assert!(require_positive_int(&json!({"n": 7.5}), "n").is_err());
        assert!(require_positive_int(&json!({"n": "7"}), "n").is_err());
    }

    #[test]
    fn require_positive_number_accepts_floats_and_ints() {
        assert_eq!(
            require_positive_number(&json!({"ml": 250}), "ml").unwrap(),
            250.0
        );
        assert_eq!(
            require_positive_number(&json!({"ml": 0.5}), "ml").unwrap(),
            0.5
        );
        assert!(require_positive_number(&json!({"ml": -100}), "ml").is_err());
        assert!(require_positive_number(&json!({"ml": 0}), "ml").is_err());
    }

    #[test]
    fn optional_fields_are_none_when_absent() {
        assert_eq!(optional_text(&json!({}), "tipo").unwrap(), None);
        assert_eq!(optional_positive_int(&json!({}), "n").unwrap(), None);
        assert_eq!(optional_note(&json!({}), "notas").unwrap(), "");
    }

    #[test]
    fn optional_fields_still_validate_when_present() {
        assert!(optional_text(&json!({"tipo": ""}), "tipo").is_err());
        assert!(optional_positive_int(&json!({"n": 0}), "n").is_err());
        assert!(optional_note(&json!({"notas": 5}), "notas").is_err());
        assert_eq!(
            optional_note(&json!({"notas": ""}), "notas").unwrap(),
            ""
        );
    }
}
