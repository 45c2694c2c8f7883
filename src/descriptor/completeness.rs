//! Key-consumption check for decoded wire objects.

use serde::Serialize;
use serde_json::Value;

use super::error::WireError;

/// Verify that every key in `raw` is bound by the schema of `decoded`.
///
/// The schema's key set is re-derived by serializing the decoded value, so
/// schemas passed here must serialize optional fields even when absent.
/// Fails closed: if either side is not a JSON object the comparison is
/// impossible, and that is a failure rather than a pass.
pub fn verify_keys_consumed<T: Serialize>(
    what: &'static str,
    raw: &Value,
    decoded: &T,
) -> Result<(), WireError> {
    let Value::Object(raw_map) = raw else {
        return Err(WireError::MalformedShape {
            what,
            expected: "a JSON object",
            got: json_type_name(raw).to_string(),
        });
    };

    let bound = serde_json::to_value(decoded)?;
    let Value::Object(bound_map) = bound else {
        return Err(WireError::MalformedShape {
            what,
            expected: "an object-shaped schema",
            got: json_type_name(&bound).to_string(),
        });
    };

    let unknown: Vec<String> = raw_map
        .keys()
        .filter(|key| !bound_map.contains_key(*key))
        .cloned()
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(WireError::UnknownFields {
            what,
            fields: unknown,
        })
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Sample {
        name: Option<String>,
        count: Option<u32>,
    }

    #[test]
    fn all_keys_bound_passes() {
        let raw = json!({"name": "a", "count": 1});
        let decoded = Sample {
            name: Some("a".to_string()),
            count: Some(1),
        };
        verify_keys_consumed("sample", &raw, &decoded).unwrap();
    }

    #[test]
    fn absent_optional_fields_still_bind_their_keys() {
        let raw = json!({"count": 1});
        let decoded = Sample {
            name: None,
            count: Some(1),
        };
        verify_keys_consumed("sample", &raw, &decoded).unwrap();
    }

    #[test]
    fn unbound_key_is_reported() {
        let raw = json!({"name": "a", "bogus": 1});
        let decoded = Sample {
            name: Some("a".to_string()),
            count: None,
        };
        let err = verify_keys_consumed("sample", &raw, &decoded).unwrap_err();
        match err {
            WireError::UnknownFields { fields, .. } => {
                assert_eq!(fields, vec!["bogus".to_string()]);
            }
            other => panic!("expected UnknownFields, got {other}"),
        }
    }

    #[test]
    fn non_object_raw_fails_closed() {
        let raw = json!("not an object");
        let decoded = Sample {
            name: None,
            count: None,
        };
        assert!(verify_keys_consumed("sample", &raw, &decoded).is_err());
    }

    #[test]
    fn non_object_schema_fails_closed() {
        let raw = json!({});
        let decoded = "just a string";
        assert!(verify_keys_consumed("sample", &raw, &decoded).is_err());
    }
}
