//! Container launch-parameter overrides and their dual-shape wire codec.
//!
//! Historically the overrides travelled as an escaped JSON string; current
//! producers emit a typed object. Decode accepts both, object first, and
//! rejects any key the schema does not bind so misspelled or too-new fields
//! are never silently dropped. Encode only ever emits the typed object form.

use std::collections::BTreeMap;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::completeness::{json_type_name, verify_keys_consumed};
use super::error::{MultiError, WireError};

/// Runtime overrides for a container's launch parameters.
///
/// Every field is optional; an absent field means "no override".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerOverrides {
    pub command: Option<Vec<String>>,
    pub environment: Option<BTreeMap<String, String>>,
    pub cpu: Option<u32>,
    pub memory: Option<u32>,
}

/// Derived twin carrying the plain schema, so decode attempts can run the
/// structural codec without recursing into the custom one.
///
/// Fields serialize even when absent: the completeness check re-derives the
/// schema's key set from this type's serialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OverridesWire {
    command: Option<Vec<String>>,
    environment: Option<BTreeMap<String, String>>,
    cpu: Option<u32>,
    memory: Option<u32>,
}

impl From<OverridesWire> for ContainerOverrides {
    fn from(wire: OverridesWire) -> Self {
        Self {
            command: wire.command,
            environment: wire.environment,
            cpu: wire.cpu,
            memory: wire.memory,
        }
    }
}

impl From<&ContainerOverrides> for OverridesWire {
    fn from(overrides: &ContainerOverrides) -> Self {
        Self {
            command: overrides.command.clone(),
            environment: overrides.environment.clone(),
            cpu: overrides.cpu,
            memory: overrides.memory,
        }
    }
}

impl ContainerOverrides {
    /// Decode wire bytes in either accepted shape, typed object first.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::decode_value(&value)
    }

    fn decode_value(value: &Value) -> Result<Self, WireError> {
        let mut attempts: Vec<WireError> = Vec::new();

        // Typed object first: the common and cheaper path.
        match decode_typed(value) {
            Ok(overrides) => return Ok(overrides),
            Err(err) => attempts.push(err),
        }

        // Legacy shape: a JSON string whose content is itself the object.
        let Some(text) = value.as_str() else {
            attempts.push(WireError::MalformedShape {
                what: "container overrides",
                expected: "a JSON object or a string containing one",
                got: json_type_name(value).to_string(),
            });
            return Err(MultiError::new(
                "could not decode container overrides as either an object or a string",
                attempts,
            )
            .into());
        };

        match serde_json::from_str::<Value>(text) {
            Ok(inner) => match decode_typed(&inner) {
                Ok(overrides) => return Ok(overrides),
                Err(err) => attempts.push(err),
            },
            Err(err) => attempts.push(err.into()),
        }

        Err(MultiError::new(
            "could not decode container overrides in any supported way",
            attempts,
        )
        .into())
    }

    /// Canonical wire bytes: always the typed object form.
    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(&OverridesWire::from(self)).expect("string-keyed record always serializes")
    }
}

/// One decode attempt against the typed schema, requiring that the raw
/// object has no keys beyond the ones the schema binds.
fn decode_typed(value: &Value) -> Result<ContainerOverrides, WireError> {
    let wire: OverridesWire = serde_json::from_value(value.clone())?;
    verify_keys_consumed("container overrides", value, &wire)?;
    Ok(wire.into())
}

impl Serialize for ContainerOverrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OverridesWire::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ContainerOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::decode_value(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_object_decodes() {
        let overrides = ContainerOverrides::decode(br#"{"Command": ["a"]}"#).unwrap();
        assert_eq!(overrides.command, Some(vec!["a".to_string()]));
        assert_eq!(overrides.environment, None);
    }

    #[test]
    fn string_wrapped_object_decodes_to_equal_record() {
        let typed = ContainerOverrides::decode(br#"{"Command":["a"]}"#).unwrap();
        let wrapped = ContainerOverrides::decode(br#""{\"Command\":[\"a\"]}""#).unwrap();
        assert_eq!(typed, wrapped);
    }

    #[test]
    fn every_field_roundtrips() {
        let overrides = ContainerOverrides {
            command: Some(vec!["sh".to_string(), "-c".to_string(), "true".to_string()]),
            environment: Some(BTreeMap::from([("PATH".to_string(), "/bin".to_string())])),
            cpu: Some(2),
            memory: Some(512),
        };
        let decoded = ContainerOverrides::decode(&overrides.encode()).unwrap();
        assert_eq!(decoded, overrides);
    }

    #[test]
    fn unknown_key_fails_with_aggregate() {
        let err = ContainerOverrides::decode(br#"{"Command": ["a"], "bogus": 1}"#).unwrap_err();
        let multi = match err {
            WireError::Multi(multi) => multi,
            other => panic!("expected Multi, got {other}"),
        };
        assert!(matches!(
            multi.attempts()[0],
            WireError::UnknownFields { .. }
        ));
    }

    #[test]
    fn unknown_key_inside_string_form_also_fails() {
        let wire = serde_json::to_vec(&json!({"Command": ["a"], "bogus": 1}).to_string()).unwrap();
        assert!(ContainerOverrides::decode(&wire).is_err());
    }

    #[test]
    fn neither_object_nor_string_aggregates_both_failures() {
        let err = ContainerOverrides::decode(b"42").unwrap_err();
        let multi = match err {
            WireError::Multi(multi) => multi,
            other => panic!("expected Multi, got {other}"),
        };
        assert_eq!(multi.attempts().len(), 2);
    }

    #[test]
    fn string_with_garbage_content_fails() {
        let err = ContainerOverrides::decode(br#""not json at all""#).unwrap_err();
        assert!(matches!(err, WireError::Multi(_)));
    }

    #[test]
    fn encode_emits_object_form_with_all_keys() {
        let overrides = ContainerOverrides {
            command: Some(vec!["a".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            overrides.encode(),
            br#"{"Command":["a"],"Environment":null,"Cpu":null,"Memory":null}"#
        );
    }

    #[test]
    fn embedded_serde_form_accepts_both_shapes() {
        let overrides: ContainerOverrides =
            serde_json::from_str(r#"{"Command": ["a"]}"#).unwrap();
        assert_eq!(overrides.command, Some(vec!["a".to_string()]));

        let overrides: ContainerOverrides =
            serde_json::from_str(r#""{\"Command\":[\"a\"]}""#).unwrap();
        assert_eq!(overrides.command, Some(vec!["a".to_string()]));
    }
}
