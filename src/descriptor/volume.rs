//! Task volume descriptors and their variant-sniffing wire codec.
//!
//! Wire form: `{"name": <str>, "host": <variant object>}`. The host object
//! carries no explicit tag; the variant is inferred from its shape, and that
//! inference lives entirely in [`sniff_host_variant`] so a future
//! explicit-tag migration touches one function.

use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::completeness::json_type_name;
use super::error::WireError;

/// Named volume binding for a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskVolume {
    pub name: String,
    pub volume: HostVolume,
}

/// Host-mount description. Exactly two shapes exist on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostVolume {
    /// Backed by a path on the host filesystem.
    Fs(FsHostVolume),
    /// Ephemeral volume provisioned by the runtime at task start.
    Empty(EmptyHostVolume),
}

impl HostVolume {
    /// Host path backing this volume, if it has one.
    pub fn source_path(&self) -> Option<&str> {
        match self {
            HostVolume::Fs(fs) => Some(&fs.source_path),
            HostVolume::Empty(_) => None,
        }
    }
}

/// Host-filesystem-backed volume.
///
/// `source_path` is non-empty on every value produced by decode; a blank
/// path is what routes a payload to [`EmptyHostVolume`] instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsHostVolume {
    #[serde(default, rename = "sourcePath")]
    pub source_path: String,
}

/// Ephemeral volume with no identifying data of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyHostVolume {}

impl TaskVolume {
    /// Decode wire bytes. Fails closed: no partial value on error.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::decode_value(&value)
    }

    fn decode_value(value: &Value) -> Result<Self, WireError> {
        let Value::Object(fields) = value else {
            return Err(WireError::MalformedShape {
                what: "task volume",
                expected: "a JSON object",
                got: json_type_name(value).to_string(),
            });
        };

        let name = match fields.get("name") {
            Some(raw) => serde_json::from_value::<String>(raw.clone())?,
            None => {
                return Err(WireError::MissingField {
                    what: "task volume",
                    field: "name",
                });
            }
        };

        let Some(raw_host) = fields.get("host") else {
            return Err(WireError::UnrecognizedVariant {
                what: "task volume",
            });
        };

        Ok(TaskVolume {
            name,
            volume: sniff_host_variant(raw_host)?,
        })
    }

    /// Canonical wire bytes: `{"name": ..., "host": <variant object>}`.
    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("string-keyed map always serializes")
    }
}

/// Infer the host-volume variant from the shape of its wire object.
///
/// The fs-backed schema is attempted first. A blank `sourcePath` is invalid
/// for that variant, so it means the payload is the empty volume; the same
/// fragment is then re-read as one.
fn sniff_host_variant(raw: &Value) -> Result<HostVolume, WireError> {
    let fs: FsHostVolume = serde_json::from_value(raw.clone())?;
    if fs.source_path.is_empty() {
        if raw.get("sourcePath").is_some() {
            tracing::warn!("host volume with blank `sourcePath` decoded as empty volume");
        }
        let empty = serde_json::from_value(raw.clone()).unwrap_or_default();
        return Ok(HostVolume::Empty(empty));
    }
    Ok(HostVolume::Fs(fs))
}

impl Serialize for TaskVolume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", &self.name)?;
        match &self.volume {
            HostVolume::Fs(fs) => map.serialize_entry("host", fs)?,
            HostVolume::Empty(empty) => map.serialize_entry("host", empty)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TaskVolume {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::decode_value(&value).map_err(de::Error::custom)
    }
}
