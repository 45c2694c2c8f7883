//! Task and container lifecycle states and their wire codecs.
//!
//! Each state has one canonical uppercase wire string. Decode additionally
//! accepts the frozen aliases `"UNKNOWN"` and `"DEAD"` written by v1.0.0
//! state files; they resolve to the current sentinel and terminal states and
//! are never re-emitted. Decode always yields a usable state: flawed input
//! falls back to the sentinel with the flaw reported alongside.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{Decoded, WireError};

/// Task lifecycle state, ordered by progression.
///
/// `None` is the unset sentinel, not a real lifecycle step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskStatus {
    #[default]
    None,
    Created,
    Running,
    Stopped,
}

crate::wire_enum! {
    impl TaskStatus {
        variants {
            None => ["NONE", "UNKNOWN"],
            Created => ["CREATED"],
            Running => ["RUNNING"],
            Stopped => ["STOPPED", "DEAD"],
        }
    }
}

/// Container lifecycle state, ordered by progression.
///
/// `None` is the unset sentinel, not a real lifecycle step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerStatus {
    #[default]
    None,
    Pulled,
    Created,
    Running,
    Stopped,
}

crate::wire_enum! {
    impl ContainerStatus {
        variants {
            None => ["NONE", "UNKNOWN"],
            Pulled => ["PULLED"],
            Created => ["CREATED"],
            Running => ["RUNNING"],
            Stopped => ["STOPPED", "DEAD"],
        }
    }
}

impl TaskStatus {
    /// Decode wire bytes, always yielding a usable state.
    pub fn decode(bytes: &[u8]) -> Decoded<Self> {
        decode_status("task status", bytes, Self::from_wire_str)
    }

    /// Canonical quoted wire bytes for this state.
    pub fn encode(&self) -> Vec<u8> {
        encode_status(self.as_str())
    }

    /// Encode an optional state; absent encodes as the wire literal `null`.
    pub fn encode_opt(status: Option<Self>) -> Vec<u8> {
        match status {
            Some(status) => status.encode(),
            None => b"null".to_vec(),
        }
    }

    /// True once the task can make no further lifecycle progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl ContainerStatus {
    /// Decode wire bytes, always yielding a usable state.
    pub fn decode(bytes: &[u8]) -> Decoded<Self> {
        decode_status("container status", bytes, Self::from_wire_str)
    }

    /// Canonical quoted wire bytes for this state.
    pub fn encode(&self) -> Vec<u8> {
        encode_status(self.as_str())
    }

    /// Encode an optional state; absent encodes as the wire literal `null`.
    pub fn encode_opt(status: Option<Self>) -> Vec<u8> {
        match status {
            Some(status) => status.encode(),
            None => b"null".to_vec(),
        }
    }

    /// True once the container can make no further lifecycle progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Shared tolerant decode for the two status enums.
///
/// Wire contract: the literal `null` (any case) is the sentinel; anything
/// not quote-wrapped is a shape error; quoted strings resolve through the
/// alias table first, then the canonical table.
fn decode_status<T: Default>(
    what: &'static str,
    bytes: &[u8],
    resolve: fn(&str) -> Option<T>,
) -> Decoded<T> {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return Decoded::flawed(
            T::default(),
            WireError::MalformedShape {
                what,
                expected: "a string or null",
                got: String::from_utf8_lossy(bytes).into_owned(),
            },
        );
    };
    if text.eq_ignore_ascii_case("null") {
        return Decoded::clean(T::default());
    }
    let Some(inner) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Decoded::flawed(
            T::default(),
            WireError::MalformedShape {
                what,
                expected: "a string or null",
                got: text.to_string(),
            },
        );
    };
    match resolve(inner) {
        Some(status) => Decoded::clean(status),
        None => Decoded::flawed(
            T::default(),
            WireError::UnrecognizedValue {
                what,
                raw: inner.to_string(),
            },
        ),
    }
}

fn encode_status(canonical: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(canonical.len() + 2);
    bytes.push(b'"');
    bytes.extend_from_slice(canonical.as_bytes());
    bytes.push(b'"');
    bytes
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::None),
            Some(raw) => Self::from_wire_str(&raw)
                .ok_or_else(|| de::Error::custom(format_args!("unrecognized task status `{raw}`"))),
        }
    }
}

impl Serialize for ContainerStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContainerStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::None),
            Some(raw) => Self::from_wire_str(&raw).ok_or_else(|| {
                de::Error::custom(format_args!("unrecognized container status `{raw}`"))
            }),
        }
    }
}
