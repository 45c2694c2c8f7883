//! Transport protocol for container port bindings.
//!
//! Decode never leaves the caller without a protocol: anything that is not
//! exactly `"tcp"` or `"udp"` falls back to `Tcp` with the flaw reported, so
//! version skew in persisted state degrades to the zero value instead of
//! crashing the caller. Strict callers must check the reported error.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{Decoded, WireError};

/// Port binding transport. `Tcp` is the zero value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransportProtocol {
    #[default]
    Tcp,
    Udp,
}

crate::wire_enum! {
    impl TransportProtocol {
        variants {
            Tcp => ["tcp"],
            Udp => ["udp"],
        }
    }
}

impl TransportProtocol {
    /// Decode wire bytes, always yielding a usable protocol.
    ///
    /// Unlike the status codecs, `null` is reported as a flaw here: an
    /// absent protocol means the producer predates the field, and callers
    /// that validate payloads need to see that even though `Tcp` is a safe
    /// reading of it.
    pub fn decode(bytes: &[u8]) -> Decoded<Self> {
        match bytes {
            b"\"tcp\"" => return Decoded::clean(Self::Tcp),
            b"\"udp\"" => return Decoded::clean(Self::Udp),
            _ => {}
        }
        let text = String::from_utf8_lossy(bytes);
        let error = match text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => WireError::UnrecognizedValue {
                what: "transport protocol",
                raw: inner.to_string(),
            },
            None => WireError::MalformedShape {
                what: "transport protocol",
                expected: r#""tcp" or "udp""#,
                got: text.into_owned(),
            },
        };
        Decoded::flawed(Self::Tcp, error)
    }

    /// Canonical quoted wire bytes for this protocol.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(5);
        bytes.push(b'"');
        bytes.extend_from_slice(self.as_str().as_bytes());
        bytes.push(b'"');
        bytes
    }

    /// Encode an optional protocol; absent encodes as the wire literal
    /// `null`.
    pub fn encode_opt(protocol: Option<Self>) -> Vec<u8> {
        match protocol {
            Some(protocol) => protocol.encode(),
            None => b"null".to_vec(),
        }
    }
}

impl Serialize for TransportProtocol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransportProtocol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => {
                tracing::warn!("decoded null transport protocol as tcp");
                Ok(Self::Tcp)
            }
            Some(raw) => Self::from_wire_str(&raw).ok_or_else(|| {
                de::Error::custom(format_args!(
                    "transport protocol must be `tcp` or `udp`; got `{raw}`"
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_values_decode_clean() {
        let decoded = TransportProtocol::decode(br#""tcp""#);
        assert!(decoded.is_clean());
        assert_eq!(decoded.value, TransportProtocol::Tcp);

        let decoded = TransportProtocol::decode(br#""udp""#);
        assert!(decoded.is_clean());
        assert_eq!(decoded.value, TransportProtocol::Udp);
    }

    #[test]
    fn wrong_case_falls_back_to_tcp_with_error() {
        let decoded = TransportProtocol::decode(br#""UDP""#);
        assert_eq!(decoded.value, TransportProtocol::Tcp);
        assert!(matches!(
            decoded.error,
            Some(WireError::UnrecognizedValue { .. })
        ));
    }

    #[test]
    fn null_falls_back_to_tcp_with_error() {
        let decoded = TransportProtocol::decode(b"null");
        assert_eq!(decoded.value, TransportProtocol::Tcp);
        assert!(decoded.error.is_some());
    }

    #[test]
    fn encode_is_canonical() {
        assert_eq!(TransportProtocol::Tcp.encode(), br#""tcp""#);
        assert_eq!(TransportProtocol::Udp.encode(), br#""udp""#);
        assert_eq!(TransportProtocol::encode_opt(None), b"null");
    }

    #[test]
    fn embedded_serde_form_tolerates_null_only() {
        let protocol: TransportProtocol = serde_json::from_str("null").unwrap();
        assert_eq!(protocol, TransportProtocol::Tcp);

        let protocol: TransportProtocol = serde_json::from_str(r#""udp""#).unwrap();
        assert_eq!(protocol, TransportProtocol::Udp);

        assert!(serde_json::from_str::<TransportProtocol>(r#""UDP""#).is_err());
    }
}
