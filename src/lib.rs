#![forbid(unsafe_code)]

//! JSON wire codecs for container task descriptors.
//!
//! Persisted and transmitted task documents carry a handful of values whose
//! wire form cannot be expressed by a derived structural codec: lifecycle
//! states with frozen legacy spellings, a protocol field that must stay
//! usable even when its input is bad, an overrides record that arrives
//! either as an object or as a string of embedded JSON, and a volume whose
//! variant is inferred from the shape of its payload. The [`descriptor`]
//! module holds those codecs; everything is a pure bytes-in/value-out
//! transformation with no state between calls.

pub mod descriptor;
pub mod error;
mod wire_enum;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

// Re-export descriptor types at crate root for convenience
pub use crate::descriptor::{
    ContainerOverrides, ContainerStatus, Decoded, EmptyHostVolume, FsHostVolume, HostVolume,
    MultiError, TaskStatus, TaskVolume, TransportProtocol, WireError,
};
