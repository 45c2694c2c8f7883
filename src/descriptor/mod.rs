//! Wire codecs for container task descriptor values.
//!
//! Module hierarchy follows dependency order:
//! - error: WireError taxonomy, MultiError aggregate, Decoded result
//! - completeness: key-consumption check shared by record codecs
//! - status: TaskStatus, ContainerStatus lifecycle enums
//! - transport: TransportProtocol
//! - overrides: ContainerOverrides dual-shape record
//! - volume: TaskVolume, HostVolume polymorphic descriptor

pub mod completeness;
pub mod error;
pub mod overrides;
pub mod status;
pub mod transport;
pub mod volume;

pub use completeness::verify_keys_consumed;
pub use error::{Decoded, MultiError, WireError};
pub use overrides::ContainerOverrides;
pub use status::{ContainerStatus, TaskStatus};
pub use transport::TransportProtocol;
pub use volume::{EmptyHostVolume, FsHostVolume, HostVolume, TaskVolume};
