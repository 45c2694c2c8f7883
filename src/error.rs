use thiserror::Error;

use crate::descriptor::WireError;

/// Crate-level convenience error.
///
/// A thin wrapper over the canonical wire error so callers can hold one
/// error type across every codec in the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Wire(#[from] WireError),
}
