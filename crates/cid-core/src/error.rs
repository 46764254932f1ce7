//! Errors surfaced by fingerprint computation.
//!
//! None of these are retryable: the computation is a pure function of its
//! inputs, so a failed call fails identically every time.

use std::fmt;

/// Which side of the flow an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FingerprintError {
    #[error("address length must be 4 or 16 bytes, got {0}")]
    InvalidAddressLength(u8),

    #[error("{0} address is missing")]
    MissingAddress(Endpoint),

    #[error("{endpoint} address is {actual} bytes, expected {expected}")]
    AddressLengthMismatch {
        endpoint: Endpoint,
        expected: u8,
        actual: usize,
    },

    #[error("source and destination addresses must both be IPv4 or both be IPv6")]
    AddressFamilyMismatch,

    #[error("source and destination ports must be given together")]
    UnpairedPort,

    /// The digest primitive could not be set up. The bundled SHA-1 engine
    /// is infallible; this is kept so callers match on the full contract.
    #[error("digest engine unavailable: {0}")]
    DigestEngineFailure(String),
}
