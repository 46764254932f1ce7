//! cid-core: Community ID flow fingerprints.
//!
//! A Community ID is a short, direction-independent identifier for a network
//! flow. Two observers that see the same flow from opposite ends compute the
//! same string, which makes it usable as a join key across unrelated logs.
//!
//! Computation is two pure steps:
//!   1. [`FlowTuple::normalize`] puts the endpoints in canonical order
//!      (with ICMP/ICMPv6 request/reply handling).
//!   2. [`DigestBuilder`] hashes the canonical tuple with SHA-1 and renders
//!      it as `"1:" + base64` or `"1:" + hex`.
//!
//! Nothing here holds state between calls; every function is safe to call
//! concurrently without synchronization.

pub mod config;
pub mod digest;
pub mod error;
pub mod flow;
pub mod icmp;
pub mod proto;

pub use config::{Config, ConfigError, Encoding};
pub use digest::{DigestBuilder, FlowDigest, VERSION_PREFIX};
pub use error::{Endpoint, FingerprintError};
pub use flow::{CanonicalTuple, FlowTuple};

/// Compute the Community ID of a raw flow tuple.
///
/// `saddr`/`daddr` are addresses in network byte order and must both be
/// `addr_len` (4 or 16) bytes long. `sport`/`dport` are the network-order
/// words from the transport header (or ICMP type/code), exactly as they
/// appear in packet memory, and must be given together or not at all.
pub fn compute_fingerprint(
    config: &Config,
    protocol: u8,
    addr_len: u8,
    saddr: Option<&[u8]>,
    daddr: Option<&[u8]>,
    sport: Option<u16>,
    dport: Option<u16>,
) -> Result<String, FingerprintError> {
    let tuple = FlowTuple::from_raw(protocol, addr_len, saddr, daddr, sport, dport)?;
    community_id(config, &tuple)
}

/// Compute the Community ID of an already-validated tuple.
pub fn community_id(config: &Config, tuple: &FlowTuple) -> Result<String, FingerprintError> {
    let builder = DigestBuilder::new(config);
    let digest = builder.digest(&tuple.normalize())?;
    Ok(builder.render(&digest))
}
