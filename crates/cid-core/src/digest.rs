//! Community ID v1 hash input layout and rendering.
//!
//! The bytes fed to SHA-1 are, in order:
//!
//!   seed (2, NBO) | saddr (4|16) | daddr (4|16) | proto (1) | pad (1) | sport (2) | dport (2)
//!
//! The port pair is omitted entirely for flows without ports. Every byte
//! here is part of the interoperable format; changing any of it changes
//! every ID.

use std::net::IpAddr;

use base64::prelude::*;
use sha1::{Digest, Sha1};
use static_assertions::assert_eq_size;
use zerocopy::byteorder::{NetworkEndian, U16};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

use crate::config::{Config, Encoding};
use crate::error::FingerprintError;
use crate::flow::CanonicalTuple;

/// Version tag prepended to every rendered ID.
pub const VERSION_PREFIX: &str = "1:";

/// Reserved byte after the protocol. Always zero in v1.
pub const PADDING: u8 = 0;

/// Raw SHA-1 output.
pub type FlowDigest = [u8; 20];

// ── Layout ────────────────────────────────────────────────────────────────────

/// Fixed header for IPv4 flows. Wire size: 12 bytes.
#[derive(Debug, Clone, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
struct V4Header {
    seed: U16<NetworkEndian>,
    saddr: [u8; 4],
    daddr: [u8; 4],
    protocol: u8,
    padding: u8,
}

assert_eq_size!(V4Header, [u8; 12]);

/// Fixed header for IPv6 flows. Wire size: 36 bytes.
#[derive(Debug, Clone, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
struct V6Header {
    seed: U16<NetworkEndian>,
    saddr: [u8; 16],
    daddr: [u8; 16],
    protocol: u8,
    padding: u8,
}

assert_eq_size!(V6Header, [u8; 36]);

/// Trailing port pair. Wire size: 4 bytes.
#[derive(Debug, Clone, AsBytes, FromBytes, FromZeroes)]
#[repr(C, packed)]
struct PortPair {
    sport: U16<NetworkEndian>,
    dport: U16<NetworkEndian>,
}

assert_eq_size!(PortPair, [u8; 4]);

// ── DigestBuilder ─────────────────────────────────────────────────────────────

/// Hashes canonical tuples and renders the result.
///
/// Holds only a copy of the configuration; a fresh SHA-1 state is created
/// for every digest and dropped before returning.
#[derive(Debug, Clone, Copy)]
pub struct DigestBuilder {
    seed: u16,
    encoding: Encoding,
}

impl DigestBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            seed: config.seed,
            encoding: config.encoding,
        }
    }

    /// The exact byte sequence that gets hashed for `tuple`.
    ///
    /// 8 + 2·addr_len bytes with ports, 4 + 2·addr_len without.
    pub fn hash_input(&self, tuple: &CanonicalTuple) -> Result<Vec<u8>, FingerprintError> {
        let seed = U16::new(self.seed);
        let protocol = tuple.protocol();

        let mut input = match (tuple.saddr(), tuple.daddr()) {
            (IpAddr::V4(s), IpAddr::V4(d)) => V4Header {
                seed,
                saddr: s.octets(),
                daddr: d.octets(),
                protocol,
                padding: PADDING,
            }
            .as_bytes()
            .to_vec(),
            (IpAddr::V6(s), IpAddr::V6(d)) => V6Header {
                seed,
                saddr: s.octets(),
                daddr: d.octets(),
                protocol,
                padding: PADDING,
            }
            .as_bytes()
            .to_vec(),
            _ => return Err(FingerprintError::AddressFamilyMismatch),
        };

        if let Some((sport, dport)) = tuple.ports() {
            let ports = PortPair {
                sport: U16::new(sport),
                dport: U16::new(dport),
            };
            input.extend_from_slice(ports.as_bytes());
        }

        trace_fields(&input, tuple.addr_len());
        Ok(input)
    }

    /// SHA-1 over [`hash_input`](Self::hash_input).
    ///
    /// The bundled SHA-1 cannot fail to initialize, so the only error here is
    /// a layout error from `hash_input`. The `Result` also leaves room for
    /// [`FingerprintError::DigestEngineFailure`] should the engine become
    /// fallible.
    pub fn digest(&self, tuple: &CanonicalTuple) -> Result<FlowDigest, FingerprintError> {
        let input = self.hash_input(tuple)?;

        let mut hasher = Sha1::new();
        hasher.update(&input);
        let hash = hasher.finalize();

        let mut out: FlowDigest = [0u8; 20];
        out.copy_from_slice(&hash);
        Ok(out)
    }

    /// `"1:"` followed by the digest in the configured encoding.
    pub fn render(&self, digest: &FlowDigest) -> String {
        let encoded = match self.encoding {
            Encoding::Base64 => BASE64_STANDARD.encode(digest),
            Encoding::Hex => hex::encode(digest),
        };
        format!("{VERSION_PREFIX}{encoded}")
    }
}

/// Dump each hashed field in hex at TRACE level.
fn trace_fields(input: &[u8], addr_len: usize) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    let fixed = 4 + 2 * addr_len;
    let mut fields = vec![
        ("seed", &input[..2]),
        ("saddr", &input[2..2 + addr_len]),
        ("daddr", &input[2 + addr_len..2 + 2 * addr_len]),
        ("proto", &input[fixed - 2..fixed - 1]),
        ("padding", &input[fixed - 1..fixed]),
    ];
    if input.len() == fixed + 4 {
        fields.push(("sport", &input[fixed..fixed + 2]));
        fields.push(("dport", &input[fixed + 2..]));
    }
    for (field, bytes) in fields {
        tracing::trace!(field, bytes = %hex::encode(bytes), "hash input");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
