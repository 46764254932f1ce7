//! Flow tuples and their canonical ordering.
//!
//! A flow and its mirror image must normalize to the same tuple. For
//! ordinary transport protocols that means ordering endpoints by address,
//! then by port. ICMP and ICMPv6 first rewrite their type/code pair through
//! the request/reply tables in [`crate::icmp`].

use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::error::{Endpoint, FingerprintError};
use crate::icmp::{self, Counterpart};
use crate::proto;

// ── FlowTuple ─────────────────────────────────────────────────────────────────

/// A flow as observed: protocol, two endpoints, and optional ports.
///
/// Both addresses are always the same family. Ports are host-order values;
/// for ICMP/ICMPv6 they carry the message type and code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowTuple {
    protocol: u8,
    saddr: IpAddr,
    daddr: IpAddr,
    ports: Option<(u16, u16)>,
}

impl FlowTuple {
    pub fn new(
        protocol: u8,
        saddr: IpAddr,
        daddr: IpAddr,
        ports: Option<(u16, u16)>,
    ) -> Result<Self, FingerprintError> {
        if saddr.is_ipv4() != daddr.is_ipv4() {
            return Err(FingerprintError::AddressFamilyMismatch);
        }
        Ok(Self {
            protocol,
            saddr,
            daddr,
            ports,
        })
    }

    /// Build a tuple from fields as they sit in captured packet data.
    ///
    /// `addr_len` must be 4 or 16 and both buffers must be exactly that
    /// long. Ports are the raw network-order words read from the transport
    /// header and must be both present or both absent.
    pub fn from_raw(
        protocol: u8,
        addr_len: u8,
        saddr: Option<&[u8]>,
        daddr: Option<&[u8]>,
        sport: Option<u16>,
        dport: Option<u16>,
    ) -> Result<Self, FingerprintError> {
        if addr_len != 4 && addr_len != 16 {
            return Err(FingerprintError::InvalidAddressLength(addr_len));
        }

        let saddr = saddr.ok_or(FingerprintError::MissingAddress(Endpoint::Source))?;
        let daddr = daddr.ok_or(FingerprintError::MissingAddress(Endpoint::Destination))?;
        let saddr = addr_from_bytes(Endpoint::Source, addr_len, saddr)?;
        let daddr = addr_from_bytes(Endpoint::Destination, addr_len, daddr)?;

        let ports = match (sport, dport) {
            (Some(s), Some(d)) => Some((u16::from_be(s), u16::from_be(d))),
            (None, None) => None,
            _ => return Err(FingerprintError::UnpairedPort),
        };

        Self::new(protocol, saddr, daddr, ports)
    }

    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    pub fn saddr(&self) -> IpAddr {
        self.saddr
    }

    pub fn daddr(&self) -> IpAddr {
        self.daddr
    }

    pub fn ports(&self) -> Option<(u16, u16)> {
        self.ports
    }

    /// The same flow seen from the other end.
    pub fn reversed(&self) -> Self {
        Self {
            protocol: self.protocol,
            saddr: self.daddr,
            daddr: self.saddr,
            ports: self.ports.map(|(s, d)| (d, s)),
        }
    }

    /// Put the tuple into canonical, direction-independent order.
    pub fn normalize(&self) -> CanonicalTuple {
        let mut ports = self.ports;
        let mut one_way = false;

        if let Some((sport, dport)) = self.ports {
            match icmp::counterpart(self.protocol, sport) {
                Counterpart::Paired(reply) => ports = Some((sport, reply)),
                Counterpart::Unpaired => one_way = true,
                Counterpart::NotIcmp => {}
            }
            if ports != self.ports {
                tracing::trace!(icmp_type = sport, code = dport, "code replaced by counterpart type");
            }
        }

        let flip = !one_way && !is_ordered(&self.saddr, &self.daddr, ports);
        tracing::debug!(tuple = %self, one_way, flip, "normalized flow tuple");

        if flip {
            CanonicalTuple {
                protocol: self.protocol,
                saddr: self.daddr,
                daddr: self.saddr,
                ports: ports.map(|(s, d)| (d, s)),
            }
        } else {
            CanonicalTuple {
                protocol: self.protocol,
                saddr: self.saddr,
                daddr: self.daddr,
                ports,
            }
        }
    }
}

impl fmt::Display for FlowTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tuple(f, self.protocol, self.saddr, self.daddr, self.ports)
    }
}

// ── CanonicalTuple ────────────────────────────────────────────────────────────

/// A tuple in canonical order. Only produced by [`FlowTuple::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalTuple {
    protocol: u8,
    saddr: IpAddr,
    daddr: IpAddr,
    ports: Option<(u16, u16)>,
}

impl CanonicalTuple {
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    pub fn saddr(&self) -> IpAddr {
        self.saddr
    }

    pub fn daddr(&self) -> IpAddr {
        self.daddr
    }

    pub fn ports(&self) -> Option<(u16, u16)> {
        self.ports
    }

    /// Address length in bytes: 4 or 16.
    pub fn addr_len(&self) -> usize {
        match self.saddr {
            IpAddr::V4(_) => 4,
            IpAddr::V6(_) => 16,
        }
    }
}

impl fmt::Display for CanonicalTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tuple(f, self.protocol, self.saddr, self.daddr, self.ports)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Address first, then port. Without ports, equal addresses count as ordered.
///
/// Within one family `IpAddr` orders by network-order octets, which is the
/// byte-wise comparison the format calls for.
fn is_ordered(saddr: &IpAddr, daddr: &IpAddr, ports: Option<(u16, u16)>) -> bool {
    match saddr.cmp(daddr) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => ports.map_or(true, |(sport, dport)| sport < dport),
    }
}

fn addr_from_bytes(
    endpoint: Endpoint,
    addr_len: u8,
    bytes: &[u8],
) -> Result<IpAddr, FingerprintError> {
    let mismatch = || FingerprintError::AddressLengthMismatch {
        endpoint,
        expected: addr_len,
        actual: bytes.len(),
    };
    if bytes.len() != addr_len as usize {
        return Err(mismatch());
    }
    match addr_len {
        4 => <[u8; 4]>::try_from(bytes)
            .map(|octets| IpAddr::V4(Ipv4Addr::from(octets)))
            .map_err(|_| mismatch()),
        16 => <[u8; 16]>::try_from(bytes)
            .map(|octets| IpAddr::V6(Ipv6Addr::from(octets)))
            .map_err(|_| mismatch()),
        other => Err(FingerprintError::InvalidAddressLength(other)),
    }
}

fn fmt_tuple(
    f: &mut fmt::Formatter<'_>,
    protocol: u8,
    saddr: IpAddr,
    daddr: IpAddr,
    ports: Option<(u16, u16)>,
) -> fmt::Result {
    match proto::name(protocol) {
        Some(name) => write!(f, "{name} ")?,
        None => write!(f, "{protocol} ")?,
    }
    match ports {
        Some((sport, dport)) => write!(
            f,
            "{} -> {}",
            SocketAddr::new(saddr, sport),
            SocketAddr::new(daddr, dport)
        ),
        None => write!(f, "{saddr} -> {daddr}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
