//! ICMP and ICMPv6 request/reply pairing.
//!
//! ICMP has no ports, so the type and code stand in for them. A request and
//! its reply carry different types, which would defeat the generic endpoint
//! ordering. Pairing the type with its counterpart puts both directions on
//! the same (type, counterpart) footing before ordering runs.
//!
//! Types absent from these tables have no defined reply; such flows are
//! taken to be one-way and keep their endpoint order as observed.

use crate::proto;

pub const ECHO_REPLY: u16 = 0;
pub const ECHO: u16 = 8;
pub const RTR_ADVERT: u16 = 9;
pub const RTR_SOLICIT: u16 = 10;
pub const TSTAMP: u16 = 13;
pub const TSTAMP_REPLY: u16 = 14;
pub const INFO: u16 = 15;
pub const INFO_REPLY: u16 = 16;
pub const MASK: u16 = 17;
pub const MASK_REPLY: u16 = 18;

pub const V6_ECHO_REQUEST: u16 = 128;
pub const V6_ECHO_REPLY: u16 = 129;
pub const V6_MLD_LISTENER_QUERY: u16 = 130;
pub const V6_MLD_LISTENER_REPORT: u16 = 131;
pub const V6_ND_ROUTER_SOLICIT: u16 = 133;
pub const V6_ND_ROUTER_ADVERT: u16 = 134;
pub const V6_ND_NEIGHBOR_SOLICIT: u16 = 135;
pub const V6_ND_NEIGHBOR_ADVERT: u16 = 136;
pub const V6_WRU_REQUEST: u16 = 139;
pub const V6_WRU_REPLY: u16 = 140;
pub const V6_HAAD_REQUEST: u16 = 144;
pub const V6_HAAD_REPLY: u16 = 145;

/// Each pair is listed once; lookup checks both columns.
const ICMP_PAIRS: [(u16, u16); 5] = [
    (ECHO, ECHO_REPLY),
    (TSTAMP, TSTAMP_REPLY),
    (INFO, INFO_REPLY),
    (RTR_SOLICIT, RTR_ADVERT),
    (MASK, MASK_REPLY),
];

const ICMPV6_PAIRS: [(u16, u16); 6] = [
    (V6_ECHO_REQUEST, V6_ECHO_REPLY),
    (V6_MLD_LISTENER_QUERY, V6_MLD_LISTENER_REPORT),
    (V6_ND_ROUTER_SOLICIT, V6_ND_ROUTER_ADVERT),
    (V6_ND_NEIGHBOR_SOLICIT, V6_ND_NEIGHBOR_ADVERT),
    (V6_WRU_REQUEST, V6_WRU_REPLY),
    (V6_HAAD_REQUEST, V6_HAAD_REPLY),
];

/// Outcome of looking up an ICMP type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterpart {
    /// The type has a defined request/reply partner.
    Paired(u16),
    /// ICMP-family protocol, but the type has no partner.
    Unpaired,
    /// Not ICMP or ICMPv6; ports keep their transport meaning.
    NotIcmp,
}

/// Find the request/reply partner of `icmp_type` for the given protocol.
pub fn counterpart(protocol: u8, icmp_type: u16) -> Counterpart {
    let table: &[(u16, u16)] = match protocol {
        proto::ICMP => &ICMP_PAIRS,
        proto::ICMPV6 => &ICMPV6_PAIRS,
        _ => return Counterpart::NotIcmp,
    };

    table
        .iter()
        .find_map(|&(request, reply)| {
            if icmp_type == request {
                Some(reply)
            } else if icmp_type == reply {
                Some(request)
            } else {
                None
            }
        })
        .map_or(Counterpart::Unpaired, Counterpart::Paired)
}
