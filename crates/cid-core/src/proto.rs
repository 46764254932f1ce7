//! IP protocol numbers the fingerprint cares about.

pub const ICMP: u8 = 1;
pub const TCP: u8 = 6;
pub const UDP: u8 = 17;
pub const ICMPV6: u8 = 58;
pub const SCTP: u8 = 132;

/// Protocol keywords accepted in place of a number.
const KEYWORDS: [(&str, u8); 5] = [
    ("icmp", ICMP),
    ("icmp6", ICMPV6),
    ("tcp", TCP),
    ("udp", UDP),
    ("sctp", SCTP),
];

/// Look up a protocol keyword such as `"tcp"`. Matching is exact.
pub fn keyword_to_number(keyword: &str) -> Option<u8> {
    KEYWORDS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, number)| *number)
}

/// Short display name for log output.
pub fn name(protocol: u8) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(_, number)| *number == protocol)
        .map(|(name, _)| *name)
}
