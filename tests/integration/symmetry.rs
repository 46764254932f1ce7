use cid_core::{icmp, proto};

use crate::*;

const ENDPOINTS: &[(&str, &str)] = &[
    ("1.2.3.4", "5.6.7.8"),
    ("10.0.0.2", "9.255.255.255"),
    ("192.168.1.1", "192.168.1.1"),
    ("fe80::1", "fe80::2"),
    ("2001:db8::ff", "2001:db8::1:0"),
    ("::1", "::1"),
];

/// Any non-ICMP flow hashes the same from both ends.
#[test]
fn test_transport_flows_are_symmetric() {
    let port_pairs = [(80, 34855), (443, 443), (1, 65535), (256, 1)];

    for &(s, d) in ENDPOINTS {
        for protocol in [proto::TCP, proto::UDP, proto::SCTP, 47] {
            for &ports in &port_pairs {
                let t = tuple(protocol, s, d, Some(ports));
                assert_eq!(id(0, &t), id(0, &t.reversed()), "{t}");
            }
            let t = tuple(protocol, s, d, None);
            assert_eq!(id(0, &t), id(0, &t.reversed()), "{t}");
        }
    }
}

#[test]
fn test_icmp_request_reply_pairs_match() {
    let pairs = [
        (icmp::ECHO, icmp::ECHO_REPLY),
        (icmp::TSTAMP, icmp::TSTAMP_REPLY),
        (icmp::INFO, icmp::INFO_REPLY),
        (icmp::RTR_SOLICIT, icmp::RTR_ADVERT),
        (icmp::MASK, icmp::MASK_REPLY),
    ];
    for (request, reply) in pairs {
        let out = tuple(proto::ICMP, "192.168.0.10", "8.8.8.8", Some((request, 0)));
        let back = tuple(proto::ICMP, "8.8.8.8", "192.168.0.10", Some((reply, 0)));
        assert_eq!(id(0, &out), id(0, &back), "type {request}/{reply}");
    }
}

#[test]
fn test_icmpv6_request_reply_pairs_match() {
    let pairs = [
        (icmp::V6_ECHO_REQUEST, icmp::V6_ECHO_REPLY),
        (icmp::V6_MLD_LISTENER_QUERY, icmp::V6_MLD_LISTENER_REPORT),
        (icmp::V6_ND_ROUTER_SOLICIT, icmp::V6_ND_ROUTER_ADVERT),
        (icmp::V6_ND_NEIGHBOR_SOLICIT, icmp::V6_ND_NEIGHBOR_ADVERT),
        (icmp::V6_WRU_REQUEST, icmp::V6_WRU_REPLY),
        (icmp::V6_HAAD_REQUEST, icmp::V6_HAAD_REPLY),
    ];
    for (request, reply) in pairs {
        let out = tuple(proto::ICMPV6, "2001:db8::2", "2001:db8::1", Some((request, 0)));
        let back = tuple(proto::ICMPV6, "2001:db8::1", "2001:db8::2", Some((reply, 0)));
        assert_eq!(id(0, &out), id(0, &back), "type {request}/{reply}");
    }
}

/// Types without a reply keep the observed direction.
#[test]
fn test_unpaired_icmp_types_are_directional() {
    // Destination unreachable, time exceeded.
    for icmp_type in [3, 11] {
        let t = tuple(proto::ICMP, "5.6.7.8", "1.2.3.4", Some((icmp_type, 1)));
        assert_ne!(id(0, &t), id(0, &t.reversed()), "type {icmp_type}");
    }
    let t = tuple(proto::ICMPV6, "fe80::2", "fe80::1", Some((1, 4)));
    assert_ne!(id(0, &t), id(0, &t.reversed()));
}

#[test]
fn test_seed_separates_ids() {
    let t = tuple(proto::TCP, "128.232.110.120", "66.35.250.204", Some((34855, 80)));
    let ids: std::collections::HashSet<String> = (0..64).map(|seed| id(seed, &t)).collect();
    assert_eq!(ids.len(), 64);
    assert_eq!(id(9, &t), id(9, &t.reversed()));
}
