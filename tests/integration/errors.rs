use cid_core::{compute_fingerprint, proto, Config, Endpoint, FingerprintError, FlowTuple};

#[test]
fn test_address_length_outside_4_or_16() {
    for addr_len in [0u8, 1, 6, 8, 15, 17, 255] {
        let addr = vec![0u8; addr_len as usize];
        let err = compute_fingerprint(
            &Config::default(),
            proto::TCP,
            addr_len,
            Some(&addr),
            Some(&addr),
            Some(1),
            Some(2),
        )
        .unwrap_err();
        assert_eq!(err, FingerprintError::InvalidAddressLength(addr_len));
    }
}

#[test]
fn test_missing_addresses() {
    let a = [10, 0, 0, 1];
    let err = compute_fingerprint(&Config::default(), proto::UDP, 4, None, Some(&a), None, None)
        .unwrap_err();
    assert_eq!(err, FingerprintError::MissingAddress(Endpoint::Source));

    let err = compute_fingerprint(&Config::default(), proto::UDP, 4, Some(&a), None, None, None)
        .unwrap_err();
    assert_eq!(err, FingerprintError::MissingAddress(Endpoint::Destination));
}

#[test]
fn test_buffer_shorter_than_addr_len() {
    let short = [1u8; 4];
    let full = [2u8; 16];
    let err = compute_fingerprint(
        &Config::default(),
        proto::TCP,
        16,
        Some(&full),
        Some(&short),
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FingerprintError::AddressLengthMismatch {
            endpoint: Endpoint::Destination,
            expected: 16,
            actual: 4,
        }
    ));
}

#[test]
fn test_single_port_is_rejected() {
    let a = [10, 0, 0, 1];
    let b = [10, 0, 0, 2];
    let err = compute_fingerprint(
        &Config::default(),
        proto::TCP,
        4,
        Some(&a),
        Some(&b),
        None,
        Some(80),
    )
    .unwrap_err();
    assert_eq!(err, FingerprintError::UnpairedPort);
}

#[test]
fn test_mixed_families_are_rejected() {
    let err = FlowTuple::new(
        proto::UDP,
        "10.0.0.1".parse().unwrap(),
        "fe80::1".parse().unwrap(),
        Some((53, 53)),
    )
    .unwrap_err();
    assert_eq!(err, FingerprintError::AddressFamilyMismatch);
}
