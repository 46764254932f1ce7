//! cid-core integration tests.
//!
//! Exercises the public API only. The baseline vectors in `baseline.json`
//! are the published Community ID interoperability set; any implementation
//! of the v1 format must reproduce them byte for byte.
//!
//!   cargo test --test integration

use std::net::IpAddr;

use anyhow::{Context, Result};
use cid_core::{community_id, Config, Encoding, FlowTuple};
use serde::Deserialize;

mod errors;
mod symmetry;

// ── Harness ───────────────────────────────────────────────────────────────────

/// One row of the baseline fixture.
#[derive(Debug, Deserialize)]
pub struct Vector {
    pub proto: u8,
    pub saddr: IpAddr,
    pub daddr: IpAddr,
    pub ports: Option<(u16, u16)>,
    pub seed: u16,
    pub base64: String,
    /// Only present for rows that were also published in hex.
    pub hex: Option<String>,
}

impl Vector {
    pub fn tuple(&self) -> FlowTuple {
        FlowTuple::new(self.proto, self.saddr, self.daddr, self.ports)
            .expect("fixture tuples are well formed")
    }
}

pub fn baseline() -> Result<Vec<Vector>> {
    serde_json::from_str(include_str!("baseline.json")).context("failed to parse baseline.json")
}

pub fn config(seed: u16, encoding: Encoding) -> Config {
    Config { seed, encoding }
}

/// Base64 ID with the given seed.
pub fn id(seed: u16, tuple: &FlowTuple) -> String {
    community_id(&config(seed, Encoding::Base64), tuple).expect("well-formed tuple must hash")
}

pub fn tuple(proto: u8, saddr: &str, daddr: &str, ports: Option<(u16, u16)>) -> FlowTuple {
    FlowTuple::new(
        proto,
        saddr.parse().expect("valid source address"),
        daddr.parse().expect("valid destination address"),
        ports,
    )
    .expect("same address family")
}
