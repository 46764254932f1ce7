//! Command-line decoding: options, protocol keywords, textual addresses.
//!
//! Everything that can be wrong with user input is caught here, before a
//! tuple ever reaches cid-core.

use std::net::IpAddr;

use anyhow::{anyhow, bail, Context, Result};
use cid_core::{proto, Encoding, FlowTuple};

/// What the user asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Compute(Request),
}

/// A decoded fingerprint request. Unset options defer to the loaded config.
#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub seed: Option<u16>,
    pub encoding: Option<Encoding>,
    pub tuple: FlowTuple,
}

/// Parse arguments (without argv[0]).
pub fn parse(args: &[String]) -> Result<Command> {
    let mut seed = None;
    let mut encoding = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--no-base64" => encoding = Some(Encoding::Hex),
            "--seed" => {
                let value = iter.next().context("--seed requires a value")?;
                seed = Some(parse_seed(value)?);
            }
            "--" => {
                positional.extend(iter.by_ref().map(String::as_str));
                break;
            }
            other => {
                if let Some(value) = other.strip_prefix("--seed=") {
                    seed = Some(parse_seed(value)?);
                } else if other.starts_with('-') && other.len() > 1 {
                    bail!("unknown option: {other}");
                } else {
                    positional.push(other);
                }
            }
        }
    }

    let tuple = parse_tuple(&positional)?;
    Ok(Command::Compute(Request {
        seed,
        encoding,
        tuple,
    }))
}

fn parse_seed(value: &str) -> Result<u16> {
    value
        .parse()
        .with_context(|| format!("--seed must be a number between 0 and 65535, got {value:?}"))
}

/// `PROTO SADDR DADDR [SPORT DPORT]`
fn parse_tuple(positional: &[&str]) -> Result<FlowTuple> {
    let (protocol, saddr, daddr, ports) = match positional {
        [protocol, saddr, daddr] => (protocol, saddr, daddr, None),
        [protocol, saddr, daddr, sport, dport] => (protocol, saddr, daddr, Some((sport, dport))),
        _ => bail!("Please provide full flow tuple arguments."),
    };

    let protocol = parse_protocol(protocol)?;
    let saddr: IpAddr = saddr
        .parse()
        .with_context(|| format!("Invalid src address: {saddr}"))?;
    let daddr: IpAddr = daddr
        .parse()
        .with_context(|| format!("Invalid dst address: {daddr}"))?;
    if saddr.is_ipv4() != daddr.is_ipv4() {
        bail!("Both addresses must be either IPv4, or IPv6");
    }

    let ports = match ports {
        Some((sport, dport)) => Some((
            parse_port(sport).with_context(|| format!("Invalid src port: {sport}"))?,
            parse_port(dport).with_context(|| format!("Invalid dst port: {dport}"))?,
        )),
        None => None,
    };

    Ok(FlowTuple::new(protocol, saddr, daddr, ports)?)
}

/// A keyword such as `tcp`, or a decimal protocol number.
fn parse_protocol(value: &str) -> Result<u8> {
    if let Some(number) = proto::keyword_to_number(value) {
        return Ok(number);
    }
    value.parse().map_err(|_| {
        anyhow!("Invalid protocol: {value} (expected 0-255 or one of icmp, icmp6, tcp, udp, sctp)")
    })
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .parse()
        .map_err(|_| anyhow!("expected a number between 0 and 65535"))
}
