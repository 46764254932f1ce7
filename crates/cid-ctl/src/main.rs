//! community-id: print the Community ID of a flow tuple.

use std::process::ExitCode;

use anyhow::{Context, Result};
use cid_core::{community_id, Config, Encoding};

mod args;

use args::{Command, Request};

fn print_usage() {
    println!("Usage: community-id [-h] [--seed NUM] [--no-base64] PROTO SADDR DADDR [SPORT DPORT]");
    println!();
    println!("Community ID calculator");
    println!();
    println!("Prints the Community ID value for the given flow tuple to stdout.");
    println!("PROTO is a numeric IP protocol number or one of the keywords");
    println!("\"icmp\", \"icmp6\", \"tcp\", \"udp\", \"sctp\". For ICMP and ICMPv6 the");
    println!("ports are the message type and code.");
    println!();
    println!("Options:");
    println!("  -h, --help    Show this help message and exit");
    println!("  --seed NUM    Seed value for hash operations (default: 0)");
    println!("  --no-base64   Print the SHA-1 value as hex instead of base64");
    println!();
    println!("Environment:");
    println!("  COMMUNITY_ID_CONFIG     Config file path");
    println!("  COMMUNITY_ID_SEED       Default seed");
    println!("  COMMUNITY_ID_ENCODING   Default encoding (base64 or hex)");
    println!("  RUST_LOG                Log filter, e.g. cid_core=trace");
}

fn compute(request: Request) -> Result<String> {
    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(seed) = request.seed {
        config.seed = seed;
    }
    if let Some(encoding) = request.encoding {
        config.encoding = encoding;
    }
    tracing::debug!(
        tuple = %request.tuple,
        seed = config.seed,
        hex = config.encoding == Encoding::Hex,
        "computing community id"
    );

    community_id(&config, &request.tuple).context("Could not generate Community ID value")
}

fn run(args: &[String]) -> Result<()> {
    match args::parse(args)? {
        Command::Help => print_usage(),
        Command::Compute(request) => println!("{}", compute(request)?),
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("community-id: {e:#}");
            eprintln!("Run 'community-id --help' for usage.");
            ExitCode::FAILURE
        }
    }
}
