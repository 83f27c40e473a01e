//! Traceroute output parser
//!
//! Reduces the text printed by `tracert -d` (Windows) or `traceroute -n`
//! (Unix) to an ordered list of [`HopRecord`]s. Each line is tried against
//! the tabular pattern first and the single-latency pattern second. When no
//! line matches either, every line is scanned for a bare address instead.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

use crate::model::{HopRecord, Latency};

/// One latency column of `tracert`: `12 ms`, `<1 ms` or `*`.
const SLOT: &str = r"(?:<?(\d+)\s*ms|\*)";

/// IPv4 dotted quad or anything shaped like IPv6; validated by `IpAddr` afterwards.
const ADDR: &str = r"(\d{1,3}(?:\.\d{1,3}){3}|[0-9A-Fa-f]*:[0-9A-Fa-f:.]+)";

const TIMEOUT_MARKER: &str = "timed out";

/// `<seq> <slot> <slot> <slot> <address>`
static TABULAR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(\d+)\s+{SLOT}\s+{SLOT}\s+{SLOT}\s+{ADDR}(?:\s|$)"
    ))
    .expect("tabular hop pattern is valid")
});

/// `<seq> [* ...] <address> <latency> ms`; leading `*` are lost probes.
static SINGLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(\d+)\s+(?:\*\s+)*{ADDR}\s+(\d+(?:\.\d+)?)\s*ms\b"
    ))
    .expect("single-latency hop pattern is valid")
});

static IPV4_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}\b").expect("IPv4 pattern is valid")
});

/// Starts with a hex group or `::`, never a lone colon.
static IPV6_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[0-9A-Fa-f]{1,4}|:):[0-9A-Fa-f:.]*").expect("IPv6 pattern is valid")
});

/// Parse raw traceroute output into hops, in the order they were printed.
///
/// Never fails: unrecognised lines are skipped and the worst case is an
/// empty list.
pub fn parse(raw_output: &str) -> Vec<HopRecord> {
    let lines: Vec<&str> = raw_output
        .lines()
        .filter(|line| !is_timeout_line(line))
        .collect();

    let hops: Vec<HopRecord> = lines
        .iter()
        .filter_map(|line| parse_tabular(line).or_else(|| parse_single(line)))
        .collect();

    if !hops.is_empty() {
        return hops;
    }

    lines
        .iter()
        .filter_map(|line| first_address(line))
        .map(|address| HopRecord::new(address, None))
        .collect()
}

fn is_timeout_line(line: &str) -> bool {
    line.to_ascii_lowercase().contains(TIMEOUT_MARKER)
}

/// Windows `tracert` line. Latency is the smallest numeric sample, or absent
/// if every slot was `*`.
fn parse_tabular(line: &str) -> Option<HopRecord> {
    let caps = TABULAR_LINE.captures(line)?;
    let address = caps[5].parse::<IpAddr>().ok()?;

    let latency = (2..=4)
        .filter_map(|i| caps.get(i))
        .filter_map(|slot| slot.as_str().parse::<u64>().ok())
        .min()
        .map(Latency::Millis);

    Some(HopRecord::new(address, latency))
}

/// Unix `traceroute` line. Only the first sample is reported.
fn parse_single(line: &str) -> Option<HopRecord> {
    let caps = SINGLE_LINE.captures(line)?;
    let address = caps[2].parse::<IpAddr>().ok()?;
    let latency = caps[3].parse::<f64>().ok().map(Latency::Fractional);

    Some(HopRecord::new(address, latency))
}

/// Leftmost valid address. IPv4 and IPv6 candidates are collected
/// separately so a rejected IPv6 candidate cannot swallow an IPv4 literal.
fn first_address(line: &str) -> Option<IpAddr> {
    let mut candidates: Vec<_> = IPV4_TOKEN
        .find_iter(line)
        .chain(IPV6_TOKEN.find_iter(line))
        .collect();
    candidates.sort_by_key(|m| m.start());

    candidates
        .into_iter()
        .find_map(|m| m.as_str().parse::<IpAddr>().ok())
}
