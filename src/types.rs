use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Everything needed to run one scan: host, inclusive port range, per-port timeout.
///
/// Validated on construction; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanTarget {
    pub host: String,
    pub start_port: u16,
    pub end_port: u16,
    pub timeout: Duration,
}

impl ScanTarget {
    /// Build a target, rejecting contract violations before any probing starts:
    /// empty host, port 0, inverted range, or a zero timeout.
    pub fn new(host: impl Into<String>, start_port: u16, end_port: u16, timeout: Duration) -> Result<Self> {
        let host = host.into();
        if host.trim().is_empty() {
            bail!("target host must not be empty");
        }
        if start_port == 0 {
            bail!("port 0 is not scannable; valid ports are 1-65535");
        }
        if start_port > end_port {
            bail!("invalid port range {start_port}-{end_port} (start > end)");
        }
        if timeout.is_zero() {
            bail!("timeout must be positive");
        }
        Ok(Self {
            host,
            start_port,
            end_port,
            timeout,
        })
    }

    /// Number of ports in the inclusive range.
    pub fn port_count(&self) -> u32 {
        u32::from(self.end_port) - u32::from(self.start_port) + 1
    }
}

/// Outcome classification for a single probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    Closed,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Open => "OPEN",
            Status::Closed => "CLOSED",
            Status::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// How long the probe took, or why there is no measurement.
///
/// `Measured` carries milliseconds rounded to two decimals. `Timeout` covers both
/// active refusal and a silent timeout (see `probe`). `Failure` carries a
/// human-readable reason for resolution or system errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ResponseTime {
    Measured(f64),
    Timeout,
    Failure(String),
}

impl fmt::Display for ResponseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseTime::Measured(ms) => write!(f, "{ms}ms"),
            ResponseTime::Timeout => f.write_str("timeout"),
            ResponseTime::Failure(reason) => f.write_str(reason),
        }
    }
}

/// One per-port scan result as delivered to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortResult {
    pub port: u16,
    pub status: Status,
    pub response_time: ResponseTime,
    pub service: String,
}

/// Progress counter delivered alongside each result. `completed <= total` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProgress {
    pub completed: u32,
    pub total: u32,
}

/// Final aggregate derived from the full result sequence once a scan ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub open_count: u32,
    pub closed_count: u32,
    pub error_count: u32,
    pub total_scanned: u32,
    pub open_ports: Vec<PortResult>,
}

/// Parse a port range spec into `(start, end)`.
///
/// Accepted forms: a single port (`80`) or an inclusive range (`1-1024`).
pub fn parse_port_range(spec: &str) -> Result<(u16, u16)> {
    let spec = spec.trim();
    if let Some((a, b)) = spec.split_once('-') {
        let start = parse_port(a.trim())?;
        let end = parse_port(b.trim())?;
        if start > end {
            bail!("invalid port range {start}-{end} (start > end)");
        }
        return Ok((start, end));
    }
    let p = parse_port(spec)?;
    Ok((p, p))
}

fn parse_port(s: &str) -> Result<u16> {
    let val: u32 = s.parse()?;
    if val == 0 || val > 65535 {
        bail!("port out of range: {val}");
    }
    Ok(val as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_validation() {
        assert!(ScanTarget::new("localhost", 1, 1024, Duration::from_millis(500)).is_ok());
        assert!(ScanTarget::new("", 1, 1024, Duration::from_millis(500)).is_err());
        assert!(ScanTarget::new("localhost", 0, 1024, Duration::from_millis(500)).is_err());
        assert!(ScanTarget::new("localhost", 100, 99, Duration::from_millis(500)).is_err());
        assert!(ScanTarget::new("localhost", 1, 1024, Duration::ZERO).is_err());
    }

    #[test]
    fn port_count_is_inclusive() {
        let t = ScanTarget::new("localhost", 1, 5, Duration::from_millis(500)).unwrap();
        assert_eq!(t.port_count(), 5);
        let full = ScanTarget::new("localhost", 1, 65535, Duration::from_millis(500)).unwrap();
        assert_eq!(full.port_count(), 65535);
    }

    #[test]
    fn parse_single_and_range() {
        assert_eq!(parse_port_range("80").unwrap(), (80, 80));
        assert_eq!(parse_port_range(" 1-1024 ").unwrap(), (1, 1024));
        assert!(parse_port_range("10-5").is_err());
        assert!(parse_port_range("0").is_err());
        assert!(parse_port_range("70000").is_err());
        assert!(parse_port_range("abc").is_err());
    }

    #[test]
    fn response_time_display() {
        assert_eq!(ResponseTime::Measured(12.34).to_string(), "12.34ms");
        assert_eq!(ResponseTime::Timeout.to_string(), "timeout");
        assert_eq!(
            ResponseTime::Failure("hostname error".into()).to_string(),
            "hostname error"
        );
    }
}
