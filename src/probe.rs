//! Single-port TCP connect probe.

use crate::services;
use crate::types::{PortResult, ResponseTime, Status};
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::{self, Instant};

/// Probe one `(host, port)` with a full TCP connect, bounded by `timeout`.
///
/// Network-level failures never surface as errors; every outcome becomes a
/// `PortResult`:
/// - resolution failure: `Error` with `Failure("hostname error")`
/// - connect accepted in time: `Open` with `Measured` latency in ms
/// - refused, or silence past the timeout: `Closed` with `Timeout`
/// - any other socket failure (unreachable, permission denied): `Error`
///   with the failure reason
///
/// The socket lives only inside this call and is closed on every path.
pub async fn connect(host: &str, port: u16, timeout: Duration) -> PortResult {
    let service = services::service_name(port).to_string();

    let start = Instant::now();
    let addr = match resolve(host, port).await {
        Some(addr) => addr,
        None => {
            return PortResult {
                port,
                status: Status::Error,
                response_time: ResponseTime::Failure("hostname error".to_string()),
                service,
            }
        }
    };

    match time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            let elapsed_ms = round2(start.elapsed().as_secs_f64() * 1000.0);
            drop(stream);
            PortResult {
                port,
                status: Status::Open,
                response_time: ResponseTime::Measured(elapsed_ms),
                service,
            }
        }
        Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => PortResult {
            port,
            status: Status::Closed,
            response_time: ResponseTime::Timeout,
            service,
        },
        Ok(Err(e)) => PortResult {
            port,
            status: Status::Error,
            response_time: ResponseTime::Failure(e.to_string()),
            service,
        },
        // Neither accepted nor refused within the timeout: treated the same
        // as a refusal (filtered ports land here).
        Err(_elapsed) => PortResult {
            port,
            status: Status::Closed,
            response_time: ResponseTime::Timeout,
            service,
        },
    }
}

/// Resolve `host` to the first usable socket address, or `None` on failure.
async fn resolve(host: &str, port: u16) -> Option<SocketAddr> {
    match lookup_host((host, port)).await {
        Ok(mut addrs) => addrs.next(),
        Err(_) => None,
    }
}

fn round2(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_to_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(7.0), 7.0);
    }
}
