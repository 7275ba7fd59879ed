//! Result aggregation: derive the final summary from the full result sequence.

use crate::types::{PortResult, ScanSummary, Status};

/// Partition results by status and collect the open subset, preserving the
/// input order. Pure; always recomputed from the complete sequence rather
/// than built up incrementally.
pub fn summarize(results: &[PortResult]) -> ScanSummary {
    let mut summary = ScanSummary {
        total_scanned: results.len() as u32,
        ..ScanSummary::default()
    };
    for result in results {
        match result.status {
            Status::Open => {
                summary.open_count += 1;
                summary.open_ports.push(result.clone());
            }
            Status::Closed => summary.closed_count += 1,
            Status::Error => summary.error_count += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResponseTime;

    fn result(port: u16, status: Status) -> PortResult {
        let response_time = match status {
            Status::Open => ResponseTime::Measured(1.23),
            Status::Closed => ResponseTime::Timeout,
            Status::Error => ResponseTime::Failure("hostname error".into()),
        };
        PortResult {
            port,
            status,
            response_time,
            service: "Unknown".into(),
        }
    }

    #[test]
    fn counts_partition_the_input() {
        let results = vec![
            result(22, Status::Open),
            result(23, Status::Closed),
            result(24, Status::Error),
            result(25, Status::Closed),
            result(80, Status::Open),
        ];
        let s = summarize(&results);
        assert_eq!(s.open_count, 2);
        assert_eq!(s.closed_count, 2);
        assert_eq!(s.error_count, 1);
        assert_eq!(s.total_scanned, 5);
        assert_eq!(s.open_count + s.closed_count + s.error_count, s.total_scanned);
    }

    #[test]
    fn open_ports_preserve_order() {
        let results = vec![
            result(10, Status::Open),
            result(11, Status::Closed),
            result(12, Status::Open),
            result(13, Status::Open),
        ];
        let s = summarize(&results);
        let ports: Vec<u16> = s.open_ports.iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![10, 12, 13]);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total_scanned, 0);
        assert_eq!(s.open_count, 0);
        assert!(s.open_ports.is_empty());
    }

    #[test]
    fn idempotent_over_same_input() {
        let results = vec![result(1, Status::Closed), result(2, Status::Open)];
        let a = summarize(&results);
        let b = summarize(&results);
        assert_eq!(a.open_count, b.open_count);
        assert_eq!(a.closed_count, b.closed_count);
        assert_eq!(a.error_count, b.error_count);
        assert_eq!(a.total_scanned, b.total_scanned);
    }
}
