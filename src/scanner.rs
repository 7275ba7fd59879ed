//! Scan controller: drives probes over a port range with a concurrency bound,
//! cooperative cancellation, and callback delivery of results and progress.

use crate::probe;
use crate::types::{PortResult, ScanProgress, ScanTarget};
use anyhow::{bail, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Default bound on in-flight probes against a single target. Keeps the
/// file-descriptor footprint small and the target load polite.
pub const DEFAULT_CONCURRENCY: usize = 100;

const MAX_CONCURRENCY: usize = 512;

/// Scan the target's port range with the default concurrency bound.
///
/// `on_result` fires once per probed port with the result and a progress
/// counter; callbacks may arrive out of port order while probes run
/// concurrently, but the returned sequence is always sorted ascending by
/// port. Cancelling the token stops new probes from being issued; results
/// already obtained (including at most the in-flight ones) are still
/// delivered and returned.
pub async fn scan(
    target: &ScanTarget,
    cancel: CancellationToken,
    on_result: impl FnMut(&PortResult, ScanProgress),
) -> Result<Vec<PortResult>> {
    scan_with_concurrency(target, DEFAULT_CONCURRENCY, cancel, on_result).await
}

/// Variant with an explicit concurrency bound (clamped to 1..=512).
/// A bound of 1 probes one port at a time.
pub async fn scan_with_concurrency(
    target: &ScanTarget,
    concurrency: usize,
    cancel: CancellationToken,
    mut on_result: impl FnMut(&PortResult, ScanProgress),
) -> Result<Vec<PortResult>> {
    if target.host.trim().is_empty() {
        bail!("target host must not be empty");
    }
    if target.start_port == 0 || target.start_port > target.end_port {
        bail!(
            "invalid port range {}-{}",
            target.start_port,
            target.end_port
        );
    }
    if target.timeout.is_zero() {
        bail!("timeout must be positive");
    }

    let total = target.port_count();
    let host: Arc<str> = Arc::from(target.host.as_str());
    let timeout = target.timeout;

    let sem = Arc::new(Semaphore::new(concurrency.clamp(1, MAX_CONCURRENCY)));
    // Sized to the whole range so probe tasks never wait on the consumer.
    let (tx, mut rx) = mpsc::channel::<PortResult>(total as usize);
    let mut set = JoinSet::new();

    for port in target.start_port..=target.end_port {
        if cancel.is_cancelled() {
            break;
        }
        let sem = sem.clone();
        let tx = tx.clone();
        let cancel = cancel.clone();
        let host = host.clone();
        set.spawn(async move {
            let _permit = sem.acquire_owned().await.expect("semaphore in scope");
            // Re-check after waiting for a permit so a stop request issued
            // mid-scan halts queued ports without probing them.
            if cancel.is_cancelled() {
                return;
            }
            let result = probe::connect(&host, port, timeout).await;
            let _ = tx.send(result).await;
        });
    }
    drop(tx);

    let mut results = Vec::with_capacity(total as usize);
    let mut completed = 0u32;
    while let Some(result) = rx.recv().await {
        completed += 1;
        on_result(&result, ScanProgress { completed, total });
        results.push(result);
    }
    while set.join_next().await.is_some() {}

    results.sort_unstable_by_key(|r| r.port);
    Ok(results)
}
