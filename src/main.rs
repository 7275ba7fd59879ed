use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use ::time::{format_description::well_known, OffsetDateTime};

use port_scan_rs::types::{parse_port_range, PortResult, ScanSummary, ScanTarget, Status};
use port_scan_rs::{scanner, summary};

/// port-scan-rs — Cancellable async TCP connect port scanner with streaming per-port results.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "port-scan-rs",
    version,
    about = "Cancellable async TCP connect port scanner with streaming per-port results.",
    long_about = None
)]
struct Cli {
    /// Target host (hostname or IP address).
    target: String,

    /// Port range to scan: single port (e.g., 80) or inclusive range (e.g., 1-1024).
    #[arg(long, default_value = "1-1024")]
    ports: String,

    /// Socket connect timeout in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = 1000)]
    timeout_ms: u64,

    /// Max concurrent TCP connect attempts.
    #[arg(long, default_value_t = scanner::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Print every probed port, not just open ones.
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Write the full scan report as pretty JSON to this path (optional).
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Full scan report as written to the JSON output.
#[derive(Debug, Serialize)]
struct ScanReport {
    target: String,
    start_port: u16,
    end_port: u16,
    timeout_ms: u64,
    started_at: String,
    finished_at: String,
    cancelled: bool,
    results: Vec<PortResult>,
    summary: ScanSummary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (start_port, end_port) = parse_port_range(&cli.ports).context("invalid --ports value")?;
    let target = ScanTarget::new(
        cli.target.clone(),
        start_port,
        end_port,
        Duration::from_millis(cli.timeout_ms),
    )?;

    println!("port-scan-rs configuration:");
    println!("  target       : {}", target.host);
    println!("  ports        : {}-{}", target.start_port, target.end_port);
    println!("  timeout_ms   : {}", cli.timeout_ms);
    println!("  concurrency  : {}", cli.concurrency);
    println!(
        "  output       : {}",
        cli.output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string())
    );

    // Ctrl-C requests a cooperative stop; in-flight probes finish and the
    // partial results are still reported.
    let cancel = CancellationToken::new();
    let cancel_ctrlc = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        eprintln!("\nStop requested; finishing in-flight probes...");
        cancel_ctrlc.cancel();
    });

    let started_at = now_rfc3339();
    let show_all = cli.all;
    let results = scanner::scan_with_concurrency(
        &target,
        cli.concurrency,
        cancel.clone(),
        |result, progress| {
            if show_all || result.status == Status::Open {
                println!(
                    "[{:>5}/{:>5}] {:>5}/tcp  {:<6}  {:>12}  {}",
                    progress.completed,
                    progress.total,
                    result.port,
                    result.status.to_string(),
                    result.response_time.to_string(),
                    result.service
                );
            }
        },
    )
    .await?;
    let finished_at = now_rfc3339();

    let cancelled = cancel.is_cancelled();
    if cancelled {
        println!(
            "Scan stopped after {} of {} ports.",
            results.len(),
            target.port_count()
        );
    }

    let scan_summary = summary::summarize(&results);
    print_summary(&scan_summary);

    if let Some(path) = cli.output.as_deref() {
        let report = ScanReport {
            target: target.host.clone(),
            start_port: target.start_port,
            end_port: target.end_port,
            timeout_ms: cli.timeout_ms,
            started_at,
            finished_at,
            cancelled,
            results,
            summary: scan_summary,
        };
        if let Err(e) = write_report_json(path, &report) {
            eprintln!("Failed to write JSON to {}: {}", path.display(), e);
        } else {
            println!("Wrote JSON report to {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    println!(
        "\nScanned {} ports: {} open, {} closed, {} error",
        summary.total_scanned, summary.open_count, summary.closed_count, summary.error_count
    );
    if summary.open_ports.is_empty() {
        return;
    }

    let mut service_w = "service".len();
    let mut latency_w = "latency".len();
    for r in &summary.open_ports {
        service_w = service_w.max(r.service.len());
        latency_w = latency_w.max(r.response_time.to_string().len());
    }
    let port_w = 5usize.max("port".len());

    println!(
        "{:>port_w$}  {:>latency_w$}  {:<service_w$}",
        "port",
        "latency",
        "service",
        port_w = port_w,
        latency_w = latency_w,
        service_w = service_w
    );
    println!(
        "{:-<port_w$}  {:-<latency_w$}  {:-<service_w$}",
        "",
        "",
        "",
        port_w = port_w,
        latency_w = latency_w,
        service_w = service_w
    );
    for r in &summary.open_ports {
        println!(
            "{:>port_w$}  {:>latency_w$}  {:<service_w$}",
            r.port,
            r.response_time.to_string(),
            r.service,
            port_w = port_w,
            latency_w = latency_w,
            service_w = service_w
        );
    }
}

fn write_report_json(path: &std::path::Path, report: &ScanReport) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
