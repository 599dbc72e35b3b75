//! CLI entry point - the composition root.
//!
//! Parses arguments, wires the Immich client into the reconciler via
//! bootstrap, and runs one sync pass (or a fixed-interval loop).

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use albumatic_cli::{Cli, CliContext, bootstrap, report};
use albumatic_core::scan;

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "albumatic_core=info,albumatic_cli=info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// One full scan-and-reconcile pass.
///
/// Errors here are the fatal ones: an inaccessible library root or a failed
/// purge/listing. Per-album failures land in the printed report instead.
async fn run_once(ctx: &CliContext) -> anyhow::Result<()> {
    let scan_report = scan(&ctx.library_root, &ctx.options.marker_name)
        .context("failed to scan library root")?;
    report::print_skipped(&scan_report.skipped);
    info!(
        "found {} album marker(s) under {}",
        scan_report.specs.len(),
        ctx.library_root.display()
    );

    let run_report = ctx.reconciler.run(&scan_report.specs, &ctx.options).await?;
    report::print_report(&run_report, ctx.verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = bootstrap(&cli)?;

    let Some(interval) = cli.interval else {
        return run_once(&ctx).await;
    };

    info!("syncing every {interval}s, press Ctrl-C to stop");
    loop {
        run_once(&ctx).await?;
        tokio::time::sleep(Duration::from_secs(interval)).await;
    }
}
