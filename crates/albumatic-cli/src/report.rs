//! Textual rendering of scan and run reports.

use albumatic_core::{RunReport, SpecOutcome, SpecReport, SkippedMarker};

/// Render one specification's outcome as a single report line.
pub fn format_outcome(report: &SpecReport) -> String {
    let name = &report.album_name;
    match &report.outcome {
        SpecOutcome::Created { assets_added } => {
            format!("created '{name}' with {assets_added} asset(s)")
        }
        SpecOutcome::AssetsAdded { added } => {
            format!("added {added} asset(s) to '{name}'")
        }
        SpecOutcome::NoChange => format!("'{name}' is up to date"),
        SpecOutcome::WouldCreate { asset_count } => {
            format!("would create '{name}' with {asset_count} asset(s)")
        }
        SpecOutcome::WouldAddAssets { delta } => {
            format!("would add {delta} asset(s) to '{name}'")
        }
        SpecOutcome::NameCollision => {
            format!("ERROR '{name}': another directory resolves to the same album name")
        }
        SpecOutcome::NameFailed { reason } => format!("ERROR '{name}': {reason}"),
        SpecOutcome::AssetsFailed { reason } => format!("ERROR '{name}': {reason}"),
        SpecOutcome::CreateFailed { reason } => {
            format!("ERROR '{name}': album creation failed: {reason}")
        }
        SpecOutcome::AddFailed { reason } => {
            format!("ERROR '{name}': adding assets failed: {reason}")
        }
        SpecOutcome::PartialAdd {
            added,
            remaining,
            reason,
        } => format!(
            "ERROR '{name}': added {added} asset(s), {remaining} not attempted: {reason}"
        ),
    }
}

/// Print markers the scanner had to skip.
pub fn print_skipped(skipped: &[SkippedMarker]) {
    for skip in skipped {
        eprintln!(
            "WARNING skipped marker in {}: {}",
            skip.source_path.display(),
            skip.reason
        );
    }
}

/// Print the run report. At `-v` and above each line carries the source
/// directory; the summary is always printed.
pub fn print_report(report: &RunReport, verbose: u8) {
    if report.albums_deleted > 0 {
        println!("deleted {} existing album(s)", report.albums_deleted);
    }

    for spec_report in &report.reports {
        if verbose >= 1 {
            println!(
                "{}  [{}]",
                format_outcome(spec_report),
                spec_report.source_path.display()
            );
        } else {
            println!("{}", format_outcome(spec_report));
        }
    }

    let failures = report.failures();
    println!(
        "{} album(s) processed, {} failure(s)",
        report.reports.len(),
        failures
    );
}
