//! CLI output formatting.
//!
//! All user-facing printing lives here; the library modules return
//! value types and never print.

use std::path::Path;

use crate::export::ExportSummary;
use crate::flux::ScanSummary;
use crate::shielding::ShieldingAnalysis;

/// Print version information.
pub fn print_version() {
    println!("radshield {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"radshield - Electron shielding sizing and trajectory export

USAGE:
    radshield <COMMAND> [OPTIONS]

COMMANDS:
    shield <data.txt>           Size the shielding wall from a flux table
        --days <N>              Mission duration in days (default: 30)
        --records <file.csv>    Dump the per-bin record sequence as CSV

    export <mission.yaml>       Emit SPENVIS and OEM trajectory files
        --spenvis-only          Only the SPENVIS text export
        --oem-only              Only the OEM export

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    radshield shield spenvis_sao.txt --days 30
    radshield shield spenvis_sao.txt --records shielding.csv
    radshield export mission.yaml
"
    );
}

/// Print the scan diagnostics for an environment data file.
pub fn print_scan_summary(path: &Path, summary: &ScanSummary) {
    println!("Reading {} ...", path.display());
    println!(
        "Scanned {} lines, parsed {} data points.",
        summary.lines_read, summary.records_parsed
    );
}

/// Print the shielding analysis result.
pub fn print_shielding_report(duration_days: f64, analysis: &ShieldingAnalysis) {
    println!("--- SHIELDING OPTIMIZATION ({duration_days} DAYS) ---");
    if analysis.hazardous {
        println!(
            "Max hazardous energy detected: {} MeV",
            analysis.max_hazard_energy_mev
        );
    } else {
        println!(
            "No energy bin exceeds the hazard fluence; using the structural minimum (reported floor: {} MeV)",
            analysis.max_hazard_energy_mev
        );
    }
    println!("Raw required thickness: {:.2} mm", analysis.raw_thickness_mm);
    println!(
        "Recommended thickness (with 20% safety margin): {:.2} mm",
        analysis.recommended_thickness_mm
    );
}

/// Print the outcome of one export.
pub fn print_export_summary(label: &str, output: &Path, summary: &ExportSummary) {
    println!(
        "{label}: reduced {} points to {} points, saved to '{}'",
        summary.source_len,
        summary.retained_len,
        output.display()
    );
}

/// Print a failed export without aborting the sibling export.
pub fn print_export_failure(label: &str, error: &crate::error::ShieldError) {
    eprintln!("{label} export failed: {error}");
}
