//! Permissive parser for environment flux tables.
//!
//! SPENVIS-style data files mix column headers, block markers, and
//! delimiter conventions. Rather than model every header variant, the
//! scanner accepts any line whose first two comma/whitespace-delimited
//! tokens parse as floats and silently skips everything else. Leniency
//! is the contract here, not a fallback: skipped lines are never errors.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ShieldError, ShieldResult};

/// A single parsed environment record: differential or integral electron
/// flux at one energy bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluxRecord {
    /// Particle energy in MeV.
    pub energy_mev: f64,
    /// Electron flux in particles per cm^2 per second.
    pub flux_per_cm2_s: f64,
}

/// Outcome of scanning one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineScan {
    /// Line carried at least two numeric tokens.
    Record(FluxRecord),
    /// Header, marker, blank, or otherwise non-numeric line.
    Skipped,
}

/// Diagnostic counts from a scan, for user-facing reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Total lines read from the input.
    pub lines_read: usize,
    /// Lines that produced a record.
    pub records_parsed: usize,
}

/// Scan a single line for an `(energy, flux)` pair.
///
/// Splits on any run of commas and whitespace, drops empty tokens, and
/// interprets the first two tokens as energy (MeV) and flux (#/cm^2/s).
/// Lines with fewer than two tokens or non-numeric leading tokens are
/// `Skipped`, never an error.
#[must_use]
pub fn scan_line(line: &str) -> LineScan {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
        return LineScan::Skipped;
    };

    match (first.parse::<f64>(), second.parse::<f64>()) {
        (Ok(energy_mev), Ok(flux_per_cm2_s)) => LineScan::Record(FluxRecord {
            energy_mev,
            flux_per_cm2_s,
        }),
        _ => LineScan::Skipped,
    }
}

/// Scan a whole file body, collecting records and counts.
#[must_use]
pub fn scan_text(text: &str) -> (Vec<FluxRecord>, ScanSummary) {
    let mut records = Vec::new();
    let mut summary = ScanSummary::default();

    for line in text.lines() {
        summary.lines_read += 1;
        if let LineScan::Record(record) = scan_line(line) {
            records.push(record);
            summary.records_parsed += 1;
        }
    }

    (records, summary)
}

/// Load and scan an environment data file.
///
/// # Errors
///
/// - [`ShieldError::DataNotFound`] if the file cannot be located.
/// - [`ShieldError::EmptyDataset`] if no line yielded a record.
///
/// Both are terminal for the shielding pipeline; no partial output is
/// produced.
pub fn load<P: AsRef<Path>>(path: P) -> ShieldResult<(Vec<FluxRecord>, ScanSummary)> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShieldError::DataNotFound {
                path: PathBuf::from(path),
            }
        } else {
            ShieldError::Io(e)
        }
    })?;

    let (records, summary) = scan_text(&text);
    if records.is_empty() {
        return Err(ShieldError::EmptyDataset {
            path: PathBuf::from(path),
            lines_read: summary.lines_read,
        });
    }

    Ok((records, summary))
}
