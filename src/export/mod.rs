//! Trajectory export subsystem.
//!
//! Two externally-defined serializations of the same source trajectory:
//! SPENVIS coordinate-generator upload text and a CCSDS-OEM-like file.
//! Each exporter owns its downsampling stride, queries the ephemeris
//! oracle once per retained epoch, composes states into the reference
//! frame, and writes a fully-overwritten output file. The two exports
//! are independent: a failure in one never aborts the other.

pub mod oem;
pub mod spenvis;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{ShieldError, ShieldResult};

/// Julian date of the J2000 epoch (2000-01-01 12:00:00 TT).
pub const JD_J2000: f64 = 2_451_545.0;

/// Seconds per day for the Julian-date conversion.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian date for an epoch measured in seconds from the propagation's
/// time origin, consistent with the J2000 convention.
#[must_use]
pub fn julian_date(epoch_seconds: f64) -> f64 {
    JD_J2000 + epoch_seconds / SECONDS_PER_DAY
}

/// Calendar instant the propagation's zero epoch corresponds to
/// (2000-01-01 12:00:00).
///
/// # Errors
///
/// Only if the fixed date fails to construct, which would be a defect in
/// the calendar backend; surfaced as a config error rather than panicking.
pub fn epoch_base_date() -> ShieldResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .ok_or_else(|| ShieldError::config("J2000 base date out of range"))
}

/// Calendar timestamp for an epoch, at millisecond resolution.
///
/// # Errors
///
/// Epochs too large for the calendar backend are a config error.
pub fn epoch_timestamp(epoch_seconds: f64) -> ShieldResult<NaiveDateTime> {
    let millis = (epoch_seconds * 1000.0).round() as i64;
    epoch_base_date()?
        .checked_add_signed(chrono::Duration::milliseconds(millis))
        .ok_or_else(|| {
            ShieldError::config(format!("epoch {epoch_seconds} s overflows the calendar"))
        })
}

/// How to recompose spacecraft states for export: which body the
/// propagation is centered on, which body the output should be relative
/// to, and the oracle frame to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameQuery {
    /// Body the propagated states are relative to (e.g. Ganymede).
    pub primary_body: String,
    /// Body the exported states should be relative to (e.g. Jupiter).
    pub reference_body: String,
    /// Oracle reference frame name (e.g. J2000).
    pub frame: String,
    /// Aberration correction requested from the oracle.
    pub aberration: crate::ephemeris::Aberration,
}

impl FrameQuery {
    /// Query the primary body's state relative to the reference body.
    ///
    /// # Errors
    ///
    /// Propagates oracle failures; these abort the calling export only.
    pub fn primary_state(
        &self,
        oracle: &dyn crate::ephemeris::Ephemeris,
        epoch_seconds: f64,
    ) -> ShieldResult<[f64; 6]> {
        oracle.state_at(
            &self.primary_body,
            &self.reference_body,
            &self.frame,
            self.aberration,
            epoch_seconds,
        )
    }
}

/// Outcome of one export run, for user-facing reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Number of epochs in the source series.
    pub source_len: usize,
    /// Number of epochs retained after downsampling.
    pub retained_len: usize,
}
