//! Ephemeris oracle contract.
//!
//! Acquiring a body's state at an epoch is an external concern (SPICE
//! kernels in the original tool chain). The exporters only need the
//! query seam: `state_at(target, observer, frame, aberration, epoch)`
//! returning a 6-vector in meters / meters per second. One query is
//! made per retained (downsampled) epoch, which bounds the call count.
//!
//! [`TabulatedEphemeris`] is a file-backed stand-in for mission setups
//! where the oracle's output has been sampled to a table ahead of time.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ShieldError, ShieldResult};
use crate::trajectory::TrajectorySeries;

/// Aberration correction requested from the oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aberration {
    /// Geometric states, no correction.
    #[default]
    None,
    /// Light-time correction.
    LightTime,
    /// Light-time plus stellar aberration.
    LightTimeStellar,
}

impl fmt::Display for Aberration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::LightTime => "LT",
            Self::LightTimeStellar => "LT+S",
        };
        f.write_str(name)
    }
}

/// Query seam for the external ephemeris oracle.
pub trait Ephemeris {
    /// State of `target` relative to `observer` in `frame` at the given
    /// epoch, as `[x, y, z, vx, vy, vz]` in meters / meters per second.
    ///
    /// # Errors
    ///
    /// Implementations report unknown body pairs and epochs they cannot
    /// serve; such failures abort the calling export, not its sibling.
    fn state_at(
        &self,
        target: &str,
        observer: &str,
        frame: &str,
        aberration: Aberration,
        epoch_seconds: f64,
    ) -> ShieldResult<[f64; 6]>;
}

/// Table-backed ephemeris: one state series per (target, observer)
/// pair, linearly interpolated between bracketing epochs.
#[derive(Debug, Default)]
pub struct TabulatedEphemeris {
    tables: HashMap<(String, String), TrajectorySeries>,
}

impl TabulatedEphemeris {
    /// Create an empty ephemeris.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state series for a body pair.
    pub fn insert_table(
        &mut self,
        target: impl Into<String>,
        observer: impl Into<String>,
        series: TrajectorySeries,
    ) {
        self.tables.insert((target.into(), observer.into()), series);
    }

    /// Number of registered body pairs.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl Ephemeris for TabulatedEphemeris {
    fn state_at(
        &self,
        target: &str,
        observer: &str,
        _frame: &str,
        _aberration: Aberration,
        epoch_seconds: f64,
    ) -> ShieldResult<[f64; 6]> {
        let series = self
            .tables
            .get(&(target.to_string(), observer.to_string()))
            .ok_or_else(|| ShieldError::EphemerisUnknownPair {
                target: target.to_string(),
                observer: observer.to_string(),
            })?;

        let states = series.states();
        let out_of_range = || ShieldError::EphemerisOutOfRange {
            target: target.to_string(),
            observer: observer.to_string(),
            epoch_seconds,
        };

        let first = states.first().ok_or_else(&out_of_range)?;
        let last = states.last().ok_or_else(&out_of_range)?;
        if epoch_seconds < first.epoch_seconds || epoch_seconds > last.epoch_seconds {
            return Err(out_of_range());
        }

        // Bracketing pair by binary search on epoch.
        let idx = states.partition_point(|s| s.epoch_seconds <= epoch_seconds);
        let hi = &states[idx.min(states.len() - 1)];
        let lo = &states[idx.saturating_sub(1)];

        let lo6 = lo.as_state6();
        if (hi.epoch_seconds - lo.epoch_seconds).abs() < f64::EPSILON {
            return Ok(lo6);
        }

        let t = (epoch_seconds - lo.epoch_seconds) / (hi.epoch_seconds - lo.epoch_seconds);
        let hi6 = hi.as_state6();
        let mut state = [0.0; 6];
        for (i, value) in state.iter_mut().enumerate() {
            *value = lo6[i] + t * (hi6[i] - lo6[i]);
        }
        Ok(state)
    }
}
