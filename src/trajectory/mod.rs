//! Propagated trajectory series and fixed-stride downsampling.
//!
//! The propagation itself is an external collaborator; its output arrives
//! here as an ordered, time-ascending epoch -> state mapping with a
//! uniform nominal step. That uniformity is assumed, not re-verified:
//! downsampling is index decimation, not time-based resampling.

pub mod frame;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ShieldError, ShieldResult};

/// Spacecraft state at one epoch, in the propagation's native units
/// (meters, meters per second). Frame and origin are pipeline-wide
/// configuration, not per-record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    /// Seconds from the propagation's time origin.
    pub epoch_seconds: f64,
    /// Position in meters.
    pub position_m: [f64; 3],
    /// Velocity in meters per second.
    pub velocity_mps: [f64; 3],
}

impl StateVector {
    /// Build from an epoch and a packed 6-vector.
    #[must_use]
    pub fn from_state6(epoch_seconds: f64, state: [f64; 6]) -> Self {
        Self {
            epoch_seconds,
            position_m: [state[0], state[1], state[2]],
            velocity_mps: [state[3], state[4], state[5]],
        }
    }

    /// Pack position and velocity into a 6-vector.
    #[must_use]
    pub fn as_state6(&self) -> [f64; 6] {
        [
            self.position_m[0],
            self.position_m[1],
            self.position_m[2],
            self.velocity_mps[0],
            self.velocity_mps[1],
            self.velocity_mps[2],
        ]
    }
}

/// Ordered, time-ascending series of state vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectorySeries {
    states: Vec<StateVector>,
}

impl TrajectorySeries {
    /// Wrap an already-ordered state history.
    #[must_use]
    pub fn from_states(states: Vec<StateVector>) -> Self {
        Self { states }
    }

    /// Load a state history file: one state per line, seven numeric
    /// tokens (epoch, x, y, z, vx, vy, vz in meters / meters per
    /// second), comma/whitespace delimited. Non-conforming lines are
    /// skipped under the same leniency contract as the flux scanner.
    ///
    /// # Errors
    ///
    /// I/O errors propagate; a file that yields no states at all is
    /// [`ShieldError::EmptyTrajectory`].
    pub fn load<P: AsRef<Path>>(path: P) -> ShieldResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let mut states = Vec::new();
        for line in text.lines() {
            if let Some(state) = scan_state_line(line) {
                states.push(state);
            }
        }

        if states.is_empty() {
            return Err(ShieldError::EmptyTrajectory {
                path: PathBuf::from(path),
            });
        }
        Ok(Self { states })
    }

    /// Number of retained epochs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over states in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, StateVector> {
        self.states.iter()
    }

    /// First state, if any.
    #[must_use]
    pub fn first(&self) -> Option<&StateVector> {
        self.states.first()
    }

    /// Last state, if any.
    #[must_use]
    pub fn last(&self) -> Option<&StateVector> {
        self.states.last()
    }

    /// States as a slice.
    #[must_use]
    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    /// Fixed-stride decimation: every `stride`-th state starting at
    /// index 0, order preserved, no interpolation. A series of length N
    /// yields `ceil(N / stride)` states.
    ///
    /// # Errors
    ///
    /// [`ShieldError::InvalidStride`] when `stride` is zero.
    pub fn downsample(&self, stride: usize) -> ShieldResult<Self> {
        if stride == 0 {
            return Err(ShieldError::InvalidStride);
        }
        Ok(Self {
            states: self.states.iter().step_by(stride).copied().collect(),
        })
    }
}

impl<'a> IntoIterator for &'a TrajectorySeries {
    type Item = &'a StateVector;
    type IntoIter = std::slice::Iter<'a, StateVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// Scan one state-history line; `None` unless seven floats are found.
fn scan_state_line(line: &str) -> Option<StateVector> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let mut values = [0.0f64; 7];
    for value in &mut values {
        *value = tokens.next()?.parse().ok()?;
    }

    Some(StateVector::from_state6(
        values[0],
        [
            values[1], values[2], values[3], values[4], values[5], values[6],
        ],
    ))
}
