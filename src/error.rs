//! Error types for radshield.
//!
//! All fallible operations return `Result<T, ShieldError>` instead of
//! panicking. Malformed individual data lines are never errors: the flux
//! and trajectory parsers skip them silently as part of their contract,
//! and only a file that yields zero records is fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for radshield operations.
pub type ShieldResult<T> = Result<T, ShieldError>;

/// Unified error type for all radshield operations.
#[derive(Debug, Error)]
pub enum ShieldError {
    // ===== Environment data errors =====
    /// Environment data file could not be located.
    #[error("environment data file not found: {path}")]
    DataNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// File was read but no numeric records were parsed.
    #[error("no numeric records found in {path} ({lines_read} lines scanned)")]
    EmptyDataset {
        /// Path of the scanned file.
        path: PathBuf,
        /// Number of lines read before giving up.
        lines_read: usize,
    },

    /// Mission duration must be positive; a zero or negative duration
    /// collapses fluence and defeats the hazard rule.
    #[error("invalid mission duration: {days} days (must be positive and finite)")]
    InvalidDuration {
        /// Rejected duration in days.
        days: f64,
    },

    // ===== Trajectory errors =====
    /// State-history file yielded no state vectors.
    #[error("no state vectors found in {path}")]
    EmptyTrajectory {
        /// Path of the scanned file.
        path: PathBuf,
    },

    /// Downsampling stride of zero.
    #[error("downsampling stride must be at least 1")]
    InvalidStride,

    // ===== Ephemeris oracle errors =====
    /// No table registered for the requested body pair.
    #[error("no ephemeris table for {target} relative to {observer}")]
    EphemerisUnknownPair {
        /// Requested target body.
        target: String,
        /// Requested observer body.
        observer: String,
    },

    /// Requested epoch outside the tabulated span.
    #[error(
        "epoch {epoch_seconds} s outside ephemeris span for {target} relative to {observer}"
    )]
    EphemerisOutOfRange {
        /// Requested target body.
        target: String,
        /// Requested observer body.
        observer: String,
        /// Requested epoch in seconds.
        epoch_seconds: f64,
    },

    // ===== Configuration errors =====
    /// Invalid configuration parameter.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShieldError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error aborts the shielding pipeline outright
    /// (missing or empty input, bad duration).
    #[must_use]
    pub const fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            Self::DataNotFound { .. }
                | Self::EmptyDataset { .. }
                | Self::InvalidDuration { .. }
        )
    }
}
