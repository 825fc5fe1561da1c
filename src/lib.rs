//! # radshield
//!
//! Electron shielding sizing and trajectory export for space-environment
//! analysis tools.
//!
//! Two independent pipelines:
//! - Environment analysis: parse a loosely-formatted flux table, convert
//!   flux to mission fluence, and size an aluminum shielding wall from an
//!   empirical electron-range model with a hazard threshold and safety
//!   margin.
//! - Trajectory export: downsample a dense propagated state history,
//!   recompose spacecraft states into the parent-body frame via an
//!   ephemeris oracle, and emit SPENVIS upload text and CCSDS-OEM files.
//!
//! The orbit propagation itself is an external collaborator; this crate
//! consumes its output as an ordered epoch -> state mapping.
//!
//! ## Example
//!
//! ```rust
//! use radshield::prelude::*;
//!
//! let (records, _summary) = scan_text("0.1 3.2e8\n1.0 5.5e5\n");
//! let model = ShieldingModel::new(30.0).unwrap();
//! let analysis = model.analyze(&records);
//! assert!(analysis.recommended_thickness_mm > 0.0);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Empirical fit is written as published
    clippy::imprecise_flops,   // Numerical code choices are intentional
    clippy::missing_const_for_fn
)]

pub mod cli;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod export;
pub mod flux;
pub mod shielding;
pub mod trajectory;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{MissionConfig, MissionConfigBuilder};
    pub use crate::ephemeris::{Aberration, Ephemeris, TabulatedEphemeris};
    pub use crate::error::{ShieldError, ShieldResult};
    pub use crate::export::oem::OemExporter;
    pub use crate::export::spenvis::SpenvisTextExporter;
    pub use crate::flux::{scan_text, FluxRecord, ScanSummary};
    pub use crate::shielding::{ShieldingAnalysis, ShieldingModel, ShieldingRecord};
    pub use crate::trajectory::frame::{compose, ComposedState};
    pub use crate::trajectory::{StateVector, TrajectorySeries};
}

/// Re-export for public API
pub use error::{ShieldError, ShieldResult};
