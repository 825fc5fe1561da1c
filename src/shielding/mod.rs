//! Fluence and shielding-thickness model.
//!
//! Converts electron flux to mission fluence, applies an empirical
//! aluminum range fit per energy bin, and sizes a design wall thickness
//! from the highest-energy bin whose fluence exceeds the hazard
//! threshold, with a 20% safety margin.
//!
//! The range fit is a deliberate two-regime model with an exact boundary
//! at 2.5 MeV; the branches are numerically close there (~1.219 g/cm^2)
//! but the boundary must not be smoothed.

use serde::Serialize;

use crate::error::{ShieldError, ShieldResult};
use crate::flux::FluxRecord;

/// Seconds per day used for fluence integration.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Energy floor (MeV) below which records are physically irrelevant and
/// excluded from all downstream computation. The boundary is inclusive.
pub const MIN_RELEVANT_ENERGY_MEV: f64 = 0.04;

/// Fluence (#/cm^2) above which an energy bin counts as hazardous.
pub const HAZARD_FLUENCE_PER_CM2: f64 = 1e9;

/// Aluminum density in g/cm^3, for areal density -> thickness conversion.
pub const ALUMINUM_DENSITY_G_CM3: f64 = 2.70;

/// Multiplier applied to the raw design thickness (20% margin).
pub const SAFETY_FACTOR: f64 = 1.2;

/// Structural minimum wall (mm) used when no bin is hazardous.
pub const FALLBACK_THICKNESS_MM: f64 = 2.0;

/// Hazard energy (MeV) reported for a benign environment. A fixed floor,
/// not derived from data.
pub const FALLBACK_HAZARD_ENERGY_MEV: f64 = 0.5;

/// Boundary (MeV) between the two range-fit regimes. Exact; `E >= 2.5`
/// selects the high-energy branch.
pub const REGIME_BOUNDARY_MEV: f64 = 2.5;

/// Regime of the empirical electron-range fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRegime {
    /// Exponential approximation below 2.5 MeV.
    LowEnergy,
    /// Linear approximation at and above 2.5 MeV.
    HighEnergy,
}

impl RangeRegime {
    /// Select the regime for an energy in MeV.
    #[must_use]
    pub fn for_energy(energy_mev: f64) -> Self {
        if energy_mev < REGIME_BOUNDARY_MEV {
            Self::LowEnergy
        } else {
            Self::HighEnergy
        }
    }
}

/// Aluminum-equivalent areal density (g/cm^2) needed to stop electrons
/// of the given energy (MeV).
///
/// Low regime: `0.412 * E^(1.265 - 0.0954 ln E)`, with `E == 0`
/// mapped to zero to guard `ln(0)`. High regime: `0.530 E - 0.106`.
#[must_use]
pub fn areal_density_g_cm2(energy_mev: f64) -> f64 {
    match RangeRegime::for_energy(energy_mev) {
        RangeRegime::LowEnergy => {
            if energy_mev > 0.0 {
                0.412 * energy_mev.powf(1.265 - 0.0954 * energy_mev.ln())
            } else {
                0.0
            }
        }
        RangeRegime::HighEnergy => 0.530 * energy_mev - 0.106,
    }
}

/// Convert areal density (g/cm^2) to aluminum thickness in millimeters.
#[must_use]
pub fn thickness_mm(areal_density: f64) -> f64 {
    (areal_density / ALUMINUM_DENSITY_G_CM3) * 10.0
}

/// A flux record integrated over the mission duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluenceRecord {
    /// Particle energy in MeV, carried forward from the flux record.
    pub energy_mev: f64,
    /// Cumulative fluence in #/cm^2 over the mission.
    pub fluence_per_cm2: f64,
}

/// Shielding requirement derived for one retained energy bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShieldingRecord {
    /// Particle energy in MeV.
    pub energy_mev: f64,
    /// Cumulative fluence in #/cm^2 over the mission.
    pub fluence_per_cm2: f64,
    /// Required areal density in g/cm^2 (aluminum equivalent).
    pub areal_density_g_cm2: f64,
    /// Required aluminum thickness in mm.
    pub thickness_mm: f64,
}

/// Terminal output of the shielding pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShieldingAnalysis {
    /// Full per-bin record sequence, for inspection and plotting by
    /// external collaborators.
    pub records: Vec<ShieldingRecord>,
    /// Highest hazardous energy, or the benign-environment floor.
    pub max_hazard_energy_mev: f64,
    /// Design thickness before the safety margin, in mm.
    pub raw_thickness_mm: f64,
    /// Recommended thickness with the safety margin applied, in mm.
    pub recommended_thickness_mm: f64,
    /// Whether any bin exceeded the hazard fluence threshold.
    pub hazardous: bool,
}

impl ShieldingAnalysis {
    /// Render the record sequence as CSV for the plotting collaborator.
    #[must_use]
    pub fn records_csv(&self) -> String {
        let mut out =
            String::from("energy_mev,fluence_per_cm2,areal_density_g_cm2,thickness_mm\n");
        for r in &self.records {
            out.push_str(&format!(
                "{},{},{},{}\n",
                r.energy_mev, r.fluence_per_cm2, r.areal_density_g_cm2, r.thickness_mm
            ));
        }
        out
    }
}

/// Fluence/shielding model for a fixed mission duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldingModel {
    mission_duration_days: f64,
}

impl ShieldingModel {
    /// Create a model for the given mission duration in days.
    ///
    /// # Errors
    ///
    /// Returns [`ShieldError::InvalidDuration`] for a non-positive or
    /// non-finite duration, which would silently collapse fluence and
    /// defeat the hazard rule.
    pub fn new(mission_duration_days: f64) -> ShieldResult<Self> {
        if !mission_duration_days.is_finite() || mission_duration_days <= 0.0 {
            return Err(ShieldError::InvalidDuration {
                days: mission_duration_days,
            });
        }
        Ok(Self {
            mission_duration_days,
        })
    }

    /// Mission duration in days.
    #[must_use]
    pub const fn mission_duration_days(&self) -> f64 {
        self.mission_duration_days
    }

    /// Integrate one flux record over the mission duration.
    #[must_use]
    pub fn fluence(&self, record: &FluxRecord) -> FluenceRecord {
        FluenceRecord {
            energy_mev: record.energy_mev,
            fluence_per_cm2: record.flux_per_cm2_s * self.mission_duration_days * SECONDS_PER_DAY,
        }
    }

    /// Run the full derivation: fluence, relevance cut, range fit,
    /// hazard selection, safety margin.
    #[must_use]
    pub fn analyze(&self, records: &[FluxRecord]) -> ShieldingAnalysis {
        let shielding: Vec<ShieldingRecord> = records
            .iter()
            .map(|r| self.fluence(r))
            .filter(|f| f.energy_mev >= MIN_RELEVANT_ENERGY_MEV)
            .map(|f| {
                let areal = areal_density_g_cm2(f.energy_mev);
                ShieldingRecord {
                    energy_mev: f.energy_mev,
                    fluence_per_cm2: f.fluence_per_cm2,
                    areal_density_g_cm2: areal,
                    thickness_mm: thickness_mm(areal),
                }
            })
            .collect();

        // Highest-energy bin whose fluence exceeds the hazard threshold
        // drives the design; first record wins on an exact energy tie.
        let mut worst: Option<&ShieldingRecord> = None;
        for record in &shielding {
            if record.fluence_per_cm2 > HAZARD_FLUENCE_PER_CM2
                && worst.is_none_or(|w| record.energy_mev > w.energy_mev)
            {
                worst = Some(record);
            }
        }

        let (max_hazard_energy_mev, raw_thickness_mm, hazardous) = match worst {
            Some(record) => (record.energy_mev, record.thickness_mm, true),
            None => (FALLBACK_HAZARD_ENERGY_MEV, FALLBACK_THICKNESS_MM, false),
        };

        ShieldingAnalysis {
            records: shielding,
            max_hazard_energy_mev,
            raw_thickness_mm,
            recommended_thickness_mm: raw_thickness_mm * SAFETY_FACTOR,
            hazardous,
        }
    }
}
