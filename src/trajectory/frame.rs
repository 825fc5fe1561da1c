//! Reference-frame composition for export.
//!
//! The propagation delivers spacecraft states relative to the primary
//! body; the export formats want them relative to the reference body
//! (e.g. Jupiter for a Ganymede orbiter). Composition is elementwise
//! vector addition of two states sampled at the same epoch, with a
//! meters -> kilometers conversion. Matching epochs are the caller's
//! responsibility.

use serde::Serialize;

use crate::trajectory::StateVector;

/// Meters per kilometer, for the export unit conversion.
pub const METERS_PER_KM: f64 = 1000.0;

/// Spacecraft state relative to the reference body, in export units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComposedState {
    /// Seconds from the propagation's time origin.
    pub epoch_seconds: f64,
    /// Position in kilometers.
    pub position_km: [f64; 3],
    /// Velocity in kilometers per second.
    pub velocity_km_s: [f64; 3],
}

/// Compose a spacecraft state (relative to the primary body) with the
/// primary body's state (relative to the reference body). Pure and
/// total; both inputs are meters / meters per second at a shared epoch.
#[must_use]
pub fn compose(
    spacecraft_wrt_primary: &StateVector,
    primary_wrt_reference: &[f64; 6],
) -> ComposedState {
    let sc = spacecraft_wrt_primary;
    ComposedState {
        epoch_seconds: sc.epoch_seconds,
        position_km: [
            (sc.position_m[0] + primary_wrt_reference[0]) / METERS_PER_KM,
            (sc.position_m[1] + primary_wrt_reference[1]) / METERS_PER_KM,
            (sc.position_m[2] + primary_wrt_reference[2]) / METERS_PER_KM,
        ],
        velocity_km_s: [
            (sc.velocity_mps[0] + primary_wrt_reference[3]) / METERS_PER_KM,
            (sc.velocity_mps[1] + primary_wrt_reference[4]) / METERS_PER_KM,
            (sc.velocity_mps[2] + primary_wrt_reference[5]) / METERS_PER_KM,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_elementwise_addition() {
        let sc = StateVector {
            epoch_seconds: 60.0,
            position_m: [1000.0, 2000.0, 3000.0],
            velocity_mps: [100.0, 200.0, 300.0],
        };
        let primary = [10_000.0, 20_000.0, 30_000.0, 1000.0, 2000.0, 3000.0];

        let composed = compose(&sc, &primary);
        assert_eq!(composed.position_km, [11.0, 22.0, 33.0]);
        assert_eq!(composed.velocity_km_s, [1.1, 2.2, 3.3]);
        assert!((composed.epoch_seconds - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compose_zero_primary_is_unit_conversion() {
        let sc = StateVector {
            epoch_seconds: 0.0,
            position_m: [1500.0, 0.0, -500.0],
            velocity_mps: [0.0, -250.0, 0.0],
        };
        let composed = compose(&sc, &[0.0; 6]);
        assert_eq!(composed.position_km, [1.5, 0.0, -0.5]);
        assert_eq!(composed.velocity_km_s, [0.0, -0.25, 0.0]);
    }
}
