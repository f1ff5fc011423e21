//! Pseudo-channel-cut energy estimation.
//!
//! In pseudo-channel-cut mode the monochromator is parked at one energy and the
//! second crystal follows the first without re-optimizing. The parking energy is
//! the one at the angular midpoint of the whole scan range.

use crate::grid::normalize_bounds;
use crate::region::RegionValue;

/// Angle/energy geometry of the monochromator.
///
/// Owned by the hardware layer; this crate only calls it.
pub trait MonochromatorGeometry {
    /// Bragg angle for an absolute energy in eV.
    fn energy_to_angle(&self, energy: f64) -> f64;

    /// Absolute energy in eV for a Bragg angle.
    fn angle_to_energy(&self, angle: f64) -> f64;
}

/// Energy at the angular midpoint between the first and last boundary.
///
/// Returns `e0` itself when `bounds` is empty.
pub fn channel_cut_energy<G: MonochromatorGeometry + ?Sized>(
    geometry: &G,
    e0: f64,
    bounds: &[RegionValue],
) -> f64 {
    let edges = normalize_bounds(bounds);
    let (Some(first), Some(last)) = (edges.first(), edges.last()) else {
        return e0;
    };
    let amin = geometry.energy_to_angle(e0 + first);
    let amax = geometry.energy_to_angle(e0 + last);
    let aave = amin + (amax - amin) / 2.0;
    geometry.angle_to_energy(aave)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionValue::{Energy, Wavenumber};
    use crate::units::k_to_energy;

    /// Angle equal to energy, so the midpoint is the arithmetic mean.
    struct Identity;

    impl MonochromatorGeometry for Identity {
        fn energy_to_angle(&self, energy: f64) -> f64 {
            energy
        }

        fn angle_to_energy(&self, angle: f64) -> f64 {
            angle
        }
    }

    /// Angle proportional to 1/E, like a Bragg angle at small angles.
    struct Reciprocal;

    impl MonochromatorGeometry for Reciprocal {
        fn energy_to_angle(&self, energy: f64) -> f64 {
            1.0e4 / energy
        }

        fn angle_to_energy(&self, angle: f64) -> f64 {
            1.0e4 / angle
        }
    }

    #[test]
    fn test_linear_geometry_gives_mean() {
        let e = channel_cut_energy(&Identity, 7112.0, &[Energy(-200.0), Energy(0.0), Energy(400.0)]);
        assert_eq!(e, 7212.0);
    }

    #[test]
    fn test_wavenumber_bound_is_normalized() {
        let e = channel_cut_energy(&Identity, 7112.0, &[Energy(-200.0), Wavenumber(14.0)]);
        let upper = 7112.0 + k_to_energy(14.0);
        assert!((e - (6912.0 + upper) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_angular_midpoint_is_below_energy_mean() {
        let e = channel_cut_energy(&Reciprocal, 7112.0, &[Energy(-200.0), Energy(800.0)]);
        assert!(e > 6912.0 && e < 7412.0);
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(channel_cut_energy(&Identity, 7112.0, &[]), 7112.0);
    }
}
