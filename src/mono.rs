//! Bragg geometry of a double-crystal silicon monochromator.
//!
//! Used by the command-line tool to preview the pseudo-channel-cut energy
//! without a connection to the beamline. The beamline control layer supplies
//! its own [`MonochromatorGeometry`] with calibrated offsets.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::channel_cut::MonochromatorGeometry;

/// ħc in eV·Å.
pub const HBARC: f64 = 1973.27053324;

/// Silicon lattice constant in Å.
const SI_LATTICE: f64 = 5.4309401;

/// Crystal reflection in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Crystal {
    Si111,
    Si311,
}

impl Crystal {
    /// Lattice-plane spacing `d` in Å.
    pub fn d_spacing(&self) -> f64 {
        let (h, k, l): (f64, f64, f64) = match self {
            Crystal::Si111 => (1.0, 1.0, 1.0),
            Crystal::Si311 => (3.0, 1.0, 1.0),
        };
        SI_LATTICE / (h * h + k * k + l * l).sqrt()
    }
}

impl fmt::Display for Crystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crystal::Si111 => write!(f, "Si(111)"),
            Crystal::Si311 => write!(f, "Si(311)"),
        }
    }
}

impl FromStr for Crystal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "111" | "si111" | "si(111)" => Ok(Crystal::Si111),
            "311" | "si311" | "si(311)" => Ok(Crystal::Si311),
            other => Err(format!("unknown crystal '{other}', expected 111 or 311")),
        }
    }
}

/// Photon wavelength in Å for an energy in eV.
pub fn energy_to_wavelength(energy: f64) -> f64 {
    2.0 * std::f64::consts::PI * HBARC / energy
}

/// Photon energy in eV for a wavelength in Å.
pub fn wavelength_to_energy(wavelength: f64) -> f64 {
    2.0 * std::f64::consts::PI * HBARC / wavelength
}

/// Ideal double-crystal monochromator; angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoubleCrystalMono {
    pub crystal: Crystal,
}

impl DoubleCrystalMono {
    pub fn new(crystal: Crystal) -> Self {
        Self { crystal }
    }

    /// Wavelength in Å selected at a Bragg angle in degrees.
    pub fn wavelength(&self, angle: f64) -> f64 {
        2.0 * self.crystal.d_spacing() * angle.to_radians().sin()
    }
}

impl MonochromatorGeometry for DoubleCrystalMono {
    fn energy_to_angle(&self, energy: f64) -> f64 {
        let ratio = energy_to_wavelength(energy) / (2.0 * self.crystal.d_spacing());
        ratio.asin().to_degrees()
    }

    fn angle_to_energy(&self, angle: f64) -> f64 {
        wavelength_to_energy(self.wavelength(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel_cut::channel_cut_energy;
    use crate::region::RegionValue::{Energy, Wavenumber};

    #[test]
    fn test_d_spacings() {
        assert!((Crystal::Si111.d_spacing() - 3.13556).abs() < 1e-4);
        assert!((Crystal::Si311.d_spacing() - 1.63749).abs() < 1e-4);
    }

    #[test]
    fn test_angle_round_trip() {
        let mono = DoubleCrystalMono::new(Crystal::Si111);
        for e in [4000.0, 7112.0, 12000.0, 23000.0] {
            let back = mono.angle_to_energy(mono.energy_to_angle(e));
            assert!((back - e).abs() < 1e-6, "{e} came back as {back}");
        }
    }

    #[test]
    fn test_iron_edge_angle() {
        // Fe K edge on Si(111) sits a little above 16 degrees
        let angle = DoubleCrystalMono::new(Crystal::Si111).energy_to_angle(7112.0);
        assert!(angle > 16.0 && angle < 16.2, "angle was {angle}");
    }

    #[test]
    fn test_channel_cut_between_bounds() {
        let mono = DoubleCrystalMono::new(Crystal::Si311);
        let e = channel_cut_energy(&mono, 7112.0, &[Energy(-200.0), Wavenumber(14.0)]);
        assert!(e > 6912.0 && e < 7112.0 + 746.76);
        // angular midpoint favours the low-energy end
        assert!(e < (6912.0 + 7858.76) / 2.0);
    }

    #[test]
    fn test_parse_crystal() {
        assert_eq!("111".parse(), Ok(Crystal::Si111));
        assert_eq!("Si(311)".parse(), Ok(Crystal::Si311));
        assert!("220".parse::<Crystal>().is_err());
    }
}
