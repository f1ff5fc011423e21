//! Conversion between energy above the edge and photoelectron wavenumber.
//!
//! Both directions use the same constant, `ħ²/2mₑ` expressed in eV·Å², so that
//! `k_to_energy(energy_to_k(e)) == e` up to floating-point rounding.

/// `ħ²/2mₑ` in eV·Å². Energy above the edge is `k² × KTOE`.
pub const KTOE: f64 = 3.8099819442818976;

/// Photoelectron wavenumber (Å⁻¹) for an energy (eV) above the edge.
///
/// Only meaningful for `e >= 0`; negative input yields `NaN`. Callers that
/// build grids reject wavenumber regions below the edge before reaching here.
pub fn energy_to_k(e: f64) -> f64 {
    (e / KTOE).sqrt()
}

/// Energy above the edge (eV) for a photoelectron wavenumber (Å⁻¹).
pub fn k_to_energy(k: f64) -> f64 {
    k * k * KTOE
}
