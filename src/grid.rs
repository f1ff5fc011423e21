//! Energy and dwell-time grid compilation.
//!
//! A scan of `N` boundaries has `N - 1` regions. Each region contributes a
//! half-open run of points `[lower, upper)`, stepped either uniformly in energy
//! or uniformly in photoelectron wavenumber. The upper boundary of a region is
//! never emitted itself; it is covered as the first point of the next region,
//! or not at all for the last one.
//!
//! Grids are accumulated region by region and the whole accumulated grid is
//! re-rounded to two decimals after every region, not once at the end. Values
//! at region seams must match previously recorded scans bit for bit.
//!
//! # Example
//!
//! ```
//! use xafs_plan::grid::compile;
//! use xafs_plan::region::RegionValue::Energy;
//!
//! let grid = compile(&[Energy(-10.0), Energy(40.0)], &[Energy(0.25)], &[Energy(0.5)], 7112.0)?;
//! assert_eq!(grid.len(), 200);
//! assert_eq!(grid.energies[0], 7102.0);
//! assert_eq!(grid.approx_minutes, 6.0);
//! # Ok::<(), xafs_plan::error::ScanError>(())
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{AppResult, ScanError};
use crate::region::RegionValue;
use crate::units::{energy_to_k, k_to_energy};

/// Fixed per-point overhead in seconds (motor settle and trigger latency).
pub const POINT_OVERHEAD_SECS: f64 = 1.3;

/// Decimal places kept in energy and dwell grids.
const GRID_DECIMALS: i32 = 2;

/// Upper limit on the points a single region may contribute.
pub const MAX_GRID_POINTS: usize = 100_000;

/// Absolute energies and matching dwell times for one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyGrid {
    /// Absolute energies in eV, non-decreasing.
    pub energies: Vec<f64>,
    /// Dwell time in seconds at each energy.
    pub dwell_times: Vec<f64>,
    /// Crude duration estimate in minutes, including per-point overhead.
    pub approx_minutes: f64,
}

impl EnergyGrid {
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// `(energy, dwell)` pairs in scan order.
    pub fn points(&self) -> impl DoubleEndedIterator<Item = (f64, f64)> + '_ {
        self.energies
            .iter()
            .copied()
            .zip(self.dwell_times.iter().copied())
    }
}

/// Round half to even at `decimals` places, as the historical grids were.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Round to one decimal the way `"%.1f"` does, on the exact binary value.
fn round_tenths(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Number of points in `[start, stop)` at `step`: `ceil((stop - start) / step)`, or zero.
fn arange_len(start: f64, stop: f64, step: f64) -> f64 {
    let span = ((stop - start) / step).ceil();
    if span.is_finite() && span > 0.0 {
        span
    } else {
        0.0
    }
}

/// Half-open arithmetic sequence `start, start + step, ...` strictly below `stop`.
///
/// Points are computed as `start + i * step` rather than by repeated addition.
/// Callers bound the length with [`arange_len`] first.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let count = arange_len(start, stop, step) as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Convert every boundary to an energy offset from the edge.
pub fn normalize_bounds(bounds: &[RegionValue]) -> Vec<f64> {
    bounds.iter().map(RegionValue::to_energy_offset).collect()
}

/// Compile region specifications into an energy grid.
///
/// # Errors
///
/// - [`ScanError::GridSpecMismatch`] unless `bounds.len() == steps.len() + 1 == times.len() + 1`.
/// - [`ScanError::InvalidStep`] for a step that is zero, negative or not finite.
/// - [`ScanError::GridTooLarge`] for a region of more than [`MAX_GRID_POINTS`] points.
/// - [`ScanError::NegativeWavenumberRegion`] for a region stepped or timed in
///   wavenumber whose lower boundary lies below the edge.
pub fn compile(
    bounds: &[RegionValue],
    steps: &[RegionValue],
    times: &[RegionValue],
    e0: f64,
) -> AppResult<EnergyGrid> {
    if bounds.len() != steps.len() + 1 || bounds.len() != times.len() + 1 {
        return Err(ScanError::GridSpecMismatch {
            bounds: bounds.len(),
            steps: steps.len(),
            times: times.len(),
        });
    }
    let edges = normalize_bounds(bounds);

    let (energies, dwell_times) = steps.iter().zip(times).enumerate().try_fold(
        (Vec::<f64>::new(), Vec::<f64>::new()),
        |(mut energies, mut dwell_times), (region, (step, time))| {
            let (lower, upper) = (edges[region], edges[region + 1]);
            let samples = region_energies(region, lower, upper, *step, e0)?;
            let dwell = region_dwell(region, lower, &samples, *time, e0)?;
            debug!(region, points = samples.len(), lower, upper, "Compiled region");

            energies.extend(samples);
            energies.iter_mut().for_each(|e| *e = round_to(*e, GRID_DECIMALS));
            dwell_times.extend(dwell);
            dwell_times.iter_mut().for_each(|t| *t = round_to(*t, GRID_DECIMALS));
            Ok::<_, ScanError>((energies, dwell_times))
        },
    )?;

    let approx_minutes = estimate_minutes(&dwell_times);
    debug!(points = energies.len(), approx_minutes, "Compiled energy grid");
    Ok(EnergyGrid {
        energies,
        dwell_times,
        approx_minutes,
    })
}

/// Unrounded absolute energies for one region.
fn region_energies(
    region: usize,
    lower: f64,
    upper: f64,
    step: RegionValue,
    e0: f64,
) -> AppResult<Vec<f64>> {
    let size = step.magnitude();
    if !(size.is_finite() && size > 0.0) {
        return Err(ScanError::InvalidStep { region, step: size });
    }
    let (start, stop) = match step {
        RegionValue::Energy(_) => (e0 + lower, e0 + upper),
        RegionValue::Wavenumber(_) => {
            if lower < 0.0 {
                return Err(ScanError::NegativeWavenumberRegion { region, lower });
            }
            (energy_to_k(lower), energy_to_k(upper))
        }
    };
    let points = arange_len(start, stop, size);
    if points > MAX_GRID_POINTS as f64 {
        return Err(ScanError::GridTooLarge {
            region,
            points: points as u64,
        });
    }
    let samples = arange(start, stop, size);
    Ok(match step {
        RegionValue::Energy(_) => samples,
        RegionValue::Wavenumber(_) => samples.into_iter().map(|k| e0 + k_to_energy(k)).collect(),
    })
}

/// Unrounded dwell times for one region's samples.
fn region_dwell(
    region: usize,
    lower: f64,
    samples: &[f64],
    time: RegionValue,
    e0: f64,
) -> AppResult<Vec<f64>> {
    match time {
        RegionValue::Energy(t) => Ok(vec![t; samples.len()]),
        RegionValue::Wavenumber(per_k) => {
            if lower < 0.0 {
                return Err(ScanError::NegativeWavenumberRegion { region, lower });
            }
            Ok(samples
                .iter()
                .map(|e| energy_to_k(e - e0) * per_k)
                .collect())
        }
    }
}

/// `(Σ dwell + n × overhead) / 60`, rounded to one decimal.
pub fn estimate_minutes(dwell_times: &[f64]) -> f64 {
    let total: f64 = dwell_times.iter().sum();
    let overhead = dwell_times.len() as f64 * POINT_OVERHEAD_SECS;
    round_tenths((total + overhead) / 60.0)
}
