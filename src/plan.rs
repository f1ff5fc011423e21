//! Assembly of a complete, checked scan plan.
//!
//! [`ScanPlan::prepare`] runs the whole pipeline in order:
//!
//! ```text
//! config file ─► resolve ─► required-key gate ─► compile grid
//!                                             └─► channel-cut energy
//! ```
//!
//! Every failure surfaces here, before the execution layer moves any motor.
//! The plan also answers the bookkeeping questions the execution layer asks
//! per repetition: which scan number, which data file, and which direction.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::channel_cut::{channel_cut_energy, MonochromatorGeometry};
use crate::error::{AppResult, ScanError};
use crate::grid::{self, EnergyGrid};
use crate::parameters::{self, Overrides, ParamKey, Provenance, ScanParameters};
use crate::validate;

/// How the data are displayed and which detectors are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementMode {
    Transmission,
    Fluorescence,
    Reference,
    Both,
}

impl MeasurementMode {
    /// Interpret the free-form `mode` string by substring.
    ///
    /// Unrecognized strings fall back to transmission.
    pub fn from_mode_str(mode: &str) -> Self {
        if mode.contains("fluo") {
            MeasurementMode::Fluorescence
        } else if mode.contains("trans") {
            MeasurementMode::Transmission
        } else if mode.contains("ref") {
            MeasurementMode::Reference
        } else if mode.contains("both") {
            MeasurementMode::Both
        } else {
            warn!(mode, "Measurement mode not recognized, falling back to transmission");
            MeasurementMode::Transmission
        }
    }

    /// Whether the fluorescence detector is read in addition to the ion chambers.
    pub fn uses_fluorescence_detector(&self) -> bool {
        matches!(self, MeasurementMode::Fluorescence | MeasurementMode::Both)
    }
}

/// Monochromator travel direction for one repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

/// One pass over the energy grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repetition {
    /// 1-based position within the sequence.
    pub count: u32,
    /// Scan number used in the data file extension.
    pub scan_number: u32,
    pub direction: Direction,
    pub data_file: PathBuf,
}

impl Repetition {
    /// `(energy, dwell)` pairs in this repetition's direction.
    pub fn trajectory<'a>(
        &self,
        grid: &'a EnergyGrid,
    ) -> Box<dyn Iterator<Item = (f64, f64)> + 'a> {
        match self.direction {
            Direction::Forward => Box::new(grid.points()),
            Direction::Backward => Box::new(grid.points().rev()),
        }
    }
}

/// `folder/filename.NNN`, with the scan number zero-padded to three digits.
pub fn data_file_path(folder: impl AsRef<Path>, filename: &str, scan_number: u32) -> PathBuf {
    folder
        .as_ref()
        .join(format!("{filename}.{scan_number:03}"))
}

/// A resolved, validated and compiled scan sequence.
#[derive(Debug, Clone, Serialize)]
pub struct ScanPlan {
    pub parameters: ScanParameters,
    pub provenance: Provenance,
    pub grid: EnergyGrid,
    pub mode: MeasurementMode,
    /// Energy at which to park the monochromator in pseudo-channel-cut mode.
    pub channel_cut_energy: f64,
}

impl ScanPlan {
    /// Resolve, gate, compile and estimate from a config file.
    ///
    /// # Errors
    ///
    /// Any error from [`parameters::resolve`], [`validate::require_from_file`]
    /// or [`grid::compile`].
    pub fn prepare(
        config_path: impl AsRef<Path>,
        overrides: &Overrides,
        geometry: &dyn MonochromatorGeometry,
    ) -> AppResult<Self> {
        let (parameters, provenance) =
            parameters::resolve(config_path, overrides, &ScanParameters::default())?;
        validate::require_from_file(&provenance)?;
        Self::from_parameters(parameters, provenance, geometry)
    }

    /// Build a plan from an already-resolved parameter set, skipping the gate.
    ///
    /// # Errors
    ///
    /// [`ScanError::ScanNumberOverflow`] when the last scan number does not fit,
    /// or any error from [`grid::compile`].
    pub fn from_parameters(
        parameters: ScanParameters,
        provenance: Provenance,
        geometry: &dyn MonochromatorGeometry,
    ) -> AppResult<Self> {
        if parameters.start.checked_add(parameters.nscans).is_none() {
            return Err(ScanError::ScanNumberOverflow {
                start: parameters.start,
                nscans: parameters.nscans,
            });
        }
        let grid = grid::compile(
            &parameters.bounds,
            &parameters.steps,
            &parameters.times,
            parameters.e0,
        )?;
        let channel_cut_energy = channel_cut_energy(geometry, parameters.e0, &parameters.bounds);
        let mode = MeasurementMode::from_mode_str(&parameters.mode);
        info!(
            element = %parameters.element,
            edge = %parameters.edge,
            points = grid.len(),
            approx_minutes = grid.approx_minutes,
            nscans = parameters.nscans,
            channel_cut_energy,
            "Prepared scan plan"
        );
        Ok(Self {
            parameters,
            provenance,
            grid,
            mode,
            channel_cut_energy,
        })
    }

    /// Every repetition, in order. With `bothways`, even-numbered passes run backwards.
    pub fn repetitions(&self) -> impl Iterator<Item = Repetition> + '_ {
        let p = &self.parameters;
        (0..p.nscans).map(move |offset| {
            let count = offset + 1;
            let scan_number = p.start.saturating_add(offset);
            let direction = if p.bothways && count % 2 == 0 {
                Direction::Backward
            } else {
                Direction::Forward
            };
            Repetition {
                count,
                scan_number,
                direction,
                data_file: data_file_path(&p.folder, &p.filename, scan_number),
            }
        })
    }

    /// Fail on the first data file that already exists.
    pub fn ensure_outputs_available(&self) -> AppResult<()> {
        for repetition in self.repetitions() {
            if repetition.data_file.exists() {
                warn!(path = %repetition.data_file.display(), "Data file already exists");
                return Err(ScanError::DataFileExists(repetition.data_file));
            }
        }
        Ok(())
    }

    /// Estimate for the whole sequence in minutes.
    pub fn total_minutes(&self) -> f64 {
        self.grid.approx_minutes * f64::from(self.parameters.nscans)
    }
}

impl fmt::Display for ScanPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in ParamKey::ALL {
            let marker = if self.provenance.from_file(key) { "" } else { " *" };
            writeln!(
                f,
                "\t{:<12} : {}{}",
                key.as_str(),
                self.parameters.value(key),
                marker
            )?;
        }
        if let Some(first) = self.repetitions().next() {
            writeln!(f, "\nfirst data file to be written to \"{}\"", first.data_file.display())?;
        }
        writeln!(f, "pseudo-channel-cut energy = {:.1}", self.channel_cut_energy)?;
        write!(
            f,
            "{} energy points, about {:.1} minutes per scan, {:.1} minutes in total",
            self.grid.len(),
            self.grid.approx_minutes,
            self.total_minutes()
        )
    }
}
