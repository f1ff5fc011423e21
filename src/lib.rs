//! Core library for the xafs_plan tool.
//!
//! This library turns an XAFS scan description (an INI config file plus
//! optional call-time overrides) into a checked measurement plan: a monotonic
//! list of absolute energies, a matching list of dwell times, a duration
//! estimate and the pseudo-channel-cut parking energy. It never talks to
//! hardware; the plan is handed to the beamline's execution layer.
//!
//! The modules follow the data flow:
//!
//! - [`parameters`]: merge overrides, config file and defaults, with provenance.
//! - [`validate`]: refuse plans whose required keys did not come from the file.
//! - [`grid`]: compile mixed-unit regions into energy and dwell grids.
//! - [`channel_cut`]: pick the pseudo-channel-cut energy through a geometry trait.
//! - [`plan`]: run the above in order and describe each repetition.

pub mod channel_cut;
pub mod error;
pub mod grid;
pub mod logging;
pub mod mono;
pub mod parameters;
pub mod plan;
pub mod region;
pub mod units;
pub mod validate;

pub use error::{AppResult, ScanError};
pub use grid::EnergyGrid;
pub use parameters::{Overrides, ParamKey, Provenance, ScanParameters};
pub use plan::ScanPlan;
pub use region::RegionValue;
