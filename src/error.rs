//! Custom error types for scan planning.
//!
//! This module defines the primary error type, `ScanError`, for the whole crate.
//! Using the `thiserror` crate, it provides a centralized and consistent way to
//! report everything that can go wrong between reading a scan config file and
//! handing a finished plan to the execution layer.
//!
//! ## Error Hierarchy
//!
//! `ScanError` consolidates the following sources:
//!
//! - **`ConfigNotFound`**: The config path does not exist, is not a regular file, or
//!   could not be read. Resolution aborts and nothing is returned.
//! - **`Config`**: Wraps errors from the `config` crate when the file was read but
//!   could not be parsed as an INI document.
//! - **`GridSpecMismatch`**: The boundary, step and time lists do not describe the
//!   same number of regions.
//! - **`MissingRequiredParameters`**: Required keys that were not read from the
//!   config file. The operator must fix the file before any hardware moves.
//! - **`InvalidStep`** / **`NegativeWavenumberRegion`**: Region specifications that
//!   would never terminate or that ask for a wavenumber below the edge.
//! - **`GridTooLarge`**: A region whose step is so small that its point count is
//!   beyond what any scan would measure.
//! - **`ScanNumberOverflow`**: `start` and `nscans` together run past the largest
//!   representable scan number.
//! - **`DataFileExists`**: A data file the plan would write is already on disk.
//! - **`Io`**: Wraps standard `std::io::Error`.
//!
//! Every variant is detectable before a scan starts; none of them is retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::parameters::ParamKey;

/// Convenience alias for results using the crate error type.
pub type AppResult<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Config file not found or unreadable: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(
        "Grid specification mismatch: {bounds} bounds need {} steps and times, got {steps} steps and {times} times",
        .bounds.saturating_sub(1)
    )]
    GridSpecMismatch {
        bounds: usize,
        steps: usize,
        times: usize,
    },

    #[error("Missing required parameters in config file: {}", join_keys(.0))]
    MissingRequiredParameters(Vec<ParamKey>),

    #[error("Region {region} has an unusable step size {step}")]
    InvalidStep { region: usize, step: f64 },

    #[error("Region {region} uses wavenumber units but starts below the edge ({lower} eV)")]
    NegativeWavenumberRegion { region: usize, lower: f64 },

    #[error("Region {region} would contain {points} points, more than a scan can hold")]
    GridTooLarge { region: usize, points: u64 },

    #[error("Scan numbers starting at {start} cannot cover {nscans} repetitions")]
    ScanNumberOverflow { start: u32, nscans: u32 },

    #[error("Data file already exists: {}", .0.display())]
    DataFileExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_keys(keys: &[ParamKey]) -> String {
    keys.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
