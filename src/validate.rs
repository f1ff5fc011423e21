//! Required-parameter gate run before any grid is compiled.
//!
//! A required key counts as present only when it was read from the config
//! file. A value supplied as an override, or filled in from a default, does not
//! satisfy the gate even though [`crate::parameters::ScanParameters`] holds a
//! usable value for it.

use tracing::warn;

use crate::error::{AppResult, ScanError};
use crate::parameters::{ParamKey, Provenance};

/// Keys that must come from the config file, in reporting order.
pub const REQUIRED_KEYS: [ParamKey; 10] = [
    ParamKey::Bounds,
    ParamKey::Steps,
    ParamKey::Times,
    ParamKey::E0,
    ParamKey::Element,
    ParamKey::Edge,
    ParamKey::Folder,
    ParamKey::Filename,
    ParamKey::Nscans,
    ParamKey::Start,
];

/// Returns `(ok, missing)` where `missing` lists every required key whose
/// provenance flag is false.
pub fn check_required(provenance: &Provenance) -> (bool, Vec<ParamKey>) {
    let missing: Vec<ParamKey> = REQUIRED_KEYS
        .into_iter()
        .filter(|key| !provenance.from_file(*key))
        .collect();
    (missing.is_empty(), missing)
}

/// [`check_required`] as a `Result`, for use with `?`.
pub fn require_from_file(provenance: &Provenance) -> AppResult<()> {
    let (ok, missing) = check_required(provenance);
    if ok {
        return Ok(());
    }
    warn!(
        missing = ?missing.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
        "Required keywords are missing from the config file"
    );
    Err(ScanError::MissingRequiredParameters(missing))
}
