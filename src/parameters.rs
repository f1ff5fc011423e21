//! Scan parameter resolution.
//!
//! A scan is described by an INI file with a `[scan]` section. Any value may
//! also be supplied at call time through [`Overrides`], and anything found in
//! neither place falls back to [`ScanParameters::default`].
//!
//! For every recognized key the precedence is:
//!
//! 1. an explicit override, used verbatim;
//! 2. the value in the config file, coerced to the key's type;
//! 3. the built-in default.
//!
//! Alongside the values, [`resolve`] returns a [`Provenance`] map recording
//! which keys were actually read from the config file. Overrides and defaults
//! both leave the flag `false`; the required-key gate in
//! [`crate::validate`] relies on exactly that.
//!
//! ```ini
//! [scan]
//! folder   = /data/2024-10/
//! filename = fe-foil
//! e0       = 7112
//! element  = Fe
//! edge     = K
//! nscans   = 3
//! start    = 1
//! bounds   = -200 -30 15.3 14k
//! steps    = 10 0.5 0.05k
//! times    = 0.5 0.5 0.25k
//! bothways = yes
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AppResult, ScanError};
use crate::region::{self, RegionValue};

/// Name of the INI section holding scan parameters.
pub const SCAN_SECTION: &str = "scan";

/// Every key the resolver recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKey {
    Bounds,
    Steps,
    Times,
    Folder,
    Element,
    Edge,
    Filename,
    Comment,
    Mode,
    Sample,
    Prep,
    Start,
    Nscans,
    E0,
    Inttime,
    Snapshots,
    Bothways,
    Channelcut,
    Focus,
    Hr,
}

impl ParamKey {
    /// All keys, in the order they are resolved.
    pub const ALL: [ParamKey; 20] = [
        ParamKey::Bounds,
        ParamKey::Steps,
        ParamKey::Times,
        ParamKey::Folder,
        ParamKey::Element,
        ParamKey::Edge,
        ParamKey::Filename,
        ParamKey::Comment,
        ParamKey::Mode,
        ParamKey::Sample,
        ParamKey::Prep,
        ParamKey::Start,
        ParamKey::Nscans,
        ParamKey::E0,
        ParamKey::Inttime,
        ParamKey::Snapshots,
        ParamKey::Bothways,
        ParamKey::Channelcut,
        ParamKey::Focus,
        ParamKey::Hr,
    ];

    /// Key name as written in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::Bounds => "bounds",
            ParamKey::Steps => "steps",
            ParamKey::Times => "times",
            ParamKey::Folder => "folder",
            ParamKey::Element => "element",
            ParamKey::Edge => "edge",
            ParamKey::Filename => "filename",
            ParamKey::Comment => "comment",
            ParamKey::Mode => "mode",
            ParamKey::Sample => "sample",
            ParamKey::Prep => "prep",
            ParamKey::Start => "start",
            ParamKey::Nscans => "nscans",
            ParamKey::E0 => "e0",
            ParamKey::Inttime => "inttime",
            ParamKey::Snapshots => "snapshots",
            ParamKey::Bothways => "bothways",
            ParamKey::Channelcut => "channelcut",
            ParamKey::Focus => "focus",
            ParamKey::Hr => "hr",
        }
    }

    /// Look a key up by its config-file name.
    pub fn from_name(name: &str) -> Option<ParamKey> {
        ParamKey::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single resolved value, for map-style access to [`ScanParameters`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(u32),
    Float(f64),
    Bool(bool),
    Regions(Vec<RegionValue>),
}

/// The fully resolved parameter set for one scan invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanParameters {
    /// Region boundaries relative to `e0`.
    pub bounds: Vec<RegionValue>,
    /// One step rule per region.
    pub steps: Vec<RegionValue>,
    /// One dwell rule per region.
    pub times: Vec<RegionValue>,
    /// Folder for data files.
    pub folder: String,
    /// One- or two-letter element symbol.
    pub element: String,
    /// K, L3, L2 or L1.
    pub edge: String,
    /// Data file stem; files are written as `filename.NNN`.
    pub filename: String,
    pub comment: String,
    /// transmission, fluorescence, reference or both.
    pub mode: String,
    pub sample: String,
    pub prep: String,
    /// First scan number.
    pub start: u32,
    /// Number of repetitions.
    pub nscans: u32,
    /// Edge energy in eV.
    pub e0: f64,
    /// Carried through for the execution layer, not used by grid compilation.
    pub inttime: f64,
    pub snapshots: bool,
    /// Measure every other repetition in the reverse direction.
    pub bothways: bool,
    pub channelcut: bool,
    pub focus: bool,
    pub hr: bool,
}

impl Default for ScanParameters {
    fn default() -> Self {
        let folder = dirs::home_dir()
            .map(|home| format!("{}/data/", home.display()))
            .unwrap_or_else(|| "data/".to_string());
        Self {
            bounds: vec![
                RegionValue::Energy(-200.0),
                RegionValue::Energy(-30.0),
                RegionValue::Energy(15.3),
                RegionValue::Wavenumber(14.0),
            ],
            steps: vec![
                RegionValue::Energy(10.0),
                RegionValue::Energy(0.5),
                RegionValue::Wavenumber(0.05),
            ],
            times: vec![
                RegionValue::Energy(0.5),
                RegionValue::Energy(0.5),
                RegionValue::Wavenumber(0.25),
            ],
            folder,
            element: "Fe".to_string(),
            edge: "K".to_string(),
            filename: "data.dat".to_string(),
            comment: String::new(),
            mode: "transmission".to_string(),
            sample: String::new(),
            prep: String::new(),
            start: 0,
            nscans: 1,
            e0: 7112.0,
            inttime: 1.0,
            snapshots: true,
            bothways: false,
            channelcut: true,
            focus: false,
            hr: true,
        }
    }
}

impl ScanParameters {
    /// Map-style access to a resolved value.
    pub fn value(&self, key: ParamKey) -> ParamValue {
        match key {
            ParamKey::Bounds => ParamValue::Regions(self.bounds.clone()),
            ParamKey::Steps => ParamValue::Regions(self.steps.clone()),
            ParamKey::Times => ParamValue::Regions(self.times.clone()),
            ParamKey::Folder => ParamValue::Str(self.folder.clone()),
            ParamKey::Element => ParamValue::Str(self.element.clone()),
            ParamKey::Edge => ParamValue::Str(self.edge.clone()),
            ParamKey::Filename => ParamValue::Str(self.filename.clone()),
            ParamKey::Comment => ParamValue::Str(self.comment.clone()),
            ParamKey::Mode => ParamValue::Str(self.mode.clone()),
            ParamKey::Sample => ParamValue::Str(self.sample.clone()),
            ParamKey::Prep => ParamValue::Str(self.prep.clone()),
            ParamKey::Start => ParamValue::Int(self.start),
            ParamKey::Nscans => ParamValue::Int(self.nscans),
            ParamKey::E0 => ParamValue::Float(self.e0),
            ParamKey::Inttime => ParamValue::Float(self.inttime),
            ParamKey::Snapshots => ParamValue::Bool(self.snapshots),
            ParamKey::Bothways => ParamValue::Bool(self.bothways),
            ParamKey::Channelcut => ParamValue::Bool(self.channelcut),
            ParamKey::Focus => ParamValue::Bool(self.focus),
            ParamKey::Hr => ParamValue::Bool(self.hr),
        }
    }

    /// All values keyed by name, in resolution order.
    pub fn to_map(&self) -> BTreeMap<ParamKey, ParamValue> {
        ParamKey::ALL.into_iter().map(|k| (k, self.value(k))).collect()
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Regions(list) => write!(f, "[{}]", region::format_list(list)),
        }
    }
}

/// Which keys were read from the config file.
///
/// `true` only for values that came from the file. A key satisfied by an
/// override or by a default is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Provenance(BTreeMap<ParamKey, bool>);

impl Provenance {
    pub fn from_file(&self, key: ParamKey) -> bool {
        self.0.get(&key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: ParamKey, from_file: bool) {
        self.0.insert(key, from_file);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, bool)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// Call-time values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub bounds: Option<Vec<RegionValue>>,
    pub steps: Option<Vec<RegionValue>>,
    pub times: Option<Vec<RegionValue>>,
    pub folder: Option<String>,
    pub element: Option<String>,
    pub edge: Option<String>,
    pub filename: Option<String>,
    pub comment: Option<String>,
    pub mode: Option<String>,
    pub sample: Option<String>,
    pub prep: Option<String>,
    pub start: Option<u32>,
    pub nscans: Option<u32>,
    pub e0: Option<f64>,
    pub inttime: Option<f64>,
    pub snapshots: Option<bool>,
    pub bothways: Option<bool>,
    pub channelcut: Option<bool>,
    pub focus: Option<bool>,
    pub hr: Option<bool>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, bounds: Vec<RegionValue>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn steps(mut self, steps: Vec<RegionValue>) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn times(mut self, times: Vec<RegionValue>) -> Self {
        self.times = Some(times);
        self
    }

    pub fn folder(mut self, folder: &str) -> Self {
        self.folder = Some(folder.to_string());
        self
    }

    pub fn element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn edge(mut self, edge: &str) -> Self {
        self.edge = Some(edge.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    pub fn sample(mut self, sample: &str) -> Self {
        self.sample = Some(sample.to_string());
        self
    }

    pub fn prep(mut self, prep: &str) -> Self {
        self.prep = Some(prep.to_string());
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    pub fn nscans(mut self, nscans: u32) -> Self {
        self.nscans = Some(nscans);
        self
    }

    pub fn e0(mut self, e0: f64) -> Self {
        self.e0 = Some(e0);
        self
    }

    pub fn inttime(mut self, inttime: f64) -> Self {
        self.inttime = Some(inttime);
        self
    }

    pub fn snapshots(mut self, snapshots: bool) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    pub fn bothways(mut self, bothways: bool) -> Self {
        self.bothways = Some(bothways);
        self
    }

    pub fn channelcut(mut self, channelcut: bool) -> Self {
        self.channelcut = Some(channelcut);
        self
    }

    pub fn focus(mut self, focus: bool) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn hr(mut self, hr: bool) -> Self {
        self.hr = Some(hr);
        self
    }
}

/// Typed reads from the `[scan]` section of a parsed config file.
///
/// Every getter returns `None` when the key is absent or its value cannot be
/// coerced; the latter is logged.
struct ScanSection {
    config: Config,
}

impl ScanSection {
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Ini))
            .build()?;
        Ok(Self { config })
    }

    fn path(key: ParamKey) -> String {
        format!("{SCAN_SECTION}.{}", key.as_str())
    }

    fn read<T>(&self, key: ParamKey, result: Result<T, ConfigError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(ConfigError::NotFound(_)) => None,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Ignoring unusable config value");
                None
            }
        }
    }

    fn string(&self, key: ParamKey) -> Option<String> {
        self.read(key, self.config.get_string(&Self::path(key)))
    }

    fn float(&self, key: ParamKey) -> Option<f64> {
        self.read(key, self.config.get_float(&Self::path(key)))
    }

    fn boolean(&self, key: ParamKey) -> Option<bool> {
        self.read(key, self.config.get_bool(&Self::path(key)))
    }

    fn count(&self, key: ParamKey) -> Option<u32> {
        let value = self.read(key, self.config.get_int(&Self::path(key)))?;
        match u32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(key = key.as_str(), value, "Ignoring out-of-range count");
                None
            }
        }
    }

    fn regions(&self, key: ParamKey) -> Option<Vec<RegionValue>> {
        let text = self.string(key)?;
        match RegionValue::parse_list(&text) {
            Ok(list) if list.is_empty() => {
                warn!(key = key.as_str(), "Ignoring empty region list");
                None
            }
            Ok(list) => Some(list),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Ignoring unusable region list");
                None
            }
        }
    }
}

/// Applies the override > config file > default precedence, key by key.
struct Resolver<'a> {
    section: &'a ScanSection,
    provenance: Provenance,
}

impl Resolver<'_> {
    fn pick<T: Clone>(
        &mut self,
        key: ParamKey,
        explicit: &Option<T>,
        from_file: impl FnOnce(&ScanSection) -> Option<T>,
        default: &T,
    ) -> T {
        if let Some(value) = explicit {
            self.provenance.set(key, false);
            return value.clone();
        }
        match from_file(self.section) {
            Some(value) => {
                self.provenance.set(key, true);
                value
            }
            None => {
                debug!(key = key.as_str(), "Using default value");
                self.provenance.set(key, false);
                default.clone()
            }
        }
    }

    fn regions(
        &mut self,
        key: ParamKey,
        explicit: &Option<Vec<RegionValue>>,
        default: &[RegionValue],
    ) -> Vec<RegionValue> {
        self.pick(key, explicit, |s| s.regions(key), &default.to_vec())
    }

    fn string(&mut self, key: ParamKey, explicit: &Option<String>, default: &str) -> String {
        self.pick(key, explicit, |s| s.string(key), &default.to_owned())
    }

    fn count(&mut self, key: ParamKey, explicit: &Option<u32>, default: u32) -> u32 {
        self.pick(key, explicit, |s| s.count(key), &default)
    }

    fn float(&mut self, key: ParamKey, explicit: &Option<f64>, default: f64) -> f64 {
        self.pick(key, explicit, |s| s.float(key), &default)
    }

    fn boolean(&mut self, key: ParamKey, explicit: &Option<bool>, default: bool) -> bool {
        self.pick(key, explicit, |s| s.boolean(key), &default)
    }
}

/// Resolve a full parameter set from a config file, overrides and defaults.
///
/// # Errors
///
/// - [`ScanError::ConfigNotFound`] if `path` is not a readable regular file.
/// - [`ScanError::Config`] if the file is not a parseable INI document.
///
/// Keys other than the recognized ones are ignored.
pub fn resolve(
    path: impl AsRef<Path>,
    overrides: &Overrides,
    defaults: &ScanParameters,
) -> AppResult<(ScanParameters, Provenance)> {
    let path = path.as_ref();
    let not_found = || ScanError::ConfigNotFound {
        path: PathBuf::from(path),
    };
    if !path.is_file() {
        return Err(not_found());
    }
    let content = std::fs::read_to_string(path).map_err(|_| not_found())?;
    info!(path = %path.display(), "Reading scan config file");
    debug!("Config file contents:\n{content}");

    let section = ScanSection::parse(&content)?;
    let o = overrides;
    let d = defaults;
    let mut r = Resolver {
        section: &section,
        provenance: Provenance::default(),
    };

    let params = ScanParameters {
        bounds: r.regions(ParamKey::Bounds, &o.bounds, &d.bounds),
        steps: r.regions(ParamKey::Steps, &o.steps, &d.steps),
        times: r.regions(ParamKey::Times, &o.times, &d.times),
        folder: r.string(ParamKey::Folder, &o.folder, &d.folder),
        element: r.string(ParamKey::Element, &o.element, &d.element),
        edge: r.string(ParamKey::Edge, &o.edge, &d.edge),
        filename: r.string(ParamKey::Filename, &o.filename, &d.filename),
        comment: r.string(ParamKey::Comment, &o.comment, &d.comment),
        mode: r.string(ParamKey::Mode, &o.mode, &d.mode),
        sample: r.string(ParamKey::Sample, &o.sample, &d.sample),
        prep: r.string(ParamKey::Prep, &o.prep, &d.prep),
        start: r.count(ParamKey::Start, &o.start, d.start),
        nscans: r.count(ParamKey::Nscans, &o.nscans, d.nscans),
        e0: r.float(ParamKey::E0, &o.e0, d.e0),
        inttime: r.float(ParamKey::Inttime, &o.inttime, d.inttime),
        snapshots: r.boolean(ParamKey::Snapshots, &o.snapshots, d.snapshots),
        bothways: r.boolean(ParamKey::Bothways, &o.bothways, d.bothways),
        channelcut: r.boolean(ParamKey::Channelcut, &o.channelcut, d.channelcut),
        focus: r.boolean(ParamKey::Focus, &o.focus, d.focus),
        hr: r.boolean(ParamKey::Hr, &o.hr, d.hr),
    };
    let provenance = r.provenance;

    let from_file = provenance.iter().filter(|(_, found)| *found).count();
    info!(
        from_file,
        total = ParamKey::ALL.len(),
        "Resolved scan parameters"
    );
    Ok((params, provenance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_test::traced_test;

    fn ini(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in ParamKey::ALL {
            assert_eq!(ParamKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(ParamKey::from_name("detector"), None);
    }

    #[test]
    fn test_missing_file() {
        let result = resolve(
            "/definitely/not/here.ini",
            &Overrides::new(),
            &ScanParameters::default(),
        );
        assert!(matches!(result, Err(ScanError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve(dir.path(), &Overrides::new(), &ScanParameters::default());
        assert!(matches!(result, Err(ScanError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_reads_typed_values() {
        let file = ini(
            "[scan]\n\
             e0 = 8979\n\
             element = Cu\n\
             nscans = 4\n\
             start = 2\n\
             bothways = yes\n\
             snapshots = off\n\
             bounds = -150 -20 30 12k\n\
             steps = 5 0.3 0.04k\n\
             times = 1 1 0.5k\n",
        );
        let (params, found) =
            resolve(file.path(), &Overrides::new(), &ScanParameters::default()).unwrap();

        assert_eq!(params.e0, 8979.0);
        assert_eq!(params.element, "Cu");
        assert_eq!(params.nscans, 4);
        assert_eq!(params.start, 2);
        assert!(params.bothways);
        assert!(!params.snapshots);
        assert_eq!(params.bounds[3], RegionValue::Wavenumber(12.0));
        assert_eq!(params.steps[2], RegionValue::Wavenumber(0.04));
        assert_eq!(params.times[0], RegionValue::Energy(1.0));

        for key in [ParamKey::E0, ParamKey::Element, ParamKey::Bounds, ParamKey::Bothways] {
            assert!(found.from_file(key), "{key} should come from the file");
        }
        assert!(!found.from_file(ParamKey::Edge));
        assert_eq!(params.edge, "K");
    }

    #[test]
    fn test_override_wins_but_is_not_from_file() {
        let file = ini("[scan]\ne0 = 8979\nelement = Cu\n");
        let overrides = Overrides::new().e0(9659.0).element("Zn");
        let (params, found) =
            resolve(file.path(), &overrides, &ScanParameters::default()).unwrap();

        assert_eq!(params.e0, 9659.0);
        assert_eq!(params.element, "Zn");
        assert!(!found.from_file(ParamKey::E0));
        assert!(!found.from_file(ParamKey::Element));
    }

    #[test]
    fn test_every_key_can_be_overridden() {
        let file = ini(
            "[scan]\n\
             sample = foil\n\
             prep = as received\n\
             inttime = 1\n\
             snapshots = yes\n\
             channelcut = yes\n\
             focus = no\n\
             hr = yes\n",
        );
        let overrides = Overrides::new()
            .bounds(vec![RegionValue::Energy(-10.0), RegionValue::Energy(40.0)])
            .steps(vec![RegionValue::Energy(0.25)])
            .times(vec![RegionValue::Energy(0.5)])
            .folder("/scratch/")
            .element("Ni")
            .edge("K")
            .filename("ni")
            .comment("test")
            .mode("fluorescence")
            .sample("pellet")
            .prep("pressed")
            .start(5)
            .nscans(2)
            .e0(8333.0)
            .inttime(0.5)
            .snapshots(false)
            .bothways(true)
            .channelcut(false)
            .focus(true)
            .hr(false);
        let (params, found) =
            resolve(file.path(), &overrides, &ScanParameters::default()).unwrap();

        assert_eq!(params.sample, "pellet");
        assert_eq!(params.prep, "pressed");
        assert_eq!(params.inttime, 0.5);
        assert!(!params.snapshots);
        assert!(!params.channelcut);
        assert!(params.focus);
        assert!(!params.hr);
        assert_eq!(params.e0, 8333.0);
        assert!(found.iter().all(|(_, from_file)| !from_file));
    }

    #[test]
    fn test_ini_quotes_and_escapes_are_interpreted() {
        let file = ini("[scan]\ncomment = \"quoted\"\nprep = ground\\tpressed\n");
        let (params, found) =
            resolve(file.path(), &Overrides::new(), &ScanParameters::default()).unwrap();

        assert_eq!(params.comment, "quoted");
        assert_eq!(params.prep, "ground\tpressed");
        assert!(found.from_file(ParamKey::Comment));
    }

    #[test]
    fn test_unusable_value_falls_back_to_default() {
        let file = ini("[scan]\nnscans = many\nbounds = -200 oops 14k\n");
        let defaults = ScanParameters::default();
        let (params, found) = resolve(file.path(), &Overrides::new(), &defaults).unwrap();

        assert_eq!(params.nscans, defaults.nscans);
        assert_eq!(params.bounds, defaults.bounds);
        assert!(!found.from_file(ParamKey::Nscans));
        assert!(!found.from_file(ParamKey::Bounds));
    }

    #[test]
    fn test_unknown_keys_and_sections_are_ignored() {
        let file = ini("[scan]\ndetector = vortex\nfilename = x\n[other]\ne0 = 1\n");
        let (params, found) =
            resolve(file.path(), &Overrides::new(), &ScanParameters::default()).unwrap();
        assert_eq!(params.filename, "x");
        assert_eq!(params.e0, 7112.0);
        assert!(!found.from_file(ParamKey::E0));
    }

    #[test]
    fn test_map_access() {
        let params = ScanParameters::default();
        assert_eq!(params.value(ParamKey::E0), ParamValue::Float(7112.0));
        assert_eq!(params.value(ParamKey::Nscans), ParamValue::Int(1));
        assert_eq!(
            params.value(ParamKey::Bounds).to_string(),
            "[-200 -30 15.3 14k]"
        );
        assert_eq!(params.to_map().len(), ParamKey::ALL.len());
    }

    #[traced_test]
    #[test]
    fn test_bad_region_token_is_logged() {
        let file = ini("[scan]\nsteps = 10 half 0.05k\ne0 = seven\n");
        let (params, found) =
            resolve(file.path(), &Overrides::new(), &ScanParameters::default()).unwrap();

        assert_eq!(params.steps, ScanParameters::default().steps);
        assert!(!found.from_file(ParamKey::Steps));
        assert!(!found.from_file(ParamKey::E0));
        assert!(logs_contain("Ignoring unusable region list"));
        assert!(logs_contain("Ignoring unusable config value"));
    }
}
