//! Tracing subscriber setup for the command-line tool.
//!
//! `RUST_LOG` takes precedence when set; otherwise `level` is applied to every
//! target. Messages go to stderr so that grid tables and JSON on stdout stay
//! machine-readable.

use tracing_subscriber::EnvFilter;

/// Log levels accepted by [`init`].
pub const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Build the filter used by [`init`].
pub fn filter_for(level: &str) -> Result<EnvFilter, String> {
    if !VALID_LEVELS.contains(&level) {
        return Err(format!(
            "Invalid log level '{}'. Must be one of: {}",
            level,
            VALID_LEVELS.join(", ")
        ));
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
}

/// Install the global fmt subscriber. Calling it twice is a no-op.
pub fn init(level: &str) -> Result<(), String> {
    let filter = filter_for(level)?;
    // try_init fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_level() {
        let err = filter_for("verbose").unwrap_err();
        assert!(err.contains("Invalid log level"));
    }

    #[test]
    fn test_accepts_known_levels() {
        for level in VALID_LEVELS {
            assert!(filter_for(level).is_ok());
        }
    }
}
