use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `WORDHOP_LOG=debug`
pub const LOG_ENV: &str = "WORDHOP_LOG";
const DEFAULT_FILTER: &str = "info";

/// The terminal belongs to the UI, so logs go to a file.
pub fn init(path: &Path) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_from(std::env::var(LOG_ENV).ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
}

/// Parse a filter directive, falling back to `info` when absent or invalid.
pub fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filter_defaults_to_info() {
        assert_eq!(filter_from(None).to_string(), "info");
    }

    #[test]
    fn filter_uses_directive() {
        assert_eq!(filter_from(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("wordhop.log");

        // Another test binary may already own the global subscriber; the file
        // is created before registration either way.
        let _ = init(&path);
        assert!(path.exists());
    }
}
