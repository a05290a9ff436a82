//! Log setup
//!
//! The terminal belongs to the UI while the alternate screen is up, so logs
//! only ever go to a file. With no usable file, no fmt layer is installed.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pick the log file: the explicit path, else the default under the data dir
pub fn log_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(chat_core::default_log_path)
}

/// Open `path` for appending, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the tracing subscriber
///
/// Filtering follows `RUST_LOG`. Returns the file logs are written to, if
/// any.
///
/// # Errors
///
/// Fails only when an explicitly requested log file cannot be opened. A
/// default location that cannot be opened disables logging instead.
pub fn init(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let file = match log_path(explicit) {
        Some(path) => match open_log_file(&path) {
            Ok(file) => Some((path, file)),
            Err(e) if explicit.is_some() => {
                return Err(anyhow::Error::new(e)
                    .context(format!("opening log file {}", path.display())));
            }
            Err(_) => None,
        },
        None => None,
    };

    let (path, layer) = match file {
        Some((path, file)) => (
            Some(path),
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_path_wins() {
        let path = log_path(Some(Path::new("/tmp/saathi.log")));
        assert_eq!(path, Some(PathBuf::from("/tmp/saathi.log")));
    }

    #[test]
    fn test_default_path_is_a_file_not_the_terminal() {
        if let Some(path) = log_path(None) {
            assert!(path.ends_with("claim-saathi/saathi-tui.log"));
        }
    }

    #[test]
    fn test_open_creates_parent_dirs_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("saathi-tui.log");

        writeln!(open_log_file(&path).unwrap(), "one").unwrap();
        writeln!(open_log_file(&path).unwrap(), "two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
