//! Diagnostic channel for the bridge.
//!
//! Everything the bridge reports without failing (tool lookups that come back
//! empty, parameters that cannot be found, run nodes that could not be
//! created) goes through this module. Messages are always appended to the log
//! file once [`init_with_verbosity`] has run; console output depends on the
//! verbosity level.

use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(0);

const LOG_FILE_NAME: &str = "pbridge.log";

/// Current verbosity level (0 = warnings only, 1 = debug, 2 = trace)
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Set the verbosity level without touching the log file
pub fn set_verbosity(verbosity: u8) {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }
}

/// Map the verbosity level onto a `tracing` filter directive
pub fn verbosity_to_filter() -> &'static str {
    match get_verbosity() {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize the logger in the default config directory
pub fn init_with_verbosity(verbosity: u8) -> Result<(), String> {
    set_verbosity(verbosity);

    let config_dir = get_config_dir()?;
    init_in_dir(&config_dir)
}

/// Initialize the logger with the log file placed in `dir`.
///
/// The file is truncated so each run starts with a fresh log.
pub fn init_in_dir(dir: &Path) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create log directory: {}", e))?;

    let log_file = dir.join(LOG_FILE_NAME);
    if log_file.exists() {
        let _ = fs::remove_file(&log_file);
    }

    let mut guard = LOG_FILE
        .lock()
        .map_err(|_| "Log file lock poisoned".to_string())?;
    *guard = Some(log_file);

    Ok(())
}

fn get_config_dir() -> Result<PathBuf, String> {
    #[cfg(not(target_os = "windows"))]
    let config_dir = dirs::home_dir()
        .ok_or("Could not determine home directory")?
        .join(".config")
        .join("pbridge");

    #[cfg(target_os = "windows")]
    let config_dir = dirs::config_dir()
        .ok_or("Could not determine config directory")?
        .join("pbridge");

    Ok(config_dir)
}

fn write_to_log(level: &str, message: &str) {
    if let Ok(guard) = LOG_FILE.lock() {
        if let Some(ref log_path) = *guard {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "[{}] {} {}", timestamp, level, message);
            }
        }
    }
}

/// Debug message (console at verbosity >= 1, always to file)
pub fn debug(message: &str) {
    write_to_log("DEBUG", message);
    if get_verbosity() >= 1 {
        eprintln!("{} {}", "DEBUG:".blue().bold(), message);
    }
}

/// Warning (console and file)
pub fn warn(message: &str) {
    write_to_log("WARN", message);
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Error (console and file)
pub fn error(message: &str) {
    write_to_log("ERROR", message);
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// User-facing success line
pub fn success(message: &str) {
    write_to_log("SUCCESS", message);
    eprintln!("{} {}", "\u{2714}".green().bold(), message);
}

/// Path of the active log file, if the logger was initialized
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

#[cfg(test)]
mod tests {
    use crate::*;
    use tempfile::TempDir;

    #[test]
    fn test_verbosity_filter_mapping() {
        set_verbosity(0);
        assert_eq!(verbosity_to_filter(), "warn");
        set_verbosity(1);
        assert_eq!(verbosity_to_filter(), "debug");
        set_verbosity(3);
        assert_eq!(verbosity_to_filter(), "trace");
        set_verbosity(0);
    }

    #[test]
    fn test_messages_written_to_log_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(init_in_dir(temp_dir.path()).is_ok());

        set_verbosity(0);
        warn("Unable to find parameter with name: missing");
        debug("Created run node 0 for tool 'Smoothing'");

        let Some(path) = get_log_path() else {
            panic!("log path should be set after init");
        };
        let contents = std::fs::read_to_string(path).unwrap_or_default();
        assert!(contents.contains("WARN Unable to find parameter with name: missing"));
        // Debug lines reach the file even when the console hides them
        assert!(contents.contains("DEBUG Created run node 0"));
    }
}
