use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::expand_home;
use crate::config::schema::LoggingConfig;
use crate::scenario::Scenario;

// ---------------------------------------------------------------------------
// Request log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single entry in the request log (`~/.pawcare/request-log.jsonl`).
///
/// One line per request served by `pawcare serve`. Read back by
/// `pawcare check` for the per-scenario breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub timestamp: String,
    pub method: String,
    pub path: String,
    /// Scenario the request rendered, for scenario-dependent endpoints.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scenario: Option<Scenario>,
    pub status: u16,
}

impl RequestLogEntry {
    pub fn new(method: &str, path: &str, scenario: Option<Scenario>, status: u16) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            method: method.to_string(),
            path: path.to_string(),
            scenario,
            status,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Record a served request.
///
/// Best-effort: a disabled log, an unresolvable path or an I/O failure are
/// all silently ignored.
pub fn log_request(config: &LoggingConfig, entry: &RequestLogEntry) {
    if !config.enabled {
        return;
    }
    let Some(path) = request_log_path(config) else {
        return;
    };
    let _ = append_log_entry(&path, entry);
}

fn append_log_entry(path: &Path, entry: &RequestLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all request log entries from `path`.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries(path: &Path) -> Vec<RequestLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RequestLogEntry>(&line).ok())
        .collect()
}

/// Requests per rendered scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioCounts {
    pub optimized: usize,
    pub fragmented: usize,
    /// Requests to scenario-independent endpoints.
    pub other: usize,
}

pub fn scenario_counts(entries: &[RequestLogEntry]) -> ScenarioCounts {
    entries
        .iter()
        .fold(ScenarioCounts::default(), |mut counts, entry| {
            match entry.scenario {
                Some(Scenario::Optimized) => counts.optimized += 1,
                Some(Scenario::Fragmented) => counts.fragmented += 1,
                None => counts.other += 1,
            }
            counts
        })
}

/// Resolve the configured request log location.
pub fn request_log_path(config: &LoggingConfig) -> Option<PathBuf> {
    expand_home(&config.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A log file inside a per-test directory, removed on drop.
    struct TempLog {
        dir: PathBuf,
        path: PathBuf,
    }

    impl Drop for TempLog {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    fn temp_log(name: &str) -> TempLog {
        let dir = std::env::temp_dir().join(format!(
            "pawcare-test-{}-{}",
            std::process::id(),
            name.trim_end_matches(".jsonl")
        ));
        let _ = fs::remove_dir_all(&dir);
        TempLog {
            path: dir.join(name),
            dir,
        }
    }

    #[test]
    fn appended_entries_read_back_in_order() {
        let log = temp_log("roundtrip.jsonl");
        let path = &log.path;
        let first = RequestLogEntry::new("GET", "/", Some(Scenario::Optimized), 200);
        let second = RequestLogEntry::new("GET", "/api/chart", None, 200);
        append_log_entry(path, &first).unwrap();
        append_log_entry(path, &second).unwrap();

        let entries = read_all_entries(path);
        assert_eq!(entries, vec![first, second]);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let log = temp_log("malformed.jsonl");
        let path = &log.path;
        let entry = RequestLogEntry::new("GET", "/", Some(Scenario::Fragmented), 200);
        append_log_entry(path, &entry).unwrap();
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        writeln!(file, "{{not json").unwrap();

        assert_eq!(read_all_entries(path).len(), 1);
    }

    #[test]
    fn temp_log_directory_is_removed_on_drop() {
        let log = temp_log("cleanup.jsonl");
        append_log_entry(&log.path, &RequestLogEntry::new("GET", "/", None, 200)).unwrap();
        let dir = log.dir.clone();
        assert!(dir.exists());
        drop(log);
        assert!(!dir.exists());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        assert!(read_all_entries(&temp_log("absent.jsonl").path).is_empty());
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = temp_log("disabled.jsonl");
        let path = &log.path;
        let config = LoggingConfig {
            enabled: false,
            path: path.to_string_lossy().into_owned(),
        };
        log_request(&config, &RequestLogEntry::new("GET", "/", None, 200));
        assert!(!path.exists());
    }

    #[test]
    fn scenario_counts_groups_entries() {
        let entries = vec![
            RequestLogEntry::new("GET", "/", Some(Scenario::Optimized), 200),
            RequestLogEntry::new("GET", "/", Some(Scenario::Optimized), 200),
            RequestLogEntry::new("GET", "/", Some(Scenario::Fragmented), 200),
            RequestLogEntry::new("GET", "/api/chart", None, 200),
        ];
        assert_eq!(
            scenario_counts(&entries),
            ScenarioCounts {
                optimized: 2,
                fragmented: 1,
                other: 1,
            }
        );
    }

    #[test]
    fn scenario_is_omitted_when_absent() {
        let entry = RequestLogEntry::new("GET", "/api/chart", None, 404);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("scenario"));
        assert!(json.contains("\"status\":404"));
    }
}
