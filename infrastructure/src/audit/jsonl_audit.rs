//! JSONL file writer for audit records.
//!
//! Each [`AuditRecord`] is serialized as a single JSON line and appended to
//! the file. Existing content is kept across process restarts.

use blockagent_application::ports::audit_log::{AuditRecord, AuditSink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Append-only JSONL audit sink.
///
/// Thread-safe via `Mutex<BufWriter<File>>`: a whole line is written and
/// flushed while the lock is held, so concurrent records never interleave.
pub struct JsonlAuditSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditSink {
    /// Open `path` for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the audit file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, record: AuditRecord) {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!(tool = %record.tool_name, "Could not serialize audit record: {}", e);
                return;
            }
        };

        match self.writer.lock() {
            Ok(mut writer) => {
                if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                    warn!(path = %self.path.display(), "Could not write audit record: {}", e);
                }
            }
            Err(_) => warn!("Audit writer lock poisoned; record dropped"),
        }
    }
}

impl Drop for JsonlAuditSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockagent_domain::ToolParams;
    use serde_json::json;
    use std::sync::Arc;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn record(tool: &str, n: u64) -> AuditRecord {
        let mut params = ToolParams::new();
        params.insert("n".into(), json!(n));
        AuditRecord::executed(tool, Some("alfajores".into()), params, json!({"txHash": "0x01"}))
    }

    #[test]
    fn test_writes_one_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = JsonlAuditSink::new(&path).unwrap();

        sink.record(record("SEND_NATIVE", 1));
        sink.record(record("GET_BALANCE", 2));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "tool_executed");
        assert_eq!(lines[0]["toolName"], "SEND_NATIVE");
        assert_eq!(lines[1]["params"]["n"], 2);
        assert!(lines[1]["timestamp"].is_string());
    }

    #[test]
    fn test_appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");

        JsonlAuditSink::new(&path)
            .unwrap()
            .record(record("SEND_NATIVE", 1));
        JsonlAuditSink::new(&path)
            .unwrap()
            .record(record("SEND_NATIVE", 2));

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_concurrent_records_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = Arc::new(JsonlAuditSink::new(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sink = sink.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        sink.record(record("SEND_NATIVE", t * 100 + i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // every line parses on its own
        let lines = read_lines(&path);
        assert_eq!(lines.len(), 200);
    }

    #[test]
    fn test_returns_none_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        // parent is a regular file, so the directory cannot be created
        assert!(JsonlAuditSink::new(blocker.join("audit.jsonl")).is_none());
    }
}
