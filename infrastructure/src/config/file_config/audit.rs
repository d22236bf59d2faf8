//! Audit trail settings from TOML (`[audit]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    pub enabled: bool,
    /// JSONL file; defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for FileAuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileAuditConfig {
    /// Configured path, or `<data dir>/blockagent/audit.jsonl`, or
    /// `./blockagent-audit.jsonl` when no data directory is known.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        dirs::data_local_dir()
            .map(|d| d.join("blockagent").join("audit.jsonl"))
            .unwrap_or_else(|| PathBuf::from("blockagent-audit.jsonl"))
    }
}
