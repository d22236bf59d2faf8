//! Port for the append-only audit trail.
//!
//! Every completed tool execution produces one [`AuditRecord`]. Records are
//! written, never read back by the core.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures what was executed
//! in a machine-readable format (JSONL in the infrastructure adapter).

use blockagent_domain::ToolParams;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Event name recorded for a completed execution.
pub const TOOL_EXECUTED_EVENT: &str = "tool_executed";

/// One completed effect.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub event: &'static str,
    pub tool_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    pub params: ToolParams,
    pub result: Value,
}

impl AuditRecord {
    /// Create a `tool_executed` record stamped with the current UTC time.
    pub fn executed(
        tool_name: impl Into<String>,
        chain: Option<String>,
        params: ToolParams,
        result: Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            event: TOOL_EXECUTED_EVENT,
            tool_name: tool_name.into(),
            chain,
            params,
            result,
        }
    }
}

/// Port for appending audit records.
///
/// Implementations must tolerate concurrent callers: two records written
/// at the same time must never interleave. `record` is synchronous and
/// non-fallible so auditing cannot fail a completed execution; adapters
/// report write failures through `tracing`.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditSink;

impl AuditSink for NoAuditSink {
    fn record(&self, _record: AuditRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serializes_camel_case() {
        let mut params = ToolParams::new();
        params.insert("to".into(), json!("0xabc"));
        let record = AuditRecord::executed(
            "SEND_NATIVE",
            Some("celo".into()),
            params,
            json!({"txHash": "0x01"}),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["event"], "tool_executed");
        assert_eq!(value["toolName"], "SEND_NATIVE");
        assert_eq!(value["chain"], "celo");
        assert_eq!(value["params"]["to"], "0xabc");
        assert_eq!(value["result"]["txHash"], "0x01");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_record_omits_missing_chain() {
        let record = AuditRecord::executed("NEW_WALLET", None, ToolParams::new(), json!({}));
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("chain").is_none());
    }
}
