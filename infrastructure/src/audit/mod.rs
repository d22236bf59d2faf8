//! Audit trail adapters.
//!
//! Provides [`JsonlAuditSink`], an append-only JSONL writer that implements
//! the [`AuditSink`](blockagent_application::AuditSink) port.

mod jsonl_audit;

pub use jsonl_audit::JsonlAuditSink;
