//! roster-server: HTTP server for a single-entity record roster
//!
//! Lists records newest first and creates records after a presence check
//! and an external-code uniqueness check. Also serves a small browser UI.

pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use db::{DbError, MemoryRecordStore, PgRecordStore, RecordStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{NewRecord, Record, RecordDraft, ValidationError};
pub use service::{RecordService, ServiceError};
