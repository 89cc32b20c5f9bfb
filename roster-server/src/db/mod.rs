//! Database layer - connection pool, migrations, and the record store
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default), created once per process
//! - Rely on DB constraints, handle conflicts - the unique index on
//!   `external_code` wins over any check-then-insert race
//! - Single-statement writes, so no explicit transactions

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryRecordStore;
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use postgres::PgRecordStore;
pub use store::{DbError, RecordStore};
