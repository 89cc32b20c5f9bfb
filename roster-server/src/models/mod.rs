//! Domain models with validation at construction
//!
//! User input is validated when converting a `RecordDraft` into a
//! `NewRecord`. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod record;

pub use validation::ValidationError;
pub use record::{NewRecord, Record, RecordDraft};
