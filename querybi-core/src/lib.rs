//! QUERYBI CORE - Data model and safety gate
//!
//! Pure data types and logic shared by the synthesizer and API layers:
//! the query/response model, the error taxonomy, and the read-only SQL
//! safety gate. No I/O lives in this crate.

pub mod error;
pub mod gate;
pub mod query;

// Re-export commonly used types
pub use error::{ConfigError, ExecutionError, QueryBiError, QueryBiResult, SynthesisError};
pub use gate::{AllowedSql, RejectionReason, SafetyGate, FORBIDDEN_KEYWORDS};
pub use query::{
    ensure_trailing_semicolon, strip_trailing_semicolons, QueryResponse, Row, SynthesizedQuery,
};
