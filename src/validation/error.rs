// src/validation/error.rs
//! Infrastructure failures raised while evaluating constraints.
//!
//! Ordinary violations never travel through these types; they are recorded
//! as data in a [`ValidationResult`](super::ValidationResult).

use thiserror::Error;

/// Failure of the prior-state lookup a constraint depends on.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Lookup does not support field '{0}'")]
    UnsupportedField(String),
}

/// A constraint could not be evaluated at all.
///
/// Aborts the whole validation pass; callers map it to a server error.
#[derive(Debug, Error)]
#[error("Constraint '{constraint}' on field '{field}' could not be evaluated: {source}")]
pub struct ConstraintFault {
    pub field: String,
    pub constraint: &'static str,
    #[source]
    pub source: LookupError,
}
