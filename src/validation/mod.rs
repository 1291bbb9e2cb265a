//! # Validation Module
//!
//! Declarative validation and error reporting for create/update requests:
//! - Rule sets of composable constraints per field
//! - Exhaustive evaluation with per-field aggregation of violations
//! - Classification into Success / NotFound / Invalid outcomes
//! - Canonical success and error payloads

pub mod aggregator;
pub mod constraint;
pub mod error;
pub mod outcome;
pub mod payload;
pub mod rule_set;
pub mod validator;


pub use constraint::{Constraint, Entity, FieldValue, Lookup};
pub use error::{ConstraintFault, LookupError};
pub use outcome::{Outcome, RequestKind};
pub use payload::{build, ResponsePayload, StatusCategory};
pub use rule_set::RuleSet;
