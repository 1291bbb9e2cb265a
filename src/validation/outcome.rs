// src/validation/outcome.rs
//! Classification of a mutation attempt into its terminal outcome.
//!
//! Create and update requests share one decision function instead of each
//! handler growing its own nested branches.

use tracing::warn;

use super::aggregator::ValidationResult;
use super::constraint::{Entity, Lookup};
use super::error::ConstraintFault;
use super::rule_set::RuleSet;
use super::validator::validate;

/// Kind of mutation being attempted; decides the success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<E> {
    Success(E),
    NotFound,
    Invalid(ValidationResult),
}

impl Outcome<()> {
    /// Pure three-way decision.
    ///
    /// A missing target is `NotFound` whatever the result says; otherwise an
    /// invalid result is `Invalid`; otherwise the request succeeds.
    pub fn classify(lookup_found: bool, result: ValidationResult) -> Self {
        match (lookup_found, result.is_valid()) {
            (false, _) => Outcome::NotFound,
            (true, false) => Outcome::Invalid(result),
            (true, true) => Outcome::Success(()),
        }
    }

    /// Attach the candidate a `Success` decision refers to.
    fn with_candidate<E>(self, candidate: Option<E>) -> Outcome<E> {
        match (self, candidate) {
            (Outcome::Success(()), Some(candidate)) => Outcome::Success(candidate),
            (Outcome::Invalid(result), _) => Outcome::Invalid(result),
            (Outcome::Success(()), None) | (Outcome::NotFound, _) => Outcome::NotFound,
        }
    }
}

/// Validate a brand new candidate. There is no lookup step for creates.
pub async fn create<E: Entity>(
    rules: &RuleSet,
    candidate: E,
    lookup: &dyn Lookup,
) -> Result<Outcome<E>, ConstraintFault> {
    let result = validate(rules, &candidate, lookup).await?;
    let outcome = Outcome::classify(true, result).with_candidate(Some(candidate));
    log_rejection(RequestKind::Create, &outcome);
    Ok(outcome)
}

/// Validate changes to a stored entity.
///
/// `existing` is the result of the entity lookup. When it is `None` the
/// changes are never applied and validation never runs.
pub async fn update<E, F>(
    rules: &RuleSet,
    existing: Option<E>,
    apply: F,
    lookup: &dyn Lookup,
) -> Result<Outcome<E>, ConstraintFault>
where
    E: Entity,
    F: FnOnce(E) -> E,
{
    let lookup_found = existing.is_some();
    let (candidate, result) = match existing {
        Some(stored) => {
            let candidate = apply(stored);
            let result = validate(rules, &candidate, lookup).await?;
            (Some(candidate), result)
        }
        None => (None, ValidationResult::valid()),
    };

    let outcome = Outcome::classify(lookup_found, result).with_candidate(candidate);
    log_rejection(RequestKind::Update, &outcome);
    Ok(outcome)
}

fn log_rejection<E: Entity>(kind: RequestKind, outcome: &Outcome<E>) {
    match outcome {
        Outcome::Success(_) => {}
        Outcome::NotFound => {
            warn!(entity = E::ENTITY_TYPE, ?kind, "Mutation target not found");
        }
        Outcome::Invalid(result) => {
            warn!(
                entity = E::ENTITY_TYPE,
                ?kind,
                invalid_fields = result.errors().len(),
                violations = result.error_count(),
                "Mutation rejected by validation"
            );
        }
    }
}
