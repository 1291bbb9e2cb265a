// src/validation/validator.rs

use futures::future::join_all;
use tracing::{debug, error};

use super::aggregator::{ErrorAggregator, ValidationResult};
use super::constraint::{ConstraintOutcome, Entity, Lookup};
use super::error::ConstraintFault;
use super::rule_set::RuleSet;

/// Run every constraint of `rules` against `candidate`.
///
/// All evaluations are started together and joined before aggregation, so a
/// violation never hides later ones. If any constraint faults, the whole
/// call fails with the first fault in declaration order and no partial
/// result is produced.
pub async fn validate<E: Entity>(
    rules: &RuleSet,
    candidate: &E,
    lookup: &dyn Lookup,
) -> Result<ValidationResult, ConstraintFault> {
    let evaluations = rules.fields().flat_map(move |(field, constraints)| {
        constraints.iter().map(move |constraint| async move {
            let outcome = constraint.evaluate(field, candidate, lookup).await;
            (field, constraint.name(), outcome)
        })
    });

    let outcomes = join_all(evaluations).await;

    let mut aggregator = ErrorAggregator::with_field_order(rules.field_names());
    for (field, constraint, outcome) in outcomes {
        match outcome {
            Ok(ConstraintOutcome::Satisfied) => {}
            Ok(ConstraintOutcome::Violated(message)) => aggregator.record(field, message),
            Err(source) => {
                error!(
                    entity = rules.entity_type(),
                    field = field,
                    constraint = constraint,
                    error = %source,
                    "Constraint evaluation failed"
                );
                return Err(ConstraintFault {
                    field: field.to_string(),
                    constraint,
                    source,
                });
            }
        }
    }

    let result = aggregator.into_result();
    debug!(
        entity = rules.entity_type(),
        valid = result.is_valid(),
        invalid_fields = result.errors().len(),
        "Validation completed"
    );

    Ok(result)
}
