// src/validation/payload.rs
//! Canonical payload shapes for each outcome.
//!
//! success:   the entity's own fields
//! not found: { "error": "<EntityType> not found" }
//! invalid:   { "errors": { "<field>": ["<message>", ...] } }

use serde::Serialize;

use super::aggregator::ValidationResult;
use super::constraint::Entity;
use super::outcome::{Outcome, RequestKind};

/// Transport-neutral status; the HTTP layer maps it to a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Ok,
    Created,
    NotFound,
    UnprocessableEntity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload<E> {
    Entity(E),
    NotFound { error: String },
    Invalid { errors: ValidationResult },
}

impl<E: Entity> ResponsePayload<E> {
    pub fn not_found() -> Self {
        ResponsePayload::NotFound {
            error: format!("{} not found", E::ENTITY_TYPE),
        }
    }
}

/// Render an outcome. `kind` picks Created vs Ok for a success.
pub fn build<E: Entity>(outcome: Outcome<E>, kind: RequestKind) -> (ResponsePayload<E>, StatusCategory) {
    match outcome {
        Outcome::Success(entity) => {
            let status = match kind {
                RequestKind::Create => StatusCategory::Created,
                RequestKind::Update => StatusCategory::Ok,
            };
            (ResponsePayload::Entity(entity), status)
        }
        Outcome::NotFound => (ResponsePayload::not_found(), StatusCategory::NotFound),
        Outcome::Invalid(result) => (
            ResponsePayload::Invalid { errors: result },
            StatusCategory::UnprocessableEntity,
        ),
    }
}
