// src/validation/constraint.rs
//! Field values, the entity/lookup capabilities, and the constraint catalogue.

use async_trait::async_trait;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::error::LookupError;

// ============================================================================
// Field values and entities
// ============================================================================

/// Semantic value of one entity field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Absent, or text that is empty once whitespace is trimmed
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Finite numeric reading of the value; numeric strings count as numbers.
    ///
    /// NaN and the infinities compare false against any bound, so they are
    /// never treated as numbers.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
            FieldValue::Absent => None,
        };
        number.filter(|number| number.is_finite())
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Absent)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map(FieldValue::Float).unwrap_or(FieldValue::Absent)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map(FieldValue::Integer).unwrap_or(FieldValue::Absent)
    }
}

/// A record with named fields that can be validated before persistence.
pub trait Entity: Send + Sync {
    /// Human-readable type name, used in "not found" payloads.
    const ENTITY_TYPE: &'static str;

    /// Stored identity, `None` for a candidate that has never been persisted.
    fn id(&self) -> Option<&str>;

    fn field(&self, name: &str) -> FieldValue;
}

/// Read-only access to previously stored entities of one type.
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Whether a stored entity other than `exclude_id` holds `value` in `field`.
    async fn value_taken(
        &self,
        field: &str,
        value: &FieldValue,
        exclude_id: Option<&str>,
    ) -> Result<bool, LookupError>;
}

// ============================================================================
// Constraints
// ============================================================================

/// Result of evaluating one constraint against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOutcome {
    Satisfied,
    Violated(String),
}

impl ConstraintOutcome {
    fn check(satisfied: bool, message: impl FnOnce() -> String) -> Self {
        if satisfied {
            ConstraintOutcome::Satisfied
        } else {
            ConstraintOutcome::Violated(message())
        }
    }
}

/// Whether uniqueness ignores the candidate's own stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniquenessScope {
    /// Re-saving an entity with its unchanged value passes.
    #[default]
    ExcludeSelf,
    /// Any stored row with the value counts, including the candidate's own.
    #[allow(dead_code)]
    IncludeSelf,
}

pub type CustomCheck = Arc<dyn Fn(&FieldValue) -> Result<(), String> + Send + Sync>;

#[derive(Clone)]
enum ConstraintKind {
    Presence,
    Uniqueness { scope: UniquenessScope },
    Format { pattern: Regex },
    Length { min: Option<usize>, max: Option<usize> },
    Range { min: Option<f64>, max: Option<f64> },
    Custom { name: &'static str, check: CustomCheck },
}

/// A named, pure rule attached to one field of a [`RuleSet`](super::RuleSet).
#[derive(Clone)]
pub struct Constraint {
    kind: ConstraintKind,
    message: Option<String>,
}

impl Constraint {
    fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn presence() -> Self {
        Self::new(ConstraintKind::Presence)
    }

    pub fn uniqueness() -> Self {
        Self::uniqueness_with_scope(UniquenessScope::default())
    }

    pub fn uniqueness_with_scope(scope: UniquenessScope) -> Self {
        Self::new(ConstraintKind::Uniqueness { scope })
    }

    pub fn format(pattern: Regex) -> Self {
        Self::new(ConstraintKind::Format { pattern })
    }

    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self::new(ConstraintKind::Length { min, max })
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(ConstraintKind::Range { min, max })
    }

    pub fn custom<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::new(ConstraintKind::Custom {
            name,
            check: Arc::new(check),
        })
    }

    /// Replace the default violation message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn name(&self) -> &'static str {
        match &self.kind {
            ConstraintKind::Presence => "presence",
            ConstraintKind::Uniqueness { .. } => "uniqueness",
            ConstraintKind::Format { .. } => "format",
            ConstraintKind::Length { .. } => "length",
            ConstraintKind::Range { .. } => "range",
            ConstraintKind::Custom { name, .. } => *name,
        }
    }

    fn message_or(&self, default: impl Into<String>) -> String {
        self.message.clone().unwrap_or_else(|| default.into())
    }

    /// Evaluate against `field` of `candidate`.
    ///
    /// Never mutates the candidate or the lookup. An `Err` means the
    /// constraint's own machinery failed, not that the value is invalid.
    pub async fn evaluate<E: Entity>(
        &self,
        field: &str,
        candidate: &E,
        lookup: &dyn Lookup,
    ) -> Result<ConstraintOutcome, LookupError> {
        let value = candidate.field(field);

        let outcome = match &self.kind {
            ConstraintKind::Presence => {
                ConstraintOutcome::check(!value.is_blank(), || self.message_or("can't be blank"))
            }
            ConstraintKind::Uniqueness { scope } => {
                if value.is_absent() {
                    return Ok(ConstraintOutcome::Satisfied);
                }
                let exclude_id = match scope {
                    UniquenessScope::ExcludeSelf => candidate.id(),
                    UniquenessScope::IncludeSelf => None,
                };
                let taken = lookup.value_taken(field, &value, exclude_id).await?;
                ConstraintOutcome::check(!taken, || self.message_or("has already been taken"))
            }
            ConstraintKind::Format { pattern } => match &value {
                FieldValue::Absent => ConstraintOutcome::Satisfied,
                other => {
                    let matched = other.as_text().is_some_and(|text| pattern.is_match(text));
                    ConstraintOutcome::check(matched, || self.message_or("is invalid"))
                }
            },
            ConstraintKind::Length { min, max } => self.evaluate_length(&value, *min, *max),
            ConstraintKind::Range { min, max } => self.evaluate_range(&value, *min, *max),
            ConstraintKind::Custom { check, .. } => match check(&value) {
                Ok(()) => ConstraintOutcome::Satisfied,
                Err(message) => ConstraintOutcome::Violated(self.message_or(message)),
            },
        };

        Ok(outcome)
    }

    fn evaluate_length(
        &self,
        value: &FieldValue,
        min: Option<usize>,
        max: Option<usize>,
    ) -> ConstraintOutcome {
        let Some(text) = value.as_text() else {
            return ConstraintOutcome::Satisfied;
        };
        let count = text.chars().count();

        if let Some(min) = min.filter(|min| count < *min) {
            return ConstraintOutcome::Violated(
                self.message_or(format!("is too short (minimum is {} characters)", min)),
            );
        }
        if let Some(max) = max.filter(|max| count > *max) {
            return ConstraintOutcome::Violated(
                self.message_or(format!("is too long (maximum is {} characters)", max)),
            );
        }
        ConstraintOutcome::Satisfied
    }

    fn evaluate_range(
        &self,
        value: &FieldValue,
        min: Option<f64>,
        max: Option<f64>,
    ) -> ConstraintOutcome {
        if value.is_absent() {
            return ConstraintOutcome::Satisfied;
        }
        let Some(number) = value.as_number() else {
            return ConstraintOutcome::Violated(self.message_or("is not a number"));
        };

        if let Some(min) = min.filter(|min| number < *min) {
            return ConstraintOutcome::Violated(
                self.message_or(format!("must be greater than or equal to {}", min)),
            );
        }
        if let Some(max) = max.filter(|max| number > *max) {
            return ConstraintOutcome::Violated(
                self.message_or(format!("must be less than or equal to {}", max)),
            );
        }
        ConstraintOutcome::Satisfied
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Constraint");
        debug.field("name", &self.name());
        match &self.kind {
            ConstraintKind::Uniqueness { scope } => debug.field("scope", scope),
            ConstraintKind::Format { pattern } => debug.field("pattern", &pattern.as_str()),
            ConstraintKind::Length { min, max } => debug.field("min", min).field("max", max),
            ConstraintKind::Range { min, max } => debug.field("min", min).field("max", max),
            ConstraintKind::Presence | ConstraintKind::Custom { .. } => &mut debug,
        };
        debug.field("message", &self.message).finish()
    }
}
