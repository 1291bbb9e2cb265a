// src/validation/aggregator.rs
// Per-call collection of violations and the immutable result it produces

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One invalid field with every reason it failed, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub messages: Vec<String>,
}

/// Aggregated outcome of running a rule set against one candidate.
///
/// `is_valid()` holds exactly when no field recorded a violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Invalid fields in rule set declaration order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[cfg(test)]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.messages.as_slice())
    }

    pub fn error_count(&self) -> usize {
        self.errors.iter().map(|error| error.messages.len()).sum()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Serializes as `{ "<field>": ["<message>", ...], ... }` keeping field order.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(&error.field, &error.messages)?;
        }
        map.end()
    }
}

/// Collects violations keyed by field without ever short-circuiting.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    field_order: Vec<String>,
    errors: Vec<ValidationError>,
}

impl ErrorAggregator {
    /// Fix the output order of fields regardless of recording order.
    pub fn with_field_order(field_order: Vec<String>) -> Self {
        Self {
            field_order,
            errors: Vec::new(),
        }
    }

    pub fn record(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.errors.iter_mut().find(|error| error.field == field) {
            Some(error) => error.messages.push(message),
            None => self.errors.push(ValidationError {
                field: field.to_string(),
                messages: vec![message],
            }),
        }
    }

    /// Fields named in the declared order come first; any others follow in
    /// the order they were first recorded.
    pub fn into_result(self) -> ValidationResult {
        let ErrorAggregator {
            field_order,
            mut errors,
        } = self;

        errors.sort_by_key(|error| {
            field_order
                .iter()
                .position(|field| *field == error.field)
                .unwrap_or(field_order.len())
        });

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_aggregator_is_valid() {
        let result = ErrorAggregator::default().into_result();
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_record_keeps_multiplicity_per_field() {
        let mut aggregator = ErrorAggregator::default();
        aggregator.record("name", "can't be blank");
        aggregator.record("name", "is too short (minimum is 2 characters)");

        let result = aggregator.into_result();
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(
            result.messages("name").unwrap(),
            ["can't be blank", "is too short (minimum is 2 characters)"]
        );
        assert_eq!(result.error_count(), 2);
    }

    #[test]
    fn test_declared_order_wins_over_recording_order() {
        let mut aggregator = ErrorAggregator::with_field_order(vec![
            "name".to_string(),
            "species".to_string(),
            "wingspan_cm".to_string(),
        ]);
        aggregator.record("extra", "is invalid");
        aggregator.record("wingspan_cm", "is not a number");
        aggregator.record("name", "can't be blank");

        let fields: Vec<String> = aggregator
            .into_result()
            .errors()
            .iter()
            .map(|error| error.field.clone())
            .collect();
        assert_eq!(fields, vec!["name", "wingspan_cm", "extra"]);
    }

    #[test]
    fn test_undeclared_fields_keep_recording_order() {
        let mut aggregator = ErrorAggregator::default();
        aggregator.record("wingspan_cm", "is not a number");
        aggregator.record("name", "can't be blank");

        let fields: Vec<String> = aggregator
            .into_result()
            .errors()
            .iter()
            .map(|error| error.field.clone())
            .collect();
        assert_eq!(fields, vec!["wingspan_cm", "name"]);
    }

    #[test]
    fn test_serializes_as_field_message_map() {
        let mut aggregator = ErrorAggregator::with_field_order(vec![
            "name".to_string(),
            "species".to_string(),
        ]);
        aggregator.record("species", "is invalid");
        aggregator.record("name", "can't be blank");

        let json = serde_json::to_string(&aggregator.into_result()).unwrap();
        assert_eq!(
            json,
            r#"{"name":["can't be blank"],"species":["is invalid"]}"#
        );
    }
}
