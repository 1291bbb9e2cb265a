// src/validation/rule_set.rs

use super::constraint::Constraint;

#[derive(Debug, Clone)]
struct FieldRules {
    name: String,
    constraints: Vec<Constraint>,
}

/// Ordered mapping of field names to the constraints declared for them.
///
/// Field order fixes the order of entries in a validation result; constraint
/// order fixes the order of messages within a field.
#[derive(Debug, Clone)]
pub struct RuleSet {
    entity_type: &'static str,
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn define(entity_type: &'static str) -> Self {
        Self {
            entity_type,
            fields: Vec::new(),
        }
    }

    /// Builder form of [`RuleSet::add`].
    pub fn rule(mut self, field: impl Into<String>, constraint: Constraint) -> Self {
        self.add(field, constraint);
        self
    }

    /// Append `constraint` to `field`, declaring the field on first use.
    pub fn add(&mut self, field: impl Into<String>, constraint: Constraint) {
        let field = field.into();
        match self.fields.iter_mut().find(|rules| rules.name == field) {
            Some(rules) => rules.constraints.push(constraint),
            None => self.fields.push(FieldRules {
                name: field,
                constraints: vec![constraint],
            }),
        }
    }

    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    /// Declared fields with their constraints, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Constraint])> {
        self.fields
            .iter()
            .map(|rules| (rules.name.as_str(), rules.constraints.as_slice()))
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|rules| rules.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint_names<'a>(rules: &'a RuleSet, field: &str) -> Vec<&'a str> {
        rules
            .fields()
            .filter(|(name, _)| *name == field)
            .flat_map(|(_, constraints)| constraints.iter().map(Constraint::name))
            .collect()
    }

    #[test]
    fn test_add_appends_to_existing_field() {
        let rules = RuleSet::define("Bird")
            .rule("name", Constraint::presence())
            .rule("species", Constraint::presence())
            .rule("name", Constraint::uniqueness());

        assert_eq!(constraint_names(&rules, "name"), vec!["presence", "uniqueness"]);
        assert_eq!(rules.field_names(), vec!["name", "species"]);
    }

    #[test]
    fn test_add_in_place_matches_builder() {
        let mut rules = RuleSet::define("Bird");
        rules.add("wingspan_cm", Constraint::range(Some(1.0), None));
        rules.add("name", Constraint::presence());

        assert_eq!(rules.entity_type(), "Bird");
        assert_eq!(rules.field_names(), vec!["wingspan_cm", "name"]);
        assert!(constraint_names(&rules, "species").is_empty());
    }
}
