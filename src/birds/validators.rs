use regex::Regex;

use crate::validation::{Constraint, FieldValue, RuleSet};

pub const NAME_MAX_LENGTH: usize = 100;

/// Binomial nomenclature, e.g. "Archilochus colubris"
const SPECIES_PATTERN: &str = r"^[A-Z][a-z]+ [a-z]+$";

/// Rules every bird must satisfy before it is stored
pub fn bird_rules() -> Result<RuleSet, regex::Error> {
    let species = Regex::new(SPECIES_PATTERN)?;

    Ok(RuleSet::define("Bird")
        .rule("name", Constraint::presence())
        .rule("name", Constraint::custom("trimmed", trimmed))
        .rule("name", Constraint::length(None, Some(NAME_MAX_LENGTH)))
        .rule("name", Constraint::uniqueness())
        .rule(
            "species",
            Constraint::format(species)
                .with_message("must be a binomial name such as \"Archilochus colubris\""),
        )
        .rule("wingspan_cm", Constraint::range(Some(1.0), Some(400.0))))
}

/// Blank names are left to the presence rule.
fn trimmed(value: &FieldValue) -> Result<(), String> {
    match value.as_text() {
        Some(text) if !text.trim().is_empty() && text.trim() != text => {
            Err("can't start or end with whitespace".to_string())
        }
        _ => Ok(()),
    }
}
