use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{Entity, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Bird {
    pub id: String,
    pub name: Option<String>,
    pub species: Option<String>,
    pub wingspan_cm: Option<f64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Whitelisted input for create and update; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct BirdParams {
    pub name: Option<String>,
    pub species: Option<String>,
    pub wingspan_cm: Option<f64>,
}

impl Bird {
    /// Build an unsaved candidate from request input
    pub fn from_params(id: String, params: BirdParams) -> Self {
        Self {
            id,
            name: params.name,
            species: params.species,
            wingspan_cm: params.wingspan_cm,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overlay the keys present in `params` onto a stored bird
    pub fn apply(mut self, params: BirdParams) -> Self {
        if let Some(name) = params.name {
            self.name = Some(name);
        }
        if let Some(species) = params.species {
            self.species = Some(species);
        }
        if let Some(wingspan_cm) = params.wingspan_cm {
            self.wingspan_cm = Some(wingspan_cm);
        }
        self
    }
}

impl Entity for Bird {
    const ENTITY_TYPE: &'static str = "Bird";

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => self.name.clone().into(),
            "species" => self.species.clone().into(),
            "wingspan_cm" => self.wingspan_cm.into(),
            _ => FieldValue::Absent,
        }
    }
}
