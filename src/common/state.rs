// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::common::config::AppConfig;
use crate::validation::RuleSet;

/// Application state containing the database pool, configuration and rule sets
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: AppConfig,
    pub bird_rules: Arc<RuleSet>,
}
