// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod id_generator;
pub mod migrations;
pub mod response;
pub mod state;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::ApiError;
pub use id_generator::*;
pub use response::render;
pub use state::AppState;
