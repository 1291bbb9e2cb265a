//! # Birds Module
//!
//! This module handles the bird resource:
//! - Bird CRUD endpoints
//! - The bird rule set (presence, uniqueness, format, length, range)
//! - SQLite persistence doubling as the uniqueness lookup

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::birds_routes;
