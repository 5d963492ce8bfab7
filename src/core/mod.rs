//! Shared translation domain: languages, wire models, errors, configuration
//! and the translator client

pub mod client;
pub mod config;
pub mod errors;
pub mod language;
pub mod models;
