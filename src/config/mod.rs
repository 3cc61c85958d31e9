/// Database configuration and connection management
pub mod database;

/// Application settings and recipe seeds from config.toml
pub mod settings;
