//! Core error types for routinely-core.
//!
//! This module defines the error hierarchy using thiserror for better
//! error handling and reporting across the library.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for routinely-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Model gateway errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the model gateway boundary.
///
/// The gateway makes a single attempt -- no retry, no backoff -- so every
/// variant surfaces directly to the caller of the turn that issued it.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The HTTP request itself failed (connect, timeout, TLS, ...)
    #[error("Request to text-generation service failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Text-generation service returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The service answered 2xx but the completion had no content
    #[error("Text-generation service returned an empty completion")]
    EmptyCompletion,

    /// API key environment variable is not set
    #[error("API key environment variable '{env}' is not set")]
    MissingApiKey { env: String },

    /// The configured base URL does not parse
    #[error("Invalid gateway base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
