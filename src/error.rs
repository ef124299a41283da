//! Unified error types for the project-board application.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors raised while mounting a component into the document.
///
/// These are construction-time faults: the document is missing a template
/// or host the component was built against.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComponentError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template is empty: {0}")]
    EmptyTemplate(String),

    #[error("Host element not found: {0}")]
    HostNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for component construction
pub type ComponentResult<T> = std::result::Result<T, ComponentError>;
