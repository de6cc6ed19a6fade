//! Error types for registry resolution and cloning runs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CloneError>;

/// Errors raised while resolving the registry or matching declarations
/// against it. Fatal to the current cloning run, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no resolver registered under '{name}'")]
    UnknownResolver { name: String },

    #[error("ordering constraint on '{binding}' references unknown resolver '{anchor}'")]
    UnknownAnchor { binding: String, anchor: String },

    #[error("ordering constraints among {names:?} cannot be satisfied")]
    UnresolvableOrder { names: Vec<String> },

    #[error("declaration for '{resolver}' carries an unexpected payload")]
    InvalidDeclaration { resolver: String },
}

/// Top-level error for a cloning run. Resolver-raised failures propagate
/// unchanged; the caller receives either a fully resolved clone or an error,
/// never a half-processed one.
#[derive(Error, Debug)]
pub enum CloneError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Resolver(#[from] anyhow::Error),
}
