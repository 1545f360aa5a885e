//! Combobox error types

use thiserror::Error;

/// Errors surfaced to the integrating developer
///
/// Interaction attempts never produce errors; these only report integration
/// mistakes and bad configuration.
#[derive(Error, Debug)]
pub enum ComboboxError {
    /// A part was resolved outside of its required ancestor
    #[error("{part} is missing parent {ancestor}")]
    MissingContext {
        part: &'static str,
        ancestor: &'static str,
    },

    /// Configuration could not be parsed
    #[error("Invalid combobox configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for combobox operations
pub type Result<T> = std::result::Result<T, ComboboxError>;
