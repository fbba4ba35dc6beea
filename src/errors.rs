use thiserror::Error;

/// Represents errors that can occur while generating a text avatar.
#[derive(Error, Debug)]
pub enum AvatarError {
    /// An option failed validation. `field` names the offending option.
    #[error("Invalid input for `{field}`: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// Options could not be deserialized from JSON.
    #[error("Failed to deserialize options JSON: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// Writing into the SVG buffer failed.
    #[error("Formatting error during SVG generation: {0}")]
    Format(#[from] std::fmt::Error),
}

impl AvatarError {
    /// Shorthand for building an [`AvatarError::InvalidInput`].
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AvatarError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Returns the offending field name for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AvatarError::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// A type alias for `Result<T, AvatarError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, AvatarError>;
