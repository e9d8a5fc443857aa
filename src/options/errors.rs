use thiserror::Error;

/// Represents the type of error hit while building an option set
#[derive(Debug, PartialEq, Eq, Error)]
pub enum OptionError {
    /// Encountered when a key is not part of the recognized option surface
    #[error("Unknown option key '{0}'")]
    UnknownKey(String),

    /// Encountered when a value cannot be parsed into the option's type
    #[error("The '{key}' option could not be parsed from '{value}'")]
    InvalidValue { key: String, value: String },

    /// Encountered when a numeric value falls outside the option's
    /// inclusive bounds
    #[error("The '{key}' option value {value} is outside the allowed range of {min} to {max}")]
    OutOfBounds {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },
}
