//! Error types for the settings layer, the generator and the front end.

use thiserror::Error;

use crate::cli::ArgError;

/// The generator cannot satisfy the requested character/length constraints.
///
/// This is the only error kind that is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("select at least one character class")]
    NoClasses,

    #[error("character class {0} has no characters")]
    EmptyClass(usize),

    #[error("length {length} is below the combined minimum of {required} characters")]
    TooShort { length: usize, required: usize },

    #[error("exact counts add up to {exact} but length is {length}")]
    ExactMismatch { exact: usize, length: usize },

    #[error("{0}")]
    Custom(String),
}

impl ConstraintError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// A label/control pairing could not be resolved. A markup defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("label {label:?} has no target id")]
    MissingTarget { label: String },

    #[error("label {label:?} targets {target:?}, which is not a checkbox in the document")]
    MissingCheckbox { label: String, target: String },

    #[error("no exact-count input found for class {target:?}")]
    MissingExactly { target: String },
}

/// Non-numeric text in a length control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("length {0:?} is not a whole number")]
    NotANumber(String),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no input field near the copy target")]
    NoField,

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to copy: {0}")]
    Write(String),
}

/// Umbrella error for the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Args(#[from] ArgError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl Error {
    /// Process exit status: 2 for usage errors, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Args(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_setup() -> Result<()> {
        Err::<(), _>(DiscoveryError::MissingExactly {
            target: "digits".into(),
        })?;
        Ok(())
    }

    fn fails_parse() -> Result<u32> {
        let n = Err::<u32, _>(ArgError::UnknownArg("--bytes".into()))?;
        Ok(n)
    }

    #[test]
    fn errors_convert_and_keep_their_message() {
        let err = fails_setup().unwrap_err();
        assert!(matches!(err, Error::Discovery(_)));
        assert_eq!(err.to_string(), "no exact-count input found for class \"digits\"");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn usage_errors_exit_with_two() {
        let err = fails_parse().unwrap_err();
        assert_eq!(err.to_string(), "Unknown argument: --bytes");
        assert_eq!(err.exit_code(), 2);
    }
}
