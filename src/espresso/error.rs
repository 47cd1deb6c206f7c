//! Error types for minimisation

use crate::truth_table::TruthTableError;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors that can occur during minimisation
///
/// All variants signal a contract violation by the calling code rather than bad
/// user input; they are returned so that callers can abort cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizationError {
    /// The truth table could not be built or addressed
    Table(TruthTableError),
    /// A placeholder had no variable to replace it
    UnreplacedPlaceholder {
        /// Index of the placeholder
        placeholder: usize,
        /// Number of variables supplied
        variables: usize,
    },
    /// The engine returned a cube that does not fit the table
    InvalidCube {
        /// The offending cube string
        cube: Arc<str>,
        /// Number of inputs of the table
        inputs: usize,
    },
    /// The engine failed
    Engine {
        /// Diagnostic from the engine
        message: Arc<str>,
    },
}

impl fmt::Display for MinimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizationError::Table(e) => write!(f, "Truth table error: {}", e),
            MinimizationError::UnreplacedPlaceholder {
                placeholder,
                variables,
            } => write!(
                f,
                "Not enough variables to replace all placeholders: placeholder {} with {} variables",
                placeholder, variables
            ),
            MinimizationError::InvalidCube { cube, inputs } => write!(
                f,
                "Engine returned cube {:?} which does not fit a table with {} inputs",
                cube, inputs
            ),
            MinimizationError::Engine { message } => write!(f, "Engine error: {}", message),
        }
    }
}

impl std::error::Error for MinimizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MinimizationError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TruthTableError> for MinimizationError {
    fn from(err: TruthTableError) -> Self {
        MinimizationError::Table(err)
    }
}

impl From<MinimizationError> for io::Error {
    fn from(err: MinimizationError) -> Self {
        match err {
            MinimizationError::InvalidCube { .. } => io::Error::new(io::ErrorKind::InvalidData, err),
            _ => io::Error::other(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_table_error_is_source() {
        let err = MinimizationError::from(TruthTableError::TooManyVariables { count: 40 });
        assert!(err.to_string().contains("40"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unreplaced_placeholder_message() {
        let err = MinimizationError::UnreplacedPlaceholder {
            placeholder: 3,
            variables: 2,
        };
        assert!(err.to_string().contains("placeholder 3"));
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_invalid_cube_is_invalid_data() {
        let err = MinimizationError::InvalidCube {
            cube: Arc::from("1x"),
            inputs: 2,
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
