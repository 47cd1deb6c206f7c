//! Error types for truth tables and the PLA format

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors raised while building or addressing a truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruthTableError {
    /// The enumeration index would not fit; the ceiling is 31 variables
    TooManyVariables {
        /// Number of variables requested
        count: usize,
    },
    /// A row index outside `0..2^n`
    InvalidAssignmentIndex {
        /// The rejected index
        index: u64,
        /// Number of variables of the table
        variables: usize,
    },
    /// An output column that does not exist
    InvalidOutputIndex {
        /// The rejected column
        output: usize,
        /// Number of output columns
        outputs: usize,
    },
    /// A function index sized for a different number of rows
    InvalidFunctionIndex {
        /// Rows of the table
        expected_rows: u64,
        /// Rows of the supplied index
        actual_rows: u64,
    },
}

impl fmt::Display for TruthTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruthTableError::TooManyVariables { count } => write!(
                f,
                "Too many variables for a truth table: {} (at most 31 are supported)",
                count
            ),
            TruthTableError::InvalidAssignmentIndex { index, variables } => write!(
                f,
                "Assignment index {} is out of range for {} variables",
                index, variables
            ),
            TruthTableError::InvalidOutputIndex { output, outputs } => write!(
                f,
                "Output index {} is out of range for a table with {} outputs",
                output, outputs
            ),
            TruthTableError::InvalidFunctionIndex {
                expected_rows,
                actual_rows,
            } => write!(
                f,
                "Function index covers {} rows but the table has {} rows",
                actual_rows, expected_rows
            ),
        }
    }
}

impl std::error::Error for TruthTableError {}

impl From<TruthTableError> for io::Error {
    fn from(err: TruthTableError) -> Self {
        io::Error::other(err)
    }
}

/// Errors related to PLA format parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaError {
    /// No `.i` directive before the first row
    MissingInputDirective,
    /// No `.o` directive before the first row
    MissingOutputDirective,
    /// Invalid value in `.i` directive
    InvalidInputDirective {
        /// The invalid value string
        value: Arc<str>,
    },
    /// Invalid value in `.o` directive
    InvalidOutputDirective {
        /// The invalid value string
        value: Arc<str>,
    },
    /// Invalid character in the input part of a row
    InvalidInputCharacter {
        /// The invalid character
        character: char,
        /// Position in the input string
        position: usize,
        /// Line number, starting at 1
        line: usize,
    },
    /// Invalid character in the output part of a row
    InvalidOutputCharacter {
        /// The invalid character
        character: char,
        /// Position in the output string
        position: usize,
        /// Line number, starting at 1
        line: usize,
    },
    /// Row dimensions don't match declared dimensions
    RowDimensionMismatch {
        /// Line number, starting at 1
        line: usize,
        /// Expected number of inputs
        expected_inputs: usize,
        /// Actual number of inputs in the row
        actual_inputs: usize,
        /// Expected number of outputs
        expected_outputs: usize,
        /// Actual number of outputs in the row
        actual_outputs: usize,
    },
}

impl fmt::Display for PlaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaError::MissingInputDirective => write!(f, "PLA data is missing the .i directive"),
            PlaError::MissingOutputDirective => write!(f, "PLA data is missing the .o directive"),
            PlaError::InvalidInputDirective { value } => {
                write!(f, "Invalid .i directive value: '{}'", value)
            }
            PlaError::InvalidOutputDirective { value } => {
                write!(f, "Invalid .o directive value: '{}'", value)
            }
            PlaError::InvalidInputCharacter {
                character,
                position,
                line,
            } => write!(
                f,
                "Invalid input character '{}' at position {} on line {}",
                character, position, line
            ),
            PlaError::InvalidOutputCharacter {
                character,
                position,
                line,
            } => write!(
                f,
                "Invalid output character '{}' at position {} on line {}",
                character, position, line
            ),
            PlaError::RowDimensionMismatch {
                line,
                expected_inputs,
                actual_inputs,
                expected_outputs,
                actual_outputs,
            } => write!(
                f,
                "Row on line {} has {} inputs and {} outputs, expected {} and {}",
                line, actual_inputs, actual_outputs, expected_inputs, expected_outputs
            ),
        }
    }
}

impl std::error::Error for PlaError {}

impl From<PlaError> for io::Error {
    fn from(err: PlaError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors that can occur when reading a truth table from PLA data
#[derive(Debug)]
pub enum PlaReadError {
    /// PLA format error
    Pla(PlaError),
    /// The declared table cannot be built
    Table(TruthTableError),
    /// IO error during reading
    Io(io::Error),
}

impl fmt::Display for PlaReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaReadError::Pla(e) => write!(f, "PLA format error: {}", e),
            PlaReadError::Table(e) => write!(f, "Truth table error: {}", e),
            PlaReadError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PlaReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlaReadError::Pla(e) => Some(e),
            PlaReadError::Table(e) => Some(e),
            PlaReadError::Io(e) => Some(e),
        }
    }
}

impl From<PlaError> for PlaReadError {
    fn from(err: PlaError) -> Self {
        PlaReadError::Pla(err)
    }
}

impl From<TruthTableError> for PlaReadError {
    fn from(err: TruthTableError) -> Self {
        PlaReadError::Table(err)
    }
}

impl From<io::Error> for PlaReadError {
    fn from(err: io::Error) -> Self {
        PlaReadError::Io(err)
    }
}

impl From<PlaReadError> for io::Error {
    fn from(err: PlaReadError) -> Self {
        match err {
            PlaReadError::Io(e) => e,
            PlaReadError::Pla(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            PlaReadError::Table(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
