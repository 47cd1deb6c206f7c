//! Error types for operator configuration and expression parsing

use super::operators::OperatorKind;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors raised while validating an [`OperatorSet`](super::OperatorSet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// A glyph was the empty string
    Empty {
        /// Which glyph was empty
        kind: OperatorKind,
    },
    /// A glyph begins like an identifier and would be lexed as a variable
    IdentifierLike {
        /// Which glyph was rejected
        kind: OperatorKind,
        /// The rejected glyph
        glyph: Arc<str>,
    },
    /// A glyph contains whitespace or a parenthesis
    ReservedCharacter {
        /// Which glyph was rejected
        kind: OperatorKind,
        /// The rejected glyph
        glyph: Arc<str>,
        /// The offending character
        character: char,
    },
    /// Two glyphs of the set are identical
    Duplicate {
        /// The shared glyph
        glyph: Arc<str>,
        /// First operator using it
        first: OperatorKind,
        /// Second operator using it
        second: OperatorKind,
    },
    /// One glyph of the set starts with another
    PrefixOverlap {
        /// The shorter glyph
        prefix: Arc<str>,
        /// The glyph starting with it
        glyph: Arc<str>,
        /// Operator of the shorter glyph
        first: OperatorKind,
        /// Operator of the longer glyph
        second: OperatorKind,
    },
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorError::Empty { kind } => {
                write!(f, "The {} operator glyph must not be empty", kind.as_str())
            }
            OperatorError::IdentifierLike { kind, glyph } => write!(
                f,
                "The {} operator glyph {:?} starts like a variable name",
                kind.as_str(),
                glyph
            ),
            OperatorError::ReservedCharacter {
                kind,
                glyph,
                character,
            } => write!(
                f,
                "The {} operator glyph {:?} contains the reserved character {:?}",
                kind.as_str(),
                glyph,
                character
            ),
            OperatorError::Duplicate {
                glyph,
                first,
                second,
            } => write!(
                f,
                "The glyph {:?} is used for both {} and {}",
                glyph,
                first.as_str(),
                second.as_str()
            ),
            OperatorError::PrefixOverlap {
                prefix,
                glyph,
                first,
                second,
            } => write!(
                f,
                "The {} glyph {:?} is a prefix of the {} glyph {:?}",
                first.as_str(),
                prefix,
                second.as_str(),
                glyph
            ),
        }
    }
}

impl std::error::Error for OperatorError {}

impl From<OperatorError> for io::Error {
    fn from(err: OperatorError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Errors produced when turning user text into a logic tree
///
/// Every variant reports against the complete expression the user typed, with the
/// byte offset and length of the offending part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// Malformed expression text (first syntax error only)
    Syntax {
        /// The whole expression
        expression: Arc<str>,
        /// Byte offset where the unparsable input starts
        start: usize,
        /// Length of the unparsed remainder
        length: usize,
        /// Diagnostic from the parser
        message: Arc<str>,
    },
    /// An identifier matches no input, state variable or control signal
    UnknownVariable {
        /// The whole expression
        expression: Arc<str>,
        /// Byte offset of the identifier
        start: usize,
        /// Length of the identifier
        length: usize,
        /// The identifier as written
        name: Arc<str>,
    },
    /// An identifier names an output, which cannot be read back inside an equation
    OutputVariable {
        /// The whole expression
        expression: Arc<str>,
        /// Byte offset of the identifier
        start: usize,
        /// Length of the identifier
        length: usize,
        /// The identifier as written
        name: Arc<str>,
    },
}

impl ExpressionError {
    /// The complete expression the error refers to
    pub fn expression(&self) -> &str {
        match self {
            ExpressionError::Syntax { expression, .. }
            | ExpressionError::UnknownVariable { expression, .. }
            | ExpressionError::OutputVariable { expression, .. } => expression,
        }
    }

    /// Byte offset of the offending text
    pub fn start(&self) -> usize {
        match self {
            ExpressionError::Syntax { start, .. }
            | ExpressionError::UnknownVariable { start, .. }
            | ExpressionError::OutputVariable { start, .. } => *start,
        }
    }

    /// Length of the offending text
    pub fn length(&self) -> usize {
        match self {
            ExpressionError::Syntax { length, .. }
            | ExpressionError::UnknownVariable { length, .. }
            | ExpressionError::OutputVariable { length, .. } => *length,
        }
    }

    /// The offending part of the expression
    pub fn excerpt(&self) -> &str {
        let expression = self.expression();
        let start = self.start().min(expression.len());
        let end = (start + self.length()).min(expression.len());
        expression.get(start..end).unwrap_or("")
    }

    /// Short diagnostic without position information
    pub fn message(&self) -> String {
        match self {
            ExpressionError::Syntax { message, .. } => message.to_string(),
            ExpressionError::UnknownVariable { name, .. } => {
                format!("unknown variable '{}'", name)
            }
            ExpressionError::OutputVariable { name, .. } => {
                format!("output '{}' must not appear inside an expression", name)
            }
        }
    }
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ExpressionError::Syntax { .. } => "Syntax error",
            ExpressionError::UnknownVariable { .. } => "Unknown variable",
            ExpressionError::OutputVariable { .. } => "Output in expression",
        };
        write!(
            f,
            "{} at position {} (length {}): {}. Input: {:?}",
            kind,
            self.start(),
            self.length(),
            self.message(),
            self.expression()
        )
    }
}

impl std::error::Error for ExpressionError {}

impl From<ExpressionError> for io::Error {
    fn from(err: ExpressionError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
