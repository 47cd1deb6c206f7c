//! Parsing of user-typed boolean expressions
//!
//! Text is tokenised with the glyphs of an [`OperatorSet`], parsed into a generic
//! [`ParseNode`] tree by the generated grammar and transformed into a typed
//! [`LogicRoot`] by resolving every identifier against a [`SymbolTable`].
//!
//! # Grammar
//!
//! With the default glyphs:
//!
//! ```text
//! or      := and ( '+' and )*
//! and     := term ( '&' term )*
//! neg     := '/' term
//! term    := const | var | neg | bracket
//! bracket := '(' or ')'
//! var     := identifier ( '.' identifier )*
//! const   := '1' | '0'
//! ```
//!
//! AND binds tighter than OR and NOT applies to a single term. Whitespace is
//! allowed anywhere except inside identifiers.
//!
//! # Identifier Resolution
//!
//! Identifiers are compared case-insensitively with the names users see. Inputs win
//! over state variables, which win over control signals. State variables of the
//! automaton an expression belongs to may be written `z0`; otherwise they need the
//! automaton prefix, `traffic.z0`. Control signals are always `automaton.signal`.
//! Naming an output is an error of its own, since outputs cannot be read back.
//!
//! # Examples
//!
//! ```
//! use automaton_logic::expression::ExpressionParser;
//! use automaton_logic::tree::{SymbolTable, SystemAssignment, Variable};
//! use automaton_logic::OperatorSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbols = SymbolTable::new(OperatorSet::default())
//!     .with_input(0, "a")
//!     .with_input(1, "b")
//!     .with_input(2, "c");
//! let parser = ExpressionParser::for_symbols(&symbols);
//!
//! let root = parser.parse("a&b+/c", &symbols, None)?;
//! let assignment = SystemAssignment::new()
//!     .with(Variable::Input(0), true)
//!     .with(Variable::Input(1), true);
//! assert!(root.evaluate(&assignment));
//! assert_eq!(root.to_custom_string(&symbols), "a&b+/c");
//! # Ok(())
//! # }
//! ```

pub mod error;
mod grammar;
mod lexer;
pub mod operators;
mod parser;
mod transform;

#[cfg(test)]
mod tests;

pub use error::{ExpressionError, OperatorError};
pub use grammar::grammar_text;
pub use operators::{OperatorKind, OperatorSet};
pub use parser::{ExpressionParser, ParseNode, Rule};
pub use transform::TransformContext;

use crate::tree::{LogicRoot, SymbolTable};
use tracing::debug;

impl ExpressionParser {
    /// Parser for the glyphs configured in `symbols`
    pub fn for_symbols(symbols: &SymbolTable) -> Self {
        ExpressionParser::new(symbols.operators.clone())
    }

    /// Parse `expression` into a typed tree
    ///
    /// `automaton_id` names the automaton whose state variables may be written
    /// without prefix. Errors always refer to the whole of `expression`.
    pub fn parse(
        &self,
        expression: &str,
        symbols: &SymbolTable,
        automaton_id: Option<usize>,
    ) -> Result<LogicRoot, ExpressionError> {
        let tree = self.parse_tree(expression)?;
        let context = TransformContext::new(expression, self.operators(), symbols, automaton_id);
        let root = LogicRoot::new(context.transform(&tree, 0)?);
        debug!(
            expression,
            variables = root.extract_variables().len(),
            "parsed expression"
        );
        Ok(root)
    }

    /// Parse `expression`, substituting `fallback` on failure
    ///
    /// The returned tree is always usable; the error, if any, says why the input was
    /// rejected.
    pub fn parse_or(
        &self,
        expression: &str,
        symbols: &SymbolTable,
        automaton_id: Option<usize>,
        fallback: LogicRoot,
    ) -> (LogicRoot, Option<ExpressionError>) {
        match self.parse(expression, symbols, automaton_id) {
            Ok(root) => (root, None),
            Err(err) => (fallback, Some(err)),
        }
    }
}
