//! Parsing support for logic expressions
//!
//! Produces a generic, rule-tagged [`ParseNode`] tree. Identifiers are not resolved
//! here; that happens in the transformer, which knows the symbol table.

use super::error::ExpressionError;
use super::lexer::{LexicalError, Lexer, Tok};
use super::operators::OperatorSet;
use lalrpop_util::ParseError;
use std::sync::Arc;
use tracing::debug;

// Lalrpop-generated parser module (generated in OUT_DIR at build time)
#[allow(clippy::all)]
mod parser_impl {
    #![allow(clippy::all)]
    #![allow(dead_code)]
    #![allow(unused_variables)]
    #![allow(unused_imports)]
    #![allow(non_snake_case)]
    #![allow(non_camel_case_types)]
    #![allow(non_upper_case_globals)]
    include!(concat!(env!("OUT_DIR"), "/expression/logic_expr.rs"));
}

/// Grammar rule a [`ParseNode`] was produced by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Or,
    And,
    Neg,
    Term,
    Bracket,
    Var,
    Const,
}

impl Rule {
    /// Rule name as written in the grammar text
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Or => "or",
            Rule::And => "and",
            Rule::Neg => "neg",
            Rule::Term => "term",
            Rule::Bracket => "bracket",
            Rule::Var => "var",
            Rule::Const => "const",
        }
    }
}

/// A node of the generic parse tree
///
/// Borrowed from the parsed input and discarded once the typed tree is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode<'input> {
    /// Producing rule
    pub rule: Rule,
    /// Child nodes in source order
    pub children: Vec<ParseNode<'input>>,
    /// Source text covered by this node
    pub text: &'input str,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl<'input> ParseNode<'input> {
    pub(crate) fn new(
        rule: Rule,
        children: Vec<ParseNode<'input>>,
        text: &'input str,
        start: usize,
        end: usize,
    ) -> Self {
        ParseNode {
            rule,
            children,
            text,
            start,
            end,
        }
    }

    pub(crate) fn leaf(rule: Rule, text: &'input str, start: usize, end: usize) -> Self {
        ParseNode::new(rule, Vec::new(), text, start, end)
    }

    pub(crate) fn sequence(
        rule: Rule,
        first: ParseNode<'input>,
        rest: Vec<ParseNode<'input>>,
        text: &'input str,
        start: usize,
        end: usize,
    ) -> Self {
        let mut children = Vec::with_capacity(rest.len() + 1);
        children.push(first);
        children.extend(rest);
        ParseNode::new(rule, children, text, start, end)
    }
}

/// Parser for one operator configuration
///
/// Cheap to build; each thread or call site may hold its own.
pub struct ExpressionParser {
    operators: OperatorSet,
    inner: parser_impl::ExprParser,
}

impl std::fmt::Debug for ExpressionParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionParser")
            .field("operators", &self.operators)
            .finish()
    }
}

impl Default for ExpressionParser {
    fn default() -> Self {
        ExpressionParser::new(OperatorSet::default())
    }
}

impl ExpressionParser {
    /// Create a parser accepting the given glyphs
    pub fn new(operators: OperatorSet) -> Self {
        ExpressionParser {
            operators,
            inner: parser_impl::ExprParser::new(),
        }
    }

    /// The glyphs this parser was built for
    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    /// Parse text into a generic parse tree
    ///
    /// On failure only the first syntax error is reported. Its start is the offset of
    /// the first unparsable token and its length covers the rest of the input.
    pub fn parse_tree<'input>(&self, input: &'input str) -> Result<ParseNode<'input>, ExpressionError> {
        let lexer = Lexer::new(input, &self.operators);
        self.inner.parse(input, lexer).map_err(|e| {
            let err = self.syntax_error(input, e);
            debug!(error = %err, "expression rejected by parser");
            err
        })
    }

    fn syntax_error(
        &self,
        input: &str,
        error: ParseError<usize, Tok<'_>, LexicalError>,
    ) -> ExpressionError {
        let (start, message) = match error {
            ParseError::InvalidToken { location } => (location, "invalid token".to_string()),
            ParseError::UnrecognizedEof { location, expected } => (
                location,
                format!(
                    "unexpected end of input, expected {}",
                    self.describe_expected(&expected)
                ),
            ),
            ParseError::UnrecognizedToken {
                token: (start, token, _),
                expected,
            } => (
                start,
                format!(
                    "unexpected {}, expected {}",
                    self.describe_token(token),
                    self.describe_expected(&expected)
                ),
            ),
            ParseError::ExtraToken {
                token: (start, token, _),
            } => (start, format!("unexpected {}", self.describe_token(token))),
            ParseError::User {
                error:
                    LexicalError::UnexpectedCharacter {
                        position,
                        character,
                    },
            } => (position, format!("unexpected character {:?}", character)),
        };

        let start = start.min(input.len());
        ExpressionError::Syntax {
            expression: Arc::from(input),
            start,
            length: input.len() - start,
            message: Arc::from(message.as_str()),
        }
    }

    fn describe_token(&self, token: Tok<'_>) -> String {
        match token {
            Tok::Or => format!("'{}'", self.operators.or()),
            Tok::And => format!("'{}'", self.operators.and()),
            Tok::Not => format!("'{}'", self.operators.not()),
            Tok::One => format!("'{}'", self.operators.one()),
            Tok::Zero => format!("'{}'", self.operators.zero()),
            other => other.to_string(),
        }
    }

    fn describe_expected(&self, expected: &[String]) -> String {
        let names: Vec<String> = expected
            .iter()
            .map(|terminal| match terminal.trim_matches('"') {
                "or" => format!("'{}'", self.operators.or()),
                "and" => format!("'{}'", self.operators.and()),
                "not" => format!("'{}'", self.operators.not()),
                "one" => format!("'{}'", self.operators.one()),
                "zero" => format!("'{}'", self.operators.zero()),
                "ident" => "a variable".to_string(),
                other => format!("'{}'", other),
            })
            .collect();

        if names.is_empty() {
            "nothing".to_string()
        } else {
            names.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_shape() {
        let parser = ExpressionParser::default();
        let tree = parser.parse_tree("a&b+/c").unwrap();
        assert_eq!(tree.rule, Rule::Or);
        assert_eq!(tree.children.len(), 2);

        let and = &tree.children[0];
        assert_eq!(and.rule, Rule::And);
        assert_eq!(and.children.len(), 2);
        assert_eq!(and.text, "a&b");

        let right = &tree.children[1];
        assert_eq!(right.rule, Rule::And);
        let term = &right.children[0];
        assert_eq!(term.rule, Rule::Term);
        assert_eq!(term.children[0].rule, Rule::Neg);
    }

    #[test]
    fn test_var_offsets() {
        let parser = ExpressionParser::default();
        let tree = parser.parse_tree("  abc").unwrap();
        let var = &tree.children[0].children[0].children[0];
        assert_eq!(var.rule, Rule::Var);
        assert_eq!((var.start, var.end, var.text), (2, 5, "abc"));
    }

    #[test]
    fn test_brackets_nest() {
        let parser = ExpressionParser::default();
        let tree = parser.parse_tree("((a))").unwrap();
        let outer = &tree.children[0].children[0].children[0];
        assert_eq!(outer.rule, Rule::Bracket);
        let inner = &outer.children[0].children[0].children[0].children[0];
        assert_eq!(inner.rule, Rule::Bracket);
    }

    #[test]
    fn test_double_operator_reports_position() {
        let parser = ExpressionParser::default();
        let err = parser.parse_tree("a&&b").unwrap_err();
        assert_eq!(err.start(), 2);
        assert_eq!(err.length(), 2);
        assert!(err.message().contains("'&'"));
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let parser = ExpressionParser::default();
        let err = parser.parse_tree("a+").unwrap_err();
        assert_eq!(err.start(), 2);
        assert_eq!(err.length(), 0);
        assert!(err.message().contains("end of input"));
    }

    #[test]
    fn test_lexical_error_position() {
        let parser = ExpressionParser::default();
        let err = parser.parse_tree("a & $b").unwrap_err();
        assert_eq!(err.start(), 4);
        assert_eq!(err.length(), 2);
    }

    #[test]
    fn test_unbalanced_bracket() {
        let parser = ExpressionParser::default();
        let err = parser.parse_tree("(a+b))").unwrap_err();
        assert_eq!(err.start(), 5);
        assert_eq!(err.length(), 1);
    }

    #[test]
    fn test_custom_glyphs() {
        let ops = OperatorSet::new("*", "|", "!", "^", "H", "L");
        assert!(ops.is_err());

        let ops = OperatorSet::new("*", "|", "!", "^", "1", "0").unwrap();
        let parser = ExpressionParser::new(ops);
        assert!(parser.parse_tree("a*b|!c").is_ok());
        assert!(parser.parse_tree("a&b").is_err());
    }
}
