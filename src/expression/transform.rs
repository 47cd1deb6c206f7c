//! Conversion of generic parse trees into typed logic trees
//!
//! Brackets are counted on the way down and attached to the node they wrap: the
//! outermost operator of an n-ary group, a negation or a leaf. Operands of a group
//! start again at zero.

use super::error::ExpressionError;
use super::operators::OperatorSet;
use super::parser::{ParseNode, Rule};
use crate::tree::{LogicNode, SymbolTable};
use std::sync::Arc;
use tracing::trace;

/// Everything a transformation needs besides the node itself
///
/// Errors are always reported against `expression`, the complete text the user
/// typed, so nested nodes never need to look upwards.
#[derive(Debug, Clone)]
pub struct TransformContext<'a> {
    /// The complete expression
    pub expression: Arc<str>,
    /// Glyphs the parse tree was produced with
    pub operators: &'a OperatorSet,
    /// Names used to resolve identifiers
    pub symbols: &'a SymbolTable,
    /// Automaton whose state variables may be named without prefix
    pub automaton_id: Option<usize>,
}

impl<'a> TransformContext<'a> {
    pub fn new(
        expression: &str,
        operators: &'a OperatorSet,
        symbols: &'a SymbolTable,
        automaton_id: Option<usize>,
    ) -> Self {
        TransformContext {
            expression: Arc::from(expression),
            operators,
            symbols,
            automaton_id,
        }
    }

    /// Build the typed tree for `node` wrapped in `brackets` user brackets
    pub fn transform(&self, node: &ParseNode<'_>, brackets: u32) -> Result<LogicNode, ExpressionError> {
        match node.rule {
            Rule::Or | Rule::And if node.children.len() > 1 => {
                let combine = if node.rule == Rule::Or {
                    LogicNode::or
                } else {
                    LogicNode::and
                };
                let mut operands = node.children.iter().map(|child| self.transform(child, 0));
                let mut chain = match operands.next() {
                    Some(first) => first?,
                    None => return Ok(LogicNode::constant(false)),
                };
                for operand in operands {
                    chain = combine(chain, operand?);
                }
                Ok(chain.with_brackets(brackets))
            }
            Rule::Or | Rule::And | Rule::Term => match node.children.first() {
                Some(child) => self.transform(child, brackets),
                None => Ok(LogicNode::constant(false).with_brackets(brackets)),
            },
            Rule::Bracket => match node.children.first() {
                Some(child) => self.transform(child, brackets + 1),
                None => Ok(LogicNode::constant(false).with_brackets(brackets + 1)),
            },
            Rule::Neg => {
                let operand = match node.children.first() {
                    Some(child) => self.transform(child, 0)?,
                    None => LogicNode::constant(false),
                };
                Ok(LogicNode::not(operand).with_brackets(brackets))
            }
            Rule::Const => {
                let value = node.text.trim() == self.operators.one();
                Ok(LogicNode::constant(value).with_brackets(brackets))
            }
            Rule::Var => self.variable(node, brackets),
        }
    }

    fn variable(&self, node: &ParseNode<'_>, brackets: u32) -> Result<LogicNode, ExpressionError> {
        let name = node.text.trim();
        if let Some(variable) = self.symbols.resolve_variable(name, self.automaton_id) {
            trace!(name, resolved = %variable, "resolved identifier");
            return Ok(LogicNode::variable(variable).with_brackets(brackets));
        }

        let expression = Arc::clone(&self.expression);
        let start = node.start;
        let length = node.end - node.start;
        let name: Arc<str> = Arc::from(name);
        if self.symbols.resolve_output(&name).is_some() {
            Err(ExpressionError::OutputVariable {
                expression,
                start,
                length,
                name,
            })
        } else {
            Err(ExpressionError::UnknownVariable {
                expression,
                start,
                length,
                name,
            })
        }
    }
}
