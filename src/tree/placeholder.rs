//! Placeholder trees produced by the minimiser
//!
//! Placeholder `i` stands for the variable at position `i` of the variable list the
//! truth table was built from. These trees only live between reconstruction of the
//! engine's cubes and substitution back into a [`LogicNode`].

use super::{LogicNode, Variable};
use crate::espresso::MinimizationError;
use std::fmt;

/// Internal name prefix of placeholders
pub const PLACEHOLDER_PREFIX: &str = "placeholder.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderNode {
    Constant(bool),
    Placeholder(usize),
    Not(Box<PlaceholderNode>),
    And(Box<PlaceholderNode>, Box<PlaceholderNode>),
    Or(Box<PlaceholderNode>, Box<PlaceholderNode>),
}

impl PlaceholderNode {
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: PlaceholderNode) -> Self {
        PlaceholderNode::Not(Box::new(child))
    }

    pub fn and(left: PlaceholderNode, right: PlaceholderNode) -> Self {
        PlaceholderNode::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: PlaceholderNode, right: PlaceholderNode) -> Self {
        PlaceholderNode::Or(Box::new(left), Box::new(right))
    }

    /// Replace placeholder `i` with `variables[i]`
    ///
    /// Fails if a placeholder has no corresponding variable.
    pub fn substitute(&self, variables: &[Variable]) -> Result<LogicNode, MinimizationError> {
        Ok(match self {
            PlaceholderNode::Constant(value) => LogicNode::constant(*value),
            PlaceholderNode::Placeholder(index) => {
                let variable = variables.get(*index).ok_or(
                    MinimizationError::UnreplacedPlaceholder {
                        placeholder: *index,
                        variables: variables.len(),
                    },
                )?;
                LogicNode::variable(*variable)
            }
            PlaceholderNode::Not(child) => LogicNode::not(child.substitute(variables)?),
            PlaceholderNode::And(l, r) => {
                LogicNode::and(l.substitute(variables)?, r.substitute(variables)?)
            }
            PlaceholderNode::Or(l, r) => {
                LogicNode::or(l.substitute(variables)?, r.substitute(variables)?)
            }
        })
    }

    pub fn to_internal_string(&self) -> String {
        match self {
            PlaceholderNode::Constant(true) => "1".to_string(),
            PlaceholderNode::Constant(false) => "0".to_string(),
            PlaceholderNode::Placeholder(index) => format!("{}{}", PLACEHOLDER_PREFIX, index),
            PlaceholderNode::Not(child) => format!("(/{})", child.to_internal_string()),
            PlaceholderNode::And(l, r) => {
                format!("({}&{})", l.to_internal_string(), r.to_internal_string())
            }
            PlaceholderNode::Or(l, r) => {
                format!("({}+{})", l.to_internal_string(), r.to_internal_string())
            }
        }
    }
}

impl fmt::Display for PlaceholderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_internal_string())
    }
}
