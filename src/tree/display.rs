//! Text rendering of logic trees
//!
//! Internal strings fully parenthesise every operator and use the default glyphs.
//! Custom strings use the configured glyphs and user names, and reproduce the
//! parentheses recorded in the bracket counters. A parent is responsible for
//! wrapping its children; a node never wraps itself.

use super::{LogicNode, LogicRoot, NodeKind, SymbolTable};
use crate::expression::operators::{
    DEFAULT_AND_OPERATOR, DEFAULT_LOGIC_ONE, DEFAULT_LOGIC_ZERO, DEFAULT_NOT_OPERATOR,
    DEFAULT_OR_OPERATOR,
};
use std::fmt;

fn wrap(inner: String, layers: u32) -> String {
    let layers = layers as usize;
    format!("{}{}{}", "(".repeat(layers), inner, ")".repeat(layers))
}

impl LogicNode {
    /// Render with internal names (`x0`, `s1`, `z2`) and default glyphs
    pub fn to_internal_string(&self) -> String {
        match &self.kind {
            NodeKind::Constant(true) => DEFAULT_LOGIC_ONE.to_string(),
            NodeKind::Constant(false) => DEFAULT_LOGIC_ZERO.to_string(),
            NodeKind::Not(child) => {
                format!("({}{})", DEFAULT_NOT_OPERATOR, child.to_internal_string())
            }
            NodeKind::And(l, r) => format!(
                "({}{}{})",
                l.to_internal_string(),
                DEFAULT_AND_OPERATOR,
                r.to_internal_string()
            ),
            NodeKind::Or(l, r) => format!(
                "({}{}{})",
                l.to_internal_string(),
                DEFAULT_OR_OPERATOR,
                r.to_internal_string()
            ),
            _ => self
                .as_variable()
                .map(|v| v.internal_name())
                .unwrap_or_default(),
        }
    }

    /// Render with user names and the configured glyphs
    pub fn to_custom_string(&self, symbols: &SymbolTable) -> String {
        let ops = &symbols.operators;
        match &self.kind {
            NodeKind::Constant(value) => ops.constant(*value).to_string(),
            NodeKind::Not(child) => {
                format!("{}{}", ops.not(), child.wrapped(symbols, child.is_binary()))
            }
            NodeKind::And(l, r) => {
                let is_or = |n: &LogicNode| matches!(n.kind, NodeKind::Or(..));
                format!(
                    "{}{}{}",
                    l.wrapped(symbols, is_or(l)),
                    ops.and(),
                    r.wrapped(symbols, is_or(r))
                )
            }
            NodeKind::Or(l, r) => format!(
                "{}{}{}",
                l.wrapped(symbols, false),
                ops.or(),
                r.wrapped(symbols, false)
            ),
            _ => self
                .as_variable()
                .map(|v| v.to_custom_string(symbols))
                .unwrap_or_default(),
        }
    }

    // Rendering of this node as seen from its parent. When the parent binds tighter
    // one layer is required, and a recorded bracket counts towards it.
    fn wrapped(&self, symbols: &SymbolTable, required: bool) -> String {
        let inner = self.to_custom_string(symbols);
        if required {
            format!("({})", wrap(inner, self.brackets.saturating_sub(1)))
        } else {
            wrap(inner, self.brackets)
        }
    }
}

impl LogicRoot {
    pub fn to_internal_string(&self) -> String {
        self.tree.to_internal_string()
    }

    /// Custom rendering including the brackets recorded on the top node
    pub fn to_custom_string(&self, symbols: &SymbolTable) -> String {
        wrap(self.tree.to_custom_string(symbols), self.tree.brackets)
    }
}

impl fmt::Display for LogicNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_internal_string())
    }
}

impl fmt::Display for LogicRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_internal_string())
    }
}
