//! Typed logic trees
//!
//! A [`LogicNode`] is the intermediate representation every other part of the crate
//! works on: the parser produces it, the truth table enumerates it, the minimiser
//! rebuilds it and the automaton module combines it into equations.
//!
//! Nodes are values. Operator constructors compute the two containment flags from
//! their children, which is the only place those flags are ever set. The bracket
//! counter is a presentation hint: it may be changed after construction and is
//! ignored by equality and hashing.
//!
//! # Examples
//!
//! ```
//! use automaton_logic::tree::{LogicNode, LogicRoot, SystemAssignment, Variable};
//!
//! let a = LogicNode::input(0);
//! let b = LogicNode::input(1);
//! let root = LogicRoot::new(LogicNode::or(LogicNode::and(a.clone(), b), LogicNode::not(a)));
//!
//! let mut assignment = SystemAssignment::new();
//! assignment.set(Variable::Input(0), true);
//! assignment.set(Variable::Input(1), true);
//! assert!(root.evaluate(&assignment));
//! assert_eq!(root.to_internal_string(), "((x0&x1)+(/x0))");
//! ```

pub mod assignment;
mod display;
mod eval;
pub mod placeholder;
pub mod signals;

#[cfg(test)]
mod tests;

pub use assignment::SystemAssignment;
pub use placeholder::PlaceholderNode;
pub use signals::{
    ControlSignalRef, NamedControlSignal, NamedSignal, SymbolTable, Variable, ZVariableRef,
};

use crate::truth_table::TruthTableError;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Structure of a [`LogicNode`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Constant(bool),
    Input(usize),
    ControlSignal(ControlSignalRef),
    ZVariable(ZVariableRef),
    Not(Box<LogicNode>),
    And(Box<LogicNode>, Box<LogicNode>),
    Or(Box<LogicNode>, Box<LogicNode>),
}

/// A node of a typed logic tree
///
/// `brackets` is the number of literal parenthesis layers the user wrote around
/// this node. Zero means "only what precedence requires".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "NodeRepr", into = "NodeRepr")]
pub struct LogicNode {
    kind: NodeKind,
    brackets: u32,
    contains_z: bool,
    contains_control_signal: bool,
}

impl PartialEq for LogicNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for LogicNode {}

impl Hash for LogicNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl LogicNode {
    fn build(kind: NodeKind, brackets: u32) -> Self {
        let (contains_z, contains_control_signal) = match &kind {
            NodeKind::Constant(_) | NodeKind::Input(_) => (false, false),
            NodeKind::ControlSignal(_) => (false, true),
            NodeKind::ZVariable(_) => (true, false),
            NodeKind::Not(child) => (child.contains_z, child.contains_control_signal),
            NodeKind::And(l, r) | NodeKind::Or(l, r) => (
                l.contains_z || r.contains_z,
                l.contains_control_signal || r.contains_control_signal,
            ),
        };
        LogicNode {
            kind,
            brackets,
            contains_z,
            contains_control_signal,
        }
    }

    pub fn constant(value: bool) -> Self {
        LogicNode::build(NodeKind::Constant(value), 0)
    }

    pub fn input(number: usize) -> Self {
        LogicNode::build(NodeKind::Input(number), 0)
    }

    pub fn control_signal(signal: ControlSignalRef) -> Self {
        LogicNode::build(NodeKind::ControlSignal(signal), 0)
    }

    pub fn z_variable(z: ZVariableRef) -> Self {
        LogicNode::build(NodeKind::ZVariable(z), 0)
    }

    /// Leaf for any variable kind
    pub fn variable(variable: Variable) -> Self {
        match variable {
            Variable::Input(number) => LogicNode::input(number),
            Variable::ControlSignal(cs) => LogicNode::control_signal(cs),
            Variable::ZVariable(z) => LogicNode::z_variable(z),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: LogicNode) -> Self {
        LogicNode::build(NodeKind::Not(Box::new(child)), 0)
    }

    pub fn and(left: LogicNode, right: LogicNode) -> Self {
        LogicNode::build(NodeKind::And(Box::new(left), Box::new(right)), 0)
    }

    pub fn or(left: LogicNode, right: LogicNode) -> Self {
        LogicNode::build(NodeKind::Or(Box::new(left), Box::new(right)), 0)
    }

    /// Same node with a different bracket count
    pub fn with_brackets(mut self, brackets: u32) -> Self {
        self.brackets = brackets;
        self
    }

    pub fn set_brackets(&mut self, brackets: u32) {
        self.brackets = brackets;
    }

    pub fn brackets(&self) -> u32 {
        self.brackets
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether a state variable occurs anywhere in this subtree
    pub fn contains_z_variable(&self) -> bool {
        self.contains_z
    }

    /// Whether a control signal occurs anywhere in this subtree
    pub fn contains_control_signal(&self) -> bool {
        self.contains_control_signal
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.kind, NodeKind::And(..) | NodeKind::Or(..))
    }

    /// The variable of a leaf, `None` for constants and operators
    pub fn as_variable(&self) -> Option<Variable> {
        match &self.kind {
            NodeKind::Input(number) => Some(Variable::Input(*number)),
            NodeKind::ControlSignal(cs) => Some(Variable::ControlSignal(*cs)),
            NodeKind::ZVariable(z) => Some(Variable::ZVariable(*z)),
            _ => None,
        }
    }

    fn for_each_variable(&self, f: &mut impl FnMut(Variable)) {
        match &self.kind {
            NodeKind::Constant(_) => {}
            NodeKind::Input(_) | NodeKind::ControlSignal(_) | NodeKind::ZVariable(_) => {
                if let Some(v) = self.as_variable() {
                    f(v)
                }
            }
            NodeKind::Not(child) => child.for_each_variable(f),
            NodeKind::And(l, r) | NodeKind::Or(l, r) => {
                l.for_each_variable(f);
                r.for_each_variable(f);
            }
        }
    }

    /// Every variable of the subtree, left to right, without duplicates
    pub fn extract_variables(&self) -> Vec<Variable> {
        let mut variables = Vec::new();
        self.for_each_variable(&mut |v| {
            if !variables.contains(&v) {
                variables.push(v);
            }
        });
        variables
    }

    pub fn extract_inputs(&self) -> Vec<usize> {
        self.extract_variables()
            .into_iter()
            .filter_map(|v| match v {
                Variable::Input(number) => Some(number),
                _ => None,
            })
            .collect()
    }

    pub fn extract_control_signals(&self) -> Vec<ControlSignalRef> {
        self.extract_variables()
            .into_iter()
            .filter_map(|v| match v {
                Variable::ControlSignal(cs) => Some(cs),
                _ => None,
            })
            .collect()
    }

    pub fn extract_z_variables(&self) -> Vec<ZVariableRef> {
        self.extract_variables()
            .into_iter()
            .filter_map(|v| match v {
                Variable::ZVariable(z) => Some(z),
                _ => None,
            })
            .collect()
    }

    fn any_variable(&self, pred: &impl Fn(Variable) -> bool) -> bool {
        match &self.kind {
            NodeKind::Constant(_) => false,
            NodeKind::Not(child) => child.any_variable(pred),
            NodeKind::And(l, r) | NodeKind::Or(l, r) => l.any_variable(pred) || r.any_variable(pred),
            _ => self.as_variable().is_some_and(pred),
        }
    }

    /// Whether deleting this input would leave a dangling reference
    pub fn corruption_check_for_input(&self, number: usize) -> bool {
        self.any_variable(&|v| v == Variable::Input(number))
    }

    /// Whether deleting this automaton would leave a dangling reference
    pub fn corruption_check_for_automaton(&self, automaton_id: usize) -> bool {
        self.any_variable(&|v| v.automaton_id() == Some(automaton_id))
    }

    /// Whether deleting this control signal would leave a dangling reference
    pub fn corruption_check_for_control_signal(&self, signal: ControlSignalRef) -> bool {
        self.any_variable(&|v| v == Variable::ControlSignal(signal))
    }

    /// Set every bracket counter of the subtree to zero
    pub fn reset_brackets(&mut self) {
        self.brackets = 0;
        match &mut self.kind {
            NodeKind::Not(child) => child.reset_brackets(),
            NodeKind::And(l, r) | NodeKind::Or(l, r) => {
                l.reset_brackets();
                r.reset_brackets();
            }
            _ => {}
        }
    }

    /// OR a list of terms, `0` for an empty list
    pub fn or_all(terms: impl IntoIterator<Item = LogicNode>) -> LogicNode {
        terms
            .into_iter()
            .reduce(LogicNode::or)
            .unwrap_or_else(|| LogicNode::constant(false))
    }

    /// AND a list of factors, `1` for an empty list
    pub fn and_all(factors: impl IntoIterator<Item = LogicNode>) -> LogicNode {
        factors
            .into_iter()
            .reduce(LogicNode::and)
            .unwrap_or_else(|| LogicNode::constant(true))
    }
}

/// Storage form of a node, tagged by its kind
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum NodeRepr {
    Constant {
        value: bool,
        #[serde(default)]
        brackets: u32,
    },
    Input {
        number: usize,
        #[serde(default)]
        brackets: u32,
    },
    ControlSignal {
        automaton_id: usize,
        number: usize,
        #[serde(default)]
        brackets: u32,
    },
    ZVariable {
        automaton_id: usize,
        number: usize,
        #[serde(default)]
        brackets: u32,
    },
    Not {
        child: Box<LogicNode>,
        #[serde(default)]
        brackets: u32,
    },
    And {
        left: Box<LogicNode>,
        right: Box<LogicNode>,
        #[serde(default)]
        brackets: u32,
    },
    Or {
        left: Box<LogicNode>,
        right: Box<LogicNode>,
        #[serde(default)]
        brackets: u32,
    },
}

impl From<NodeRepr> for LogicNode {
    fn from(repr: NodeRepr) -> Self {
        match repr {
            NodeRepr::Constant { value, brackets } => {
                LogicNode::build(NodeKind::Constant(value), brackets)
            }
            NodeRepr::Input { number, brackets } => {
                LogicNode::build(NodeKind::Input(number), brackets)
            }
            NodeRepr::ControlSignal {
                automaton_id,
                number,
                brackets,
            } => LogicNode::build(
                NodeKind::ControlSignal(ControlSignalRef::new(automaton_id, number)),
                brackets,
            ),
            NodeRepr::ZVariable {
                automaton_id,
                number,
                brackets,
            } => LogicNode::build(
                NodeKind::ZVariable(ZVariableRef::new(automaton_id, number)),
                brackets,
            ),
            NodeRepr::Not { child, brackets } => LogicNode::build(NodeKind::Not(child), brackets),
            NodeRepr::And {
                left,
                right,
                brackets,
            } => LogicNode::build(NodeKind::And(left, right), brackets),
            NodeRepr::Or {
                left,
                right,
                brackets,
            } => LogicNode::build(NodeKind::Or(left, right), brackets),
        }
    }
}

impl From<LogicNode> for NodeRepr {
    fn from(node: LogicNode) -> Self {
        let brackets = node.brackets;
        match node.kind {
            NodeKind::Constant(value) => NodeRepr::Constant { value, brackets },
            NodeKind::Input(number) => NodeRepr::Input { number, brackets },
            NodeKind::ControlSignal(cs) => NodeRepr::ControlSignal {
                automaton_id: cs.automaton_id,
                number: cs.number,
                brackets,
            },
            NodeKind::ZVariable(z) => NodeRepr::ZVariable {
                automaton_id: z.automaton_id,
                number: z.number,
                brackets,
            },
            NodeKind::Not(child) => NodeRepr::Not { child, brackets },
            NodeKind::And(left, right) => NodeRepr::And {
                left,
                right,
                brackets,
            },
            NodeKind::Or(left, right) => NodeRepr::Or {
                left,
                right,
                brackets,
            },
        }
    }
}

/// Owner of one complete logic tree
///
/// The unit that is stored, rendered and handed to the minimiser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicRoot {
    tree: LogicNode,
}

impl From<LogicNode> for LogicRoot {
    fn from(tree: LogicNode) -> Self {
        LogicRoot { tree }
    }
}

impl LogicRoot {
    pub fn new(tree: LogicNode) -> Self {
        LogicRoot { tree }
    }

    /// A root holding the single constant `value`
    pub fn constant(value: bool) -> Self {
        LogicRoot::new(LogicNode::constant(value))
    }

    pub fn tree(&self) -> &LogicNode {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LogicNode {
        &mut self.tree
    }

    pub fn into_tree(self) -> LogicNode {
        self.tree
    }

    pub fn contains_z_variable(&self) -> bool {
        self.tree.contains_z_variable()
    }

    pub fn contains_control_signal(&self) -> bool {
        self.tree.contains_control_signal()
    }

    pub fn extract_variables(&self) -> Vec<Variable> {
        self.tree.extract_variables()
    }

    pub fn extract_inputs(&self) -> Vec<usize> {
        self.tree.extract_inputs()
    }

    pub fn extract_control_signals(&self) -> Vec<ControlSignalRef> {
        self.tree.extract_control_signals()
    }

    pub fn extract_z_variables(&self) -> Vec<ZVariableRef> {
        self.tree.extract_z_variables()
    }

    pub fn corruption_check_for_input(&self, number: usize) -> bool {
        self.tree.corruption_check_for_input(number)
    }

    pub fn corruption_check_for_automaton(&self, automaton_id: usize) -> bool {
        self.tree.corruption_check_for_automaton(automaton_id)
    }

    pub fn corruption_check_for_control_signal(&self, signal: ControlSignalRef) -> bool {
        self.tree.corruption_check_for_control_signal(signal)
    }

    pub fn reset_brackets(&mut self) {
        self.tree.reset_brackets()
    }

    /// Whether the whole tree is the single constant `value`
    pub fn is_constant(&self, value: bool) -> bool {
        self.tree.kind == NodeKind::Constant(value)
    }

    /// Whether the tree is built from constants only
    pub fn is_constant_concatenation(&self) -> bool {
        self.tree.extract_variables().is_empty()
    }

    /// A variable-free tree that evaluates to one, without minimising it
    pub fn is_constant_one_concatenation(&self) -> bool {
        self.is_constant_concatenation() && self.evaluate(&SystemAssignment::new())
    }

    /// A variable-free tree that evaluates to zero, without minimising it
    pub fn is_constant_zero_concatenation(&self) -> bool {
        self.is_constant_concatenation() && !self.evaluate(&SystemAssignment::new())
    }

    /// Exhaustive comparison over the union of both trees' variables
    ///
    /// Fails with [`TruthTableError::TooManyVariables`] at 32 variables or more.
    pub fn equivalent_to(&self, other: &LogicRoot) -> Result<bool, TruthTableError> {
        let mut variables = self.extract_variables();
        for v in other.extract_variables() {
            if !variables.contains(&v) {
                variables.push(v);
            }
        }

        let rows = assignment::row_count(variables.len())?;
        for index in 0..rows {
            let assignment = SystemAssignment::from_index(&variables, index)?;
            if self.evaluate(&assignment) != other.evaluate(&assignment) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
