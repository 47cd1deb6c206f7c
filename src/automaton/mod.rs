//! Finite state machines and their boolean equations
//!
//! An [`Automaton`] is a set of nodes, each carrying a state number and the
//! conditions under which it drives outputs and control signals, and a set of
//! guarded transitions. States are encoded in binary over the state variables
//! `z0..z(k-1)` of the automaton, where `k` is enough bits for the largest state
//! number.
//!
//! From that description this module derives
//!
//! - one next-state equation per encoding bit ([`ZEquation`]),
//! - one equation per output driven by the automaton ([`OutputEquation`]),
//! - one equation per control signal of the automaton ([`ControlSignalEquation`]),
//!
//! and checks per state whether the outgoing guards are complete and free of
//! contradictions. Nodes sharing a state number are first
//! [merged](Automaton::merged) into one. Going the other way,
//! [`AutomatonEquationSet::hardware_automaton`] rebuilds the state graph that a set
//! of equations realises.
//!
//! # Examples
//!
//! ```
//! use automaton_logic::automaton::{Automaton, AutomatonNode, Transition};
//! use automaton_logic::espresso::Espresso;
//! use automaton_logic::tree::{LogicNode, LogicRoot};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a = LogicNode::input(0);
//! let automaton = Automaton::new(0, "toggle")
//!     .with_node(AutomatonNode::new(0, 0))
//!     .with_node(AutomatonNode::new(1, 1))
//!     .with_transition(Transition::new(0, 1, LogicRoot::new(a.clone())))
//!     .with_transition(Transition::new(1, 0, LogicRoot::new(LogicNode::not(a))));
//!
//! let report = automaton.completeness(&Espresso::default(), 0)?;
//! assert!(report.is_complete);
//! assert!(report.witness.is_constant(false));
//! # Ok(())
//! # }
//! ```

mod checks;
mod equations;
pub mod error;
mod hardware;
mod merge;
mod scope;
mod simulate;


pub use checks::{CompletenessReport, ContradictionReport};
pub use equations::{
    equation_sets, AutomatonEquationSet, ControlSignalEquation, MinimizationLevel,
    OutputEquation, RenderedEquation, RenderedEquationSet, ZEquation,
};
pub use error::{AutomatonError, ScopeViolation};
pub use scope::{
    check_control_signal_expression, check_dont_care, check_guard, check_output_expression,
    check_own_control_signals,
};
pub use simulate::{
    control_signal_assignment, next_state, output_assignment, z_assignment, z_variables_of,
};

use crate::tree::{LogicNode, LogicRoot, ZVariableRef};
use serde::{Deserialize, Serialize};

/// Number of state variables needed to encode `max_state_number`
///
/// At least one bit is always used, so a single-state automaton still has `z0`.
///
/// # Examples
///
/// ```
/// use automaton_logic::automaton::calculate_needed_variables;
///
/// assert_eq!(calculate_needed_variables(0), 1);
/// assert_eq!(calculate_needed_variables(1), 1);
/// assert_eq!(calculate_needed_variables(2), 2);
/// assert_eq!(calculate_needed_variables(4), 3);
/// ```
pub fn calculate_needed_variables(max_state_number: usize) -> usize {
    if max_state_number == 0 {
        1
    } else {
        max_state_number.ilog2() as usize + 1
    }
}

/// Whether `bit` is set in the binary encoding of `state_number`
pub fn is_bit_needed_for_encoding(state_number: usize, bit: usize) -> bool {
    bit < usize::BITS as usize && (state_number >> bit) & 1 == 1
}

/// Condition under which a node drives an output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputAssignment {
    pub output: usize,
    pub condition: LogicRoot,
}

/// Condition under which a node drives one of the automaton's control signals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSignalAssignment {
    /// Number of the signal within its automaton
    pub signal: usize,
    pub condition: LogicRoot,
}

/// A state of an automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonNode {
    /// Node id, unique within the automaton
    pub id: usize,
    /// Number the state is encoded with
    pub state_number: usize,
    #[serde(default)]
    pub outputs: Vec<OutputAssignment>,
    #[serde(default)]
    pub control_signals: Vec<ControlSignalAssignment>,
}

impl AutomatonNode {
    pub fn new(id: usize, state_number: usize) -> Self {
        AutomatonNode {
            id,
            state_number,
            outputs: Vec::new(),
            control_signals: Vec::new(),
        }
    }

    pub fn with_output(mut self, output: usize, condition: LogicRoot) -> Self {
        self.outputs.push(OutputAssignment { output, condition });
        self
    }

    pub fn with_control_signal(mut self, signal: usize, condition: LogicRoot) -> Self {
        self.control_signals
            .push(ControlSignalAssignment { signal, condition });
        self
    }
}

/// A guarded edge between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub guard: LogicRoot,
}

impl Transition {
    pub fn new(from: usize, to: usize, guard: LogicRoot) -> Self {
        Transition { from, to, guard }
    }
}

/// A finite state machine
///
/// The core reads nodes and transitions and never changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automaton {
    pub id: usize,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<AutomatonNode>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl Automaton {
    pub fn new(id: usize, name: &str) -> Self {
        Automaton {
            id,
            name: name.to_string(),
            nodes: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: AutomatonNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn node(&self, id: usize) -> Option<&AutomatonNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Transitions leaving node `id`
    pub fn outgoing(&self, id: usize) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.from == id)
    }

    /// Largest state number of any node, 0 for an empty automaton
    pub fn max_state_number(&self) -> usize {
        self.nodes.iter().map(|n| n.state_number).max().unwrap_or(0)
    }

    /// Number of state variables of this automaton
    pub fn z_variable_count(&self) -> usize {
        calculate_needed_variables(self.max_state_number())
    }

    /// The state variables `z0..z(k-1)` of this automaton
    pub fn z_variables(&self) -> Vec<ZVariableRef> {
        (0..self.z_variable_count())
            .map(|number| ZVariableRef::new(self.id, number))
            .collect()
    }

    /// Product term that is one exactly in state `state_number`
    ///
    /// The most significant state variable comes first, a cleared bit appears
    /// negated.
    pub fn state_encoding(&self, state_number: usize) -> LogicNode {
        LogicNode::and_all((0..self.z_variable_count()).rev().map(|bit| {
            let z = LogicNode::z_variable(ZVariableRef::new(self.id, bit));
            if is_bit_needed_for_encoding(state_number, bit) {
                z
            } else {
                LogicNode::not(z)
            }
        }))
    }
}
