//! Collapsing nodes that share a state number
//!
//! Several nodes may be encoded with the same state number. Their hardware is one
//! state, so outputs, control signals and transitions are combined per state
//! number before anything is checked against the encoding.

use super::{Automaton, AutomatonNode, ControlSignalAssignment, OutputAssignment, Transition};
use crate::tree::{LogicNode, LogicRoot};
use tracing::debug;

fn or_roots(first: &LogicRoot, second: &LogicRoot) -> LogicRoot {
    LogicRoot::new(LogicNode::or(first.tree().clone(), second.tree().clone()))
}

fn merge_node_into(merged: &mut AutomatonNode, node: &AutomatonNode) {
    for assignment in &node.outputs {
        match merged.outputs.iter_mut().find(|o| o.output == assignment.output) {
            Some(existing) => {
                existing.condition = or_roots(&existing.condition, &assignment.condition)
            }
            None => merged.outputs.push(OutputAssignment {
                output: assignment.output,
                condition: assignment.condition.clone(),
            }),
        }
    }
    for assignment in &node.control_signals {
        match merged
            .control_signals
            .iter_mut()
            .find(|s| s.signal == assignment.signal)
        {
            Some(existing) => {
                existing.condition = or_roots(&existing.condition, &assignment.condition)
            }
            None => merged.control_signals.push(ControlSignalAssignment {
                signal: assignment.signal,
                condition: assignment.condition.clone(),
            }),
        }
    }
}

impl Automaton {
    /// The automaton with one node per state number
    ///
    /// Every node of the result has its state number as id, in order of first
    /// appearance. Output and control-signal conditions of the same target are
    /// ORed. Transitions are rewritten to state numbers, parallel ones ORed into a
    /// single guard, and transitions touching an unknown node are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton_logic::automaton::{Automaton, AutomatonNode, Transition};
    /// use automaton_logic::tree::{LogicNode, LogicRoot};
    ///
    /// let a = LogicNode::input(0);
    /// let automaton = Automaton::new(0, "m")
    ///     .with_node(AutomatonNode::new(10, 0))
    ///     .with_node(AutomatonNode::new(11, 0))
    ///     .with_node(AutomatonNode::new(12, 1))
    ///     .with_transition(Transition::new(10, 12, LogicRoot::new(a.clone())))
    ///     .with_transition(Transition::new(11, 12, LogicRoot::new(LogicNode::not(a))));
    ///
    /// let merged = automaton.merged();
    /// assert_eq!(merged.nodes.len(), 2);
    /// assert_eq!(merged.transitions.len(), 1);
    /// assert_eq!(merged.transitions[0].guard.to_internal_string(), "(x0+(/x0))");
    /// ```
    pub fn merged(&self) -> Automaton {
        let mut nodes: Vec<AutomatonNode> = Vec::new();
        for node in &self.nodes {
            match nodes.iter_mut().find(|n| n.state_number == node.state_number) {
                Some(merged) => merge_node_into(merged, node),
                None => nodes.push(AutomatonNode {
                    id: node.state_number,
                    ..node.clone()
                }),
            }
        }

        let mut transitions: Vec<Transition> = Vec::new();
        for transition in &self.transitions {
            let (from, to) = match (self.node(transition.from), self.node(transition.to)) {
                (Some(from), Some(to)) => (from.state_number, to.state_number),
                _ => continue,
            };
            match transitions.iter_mut().find(|t| t.from == from && t.to == to) {
                Some(existing) => existing.guard = or_roots(&existing.guard, &transition.guard),
                None => transitions.push(Transition::new(from, to, transition.guard.clone())),
            }
        }

        debug!(
            automaton = self.id,
            nodes = self.nodes.len(),
            states = nodes.len(),
            transitions = transitions.len(),
            "merged nodes by state number"
        );
        Automaton {
            id: self.id,
            name: self.name.clone(),
            nodes,
            transitions,
        }
    }
}
