//! Evaluation of equation sets for one simulation step
//!
//! A step starts from the inputs and the current state of every automaton. State
//! variables are derived from the states, control signals from inputs and state
//! variables, outputs from all three. Signals without an equation are low.

use super::equations::{AutomatonEquationSet, ZEquation};
use super::Automaton;
use crate::tree::{ControlSignalRef, SystemAssignment, ZVariableRef};
use std::collections::BTreeMap;

/// State variables of all `automata`, automaton by automaton
pub fn z_variables_of(automata: &[Automaton]) -> Vec<ZVariableRef> {
    automata.iter().flat_map(Automaton::z_variables).collect()
}

/// Encode `(automaton id, state number)` pairs over `z_variables`
///
/// Variables of automata without a current state are left out.
pub fn z_assignment(
    z_variables: &[ZVariableRef],
    current_states: &[(usize, usize)],
) -> BTreeMap<ZVariableRef, bool> {
    let mut assignment = BTreeMap::new();
    for &(automaton_id, state) in current_states {
        for z in z_variables.iter().filter(|z| z.automaton_id == automaton_id) {
            assignment.insert(*z, super::is_bit_needed_for_encoding(state, z.number));
        }
    }
    assignment
}

/// Value of every control signal with an equation
///
/// Control-signal equations never read control signals, so only inputs and state
/// variables of `assignment` are consulted.
pub fn control_signal_assignment(
    equation_sets: &[AutomatonEquationSet],
    assignment: &SystemAssignment,
) -> BTreeMap<ControlSignalRef, bool> {
    equation_sets
        .iter()
        .flat_map(|set| &set.control_signal_equations)
        .map(|e| (e.signal(), e.expression().evaluate_without_control_signals(assignment)))
        .collect()
}

/// Value of every output with an equation
///
/// An output driven by several automata is the OR of their equations.
pub fn output_assignment(
    equation_sets: &[AutomatonEquationSet],
    assignment: &SystemAssignment,
) -> BTreeMap<usize, bool> {
    let mut outputs = BTreeMap::new();
    for equation in equation_sets.iter().flat_map(|set| &set.output_equations) {
        let value = equation.expression.evaluate(assignment);
        *outputs.entry(equation.output).or_insert(false) |= value;
    }
    outputs
}

/// State number selected by `z_equations` under `assignment`
pub fn next_state(z_equations: &[ZEquation], assignment: &SystemAssignment) -> usize {
    z_equations
        .iter()
        .filter(|e| e.expression.evaluate(assignment))
        .map(|e| 1usize << e.variable.number)
        .sum()
}

impl SystemAssignment {
    /// Inputs and state variables for one step, control signals and outputs derived
    /// from `equation_sets`
    pub fn for_step(
        inputs: BTreeMap<usize, bool>,
        z_variables: &[ZVariableRef],
        current_states: &[(usize, usize)],
        equation_sets: &[AutomatonEquationSet],
    ) -> SystemAssignment {
        let mut assignment = SystemAssignment {
            inputs,
            z_variables: z_assignment(z_variables, current_states),
            ..SystemAssignment::default()
        };
        assignment.control_signals = control_signal_assignment(equation_sets, &assignment);
        assignment.outputs = output_assignment(equation_sets, &assignment);
        assignment
    }
}
