//! Rules on which signals an expression may read

use super::error::ScopeViolation;
use super::Automaton;
use crate::tree::{ControlSignalRef, LogicRoot, Variable};

/// h* may only depend on inputs
pub fn check_dont_care(expression: &LogicRoot) -> Result<(), ScopeViolation> {
    let inputs_only = expression
        .extract_variables()
        .iter()
        .all(|v| matches!(v, Variable::Input(_)));
    if inputs_only {
        Ok(())
    } else {
        Err(ScopeViolation::DontCareNotInputOnly)
    }
}

/// Control signals are combinational in the inputs of their automaton
pub fn check_control_signal_expression(
    signal: ControlSignalRef,
    expression: &LogicRoot,
) -> Result<(), ScopeViolation> {
    if expression.contains_z_variable() {
        return Err(ScopeViolation::ControlSignalReadsState { signal });
    }
    if expression.contains_control_signal() {
        return Err(ScopeViolation::ControlSignalReadsControlSignal { signal });
    }
    Ok(())
}

pub fn check_output_expression(output: usize, expression: &LogicRoot) -> Result<(), ScopeViolation> {
    if expression.contains_z_variable() {
        Err(ScopeViolation::OutputReadsState { output })
    } else {
        Ok(())
    }
}

pub fn check_guard(from: usize, to: usize, guard: &LogicRoot) -> Result<(), ScopeViolation> {
    if guard.contains_z_variable() {
        Err(ScopeViolation::GuardReadsState { from, to })
    } else {
        Ok(())
    }
}

/// An automaton may read control signals of other automata only
pub fn check_own_control_signals(
    automaton_id: usize,
    expression: &LogicRoot,
) -> Result<(), ScopeViolation> {
    match expression
        .extract_control_signals()
        .into_iter()
        .find(|s| s.automaton_id == automaton_id)
    {
        Some(signal) => Err(ScopeViolation::OwnControlSignal {
            automaton_id,
            signal,
        }),
        None => Ok(()),
    }
}

impl Automaton {
    /// Every scope rule broken by a node condition or guard of this automaton
    ///
    /// Violations are listed per expression in declaration order, nodes before
    /// transitions. An empty list means the automaton is well formed.
    pub fn check_scopes(&self) -> Vec<ScopeViolation> {
        let mut violations = Vec::new();
        for node in &self.nodes {
            for assignment in &node.outputs {
                violations.extend(check_output_expression(assignment.output, &assignment.condition).err());
                violations.extend(check_own_control_signals(self.id, &assignment.condition).err());
            }
            for assignment in &node.control_signals {
                let signal = ControlSignalRef::new(self.id, assignment.signal);
                violations.extend(check_control_signal_expression(signal, &assignment.condition).err());
            }
        }
        for transition in &self.transitions {
            violations.extend(check_guard(transition.from, transition.to, &transition.guard).err());
            violations.extend(check_own_control_signals(self.id, &transition.guard).err());
        }
        violations
    }
}
