//! The automaton a set of equations actually implements
//!
//! Going back from equations to a state graph shows what the flip-flops do,
//! including states the designer never drew. With `k` next-state equations the
//! result has `2^k` nodes, node `s` encoded as `s`, and one transition for every
//! ordered pair of states. A transition whose guard minimises to constant 0 is
//! kept so the graph stays a full `2^k x 2^k` matrix.

use super::equations::{AutomatonEquationSet, ZEquation};
use super::error::AutomatonError;
use super::{is_bit_needed_for_encoding, Automaton, AutomatonNode, Transition};
use crate::espresso::{MinimizationError, MinimizerEngine};
use crate::minimize::{merge_variables, minimize_truth_table};
use crate::tree::assignment::row_count;
use crate::tree::{LogicRoot, SystemAssignment, Variable, ZVariableRef};
use crate::truth_table::TruthTable;
use tracing::{debug, trace};

/// Every non-state variable read by the set, in order of first appearance
fn free_variables(set: &AutomatonEquationSet) -> Vec<Variable> {
    let expressions = set
        .z_equations
        .iter()
        .map(|e| &e.expression)
        .chain(set.output_equations.iter().map(|e| &e.expression))
        .chain(set.control_signal_equations.iter().map(|e| e.expression()));

    let mut variables = Vec::new();
    for expression in expressions {
        let own: Vec<Variable> = expression
            .extract_variables()
            .into_iter()
            .filter(|v| !matches!(v, Variable::ZVariable(_)))
            .collect();
        variables = merge_variables(&variables, &own);
    }
    variables
}

impl AutomatonEquationSet {
    /// Rebuild the state graph realised by these equations
    ///
    /// Output and control-signal conditions of every node and the guard of every
    /// transition are minimised with `engine`. A set without next-state equations
    /// is read as the single equation `z0 = 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton_logic::automaton::{Automaton, AutomatonNode, Transition};
    /// use automaton_logic::espresso::Espresso;
    /// use automaton_logic::tree::{LogicNode, LogicRoot};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let a = LogicNode::input(0);
    /// let toggle = Automaton::new(0, "toggle")
    ///     .with_node(AutomatonNode::new(0, 0))
    ///     .with_node(AutomatonNode::new(1, 1))
    ///     .with_transition(Transition::new(0, 1, LogicRoot::new(a.clone())))
    ///     .with_transition(Transition::new(1, 0, LogicRoot::new(a)));
    ///
    /// let set = toggle.equation_set(&[], &[])?;
    /// let hardware = set.hardware_automaton(&Espresso::default(), "toggle")?;
    /// assert_eq!(hardware.nodes.len(), 2);
    /// assert_eq!(hardware.transitions.len(), 4);
    /// # Ok(())
    /// # }
    /// ```
    pub fn hardware_automaton(
        &self,
        engine: &dyn MinimizerEngine,
        name: &str,
    ) -> Result<Automaton, MinimizationError> {
        let mut z_equations: Vec<ZEquation> = self.z_equations.clone();
        if z_equations.is_empty() {
            z_equations.push(ZEquation::new(
                ZVariableRef::new(self.automaton_id, 0),
                LogicRoot::constant(false),
            ));
        }
        z_equations.sort_by_key(|e| e.variable.number);

        let state_count = row_count(z_equations.len())? as usize;
        let variables = free_variables(self);
        let rows = row_count(variables.len())?;
        let targets = self.output_equations.len() + self.control_signal_equations.len();
        debug!(
            automaton = self.automaton_id,
            states = state_count,
            variables = variables.len(),
            "building hardware automaton"
        );

        let mut transition_table = TruthTable::new(variables.len(), state_count * state_count)?;
        let mut nodes = Vec::with_capacity(state_count);
        for state in 0..state_count {
            let mut node_table = TruthTable::new(variables.len(), targets)?;
            for row in 0..rows {
                let mut assignment = SystemAssignment::from_index(&variables, row)?;
                for (bit, equation) in z_equations.iter().enumerate() {
                    assignment.set(
                        Variable::ZVariable(equation.variable),
                        is_bit_needed_for_encoding(state, bit),
                    );
                }

                let next: usize = z_equations
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.expression.evaluate(&assignment))
                    .map(|(bit, _)| 1usize << bit)
                    .sum();
                transition_table.set_output_one(row, state * state_count + next)?;

                let values = self
                    .output_equations
                    .iter()
                    .map(|e| e.expression.evaluate(&assignment))
                    .chain(
                        self.control_signal_equations
                            .iter()
                            .map(|e| e.expression().evaluate(&assignment)),
                    );
                for (column, value) in values.enumerate() {
                    if value {
                        node_table.set_output_one(row, column)?;
                    }
                }
            }

            let mut conditions = minimize_truth_table(engine, &node_table)?.into_iter();
            let mut node = AutomatonNode::new(state, state);
            for equation in &self.output_equations {
                if let Some(condition) = conditions.next() {
                    node = node.with_output(
                        equation.output,
                        LogicRoot::new(condition.substitute(&variables)?),
                    );
                }
            }
            for equation in &self.control_signal_equations {
                if let Some(condition) = conditions.next() {
                    node = node.with_control_signal(
                        equation.signal().number,
                        LogicRoot::new(condition.substitute(&variables)?),
                    );
                }
            }
            nodes.push(node);
        }

        let guards = minimize_truth_table(engine, &transition_table)?;
        let mut transitions = Vec::with_capacity(guards.len());
        for (column, guard) in guards.iter().enumerate() {
            let (from, to) = (column / state_count, column % state_count);
            let guard = LogicRoot::new(guard.substitute(&variables)?);
            trace!(from, to, guard = %guard.to_internal_string(), "hardware transition");
            transitions.push(Transition::new(from, to, guard));
        }

        Ok(Automaton {
            id: self.automaton_id,
            name: name.to_string(),
            nodes,
            transitions,
        })
    }
}

impl Automaton {
    /// The automaton realised by this automaton's own equations
    ///
    /// Covers exactly the outputs and control signals the nodes drive.
    pub fn hardware(&self, engine: &dyn MinimizerEngine) -> Result<Automaton, AutomatonError> {
        let set = self.equation_set(&[], &[])?;
        Ok(set.hardware_automaton(engine, &self.name)?)
    }
}
