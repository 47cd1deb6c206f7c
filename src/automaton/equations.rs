//! Derivation and rendering of automaton equations

use super::error::{AutomatonError, ScopeViolation};
use super::{is_bit_needed_for_encoding, Automaton};
use crate::espresso::{MinimizationError, MinimizerEngine};
use crate::minimize::Minimizable;
use crate::tree::{ControlSignalRef, LogicNode, LogicRoot, SymbolTable, Variable, ZVariableRef};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Next-state equation of one state variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZEquation {
    pub variable: ZVariableRef,
    pub expression: LogicRoot,
}

/// Equation of one output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEquation {
    pub output: usize,
    pub expression: LogicRoot,
}

/// Equation of one control signal
///
/// The expression never contains control signals; [`ControlSignalEquation::new`]
/// enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSignalEquation {
    signal: ControlSignalRef,
    expression: LogicRoot,
}

impl ZEquation {
    pub fn new(variable: ZVariableRef, expression: LogicRoot) -> Self {
        ZEquation {
            variable,
            expression,
        }
    }

    /// `automaton.z<n>` and the expression text
    pub fn render(&self, symbols: &SymbolTable) -> RenderedEquation {
        RenderedEquation {
            target: symbols.z_variable_prefixed_name(self.variable),
            expression: self.expression.to_custom_string(symbols),
        }
    }
}

impl OutputEquation {
    pub fn new(output: usize, expression: LogicRoot) -> Self {
        OutputEquation { output, expression }
    }

    pub fn render(&self, symbols: &SymbolTable) -> RenderedEquation {
        RenderedEquation {
            target: symbols.output_display_name(self.output),
            expression: self.expression.to_custom_string(symbols),
        }
    }
}

impl ControlSignalEquation {
    /// Fails if `expression` reads any control signal
    pub fn new(signal: ControlSignalRef, expression: LogicRoot) -> Result<Self, ScopeViolation> {
        if expression.contains_control_signal() {
            return Err(ScopeViolation::ControlSignalReadsControlSignal { signal });
        }
        Ok(ControlSignalEquation { signal, expression })
    }

    pub fn signal(&self) -> ControlSignalRef {
        self.signal
    }

    pub fn expression(&self) -> &LogicRoot {
        &self.expression
    }

    pub fn render(&self, symbols: &SymbolTable) -> RenderedEquation {
        RenderedEquation {
            target: Variable::ControlSignal(self.signal).to_custom_string(symbols),
            expression: self.expression.to_custom_string(symbols),
        }
    }
}

impl Minimizable for ZEquation {
    fn minimize_with(
        &self,
        engine: &dyn MinimizerEngine,
        dont_care: Option<&LogicRoot>,
    ) -> Result<Self, MinimizationError> {
        Ok(ZEquation::new(
            self.variable,
            self.expression.minimize_with(engine, dont_care)?,
        ))
    }
}

impl Minimizable for OutputEquation {
    fn minimize_with(
        &self,
        engine: &dyn MinimizerEngine,
        dont_care: Option<&LogicRoot>,
    ) -> Result<Self, MinimizationError> {
        Ok(OutputEquation::new(
            self.output,
            self.expression.minimize_with(engine, dont_care)?,
        ))
    }
}

impl Minimizable for ControlSignalEquation {
    fn minimize_with(
        &self,
        engine: &dyn MinimizerEngine,
        dont_care: Option<&LogicRoot>,
    ) -> Result<Self, MinimizationError> {
        // minimisation never introduces variables, so the scope still holds
        Ok(ControlSignalEquation {
            signal: self.signal,
            expression: self.expression.minimize_with(engine, dont_care)?,
        })
    }
}

/// How equations are simplified before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimizationLevel {
    /// As derived from the automaton
    #[default]
    Unminimized,
    /// Minimised without don't-cares
    Minimized,
    /// Minimised treating the h* expression as don't-care
    HStarMinimized,
}

/// Equation as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEquation {
    pub target: String,
    pub expression: String,
}

/// All equations of one automaton as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEquationSet {
    pub automaton: String,
    pub z_equations: Vec<RenderedEquation>,
    pub output_equations: Vec<RenderedEquation>,
    pub control_signal_equations: Vec<RenderedEquation>,
}

/// Complete equation description of one automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonEquationSet {
    pub automaton_id: usize,
    /// One equation per state variable, `z_i = 0` included
    pub z_equations: Vec<ZEquation>,
    pub output_equations: Vec<OutputEquation>,
    pub control_signal_equations: Vec<ControlSignalEquation>,
}

impl AutomatonEquationSet {
    /// Minimise every equation at `level`
    ///
    /// `dont_care` is only used by [`MinimizationLevel::HStarMinimized`].
    pub fn minimized(
        &self,
        engine: &dyn MinimizerEngine,
        level: MinimizationLevel,
        dont_care: Option<&LogicRoot>,
    ) -> Result<AutomatonEquationSet, MinimizationError> {
        let dont_care = match level {
            MinimizationLevel::Unminimized => return Ok(self.clone()),
            MinimizationLevel::Minimized => None,
            MinimizationLevel::HStarMinimized => dont_care,
        };

        Ok(AutomatonEquationSet {
            automaton_id: self.automaton_id,
            z_equations: self
                .z_equations
                .iter()
                .map(|e| e.minimize_with(engine, dont_care))
                .collect::<Result<_, _>>()?,
            output_equations: self
                .output_equations
                .iter()
                .map(|e| e.minimize_with(engine, dont_care))
                .collect::<Result<_, _>>()?,
            control_signal_equations: self
                .control_signal_equations
                .iter()
                .map(|e| e.minimize_with(engine, dont_care))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Render with user names after minimising at `level`
    pub fn render(
        &self,
        symbols: &SymbolTable,
        engine: &dyn MinimizerEngine,
        level: MinimizationLevel,
        dont_care: Option<&LogicRoot>,
    ) -> Result<RenderedEquationSet, MinimizationError> {
        let set = self.minimized(engine, level, dont_care)?;
        Ok(RenderedEquationSet {
            automaton: symbols.automaton_display_name(self.automaton_id),
            z_equations: set.z_equations.iter().map(|e| e.render(symbols)).collect(),
            output_equations: set.output_equations.iter().map(|e| e.render(symbols)).collect(),
            control_signal_equations: set
                .control_signal_equations
                .iter()
                .map(|e| e.render(symbols))
                .collect(),
        })
    }
}

impl Automaton {
    /// Next-state equation of every state variable
    ///
    /// `z_i` is the OR over all transitions into a state with bit `i` set of
    /// (encoding of the source state AND guard). Transitions between nodes that do
    /// not exist are skipped.
    pub fn z_equations(&self) -> Vec<ZEquation> {
        (0..self.z_variable_count())
            .map(|bit| {
                let terms = self.transitions.iter().filter_map(|t| {
                    let from = self.node(t.from)?;
                    let to = self.node(t.to)?;
                    is_bit_needed_for_encoding(to.state_number, bit).then(|| {
                        LogicNode::and(
                            self.state_encoding(from.state_number),
                            t.guard.tree().clone(),
                        )
                    })
                });
                ZEquation::new(
                    ZVariableRef::new(self.id, bit),
                    LogicRoot::new(LogicNode::or_all(terms)),
                )
            })
            .collect()
    }

    /// Outputs driven anywhere in the automaton, in order of first appearance
    pub fn used_outputs(&self) -> Vec<usize> {
        let mut outputs = Vec::new();
        for assignment in self.nodes.iter().flat_map(|n| &n.outputs) {
            if !outputs.contains(&assignment.output) {
                outputs.push(assignment.output);
            }
        }
        outputs
    }

    /// Control signal numbers driven anywhere in the automaton
    pub fn used_control_signals(&self) -> Vec<usize> {
        let mut signals = Vec::new();
        for assignment in self.nodes.iter().flat_map(|n| &n.control_signals) {
            if !signals.contains(&assignment.signal) {
                signals.push(assignment.signal);
            }
        }
        signals
    }

    /// Equation of every driven output plus `0` for each of `required` that is not
    /// driven
    pub fn output_equations(&self, required: &[usize]) -> Vec<OutputEquation> {
        let mut equations: Vec<OutputEquation> = self
            .used_outputs()
            .into_iter()
            .map(|output| {
                let terms = self.nodes.iter().flat_map(|node| {
                    node.outputs
                        .iter()
                        .filter(move |a| a.output == output)
                        .map(move |a| {
                            LogicNode::and(
                                self.state_encoding(node.state_number),
                                a.condition.tree().clone(),
                            )
                        })
                });
                OutputEquation::new(output, LogicRoot::new(LogicNode::or_all(terms)))
            })
            .collect();

        for output in required {
            if !equations.iter().any(|e| e.output == *output) {
                equations.push(OutputEquation::new(*output, LogicRoot::constant(false)));
            }
        }
        equations
    }

    /// Equation of every driven control signal plus `0` for each signal of this
    /// automaton in `required` that is not driven
    ///
    /// Signals of other automata in `required` are ignored. Fails if a node's
    /// condition reads control signals.
    pub fn control_signal_equations(
        &self,
        required: &[ControlSignalRef],
    ) -> Result<Vec<ControlSignalEquation>, ScopeViolation> {
        let mut equations = Vec::new();
        for number in self.used_control_signals() {
            let terms = self.nodes.iter().flat_map(|node| {
                node.control_signals
                    .iter()
                    .filter(move |a| a.signal == number)
                    .map(move |a| {
                        LogicNode::and(
                            self.state_encoding(node.state_number),
                            a.condition.tree().clone(),
                        )
                    })
            });
            equations.push(ControlSignalEquation::new(
                ControlSignalRef::new(self.id, number),
                LogicRoot::new(LogicNode::or_all(terms)),
            )?);
        }

        for signal in required.iter().filter(|s| s.automaton_id == self.id) {
            if !equations.iter().any(|e| e.signal == *signal) {
                equations.push(ControlSignalEquation::new(*signal, LogicRoot::constant(false))?);
            }
        }
        Ok(equations)
    }

    /// All equations of this automaton
    pub fn equation_set(
        &self,
        required_outputs: &[usize],
        required_signals: &[ControlSignalRef],
    ) -> Result<AutomatonEquationSet, AutomatonError> {
        let set = AutomatonEquationSet {
            automaton_id: self.id,
            z_equations: self.z_equations(),
            output_equations: self.output_equations(required_outputs),
            control_signal_equations: self.control_signal_equations(required_signals)?,
        };
        debug!(
            automaton = self.id,
            z = set.z_equations.len(),
            outputs = set.output_equations.len(),
            control_signals = set.control_signal_equations.len(),
            "derived equations"
        );
        Ok(set)
    }
}

/// Equation sets of several automata
pub fn equation_sets(
    automata: &[Automaton],
    required_outputs: &[usize],
    required_signals: &[ControlSignalRef],
) -> Result<Vec<AutomatonEquationSet>, AutomatonError> {
    automata
        .iter()
        .map(|a| a.equation_set(required_outputs, required_signals))
        .collect()
}
