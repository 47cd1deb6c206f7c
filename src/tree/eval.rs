//! Evaluation of logic trees under an assignment

use super::{LogicNode, LogicRoot, NodeKind, SystemAssignment, Variable};

impl LogicNode {
    /// Evaluate with every leaf looked up in `assignment`
    pub fn evaluate(&self, assignment: &SystemAssignment) -> bool {
        self.eval_with(assignment, true)
    }

    /// Evaluate with every control signal held low
    pub fn evaluate_without_control_signals(&self, assignment: &SystemAssignment) -> bool {
        self.eval_with(assignment, false)
    }

    fn eval_with(&self, assignment: &SystemAssignment, control_signals: bool) -> bool {
        match &self.kind {
            NodeKind::Constant(value) => *value,
            NodeKind::Input(number) => assignment.get(Variable::Input(*number)),
            NodeKind::ZVariable(z) => assignment.get(Variable::ZVariable(*z)),
            NodeKind::ControlSignal(cs) => {
                control_signals && assignment.get(Variable::ControlSignal(*cs))
            }
            NodeKind::Not(child) => !child.eval_with(assignment, control_signals),
            NodeKind::And(l, r) => {
                l.eval_with(assignment, control_signals) && r.eval_with(assignment, control_signals)
            }
            NodeKind::Or(l, r) => {
                l.eval_with(assignment, control_signals) || r.eval_with(assignment, control_signals)
            }
        }
    }
}

impl LogicRoot {
    pub fn evaluate(&self, assignment: &SystemAssignment) -> bool {
        self.tree.evaluate(assignment)
    }

    pub fn evaluate_without_control_signals(&self, assignment: &SystemAssignment) -> bool {
        self.tree.evaluate_without_control_signals(assignment)
    }
}
