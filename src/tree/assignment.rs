//! Signal assignments used for evaluation and simulation

use super::signals::{ControlSignalRef, Variable, ZVariableRef};
use crate::truth_table::TruthTableError;
use std::collections::BTreeMap;

/// Largest number of variables an enumeration index can address
pub const MAX_VARIABLES: usize = 31;

/// Number of rows of an enumeration over `variables` variables
///
/// Fails at 32 variables or more.
pub fn row_count(variables: usize) -> Result<u64, TruthTableError> {
    if variables > MAX_VARIABLES {
        return Err(TruthTableError::TooManyVariables { count: variables });
    }
    Ok(1u64 << variables)
}

/// Current values of every signal kind in the system
///
/// Signals without an entry read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemAssignment {
    pub inputs: BTreeMap<usize, bool>,
    pub z_variables: BTreeMap<ZVariableRef, bool>,
    pub control_signals: BTreeMap<ControlSignalRef, bool>,
    pub outputs: BTreeMap<usize, bool>,
}

impl SystemAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an enumeration index into an assignment of `variables`
    ///
    /// The first variable of the list takes the most significant bit.
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton_logic::tree::{SystemAssignment, Variable};
    ///
    /// let vars = [Variable::Input(0), Variable::Input(1)];
    /// let assignment = SystemAssignment::from_index(&vars, 0b10).unwrap();
    /// assert!(assignment.get(Variable::Input(0)));
    /// assert!(!assignment.get(Variable::Input(1)));
    /// ```
    pub fn from_index(variables: &[Variable], index: u64) -> Result<Self, TruthTableError> {
        let rows = row_count(variables.len())?;
        if index >= rows {
            return Err(TruthTableError::InvalidAssignmentIndex {
                index,
                variables: variables.len(),
            });
        }

        let n = variables.len();
        let mut assignment = SystemAssignment::new();
        for (position, variable) in variables.iter().enumerate() {
            let bit = n - 1 - position;
            assignment.set(*variable, (index >> bit) & 1 == 1);
        }
        Ok(assignment)
    }

    pub fn set(&mut self, variable: Variable, value: bool) {
        match variable {
            Variable::Input(number) => {
                self.inputs.insert(number, value);
            }
            Variable::ControlSignal(cs) => {
                self.control_signals.insert(cs, value);
            }
            Variable::ZVariable(z) => {
                self.z_variables.insert(z, value);
            }
        }
    }

    pub fn get(&self, variable: Variable) -> bool {
        let value = match variable {
            Variable::Input(number) => self.inputs.get(&number),
            Variable::ControlSignal(cs) => self.control_signals.get(&cs),
            Variable::ZVariable(z) => self.z_variables.get(&z),
        };
        value.copied().unwrap_or(false)
    }

    pub fn set_output(&mut self, number: usize, value: bool) {
        self.outputs.insert(number, value);
    }

    pub fn output(&self, number: usize) -> bool {
        self.outputs.get(&number).copied().unwrap_or(false)
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, variable: Variable, value: bool) -> Self {
        self.set(variable, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_decoding() {
        let vars = [Variable::Input(7), Variable::Input(3), Variable::Input(5)];
        let a = SystemAssignment::from_index(&vars, 0b011).unwrap();
        assert!(!a.get(Variable::Input(7)));
        assert!(a.get(Variable::Input(3)));
        assert!(a.get(Variable::Input(5)));
    }

    #[test]
    fn test_zero_variables_has_one_row() {
        assert!(SystemAssignment::from_index(&[], 0).is_ok());
        assert!(matches!(
            SystemAssignment::from_index(&[], 1),
            Err(TruthTableError::InvalidAssignmentIndex { index: 1, variables: 0 })
        ));
    }

    #[test]
    fn test_too_many_variables() {
        let vars: Vec<Variable> = (0..32).map(Variable::Input).collect();
        assert!(matches!(
            SystemAssignment::from_index(&vars, 0),
            Err(TruthTableError::TooManyVariables { count: 32 })
        ));
        assert_eq!(row_count(31).unwrap(), 1 << 31);
    }

    #[test]
    fn test_unassigned_reads_false() {
        let a = SystemAssignment::new().with(Variable::Input(1), true);
        assert!(a.get(Variable::Input(1)));
        assert!(!a.get(Variable::Input(2)));
        assert!(!a.get(Variable::ZVariable(ZVariableRef::new(0, 0))));
        assert!(!a.output(0));
    }
}
