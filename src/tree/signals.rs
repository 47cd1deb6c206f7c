//! Signal addressing and the symbol table
//!
//! Trees refer to signals by internal number only. The [`SymbolTable`] maps those
//! numbers to the names the user sees and is consulted both when parsing
//! identifiers and when rendering trees back to text.

use crate::expression::OperatorSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of internal input names
pub const INPUT_PREFIX: &str = "x";
/// Prefix of internal control signal names
pub const CONTROL_SIGNAL_PREFIX: &str = "s";
/// Prefix of state variable names
pub const Z_PREFIX: &str = "z";
/// Prefix of internal output names
pub const OUTPUT_PREFIX: &str = "y";

/// A control signal, local to one automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlSignalRef {
    pub automaton_id: usize,
    pub number: usize,
}

impl ControlSignalRef {
    pub fn new(automaton_id: usize, number: usize) -> Self {
        ControlSignalRef {
            automaton_id,
            number,
        }
    }
}

/// One bit of an automaton's state encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZVariableRef {
    pub automaton_id: usize,
    pub number: usize,
}

impl ZVariableRef {
    pub fn new(automaton_id: usize, number: usize) -> Self {
        ZVariableRef {
            automaton_id,
            number,
        }
    }

    /// Name without automaton prefix, e.g. `z2`
    pub fn name(&self) -> String {
        format!("{}{}", Z_PREFIX, self.number)
    }
}

/// Any signal that may appear as a leaf of a logic tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Input(usize),
    ControlSignal(ControlSignalRef),
    ZVariable(ZVariableRef),
}

impl Variable {
    /// Locally unique internal name (`x3`, `s1`, `z0`)
    pub fn internal_name(&self) -> String {
        match self {
            Variable::Input(number) => format!("{}{}", INPUT_PREFIX, number),
            Variable::ControlSignal(cs) => format!("{}{}", CONTROL_SIGNAL_PREFIX, cs.number),
            Variable::ZVariable(z) => z.name(),
        }
    }

    /// Name as the user sees it
    ///
    /// Control signals are qualified with their automaton name. State variables are
    /// not, since every state variable of one expression belongs to one automaton.
    pub fn to_custom_string(&self, symbols: &SymbolTable) -> String {
        match self {
            Variable::Input(number) => symbols
                .input_name(*number)
                .map(str::to_string)
                .unwrap_or_else(|| self.internal_name()),
            Variable::ControlSignal(cs) => {
                let signal = symbols
                    .control_signal_name(*cs)
                    .map(str::to_string)
                    .unwrap_or_else(|| self.internal_name());
                format!("{}.{}", symbols.automaton_display_name(cs.automaton_id), signal)
            }
            Variable::ZVariable(z) => z.name(),
        }
    }

    /// The owning automaton of control signals and state variables
    pub fn automaton_id(&self) -> Option<usize> {
        match self {
            Variable::Input(_) => None,
            Variable::ControlSignal(cs) => Some(cs.automaton_id),
            Variable::ZVariable(z) => Some(z.automaton_id),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.internal_name())
    }
}

/// A numbered signal with its user-facing name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSignal {
    pub number: usize,
    pub name: String,
}

/// A control signal with its user-facing name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedControlSignal {
    pub automaton_id: usize,
    pub number: usize,
    pub name: String,
}

impl NamedControlSignal {
    pub fn signal(&self) -> ControlSignalRef {
        ControlSignalRef::new(self.automaton_id, self.number)
    }
}

/// Names and operator glyphs of the whole system
///
/// Read-only input for parsing and rendering. Name comparisons are
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    pub operators: OperatorSet,
    #[serde(default)]
    pub inputs: Vec<NamedSignal>,
    #[serde(default)]
    pub outputs: Vec<NamedSignal>,
    /// Automaton names, `number` is the automaton id
    #[serde(default)]
    pub automata: Vec<NamedSignal>,
    #[serde(default)]
    pub control_signals: Vec<NamedControlSignal>,
    #[serde(default)]
    pub z_variables: Vec<ZVariableRef>,
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl SymbolTable {
    /// An empty table using the given glyphs
    pub fn new(operators: OperatorSet) -> Self {
        SymbolTable {
            operators,
            ..Default::default()
        }
    }

    pub fn with_input(mut self, number: usize, name: &str) -> Self {
        self.inputs.push(NamedSignal {
            number,
            name: name.to_string(),
        });
        self
    }

    pub fn with_output(mut self, number: usize, name: &str) -> Self {
        self.outputs.push(NamedSignal {
            number,
            name: name.to_string(),
        });
        self
    }

    pub fn with_automaton(mut self, id: usize, name: &str) -> Self {
        self.automata.push(NamedSignal {
            number: id,
            name: name.to_string(),
        });
        self
    }

    pub fn with_control_signal(mut self, automaton_id: usize, number: usize, name: &str) -> Self {
        self.control_signals.push(NamedControlSignal {
            automaton_id,
            number,
            name: name.to_string(),
        });
        self
    }

    /// Register `count` state variables `z0..z(count-1)` for an automaton
    pub fn with_z_variables(mut self, automaton_id: usize, count: usize) -> Self {
        self.z_variables
            .extend((0..count).map(|number| ZVariableRef::new(automaton_id, number)));
        self
    }

    pub fn input_name(&self, number: usize) -> Option<&str> {
        self.inputs
            .iter()
            .find(|s| s.number == number)
            .map(|s| s.name.as_str())
    }

    pub fn output_name(&self, number: usize) -> Option<&str> {
        self.outputs
            .iter()
            .find(|s| s.number == number)
            .map(|s| s.name.as_str())
    }

    pub fn automaton_name(&self, id: usize) -> Option<&str> {
        self.automata
            .iter()
            .find(|s| s.number == id)
            .map(|s| s.name.as_str())
    }

    /// Automaton name, falling back to `a<id>` for unnamed automata
    pub fn automaton_display_name(&self, id: usize) -> String {
        self.automaton_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("a{}", id))
    }

    pub fn control_signal_name(&self, signal: ControlSignalRef) -> Option<&str> {
        self.control_signals
            .iter()
            .find(|s| s.signal() == signal)
            .map(|s| s.name.as_str())
    }

    /// Output name, falling back to the internal `y<n>`
    pub fn output_display_name(&self, number: usize) -> String {
        self.output_name(number)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", OUTPUT_PREFIX, number))
    }

    /// State variable name qualified with its automaton, e.g. `traffic.z1`
    pub fn z_variable_prefixed_name(&self, z: ZVariableRef) -> String {
        format!("{}.{}", self.automaton_display_name(z.automaton_id), z.name())
    }

    /// Resolve an identifier to an input, state variable or control signal
    ///
    /// Inputs take priority over state variables, which take priority over control
    /// signals. The `automaton.z<n>` form always resolves; with an implicit automaton
    /// id, state variables of that automaton may also be written `z<n>`.
    pub fn resolve_variable(&self, name: &str, implicit_automaton: Option<usize>) -> Option<Variable> {
        if let Some(input) = self.inputs.iter().find(|s| same_name(&s.name, name)) {
            return Some(Variable::Input(input.number));
        }

        let unprefixed = implicit_automaton.and_then(|id| {
            self.z_variables
                .iter()
                .find(|z| z.automaton_id == id && same_name(&z.name(), name))
        });
        let z = unprefixed.or_else(|| {
            self.z_variables
                .iter()
                .find(|z| same_name(&self.z_variable_prefixed_name(**z), name))
        });
        if let Some(z) = z {
            return Some(Variable::ZVariable(*z));
        }

        self.control_signals
            .iter()
            .map(|s| Variable::ControlSignal(s.signal()))
            .find(|v| same_name(&v.to_custom_string(self), name))
    }

    /// Resolve an identifier to an output number
    pub fn resolve_output(&self, name: &str) -> Option<usize> {
        self.outputs
            .iter()
            .find(|s| same_name(&s.name, name))
            .map(|s| s.number)
    }

    /// All control signals declared for one automaton
    pub fn control_signals_of(&self, automaton_id: usize) -> Vec<ControlSignalRef> {
        self.control_signals
            .iter()
            .filter(|s| s.automaton_id == automaton_id)
            .map(NamedControlSignal::signal)
            .collect()
    }
}
