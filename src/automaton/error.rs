//! Error types for automaton equation derivation

use crate::espresso::MinimizationError;
use crate::tree::ControlSignalRef;
use std::fmt;
use std::io;

/// An expression that uses a signal it is not allowed to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeViolation {
    /// The don't-care expression h* must depend on inputs only
    DontCareNotInputOnly,
    /// A control-signal expression reads state variables
    ControlSignalReadsState {
        /// The signal being defined
        signal: ControlSignalRef,
    },
    /// A control-signal expression reads control signals
    ControlSignalReadsControlSignal {
        /// The signal being defined
        signal: ControlSignalRef,
    },
    /// An output expression reads state variables
    OutputReadsState {
        /// The output being defined
        output: usize,
    },
    /// A transition guard reads state variables
    GuardReadsState {
        /// Source node id
        from: usize,
        /// Destination node id
        to: usize,
    },
    /// An expression of an automaton reads one of its own control signals
    OwnControlSignal {
        /// The automaton
        automaton_id: usize,
        /// The signal read
        signal: ControlSignalRef,
    },
}

impl fmt::Display for ScopeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeViolation::DontCareNotInputOnly => {
                write!(f, "The don't-care expression may only contain inputs")
            }
            ScopeViolation::ControlSignalReadsState { signal } => write!(
                f,
                "Expression for control signal s{} of automaton {} contains state variables",
                signal.number, signal.automaton_id
            ),
            ScopeViolation::ControlSignalReadsControlSignal { signal } => write!(
                f,
                "Expression for control signal s{} of automaton {} contains control signals",
                signal.number, signal.automaton_id
            ),
            ScopeViolation::OutputReadsState { output } => {
                write!(f, "Expression for output y{} contains state variables", output)
            }
            ScopeViolation::GuardReadsState { from, to } => write!(
                f,
                "Guard of the transition from node {} to node {} contains state variables",
                from, to
            ),
            ScopeViolation::OwnControlSignal {
                automaton_id,
                signal,
            } => write!(
                f,
                "Automaton {} reads its own control signal s{}",
                automaton_id, signal.number
            ),
        }
    }
}

impl std::error::Error for ScopeViolation {}

/// Errors raised while deriving or checking automaton equations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// Minimisation of an equation failed
    Minimization(MinimizationError),
    /// An expression broke a scope rule
    Scope(ScopeViolation),
    /// A state number no node of the automaton is encoded with
    UnknownState {
        /// The automaton
        automaton_id: usize,
        /// The missing state number
        state: usize,
    },
}

impl fmt::Display for AutomatonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonError::Minimization(e) => write!(f, "Minimization failed: {}", e),
            AutomatonError::Scope(e) => write!(f, "Scope violation: {}", e),
            AutomatonError::UnknownState {
                automaton_id,
                state,
            } => write!(
                f,
                "Automaton {} has no node in state {}",
                automaton_id, state
            ),
        }
    }
}

impl std::error::Error for AutomatonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AutomatonError::Minimization(e) => Some(e),
            AutomatonError::Scope(e) => Some(e),
            AutomatonError::UnknownState { .. } => None,
        }
    }
}

impl From<MinimizationError> for AutomatonError {
    fn from(err: MinimizationError) -> Self {
        AutomatonError::Minimization(err)
    }
}

impl From<ScopeViolation> for AutomatonError {
    fn from(err: ScopeViolation) -> Self {
        AutomatonError::Scope(err)
    }
}

impl From<AutomatonError> for io::Error {
    fn from(err: AutomatonError) -> Self {
        match err {
            AutomatonError::Minimization(e) => e.into(),
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
