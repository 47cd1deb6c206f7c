//! # Automaton Logic
//!
//! Boolean equations for finite state machines: parsing of user-typed expressions,
//! two-level logic minimisation and derivation of the next-state, output and
//! control-signal equations of an automaton.
//!
//! ## Overview
//!
//! The crate is a pipeline of small, independent stages:
//!
//! 1. [`expression`] tokenises text with a configurable [`OperatorSet`], parses it
//!    with an LALRPOP grammar and resolves every identifier against a
//!    [`SymbolTable`].
//! 2. [`tree`] holds the result as an immutable [`LogicNode`] tree wrapped in a
//!    [`LogicRoot`], renders it back to text and evaluates it.
//! 3. [`truth_table`] enumerates trees into a [`TruthTable`] with a shared
//!    don't-care column and reads and writes the PLA text format.
//! 4. [`espresso`] minimises tables behind the [`MinimizerEngine`] trait. The
//!    default [`Espresso`] engine hands each output to the Espresso minimiser of
//!    the `espresso-logic` crate, heuristic or exact.
//! 5. [`minimize`] rebuilds sums of products from the engine's cube strings.
//! 6. [`automaton`] combines guards, state encodings and node conditions into
//!    equations and checks the guards of every state.
//!
//! ## Parsing and Minimising Expressions
//!
//! ```
//! use automaton_logic::{Espresso, ExpressionParser, Minimizable, OperatorSet, SymbolTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbols = SymbolTable::new(OperatorSet::default())
//!     .with_input(0, "a")
//!     .with_input(1, "b");
//! let parser = ExpressionParser::for_symbols(&symbols);
//!
//! let redundant = parser.parse("a&b + a&/b", &symbols, None)?;
//! let minimized = redundant.minimize(&Espresso::default())?;
//! assert_eq!(minimized.to_custom_string(&symbols), "a");
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry the position of the offending text:
//!
//! ```
//! use automaton_logic::{ExpressionError, ExpressionParser, OperatorSet, SymbolTable};
//!
//! let symbols = SymbolTable::new(OperatorSet::default()).with_input(0, "a");
//! let parser = ExpressionParser::for_symbols(&symbols);
//!
//! let err = parser.parse("a & foo", &symbols, None).unwrap_err();
//! assert!(matches!(err, ExpressionError::UnknownVariable { .. }));
//! assert_eq!((err.start(), err.length()), (4, 3));
//! ```
//!
//! ## Working with Truth Tables
//!
//! ```
//! use automaton_logic::{Espresso, MinimizerEngine, TruthTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // a OR b
//! let mut table = TruthTable::new(2, 1)?;
//! for row in 1..4 {
//!     table.set_output_one(row, 0)?;
//! }
//!
//! let cubes = Espresso::default().minimize_table(&table)?;
//! assert_eq!(cubes, vec!["-1 1", "1- 1"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Automata
//!
//! See the [`automaton`] module for equation derivation and guard checks.
//!
//! ## Custom Engines
//!
//! Anything implementing [`MinimizerEngine`] can replace the built-in engine. The
//! engine is always passed explicitly; there is no global instance.

pub mod automaton;
pub mod espresso;
pub mod expression;
pub mod minimize;
pub mod tree;
pub mod truth_table;

// Re-export high-level public API
pub use automaton::{Automaton, AutomatonEquationSet, AutomatonError, MinimizationLevel};
pub use espresso::{Espresso, EspressoConfig, MinimizationError, MinimizationMode, MinimizerEngine};
pub use expression::{ExpressionError, ExpressionParser, OperatorSet};
pub use minimize::Minimizable;
pub use tree::{LogicNode, LogicRoot, SymbolTable, SystemAssignment, Variable};
pub use truth_table::{TruthTable, TruthTableError};
