//! Minimisation of logic trees through truth tables
//!
//! A tree is minimised in four steps:
//!
//! 1. The variables of the tree and of the optional don't-care tree are merged into
//!    one order-stable list. Position 0 is the most significant bit of every row.
//! 2. A [`TruthTable`] is enumerated over that list.
//! 3. Every output column is handed to the [`MinimizerEngine`] on its own, together
//!    with the shared don't-care column, and the returned cubes are rebuilt into a
//!    sum of products over numbered placeholders.
//! 4. Placeholder `i` is replaced by variable `i` of the list.
//!
//! Minimising one output at a time keeps every output individually minimal, even
//! where a joint cover would share more cubes.
//!
//! # Examples
//!
//! ```
//! use automaton_logic::espresso::Espresso;
//! use automaton_logic::minimize::Minimizable;
//! use automaton_logic::tree::{LogicNode, LogicRoot};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a = LogicNode::input(0);
//! let b = LogicNode::input(1);
//! // a & b + a & /b
//! let root = LogicRoot::new(LogicNode::or(
//!     LogicNode::and(a.clone(), b.clone()),
//!     LogicNode::and(a, LogicNode::not(b)),
//! ));
//!
//! let minimized = root.minimize(&Espresso::default())?;
//! assert_eq!(minimized.to_internal_string(), "x0");
//! # Ok(())
//! # }
//! ```

use crate::espresso::{MinimizationError, MinimizerEngine};
use crate::tree::{LogicNode, LogicRoot, PlaceholderNode, Variable};
use crate::truth_table::TruthTable;
use std::sync::Arc;
use tracing::{debug, trace};

/// Minimise every output of `table` independently
///
/// Returns one placeholder tree per output column. Tables without inputs are
/// answered directly from row 0 without calling the engine.
pub fn minimize_truth_table(
    engine: &dyn MinimizerEngine,
    table: &TruthTable,
) -> Result<Vec<PlaceholderNode>, MinimizationError> {
    let mut results = Vec::with_capacity(table.outputs());
    for output in 0..table.outputs() {
        let single = table.single_output(output)?;
        if single.inputs() == 0 {
            results.push(PlaceholderNode::Constant(single.is_one(0, 0)));
            continue;
        }

        let cubes = engine.minimize_table(&single)?;
        trace!(output, cubes = cubes.len(), "engine returned cover");
        results.push(reconstruct(&cubes, single.inputs(), 0)?);
    }
    Ok(results)
}

/// Rebuild the sum of products of `output` from engine cube strings
///
/// Each string is `<cube><membership>` once whitespace is removed, with one cube
/// character per input.
pub fn reconstruct(
    cubes: &[String],
    inputs: usize,
    output: usize,
) -> Result<PlaceholderNode, MinimizationError> {
    let mut sum: Option<PlaceholderNode> = None;

    for line in cubes {
        let compact: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        let invalid = || MinimizationError::InvalidCube {
            cube: Arc::from(line.as_str()),
            inputs,
        };
        if compact.len() <= inputs + output {
            return Err(invalid());
        }

        match compact[inputs + output] {
            '1' => {}
            '0' | '-' | '~' => continue,
            _ => return Err(invalid()),
        }

        let mut product: Option<PlaceholderNode> = None;
        for (index, c) in compact[..inputs].iter().enumerate() {
            let literal = match c {
                '1' => PlaceholderNode::Placeholder(index),
                '0' => PlaceholderNode::not(PlaceholderNode::Placeholder(index)),
                '-' => continue,
                _ => return Err(invalid()),
            };
            product = Some(match product {
                Some(p) => PlaceholderNode::and(p, literal),
                None => literal,
            });
        }
        let product = product.unwrap_or(PlaceholderNode::Constant(true));

        sum = Some(match sum {
            Some(s) => PlaceholderNode::or(s, product),
            None => product,
        });
    }

    Ok(sum.unwrap_or(PlaceholderNode::Constant(false)))
}

/// Merge two variable lists, keeping first occurrences in order
pub fn merge_variables(first: &[Variable], second: &[Variable]) -> Vec<Variable> {
    let mut merged = first.to_vec();
    for v in second {
        if !merged.contains(v) {
            merged.push(*v);
        }
    }
    merged
}

/// Minimise `tree`, treating rows where `dont_care` holds as free
pub fn minimize_tree(
    engine: &dyn MinimizerEngine,
    tree: &LogicNode,
    dont_care: Option<&LogicNode>,
) -> Result<LogicNode, MinimizationError> {
    let variables = merge_variables(
        &tree.extract_variables(),
        &dont_care.map(LogicNode::extract_variables).unwrap_or_default(),
    );
    let table = TruthTable::from_trees(&variables, &[tree], dont_care)?;
    debug!(
        variables = variables.len(),
        ones = table.function_indexes()[0].count(),
        dont_cares = table.dont_care().count(),
        "minimizing tree"
    );

    let placeholders = minimize_truth_table(engine, &table)?;
    match placeholders.first() {
        Some(placeholder) => placeholder.substitute(&variables),
        None => Ok(LogicNode::constant(false)),
    }
}

/// Types whose logic can be rewritten into a minimal sum of products
///
/// All methods leave `self` untouched and return a new value.
pub trait Minimizable {
    /// Minimise with `engine`, rows where `dont_care` holds may take any value
    fn minimize_with(
        &self,
        engine: &dyn MinimizerEngine,
        dont_care: Option<&LogicRoot>,
    ) -> Result<Self, MinimizationError>
    where
        Self: Sized;

    /// Minimise with `engine` and no don't-cares
    fn minimize(&self, engine: &dyn MinimizerEngine) -> Result<Self, MinimizationError>
    where
        Self: Sized,
    {
        self.minimize_with(engine, None)
    }
}

impl Minimizable for LogicNode {
    fn minimize_with(
        &self,
        engine: &dyn MinimizerEngine,
        dont_care: Option<&LogicRoot>,
    ) -> Result<Self, MinimizationError> {
        minimize_tree(engine, self, dont_care.map(LogicRoot::tree))
    }
}

impl Minimizable for LogicRoot {
    fn minimize_with(
        &self,
        engine: &dyn MinimizerEngine,
        dont_care: Option<&LogicRoot>,
    ) -> Result<Self, MinimizationError> {
        Ok(LogicRoot::new(self.tree().minimize_with(engine, dont_care)?))
    }
}
