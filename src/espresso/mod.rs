//! Two-level logic minimisation engines
//!
//! The minimiser in [`crate::minimize`] does not depend on a particular algorithm: it
//! hands a [`TruthTable`] to any [`MinimizerEngine`] and reads back a list of cube
//! strings. This module defines that contract and provides [`Espresso`], the default
//! engine, which runs the Berkeley Espresso minimiser from the `espresso-logic` crate
//! in its heuristic or exact mode.
//!
//! # Cube Format
//!
//! Every returned string is `"<cube> <membership>"`. The cube has one character per
//! input, the first variable leftmost:
//!
//! - `1` - the variable appears asserted
//! - `0` - the variable appears complemented
//! - `-` - the variable does not appear
//!
//! The membership part has one character per output, `1` when the cube belongs to
//! that output's sum of products.
//!
//! # Examples
//!
//! ```
//! use automaton_logic::espresso::{Espresso, MinimizerEngine};
//! use automaton_logic::TruthTable;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // a + b
//! let table = TruthTable::from_pla_string(".i 2\n.o 1\n01 1\n10 1\n11 1\n.e")?;
//! let cubes = Espresso::default().minimize_table(&table)?;
//! assert_eq!(cubes, vec!["-1 1".to_string(), "1- 1".to_string()]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Tuning
//!
//! ```
//! use automaton_logic::espresso::{Espresso, EspressoConfig, MinimizationMode};
//!
//! let mut config = EspressoConfig::default();
//! config.single_expand = true;
//! let fast = Espresso::new(config, MinimizationMode::Heuristic);
//! let exact = Espresso::exact();
//! assert_eq!(exact.mode(), MinimizationMode::Exact);
//! assert!(fast.config().single_expand);
//! ```

pub mod error;

pub use error::MinimizationError;
pub use espresso_logic::EspressoConfig;

use crate::truth_table::{TruthTable, TruthTableError};
use espresso_logic::cover::{Cover, CoverType, CubeType, Minimizable as _};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// A two-level minimisation routine
///
/// Implementations receive a table with `n` inputs and `m` outputs and return a cover
/// in the cube format described in the [module docs](self). Rows marked don't-care
/// may be covered or not. The returned cubes of output `j` must cover exactly the
/// rows where output `j` is one, apart from don't-care rows.
///
/// Engines are passed by reference into every operation that minimises, so callers
/// can swap in an external tool or a test double.
pub trait MinimizerEngine {
    /// Minimise every output of `table`
    fn minimize_table(&self, table: &TruthTable) -> Result<Vec<String>, MinimizationError>;
}

impl<E: MinimizerEngine + ?Sized> MinimizerEngine for &E {
    fn minimize_table(&self, table: &TruthTable) -> Result<Vec<String>, MinimizationError> {
        (**self).minimize_table(table)
    }
}

/// Which Espresso algorithm [`Espresso`] runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimizationMode {
    /// Iterated expand/irredundant/reduce; fast, usually minimal
    #[default]
    Heuristic,
    /// Minimum cover; exponential in the worst case
    Exact,
}

/// The default minimisation engine
///
/// Each output is handed to Espresso as its own single-output cover (ON-set plus
/// don't-care set). Cubes shared by several outputs are merged into one line with
/// several membership bits set, and lines come back sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Espresso {
    config: EspressoConfig,
    mode: MinimizationMode,
}

impl Espresso {
    pub fn new(config: EspressoConfig, mode: MinimizationMode) -> Self {
        Espresso { config, mode }
    }

    /// Engine running the exact algorithm
    pub fn exact() -> Self {
        Espresso::new(EspressoConfig::default(), MinimizationMode::Exact)
    }

    pub fn config(&self) -> &EspressoConfig {
        &self.config
    }

    pub fn mode(&self) -> MinimizationMode {
        self.mode
    }

    /// Minimised cubes of one output of `table`, input part only
    pub fn minimize_output(
        &self,
        table: &TruthTable,
        output: usize,
    ) -> Result<Vec<String>, MinimizationError> {
        let cover = output_cover(table, output)?;
        if cover.num_cubes() == 0 {
            return Ok(Vec::new());
        }

        let minimized = match self.mode {
            MinimizationMode::Heuristic => cover.minimize_with_config(&self.config),
            MinimizationMode::Exact => cover.minimize_exact_with_config(&self.config),
        }
        .map_err(|e| MinimizationError::Engine {
            message: Arc::from(e.to_string()),
        })?;

        let cubes: Vec<String> = minimized
            .cubes()
            .filter(|cube| cube.cube_type() == CubeType::F)
            .filter(|cube| cube.outputs().first().copied().unwrap_or(false))
            .map(|cube| {
                cube.inputs()
                    .iter()
                    .map(|literal| match literal {
                        Some(true) => '1',
                        Some(false) => '0',
                        None => '-',
                    })
                    .collect()
            })
            .collect();
        trace!(output, before = cover.num_cubes(), after = cubes.len(), "espresso pass");
        Ok(cubes)
    }
}

/// MSB-first literals of `row`
fn row_literals(row: u64, inputs: usize) -> Vec<Option<bool>> {
    (0..inputs)
        .rev()
        .map(|bit| Some((row >> bit) & 1 == 1))
        .collect()
}

/// FD cover with one minterm per ON row and per don't-care row of `output`
fn output_cover(table: &TruthTable, output: usize) -> Result<Cover, MinimizationError> {
    let on = table
        .function_index(output)
        .ok_or(TruthTableError::InvalidOutputIndex {
            output,
            outputs: table.outputs(),
        })?;
    let mut cover = Cover::new(CoverType::FD);
    for row in on.iter().filter(|row| !table.is_dont_care(*row)) {
        cover.add_cube(&row_literals(row, table.inputs()), &[Some(true)]);
    }
    if cover.num_cubes() > 0 {
        for row in table.dont_care().iter() {
            cover.add_cube(&row_literals(row, table.inputs()), &[None]);
        }
    }
    Ok(cover)
}

impl MinimizerEngine for Espresso {
    fn minimize_table(&self, table: &TruthTable) -> Result<Vec<String>, MinimizationError> {
        debug!(
            inputs = table.inputs(),
            outputs = table.outputs(),
            mode = ?self.mode,
            "running espresso"
        );

        let mut lines: BTreeMap<String, Vec<bool>> = BTreeMap::new();
        for output in 0..table.outputs() {
            let cubes = if table.inputs() == 0 {
                // no literals to minimise over
                let one = table.is_one(0, output) && !table.is_dont_care(0);
                if one { vec![String::new()] } else { Vec::new() }
            } else {
                self.minimize_output(table, output)?
            };
            for cube in cubes {
                let membership = lines
                    .entry(cube)
                    .or_insert_with(|| vec![false; table.outputs()]);
                membership[output] = true;
            }
        }

        Ok(lines
            .into_iter()
            .map(|(cube, membership)| {
                let outputs: String = membership.iter().map(|m| if *m { '1' } else { '0' }).collect();
                format!("{} {}", cube, outputs)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(inputs: usize, outputs: &[&[u64]], dont_care: &[u64]) -> TruthTable {
        let mut table = TruthTable::new(inputs, outputs.len()).unwrap();
        for (output, rows) in outputs.iter().enumerate() {
            for row in *rows {
                table.set_output_one(*row, output).unwrap();
            }
        }
        for row in dont_care {
            table.set_dont_care_one(*row).unwrap();
        }
        table
    }

    #[test]
    fn test_default_config() {
        let config = EspressoConfig::new();
        assert!(config.remove_essential);
        assert!(config.force_irredundant);
        assert_eq!(config, EspressoConfig::default());
        assert!(!config.single_expand);
        assert!(!config.use_super_gasp);
        assert_eq!(Espresso::default().mode(), MinimizationMode::Heuristic);
    }

    #[test]
    fn test_and_of_two_inputs() {
        let cubes = Espresso::default()
            .minimize_table(&table(2, &[&[3]], &[]))
            .unwrap();
        assert_eq!(cubes, vec!["11 1"]);
    }

    #[test]
    fn test_constant_zero_and_one() {
        let engine = Espresso::default();
        assert!(engine.minimize_table(&table(2, &[&[]], &[])).unwrap().is_empty());
        assert_eq!(
            engine.minimize_table(&table(2, &[&[0, 1, 2, 3]], &[])).unwrap(),
            vec!["-- 1"]
        );
        assert_eq!(engine.minimize_table(&table(0, &[&[0]], &[])).unwrap(), vec![" 1"]);
    }

    #[test]
    fn test_shared_cubes_are_merged() {
        // output 0 = a, output 1 = a & b
        let cubes = Espresso::default()
            .minimize_table(&table(2, &[&[2, 3], &[3]], &[]))
            .unwrap();
        assert_eq!(cubes, vec!["1- 10", "11 01"]);
    }

    #[test]
    fn test_exact_and_heuristic_agree_on_size() {
        // f = sum of minterms 0, 1, 2, 5, 6, 7, 8, 9, 10, 14
        let t = table(4, &[&[0, 1, 2, 5, 6, 7, 8, 9, 10, 14]], &[]);
        let heuristic = Espresso::default().minimize_table(&t).unwrap();
        let exact = Espresso::exact().minimize_table(&t).unwrap();
        assert_eq!(exact.len(), 3);
        assert!(heuristic.len() >= exact.len());
        assert!(heuristic.len() <= exact.len() + 1);
    }

    #[test]
    fn test_engine_by_reference() {
        let engine = Espresso::exact();
        let by_ref: &dyn MinimizerEngine = &engine;
        let cubes = by_ref.minimize_table(&table(1, &[&[0]], &[])).unwrap();
        assert_eq!(cubes, vec!["0 1"]);
    }

    #[test]
    fn test_invalid_output_index() {
        let err = Espresso::default()
            .minimize_output(&table(1, &[&[0]], &[]), 3)
            .unwrap_err();
        assert!(matches!(err, MinimizationError::Table(_)));
    }

    #[test]
    fn test_dont_care_rows_widen_cubes() {
        // a & b with a & /b free
        let engine = Espresso::default();
        assert_eq!(
            engine.minimize_output(&table(2, &[&[3]], &[2]), 0).unwrap(),
            vec!["1-"]
        );
        // a row that is both one and don't-care is not required
        assert!(engine
            .minimize_output(&table(2, &[&[3]], &[3]), 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_tuned_configs_stay_correct() {
        let t = table(3, &[&[1, 3, 5, 7, 6]], &[]);
        for (single_expand, use_super_gasp) in [(true, false), (false, true)] {
            let config = EspressoConfig {
                single_expand,
                use_super_gasp,
                ..EspressoConfig::default()
            };
            let cubes = Espresso::new(config, MinimizationMode::Heuristic)
                .minimize_table(&t)
                .unwrap();
            assert_eq!(cubes, vec!["--1 1", "11- 1"]);
        }
    }
}
