//! Dense truth tables over enumerated variable assignments
//!
//! Each output column is stored as a function index: a bit set over the `2^n` rows
//! where bit `k` is set when row `k` evaluates to one. A single don't-care column is
//! shared by all outputs. Row `k` assigns the variable at list position 0 the most
//! significant bit of `k`.

pub mod error;
mod pla;

pub use error::{PlaError, PlaReadError, TruthTableError};

use crate::tree::assignment::row_count;
use crate::tree::{LogicNode, SystemAssignment, Variable};
use tracing::debug;

const WORD_BITS: u64 = 64;

/// A set of row indices over a fixed number of rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RowSet {
    rows: u64,
    words: Vec<u64>,
}

impl RowSet {
    /// An empty set over `rows` rows
    pub fn new(rows: u64) -> Self {
        RowSet {
            rows,
            words: vec![0; rows.div_ceil(WORD_BITS) as usize],
        }
    }

    /// Build from an integer function index, bit `k` standing for row `k`
    ///
    /// Bits at or above `rows` are ignored.
    pub fn from_bits(rows: u64, bits: u64) -> Self {
        let mut set = RowSet::new(rows);
        for row in (0..rows.min(WORD_BITS)).filter(|row| (bits >> row) & 1 == 1) {
            set.insert(row);
        }
        set
    }

    pub fn from_rows(rows: u64, members: impl IntoIterator<Item = u64>) -> Self {
        let mut set = RowSet::new(rows);
        for row in members {
            set.insert(row);
        }
        set
    }

    /// Number of rows the set ranges over
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Add a row, ignoring rows out of range
    pub fn insert(&mut self, row: u64) {
        if row < self.rows {
            self.words[(row / WORD_BITS) as usize] |= 1 << (row % WORD_BITS);
        }
    }

    pub fn remove(&mut self, row: u64) {
        if row < self.rows {
            self.words[(row / WORD_BITS) as usize] &= !(1 << (row % WORD_BITS));
        }
    }

    pub fn contains(&self, row: u64) -> bool {
        row < self.rows && (self.words[(row / WORD_BITS) as usize] >> (row % WORD_BITS)) & 1 == 1
    }

    pub fn count(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Member rows in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.words.iter().enumerate().flat_map(|(i, word)| {
            let base = i as u64 * WORD_BITS;
            let mut remaining = *word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as u64;
                remaining &= remaining - 1;
                Some(base + bit)
            })
        })
    }

    /// Rows in neither `self` nor `other`
    pub fn complement_union(&self, other: &RowSet) -> RowSet {
        let mut set = RowSet::new(self.rows);
        for row in 0..self.rows {
            if !self.contains(row) && !other.contains(row) {
                set.insert(row);
            }
        }
        set
    }
}

/// A truth table with `n` inputs and `m` outputs plus a shared don't-care column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    inputs: usize,
    functions: Vec<RowSet>,
    dont_care: RowSet,
}

impl TruthTable {
    /// An all-zero table without don't-cares
    ///
    /// Zero inputs give the single row of a constant.
    pub fn new(inputs: usize, outputs: usize) -> Result<Self, TruthTableError> {
        let rows = row_count(inputs)?;
        Ok(TruthTable {
            inputs,
            functions: vec![RowSet::new(rows); outputs],
            dont_care: RowSet::new(rows),
        })
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.functions.len()
    }

    pub fn rows(&self) -> u64 {
        1u64 << self.inputs
    }

    /// Function indices of all outputs
    pub fn function_indexes(&self) -> &[RowSet] {
        &self.functions
    }

    pub fn function_index(&self, output: usize) -> Option<&RowSet> {
        self.functions.get(output)
    }

    pub fn dont_care(&self) -> &RowSet {
        &self.dont_care
    }

    fn check_row(&self, row: u64) -> Result<(), TruthTableError> {
        if row >= self.rows() {
            return Err(TruthTableError::InvalidAssignmentIndex {
                index: row,
                variables: self.inputs,
            });
        }
        Ok(())
    }

    fn check_output(&self, output: usize) -> Result<(), TruthTableError> {
        if output >= self.outputs() {
            return Err(TruthTableError::InvalidOutputIndex {
                output,
                outputs: self.outputs(),
            });
        }
        Ok(())
    }

    fn check_function_index(&self, index: &RowSet) -> Result<(), TruthTableError> {
        if index.rows() != self.rows() {
            return Err(TruthTableError::InvalidFunctionIndex {
                expected_rows: self.rows(),
                actual_rows: index.rows(),
            });
        }
        Ok(())
    }

    pub fn set_output_one(&mut self, row: u64, output: usize) -> Result<(), TruthTableError> {
        self.check_output(output)?;
        self.check_row(row)?;
        self.functions[output].insert(row);
        Ok(())
    }

    pub fn set_dont_care_one(&mut self, row: u64) -> Result<(), TruthTableError> {
        self.check_row(row)?;
        self.dont_care.insert(row);
        Ok(())
    }

    pub fn set_function_index(&mut self, output: usize, index: RowSet) -> Result<(), TruthTableError> {
        self.check_output(output)?;
        self.check_function_index(&index)?;
        self.functions[output] = index;
        Ok(())
    }

    pub fn set_dont_care_function_index(&mut self, index: RowSet) -> Result<(), TruthTableError> {
        self.check_function_index(&index)?;
        self.dont_care = index;
        Ok(())
    }

    pub fn is_one(&self, row: u64, output: usize) -> bool {
        self.functions
            .get(output)
            .is_some_and(|index| index.contains(row))
    }

    pub fn is_dont_care(&self, row: u64) -> bool {
        self.dont_care.contains(row)
    }

    /// Rows of `output` that are zero and not don't-care
    pub fn off_set(&self, output: usize) -> Result<RowSet, TruthTableError> {
        self.check_output(output)?;
        Ok(self.functions[output].complement_union(&self.dont_care))
    }

    /// A one-output table with column `output` and the same don't-care column
    pub fn single_output(&self, output: usize) -> Result<TruthTable, TruthTableError> {
        self.check_output(output)?;
        Ok(TruthTable {
            inputs: self.inputs,
            functions: vec![self.functions[output].clone()],
            dont_care: self.dont_care.clone(),
        })
    }

    /// Enumerate every assignment of `variables` and evaluate the trees
    ///
    /// Output column `j` holds `outputs[j]`; rows where `dont_care` is true are
    /// marked don't-care.
    pub fn from_trees(
        variables: &[Variable],
        outputs: &[&LogicNode],
        dont_care: Option<&LogicNode>,
    ) -> Result<TruthTable, TruthTableError> {
        let mut table = TruthTable::new(variables.len(), outputs.len())?;
        debug!(
            variables = variables.len(),
            outputs = outputs.len(),
            rows = table.rows(),
            "enumerating truth table"
        );

        for row in 0..table.rows() {
            let assignment = SystemAssignment::from_index(variables, row)?;
            for (output, tree) in outputs.iter().enumerate() {
                if tree.evaluate(&assignment) {
                    table.functions[output].insert(row);
                }
            }
            if dont_care.is_some_and(|tree| tree.evaluate(&assignment)) {
                table.dont_care.insert(row);
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_set_basics() {
        let mut set = RowSet::new(130);
        set.insert(0);
        set.insert(64);
        set.insert(129);
        set.insert(500);
        assert_eq!(set.count(), 3);
        assert!(set.contains(64));
        assert!(!set.contains(500));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 64, 129]);
        set.remove(64);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 129]);
    }

    #[test]
    fn test_from_bits() {
        let set = RowSet::from_bits(8, 0b1100_0110);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 6, 7]);
    }

    #[test]
    fn test_set_output_bounds() {
        let mut table = TruthTable::new(2, 1).unwrap();
        table.set_output_one(3, 0).unwrap();
        assert!(table.is_one(3, 0));
        assert!(matches!(
            table.set_output_one(4, 0),
            Err(TruthTableError::InvalidAssignmentIndex { index: 4, .. })
        ));
        assert!(matches!(
            table.set_output_one(0, 1),
            Err(TruthTableError::InvalidOutputIndex { output: 1, outputs: 1 })
        ));
    }

    #[test]
    fn test_function_index_size_is_checked() {
        let mut table = TruthTable::new(2, 1).unwrap();
        assert!(table.set_function_index(0, RowSet::from_bits(4, 0b1110)).is_ok());
        assert!(matches!(
            table.set_dont_care_function_index(RowSet::new(8)),
            Err(TruthTableError::InvalidFunctionIndex {
                expected_rows: 4,
                actual_rows: 8
            })
        ));
    }

    #[test]
    fn test_constant_table_has_one_row() {
        let mut table = TruthTable::new(0, 1).unwrap();
        assert_eq!(table.rows(), 1);
        table.set_output_one(0, 0).unwrap();
        assert!(table.set_dont_care_one(1).is_err());
    }

    #[test]
    fn test_from_trees_is_msb_first() {
        // a & /b is true only for a=1, b=0, which is row 0b10
        let tree = LogicNode::and(LogicNode::input(0), LogicNode::not(LogicNode::input(1)));
        let dc = LogicNode::and(LogicNode::input(0), LogicNode::input(1));
        let vars = [Variable::Input(0), Variable::Input(1)];
        let table = TruthTable::from_trees(&vars, &[&tree], Some(&dc)).unwrap();
        assert_eq!(table.function_index(0).unwrap().iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(table.dont_care().iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(table.off_set(0).unwrap().iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_single_output_keeps_dont_cares() {
        let mut table = TruthTable::new(1, 2).unwrap();
        table.set_output_one(1, 1).unwrap();
        table.set_dont_care_one(0).unwrap();
        let single = table.single_output(1).unwrap();
        assert_eq!(single.outputs(), 1);
        assert!(single.is_one(1, 0));
        assert!(single.is_dont_care(0));
    }

    #[test]
    fn test_too_many_inputs() {
        assert!(matches!(
            TruthTable::new(32, 1),
            Err(TruthTableError::TooManyVariables { count: 32 })
        ));
    }
}
