//! PLA text format for truth tables
//!
//! The writer emits one row per assignment: the input bits MSB-first, a space and one
//! character per output (`1`/`0`, or `-` for every output on don't-care rows),
//! framed by `.i`, `.o` and `.e`. The reader also accepts `-` in the input part and
//! expands such rows to every matching assignment.

use super::error::{PlaError, PlaReadError};
use super::TruthTable;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use std::sync::Arc;

/// MSB-first bit string of `row` with `width` characters
pub(crate) fn row_bits(row: u64, width: usize) -> String {
    (0..width)
        .rev()
        .map(|bit| if (row >> bit) & 1 == 1 { '1' } else { '0' })
        .collect()
}

impl TruthTable {
    /// Write this table in PLA format
    pub fn write_pla<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, ".i {}", self.inputs)?;
        writeln!(writer, ".o {}", self.outputs())?;

        for row in 0..self.rows() {
            let outputs: String = if self.is_dont_care(row) {
                "-".repeat(self.outputs())
            } else {
                self.functions
                    .iter()
                    .map(|f| if f.contains(row) { '1' } else { '0' })
                    .collect()
            };
            writeln!(writer, "{} {}", row_bits(row, self.inputs), outputs)?;
        }

        write!(writer, ".e")?;
        Ok(())
    }

    /// Convert this table to a PLA format string
    pub fn to_pla_string(&self) -> String {
        let mut buffer = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_pla(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Write this table to a PLA file
    pub fn to_pla_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer)?;
        writer.flush()
    }

    /// Parse a table from PLA data
    ///
    /// Output `1` sets the output, `-` or `2` marks the row don't-care, `0` and `~`
    /// leave it untouched. `.p`, `.type`, `.ilb` and `.ob` are accepted and ignored.
    pub fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PlaReadError> {
        let mut inputs: Option<usize> = None;
        let mut outputs: Option<usize> = None;
        let mut table: Option<TruthTable> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('.') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                match parts.first().copied() {
                    Some(".i") => {
                        let value = parts.get(1).copied().unwrap_or("");
                        inputs = Some(value.parse().map_err(|_| PlaError::InvalidInputDirective {
                            value: Arc::from(value),
                        })?);
                    }
                    Some(".o") => {
                        let value = parts.get(1).copied().unwrap_or("");
                        outputs = Some(value.parse().map_err(|_| {
                            PlaError::InvalidOutputDirective {
                                value: Arc::from(value),
                            }
                        })?);
                    }
                    Some(".e") | Some(".end") => break,
                    _ => {}
                }
                continue;
            }

            if table.is_none() {
                let n = inputs.ok_or(PlaError::MissingInputDirective)?;
                let m = outputs.ok_or(PlaError::MissingOutputDirective)?;
                table = Some(TruthTable::new(n, m)?);
            }
            if let Some(table) = table.as_mut() {
                table.read_row(line, line_no)?;
            }
        }

        match table {
            Some(table) => Ok(table),
            None => {
                let n = inputs.ok_or(PlaError::MissingInputDirective)?;
                let m = outputs.ok_or(PlaError::MissingOutputDirective)?;
                Ok(TruthTable::new(n, m)?)
            }
        }
    }

    /// Parse a table from a PLA format string
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton_logic::TruthTable;
    ///
    /// let table = TruthTable::from_pla_string(".i 2\n.o 1\n01 1\n1- 1\n.e\n").unwrap();
    /// assert!(table.is_one(0b01, 0));
    /// assert!(table.is_one(0b10, 0));
    /// assert!(table.is_one(0b11, 0));
    /// assert!(!table.is_one(0b00, 0));
    /// ```
    pub fn from_pla_string(s: &str) -> Result<Self, PlaReadError> {
        Self::from_pla_reader(Cursor::new(s.as_bytes()))
    }

    /// Load a table from a PLA file
    pub fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, PlaReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }

    fn read_row(&mut self, line: &str, line_no: usize) -> Result<(), PlaError> {
        let (input_part, output_part): (&str, String) = if self.inputs == 0 {
            ("", line.split_whitespace().collect())
        } else {
            let mut parts = line.split_whitespace();
            (parts.next().unwrap_or(""), parts.collect())
        };

        if input_part.len() != self.inputs || output_part.len() != self.outputs() {
            return Err(PlaError::RowDimensionMismatch {
                line: line_no,
                expected_inputs: self.inputs,
                actual_inputs: input_part.len(),
                expected_outputs: self.outputs(),
                actual_outputs: output_part.len(),
            });
        }

        // fixed bits and the positions of free bits, MSB-first
        let mut base = 0u64;
        let mut free = Vec::new();
        for (position, c) in input_part.chars().enumerate() {
            let bit = self.inputs - 1 - position;
            match c {
                '0' => {}
                '1' => base |= 1 << bit,
                '-' => free.push(bit),
                character => {
                    return Err(PlaError::InvalidInputCharacter {
                        character,
                        position,
                        line: line_no,
                    })
                }
            }
        }

        let mut set_outputs = Vec::new();
        let mut dont_care = false;
        for (position, c) in output_part.chars().enumerate() {
            match c {
                '1' => set_outputs.push(position),
                '-' | '2' => dont_care = true,
                '0' | '~' => {}
                character => {
                    return Err(PlaError::InvalidOutputCharacter {
                        character,
                        position,
                        line: line_no,
                    })
                }
            }
        }

        for combination in 0..(1u64 << free.len()) {
            let mut row = base;
            for (i, bit) in free.iter().enumerate() {
                if (combination >> i) & 1 == 1 {
                    row |= 1 << bit;
                }
            }
            for output in &set_outputs {
                self.functions[*output].insert(row);
            }
            if dont_care {
                self.dont_care.insert(row);
            }
        }
        Ok(())
    }
}
