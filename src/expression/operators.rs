//! Operator glyph configuration
//!
//! The glyphs used for AND, OR and NOT as well as the two constants are chosen by
//! the user of the editor. An [`OperatorSet`] is immutable once built; changing a
//! glyph means building a new set and a new parser from it.

use super::error::OperatorError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default glyph for logical AND
pub const DEFAULT_AND_OPERATOR: &str = "&";
/// Default glyph for logical OR
pub const DEFAULT_OR_OPERATOR: &str = "+";
/// Default glyph for logical NOT
pub const DEFAULT_NOT_OPERATOR: &str = "/";
/// Default glyph for exclusive OR (rendering only)
pub const DEFAULT_XOR_OPERATOR: &str = "*";
/// Default glyph for the constant one
pub const DEFAULT_LOGIC_ONE: &str = "1";
/// Default glyph for the constant zero
pub const DEFAULT_LOGIC_ZERO: &str = "0";

/// Which glyph of an [`OperatorSet`] a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Conjunction
    And,
    /// Disjunction
    Or,
    /// Negation
    Not,
    /// Exclusive disjunction
    Xor,
    /// Constant one
    One,
    /// Constant zero
    Zero,
}

impl OperatorKind {
    /// Human readable name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorKind::And => "AND",
            OperatorKind::Or => "OR",
            OperatorKind::Not => "NOT",
            OperatorKind::Xor => "XOR",
            OperatorKind::One => "ONE",
            OperatorKind::Zero => "ZERO",
        }
    }
}

/// The glyphs the parser accepts and the renderer emits
///
/// # Examples
///
/// ```
/// use automaton_logic::OperatorSet;
///
/// let ops = OperatorSet::new("*", "|", "!", "^", "1", "0").unwrap();
/// assert_eq!(ops.and(), "*");
/// assert!(OperatorSet::new("&", "&", "!", "^", "1", "0").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OperatorGlyphs", into = "OperatorGlyphs")]
pub struct OperatorSet {
    and: Arc<str>,
    or: Arc<str>,
    not: Arc<str>,
    xor: Arc<str>,
    one: Arc<str>,
    zero: Arc<str>,
}

#[derive(Serialize, Deserialize)]
struct OperatorGlyphs {
    and: String,
    or: String,
    not: String,
    xor: String,
    one: String,
    zero: String,
}

impl TryFrom<OperatorGlyphs> for OperatorSet {
    type Error = OperatorError;

    fn try_from(glyphs: OperatorGlyphs) -> Result<Self, Self::Error> {
        OperatorSet::new(
            &glyphs.and,
            &glyphs.or,
            &glyphs.not,
            &glyphs.xor,
            &glyphs.one,
            &glyphs.zero,
        )
    }
}

impl From<OperatorSet> for OperatorGlyphs {
    fn from(ops: OperatorSet) -> Self {
        OperatorGlyphs {
            and: ops.and.to_string(),
            or: ops.or.to_string(),
            not: ops.not.to_string(),
            xor: ops.xor.to_string(),
            one: ops.one.to_string(),
            zero: ops.zero.to_string(),
        }
    }
}

impl Default for OperatorSet {
    fn default() -> Self {
        OperatorSet {
            and: Arc::from(DEFAULT_AND_OPERATOR),
            or: Arc::from(DEFAULT_OR_OPERATOR),
            not: Arc::from(DEFAULT_NOT_OPERATOR),
            xor: Arc::from(DEFAULT_XOR_OPERATOR),
            one: Arc::from(DEFAULT_LOGIC_ONE),
            zero: Arc::from(DEFAULT_LOGIC_ZERO),
        }
    }
}

impl OperatorSet {
    /// Build and validate an operator set
    ///
    /// Every glyph must be non-empty, free of whitespace and parentheses, must not
    /// begin like an identifier (letter, `.`, `_`, `{` or `}`), must differ from
    /// every other glyph of the set and must not be a prefix of another glyph.
    pub fn new(
        and: &str,
        or: &str,
        not: &str,
        xor: &str,
        one: &str,
        zero: &str,
    ) -> Result<Self, OperatorError> {
        let glyphs = [
            (OperatorKind::And, and),
            (OperatorKind::Or, or),
            (OperatorKind::Not, not),
            (OperatorKind::Xor, xor),
            (OperatorKind::One, one),
            (OperatorKind::Zero, zero),
        ];

        for (kind, glyph) in glyphs {
            validate_glyph(kind, glyph)?;
        }

        for (i, (first_kind, first)) in glyphs.iter().enumerate() {
            for (second_kind, second) in glyphs.iter().skip(i + 1) {
                if first == second {
                    return Err(OperatorError::Duplicate {
                        glyph: Arc::from(*first),
                        first: *first_kind,
                        second: *second_kind,
                    });
                }
                let (short, long) = if first.len() <= second.len() {
                    ((*first_kind, *first), (*second_kind, *second))
                } else {
                    ((*second_kind, *second), (*first_kind, *first))
                };
                if long.1.starts_with(short.1) {
                    return Err(OperatorError::PrefixOverlap {
                        prefix: Arc::from(short.1),
                        glyph: Arc::from(long.1),
                        first: short.0,
                        second: long.0,
                    });
                }
            }
        }

        Ok(OperatorSet {
            and: Arc::from(and),
            or: Arc::from(or),
            not: Arc::from(not),
            xor: Arc::from(xor),
            one: Arc::from(one),
            zero: Arc::from(zero),
        })
    }

    /// Glyph for AND
    pub fn and(&self) -> &str {
        &self.and
    }

    /// Glyph for OR
    pub fn or(&self) -> &str {
        &self.or
    }

    /// Glyph for NOT
    pub fn not(&self) -> &str {
        &self.not
    }

    /// Glyph for XOR
    pub fn xor(&self) -> &str {
        &self.xor
    }

    /// Glyph for the constant one
    pub fn one(&self) -> &str {
        &self.one
    }

    /// Glyph for the constant zero
    pub fn zero(&self) -> &str {
        &self.zero
    }

    /// The glyph for a constant value
    pub fn constant(&self, value: bool) -> &str {
        if value {
            &self.one
        } else {
            &self.zero
        }
    }

}

fn validate_glyph(kind: OperatorKind, glyph: &str) -> Result<(), OperatorError> {
    let Some(first) = glyph.chars().next() else {
        return Err(OperatorError::Empty { kind });
    };

    if first.is_alphabetic() || matches!(first, '.' | '_' | '{' | '}') {
        return Err(OperatorError::IdentifierLike {
            kind,
            glyph: Arc::from(glyph),
        });
    }

    if let Some(bad) = glyph
        .chars()
        .find(|c| c.is_whitespace() || *c == '(' || *c == ')')
    {
        return Err(OperatorError::ReservedCharacter {
            kind,
            glyph: Arc::from(glyph),
            character: bad,
        });
    }

    Ok(())
}
