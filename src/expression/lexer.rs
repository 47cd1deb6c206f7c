//! Tokenizer driven by the configured operator glyphs
//!
//! The LALRPOP grammar declares its terminals as an extern token type so that the
//! glyphs can change at runtime without regenerating the parser tables.

use super::operators::OperatorSet;
use std::fmt;

/// A token of the expression language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tok<'input> {
    Or,
    And,
    Not,
    One,
    Zero,
    LParen,
    RParen,
    Ident(&'input str),
}

impl fmt::Display for Tok<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Or => write!(f, "OR operator"),
            Tok::And => write!(f, "AND operator"),
            Tok::Not => write!(f, "NOT operator"),
            Tok::One => write!(f, "constant one"),
            Tok::Zero => write!(f, "constant zero"),
            Tok::LParen => write!(f, "'('"),
            Tok::RParen => write!(f, "')'"),
            Tok::Ident(name) => write!(f, "variable '{}'", name),
        }
    }
}

/// Lexer failure, reported to the parser as a user error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A character that starts no token
    UnexpectedCharacter { position: usize, character: char },
}

pub type Spanned<T, L, E> = Result<(L, T, L), E>;

pub struct Lexer<'input, 'ops> {
    input: &'input str,
    position: usize,
    // no glyph is a prefix of another, so at most one matches
    glyphs: Vec<(&'ops str, Tok<'static>)>,
    failed: bool,
}

impl<'input, 'ops> Lexer<'input, 'ops> {
    pub fn new(input: &'input str, operators: &'ops OperatorSet) -> Self {
        let glyphs = vec![
            (operators.or(), Tok::Or),
            (operators.and(), Tok::And),
            (operators.not(), Tok::Not),
            (operators.one(), Tok::One),
            (operators.zero(), Tok::Zero),
        ];

        Lexer {
            input,
            position: 0,
            glyphs,
            failed: false,
        }
    }
}

fn is_identifier_start(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '{' | '}')
}

impl<'input, 'ops> Iterator for Lexer<'input, 'ops> {
    type Item = Spanned<Tok<'input>, usize, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let rest = &self.input[self.position..];
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
        let start = self.position;

        let first = trimmed.chars().next()?;

        match first {
            '(' => {
                self.position += 1;
                return Some(Ok((start, Tok::LParen, start + 1)));
            }
            ')' => {
                self.position += 1;
                return Some(Ok((start, Tok::RParen, start + 1)));
            }
            _ => {}
        }

        if let Some((glyph, tok)) = self
            .glyphs
            .iter()
            .find(|(glyph, _)| trimmed.starts_with(glyph))
        {
            self.position += glyph.len();
            return Some(Ok((start, *tok, self.position)));
        }

        if is_identifier_start(trimmed) {
            // skip the first char, it may be the leading '.'
            let len = trimmed
                .char_indices()
                .skip(1)
                .find(|(_, c)| !is_identifier_char(*c))
                .map(|(i, _)| i)
                .unwrap_or(trimmed.len());
            self.position += len;
            return Some(Ok((start, Tok::Ident(&trimmed[..len]), self.position)));
        }

        self.failed = true;
        Some(Err(LexicalError::UnexpectedCharacter {
            position: start,
            character: first,
        }))
    }
}
