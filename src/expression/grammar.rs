//! Human-readable grammar of the expression language

use super::operators::OperatorSet;

fn quoted(glyph: &str) -> String {
    format!("'{}'", glyph.replace('\'', "\\'"))
}

/// EBNF text of the grammar accepted for `operators`
///
/// Used for diagnostics only; parsing goes through the generated parser.
///
/// # Examples
///
/// ```
/// use automaton_logic::expression::grammar_text;
/// use automaton_logic::OperatorSet;
///
/// let text = grammar_text(&OperatorSet::default());
/// assert!(text.contains("or      := and ( '+' and )*"));
/// ```
pub fn grammar_text(operators: &OperatorSet) -> String {
    [
        format!("or      := and ( {} and )*", quoted(operators.or())),
        format!("and     := term ( {} term )*", quoted(operators.and())),
        format!("neg     := {} term", quoted(operators.not())),
        "term    := const | var | neg | bracket".to_string(),
        "bracket := '(' or ')'".to_string(),
        "var     := identifier ( '.' identifier )*".to_string(),
        format!(
            "const   := {} | {}",
            quoted(operators.one()),
            quoted(operators.zero())
        ),
    ]
    .join("\n")
}
