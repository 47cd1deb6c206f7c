//! Tests for parsing and transformation

use super::*;
use crate::tree::{
    ControlSignalRef, LogicNode, NodeKind, SystemAssignment, Variable, ZVariableRef,
};

fn symbols() -> SymbolTable {
    SymbolTable::new(OperatorSet::default())
        .with_input(0, "a")
        .with_input(1, "b")
        .with_input(2, "c")
        .with_output(0, "y")
        .with_automaton(0, "fsm")
        .with_control_signal(0, 0, "go")
        .with_z_variables(0, 2)
}

fn parse(expression: &str) -> Result<LogicRoot, ExpressionError> {
    let symbols = symbols();
    ExpressionParser::for_symbols(&symbols).parse(expression, &symbols, None)
}

fn inputs(a: bool, b: bool, c: bool) -> SystemAssignment {
    SystemAssignment::new()
        .with(Variable::Input(0), a)
        .with(Variable::Input(1), b)
        .with(Variable::Input(2), c)
}

#[test]
fn test_precedence() {
    let root = parse("a&b+/c").unwrap();
    assert!(root.evaluate(&inputs(true, true, false)));
    assert!(root.evaluate(&inputs(false, false, false)));
    assert!(!root.evaluate(&inputs(true, false, true)));
    assert_eq!(root.to_internal_string(), "((x0&x1)+(/x2))");
}

#[test]
fn test_negation_binds_to_one_term() {
    let root = parse("/a&b").unwrap();
    assert_eq!(root.to_internal_string(), "((/x0)&x1)");
    let root = parse("/(a&b)").unwrap();
    assert_eq!(root.to_internal_string(), "(/(x0&x1))");
}

#[test]
fn test_n_ary_groups_fold_left() {
    let root = parse("a+b+c").unwrap();
    assert_eq!(root.to_internal_string(), "((x0+x1)+x2)");
    let root = parse("a&b&c").unwrap();
    assert_eq!(root.to_internal_string(), "((x0&x1)&x2)");
}

#[test]
fn test_brackets_attach_to_outermost_node() {
    let root = parse("((a+b))&c").unwrap();
    let NodeKind::And(left, right) = root.tree().kind() else {
        panic!("expected an AND at the top");
    };
    assert_eq!(left.brackets(), 2);
    assert_eq!(right.brackets(), 0);
    assert_eq!(root.tree().brackets(), 0);

    let NodeKind::Or(a, b) = left.kind() else {
        panic!("expected an OR inside the brackets");
    };
    assert_eq!(a.brackets(), 0);
    assert_eq!(b.brackets(), 0);
}

#[test]
fn test_singleton_groups_create_no_nodes() {
    let root = parse("(a)").unwrap();
    assert_eq!(root.tree().as_variable(), Some(Variable::Input(0)));
    assert_eq!(root.tree().brackets(), 1);
}

#[test]
fn test_negation_takes_brackets() {
    let root = parse("(/a)").unwrap();
    assert!(matches!(root.tree().kind(), NodeKind::Not(_)));
    assert_eq!(root.tree().brackets(), 1);
    let NodeKind::Not(child) = root.tree().kind() else {
        unreachable!()
    };
    assert_eq!(child.brackets(), 0);
}

#[test]
fn test_constants() {
    assert!(parse("1").unwrap().is_constant(true));
    assert!(parse("0").unwrap().is_constant(false));
    assert!(parse("(1+0)&1").unwrap().is_constant_one_concatenation());
}

#[test]
fn test_whitespace_is_ignored() {
    let spaced = parse("  a &\tb +  / c ").unwrap();
    assert_eq!(spaced, parse("a&b+/c").unwrap());
}

#[test]
fn test_case_insensitive_names() {
    let root = parse("A&B").unwrap();
    assert_eq!(root.to_internal_string(), "(x0&x1)");
}

#[test]
fn test_double_operator_is_syntax_error() {
    let err = parse("a&&b").unwrap_err();
    assert!(matches!(err, ExpressionError::Syntax { .. }));
    assert_eq!(err.start(), 2);
    assert_eq!(err.length(), 2);
    assert_eq!(err.expression(), "a&&b");
}

#[test]
fn test_unbalanced_brackets() {
    let err = parse("(a+b").unwrap_err();
    assert!(matches!(err, ExpressionError::Syntax { .. }));
    assert_eq!(err.start(), 4);
    assert_eq!(err.length(), 0);

    let err = parse("a+b)").unwrap_err();
    assert_eq!(err.start(), 3);
}

#[test]
fn test_invalid_character() {
    let err = parse("a & $").unwrap_err();
    assert!(matches!(err, ExpressionError::Syntax { .. }));
    assert_eq!(err.start(), 4);
}

#[test]
fn test_output_is_rejected() {
    let err = parse("y").unwrap_err();
    assert!(matches!(err, ExpressionError::OutputVariable { .. }));
}

#[test]
fn test_unknown_variable_reports_whole_expression() {
    let err = parse("a & (b + foo)").unwrap_err();
    assert!(matches!(err, ExpressionError::UnknownVariable { .. }));
    assert_eq!(err.expression(), "a & (b + foo)");
    assert_eq!(err.start(), 9);
    assert_eq!(err.length(), 3);
    assert_eq!(err.excerpt(), "foo");
}

#[test]
fn test_state_variables_need_scope() {
    let symbols = symbols();
    let parser = ExpressionParser::for_symbols(&symbols);

    let scoped = parser.parse("z1&a", &symbols, Some(0)).unwrap();
    assert_eq!(
        scoped.extract_z_variables(),
        vec![ZVariableRef::new(0, 1)]
    );
    assert!(scoped.contains_z_variable());

    assert!(parser.parse("z1", &symbols, None).is_err());
    let prefixed = parser.parse("fsm.z1", &symbols, None).unwrap();
    assert_eq!(prefixed.extract_z_variables(), vec![ZVariableRef::new(0, 1)]);
}

#[test]
fn test_control_signals_are_qualified() {
    let root = parse("fsm.go + a").unwrap();
    assert!(root.contains_control_signal());
    assert_eq!(
        root.extract_control_signals(),
        vec![ControlSignalRef::new(0, 0)]
    );
    assert!(parse("go").is_err());
}

#[test]
fn test_custom_operators() {
    let ops = OperatorSet::new("*", "|", "!", "^", "#1", "#0").unwrap();
    let symbols = SymbolTable::new(ops).with_input(0, "a").with_input(1, "b");
    let parser = ExpressionParser::for_symbols(&symbols);

    let root = parser.parse("!a * b | #1", &symbols, None).unwrap();
    assert_eq!(root.to_internal_string(), "(((/x0)&x1)+1)");
    assert!(parser.parse("a & b", &symbols, None).is_err());
}

#[test]
fn test_constants_follow_the_parser_glyphs() {
    // the table renders with the defaults, the parser reads "#1" and "#0"
    let symbols = SymbolTable::new(OperatorSet::default()).with_input(0, "a");
    let ops = OperatorSet::new("*", "|", "!", "^", "#1", "#0").unwrap();
    let parser = ExpressionParser::new(ops);

    let root = parser.parse("#1", &symbols, None).unwrap();
    assert!(root.is_constant(true));
    let root = parser.parse("a * #0", &symbols, None).unwrap();
    assert_eq!(root.to_internal_string(), "(x0&0)");
    assert!(parser.parse("1", &symbols, None).is_err());
}

#[test]
fn test_parse_or_falls_back() {
    let symbols = symbols();
    let parser = ExpressionParser::for_symbols(&symbols);

    let (root, err) = parser.parse_or("a+", &symbols, None, LogicRoot::constant(false));
    assert!(root.is_constant(false));
    assert!(matches!(err, Some(ExpressionError::Syntax { .. })));

    let (root, err) = parser.parse_or("a", &symbols, None, LogicRoot::constant(false));
    assert!(err.is_none());
    assert_eq!(root.tree(), &LogicNode::input(0));
}

#[test]
fn test_rendering_reparses() {
    let symbols = symbols();
    let parser = ExpressionParser::for_symbols(&symbols);
    for text in ["(a+b)&c", "a+b&c", "/(a&b)", "((a))+/(/b)", "fsm.go&(a+0)"] {
        let root = parser.parse(text, &symbols, None).unwrap();
        assert_eq!(root.to_custom_string(&symbols), text);
        let again = parser
            .parse(&root.to_custom_string(&symbols), &symbols, None)
            .unwrap();
        assert!(root.equivalent_to(&again).unwrap());
    }
}
