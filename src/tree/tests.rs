use super::*;
use crate::expression::OperatorSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn a() -> LogicNode {
    LogicNode::input(0)
}

fn b() -> LogicNode {
    LogicNode::input(1)
}

fn c() -> LogicNode {
    LogicNode::input(2)
}

fn symbols() -> SymbolTable {
    SymbolTable::default()
        .with_input(0, "a")
        .with_input(1, "b")
        .with_input(2, "c")
        .with_automaton(0, "fsm")
        .with_control_signal(0, 0, "go")
        .with_z_variables(0, 2)
}

fn cs() -> LogicNode {
    LogicNode::control_signal(ControlSignalRef::new(0, 0))
}

fn z(n: usize) -> LogicNode {
    LogicNode::z_variable(ZVariableRef::new(0, n))
}

fn hash_of(node: &LogicNode) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_flags_follow_children() {
    let node = LogicNode::and(a(), z(1));
    assert!(node.contains_z_variable());
    assert!(!node.contains_control_signal());

    let node = LogicNode::or(LogicNode::not(cs()), node);
    assert!(node.contains_z_variable());
    assert!(node.contains_control_signal());

    assert!(!LogicNode::not(LogicNode::or(a(), b())).contains_z_variable());
}

#[test]
fn test_equality_ignores_brackets() {
    let plain = LogicNode::and(a(), b());
    let bracketed = LogicNode::and(a().with_brackets(2), b()).with_brackets(1);
    assert_eq!(plain, bracketed);
    assert_eq!(hash_of(&plain), hash_of(&bracketed));
    assert_ne!(plain, LogicNode::and(b(), a()));
}

#[test]
fn test_internal_string() {
    let node = LogicNode::or(LogicNode::and(a(), LogicNode::not(cs())), z(1));
    assert_eq!(node.to_internal_string(), "((x0&(/s0))+z1)");
    assert_eq!(LogicNode::constant(true).to_internal_string(), "1");
}

#[test]
fn test_custom_string_precedence() {
    let symbols = symbols();
    let node = LogicNode::and(LogicNode::or(a(), b()), c());
    assert_eq!(node.to_custom_string(&symbols), "(a+b)&c");

    let node = LogicNode::or(a(), LogicNode::and(b(), c()));
    assert_eq!(node.to_custom_string(&symbols), "a+b&c");

    let node = LogicNode::not(LogicNode::and(a(), b()));
    assert_eq!(node.to_custom_string(&symbols), "/(a&b)");

    let node = LogicNode::not(LogicNode::not(a()));
    assert_eq!(node.to_custom_string(&symbols), "//a");
}

#[test]
fn test_custom_string_keeps_user_brackets() {
    let symbols = symbols();
    let node = LogicNode::and(LogicNode::or(a(), b()).with_brackets(2), c());
    assert_eq!(node.to_custom_string(&symbols), "((a+b))&c");

    let node = LogicNode::or(a().with_brackets(1), LogicNode::and(b(), c()).with_brackets(1));
    assert_eq!(node.to_custom_string(&symbols), "(a)+(b&c)");

    let root = LogicRoot::new(LogicNode::or(a(), b()).with_brackets(1));
    assert_eq!(root.to_custom_string(&symbols), "(a+b)");
}

#[test]
fn test_custom_string_names_and_glyphs() {
    let mut symbols = symbols();
    symbols.operators = OperatorSet::new("*", "|", "!", "^", "#1", "#0").unwrap();

    let node = LogicNode::or(
        LogicNode::and(cs(), z(0)),
        LogicNode::not(LogicNode::constant(false)),
    );
    assert_eq!(node.to_custom_string(&symbols), "fsm.go*z0|!#0");
}

#[test]
fn test_reset_brackets() {
    let symbols = symbols();
    let mut root = LogicRoot::new(
        LogicNode::or(a().with_brackets(3), LogicNode::not(b().with_brackets(1))).with_brackets(2),
    );
    root.reset_brackets();
    assert_eq!(root.to_custom_string(&symbols), "a+/b");
}

#[test]
fn test_extract_variables_is_ordered_and_unique() {
    let node = LogicNode::or(
        LogicNode::and(b(), z(1)),
        LogicNode::and(a(), LogicNode::or(b(), cs())),
    );
    assert_eq!(
        node.extract_variables(),
        vec![
            Variable::Input(1),
            Variable::ZVariable(ZVariableRef::new(0, 1)),
            Variable::Input(0),
            Variable::ControlSignal(ControlSignalRef::new(0, 0)),
        ]
    );
    assert_eq!(node.extract_inputs(), vec![1, 0]);
    assert_eq!(node.extract_z_variables(), vec![ZVariableRef::new(0, 1)]);
    assert_eq!(
        node.extract_control_signals(),
        vec![ControlSignalRef::new(0, 0)]
    );
}

#[test]
fn test_corruption_checks() {
    let root = LogicRoot::new(LogicNode::and(a(), cs()));
    assert!(root.corruption_check_for_input(0));
    assert!(!root.corruption_check_for_input(1));
    assert!(root.corruption_check_for_automaton(0));
    assert!(!root.corruption_check_for_automaton(1));
    assert!(root.corruption_check_for_control_signal(ControlSignalRef::new(0, 0)));
    assert!(!root.corruption_check_for_control_signal(ControlSignalRef::new(0, 1)));

    let root = LogicRoot::new(z(0));
    assert!(root.corruption_check_for_automaton(0));
}

#[test]
fn test_evaluation() {
    let root = LogicRoot::new(LogicNode::or(LogicNode::and(a(), b()), cs()));
    let assignment = SystemAssignment::new()
        .with(Variable::ControlSignal(ControlSignalRef::new(0, 0)), true);
    assert!(root.evaluate(&assignment));
    assert!(!root.evaluate_without_control_signals(&assignment));

    let assignment = assignment
        .with(Variable::Input(0), true)
        .with(Variable::Input(1), true);
    assert!(root.evaluate_without_control_signals(&assignment));
}

#[test]
fn test_constant_predicates() {
    assert!(LogicRoot::constant(true).is_constant(true));
    assert!(!LogicRoot::constant(true).is_constant(false));

    let concat = LogicRoot::new(LogicNode::and(
        LogicNode::constant(true),
        LogicNode::not(LogicNode::constant(false)),
    ));
    assert!(!concat.is_constant(true));
    assert!(concat.is_constant_concatenation());
    assert!(concat.is_constant_one_concatenation());
    assert!(!concat.is_constant_zero_concatenation());

    let tautology = LogicRoot::new(LogicNode::or(a(), LogicNode::not(a())));
    assert!(!tautology.is_constant_concatenation());
    assert!(!tautology.is_constant_one_concatenation());
}

#[test]
fn test_equivalence() {
    let left = LogicRoot::new(LogicNode::not(LogicNode::and(a(), b())));
    let right = LogicRoot::new(LogicNode::or(LogicNode::not(a()), LogicNode::not(b())));
    assert!(left.equivalent_to(&right).unwrap());

    let other = LogicRoot::new(LogicNode::or(LogicNode::not(a()), b()));
    assert!(!left.equivalent_to(&other).unwrap());
}

#[test]
fn test_serde_tagged_representation() {
    let root = LogicRoot::new(LogicNode::and(a().with_brackets(1), cs()));
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["tree"]["kind"], "and");
    assert_eq!(json["tree"]["left"]["kind"], "input");
    assert_eq!(json["tree"]["left"]["brackets"], 1);
    assert_eq!(json["tree"]["right"]["kind"], "control_signal");

    let back: LogicRoot = serde_json::from_value(json).unwrap();
    assert_eq!(back, root);
    assert_eq!(back.tree().kind(), root.tree().kind());
    assert!(back.contains_control_signal());
}

#[test]
fn test_serde_defaults_brackets_and_recomputes_flags() {
    let json = r#"{"tree":{"kind":"not","child":{"kind":"z_variable","automaton_id":0,"number":1}}}"#;
    let root: LogicRoot = serde_json::from_str(json).unwrap();
    assert_eq!(root.tree().brackets(), 0);
    assert!(root.contains_z_variable());
    assert_eq!(root.to_internal_string(), "(/z1)");

    let bad = r#"{"tree":{"kind":"xor","left":{"kind":"constant","value":true}}}"#;
    assert!(serde_json::from_str::<LogicRoot>(bad).is_err());
}

#[test]
fn test_or_all_and_all_identities() {
    assert_eq!(LogicNode::or_all(Vec::new()), LogicNode::constant(false));
    assert_eq!(LogicNode::and_all(Vec::new()), LogicNode::constant(true));
    assert_eq!(
        LogicNode::or_all(vec![a(), b(), c()]),
        LogicNode::or(LogicNode::or(a(), b()), c())
    );
}
