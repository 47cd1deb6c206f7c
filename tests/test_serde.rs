//! JSON form of durable data

use automaton_logic::automaton::{
    AutomatonNode, CompletenessReport, MinimizationLevel, RenderedEquationSet, Transition,
};
use automaton_logic::{
    Automaton, Espresso, ExpressionParser, LogicNode, LogicRoot, OperatorSet, SymbolTable,
};
use serde_json::json;

fn symbols() -> SymbolTable {
    SymbolTable::new(OperatorSet::new("*", "|", "!", "^", "1", "0").unwrap())
        .with_input(0, "go")
        .with_output(0, "busy")
        .with_automaton(0, "worker")
        .with_control_signal(0, 0, "ack")
        .with_z_variables(0, 1)
}

#[test]
fn test_symbol_table_round_trip() {
    let symbols = symbols();
    let text = serde_json::to_string(&symbols).unwrap();
    let back: SymbolTable = serde_json::from_str(&text).unwrap();
    assert_eq!(back, symbols);

    // glyphs are validated while reading
    let mut value = serde_json::to_value(&symbols).unwrap();
    value["operators"]["or"] = json!("*");
    assert!(serde_json::from_value::<SymbolTable>(value).is_err());
}

#[test]
fn test_symbol_table_fields_are_optional() {
    let symbols: SymbolTable = serde_json::from_value(json!({
        "inputs": [{"number": 0, "name": "x"}]
    }))
    .unwrap();
    assert_eq!(symbols.operators, OperatorSet::default());
    assert!(symbols.outputs.is_empty());

    let parser = ExpressionParser::for_symbols(&symbols);
    assert!(parser.parse("/x", &symbols, None).is_ok());
}

#[test]
fn test_automaton_round_trip() {
    let automaton = Automaton::new(0, "worker")
        .with_node(AutomatonNode::new(0, 0).with_control_signal(0, LogicRoot::new(LogicNode::input(0))))
        .with_node(AutomatonNode::new(1, 1).with_output(0, LogicRoot::constant(true)))
        .with_transition(Transition::new(0, 1, LogicRoot::new(LogicNode::input(0))))
        .with_transition(Transition::new(1, 0, LogicRoot::constant(true)));

    let value = serde_json::to_value(&automaton).unwrap();
    assert_eq!(value["transitions"][0]["guard"]["tree"]["kind"], "input");
    let back: Automaton = serde_json::from_value(value).unwrap();
    assert_eq!(back, automaton);

    let minimal: Automaton = serde_json::from_value(json!({"id": 4})).unwrap();
    assert_eq!(minimal.id, 4);
    assert!(minimal.nodes.is_empty());
}

#[test]
fn test_rendered_equations() {
    let symbols = symbols();
    let automaton = Automaton::new(0, "worker")
        .with_node(AutomatonNode::new(0, 0).with_control_signal(0, LogicRoot::new(LogicNode::input(0))))
        .with_node(AutomatonNode::new(1, 1).with_output(0, LogicRoot::constant(true)))
        .with_transition(Transition::new(0, 1, LogicRoot::new(LogicNode::input(0))));

    let rendered = automaton
        .equation_set(&[0], &[])
        .unwrap()
        .render(&symbols, &Espresso::default(), MinimizationLevel::Unminimized, None)
        .unwrap();
    let value = serde_json::to_value(&rendered).unwrap();
    assert_eq!(value["automaton"], "worker");
    assert_eq!(value["z_equations"][0]["target"], "worker.z0");
    assert_eq!(value["z_equations"][0]["expression"], "!z0*go");
    assert_eq!(value["control_signal_equations"][0]["target"], "worker.ack");

    let back: RenderedEquationSet = serde_json::from_value(value).unwrap();
    assert_eq!(back, rendered);
}

#[test]
fn test_levels_and_reports() {
    assert_eq!(
        serde_json::to_value(MinimizationLevel::HStarMinimized).unwrap(),
        json!("h_star_minimized")
    );
    assert_eq!(
        serde_json::from_value::<MinimizationLevel>(json!("minimized")).unwrap(),
        MinimizationLevel::Minimized
    );

    let report = CompletenessReport {
        state: 3,
        is_complete: false,
        witness: LogicRoot::new(LogicNode::not(LogicNode::input(0))),
    };
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["state"], 3);
    assert_eq!(value["witness"]["tree"]["kind"], "not");
    assert_eq!(serde_json::from_value::<CompletenessReport>(value).unwrap(), report);
}
