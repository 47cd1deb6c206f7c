//! Rendering must parse back to an equivalent tree

use automaton_logic::tree::{ControlSignalRef, NodeKind, ZVariableRef};
use automaton_logic::{ExpressionParser, LogicNode, LogicRoot, OperatorSet, SymbolTable};
use proptest::prelude::*;

fn symbols(operators: OperatorSet) -> SymbolTable {
    SymbolTable::new(operators)
        .with_input(0, "a")
        .with_input(1, "b")
        .with_input(2, "Clock")
        .with_automaton(0, "main")
        .with_automaton(1, "timer")
        .with_control_signal(1, 0, "done")
        .with_z_variables(0, 2)
        .with_z_variables(1, 1)
}

fn any_leaf() -> impl Strategy<Value = LogicNode> {
    prop_oneof![
        6 => (0usize..3).prop_map(LogicNode::input),
        1 => any::<bool>().prop_map(LogicNode::constant),
        2 => (0usize..2).prop_map(|n| LogicNode::z_variable(ZVariableRef::new(0, n))),
        1 => Just(LogicNode::control_signal(ControlSignalRef::new(1, 0))),
    ]
}

fn any_tree() -> impl Strategy<Value = LogicNode> {
    let leaf = (any_leaf(), 0u32..3).prop_map(|(n, brackets)| n.with_brackets(brackets));
    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), 0u32..3).prop_map(|(c, k)| LogicNode::not(c).with_brackets(k)),
            (inner.clone(), inner.clone(), 0u32..3)
                .prop_map(|(l, r, k)| LogicNode::and(l, r).with_brackets(k)),
            (inner.clone(), inner, 0u32..3)
                .prop_map(|(l, r, k)| LogicNode::or(l, r).with_brackets(k)),
        ]
    })
}

fn any_operators() -> impl Strategy<Value = OperatorSet> {
    prop_oneof![
        Just(OperatorSet::default()),
        Just(OperatorSet::new("*", "|", "!", "^", "#1", "#0").unwrap()),
        Just(OperatorSet::new("&&", "||", "~", "^^", "@1", "@0").unwrap()),
    ]
}

fn children(node: &LogicNode) -> Vec<&LogicNode> {
    match node.kind() {
        NodeKind::Not(c) => vec![c.as_ref()],
        NodeKind::And(l, r) | NodeKind::Or(l, r) => vec![l.as_ref(), r.as_ref()],
        _ => Vec::new(),
    }
}

proptest! {
    #[test]
    fn test_custom_string_parses_back(tree in any_tree(), operators in any_operators()) {
        let symbols = symbols(operators);
        let parser = ExpressionParser::for_symbols(&symbols);
        let root = LogicRoot::new(tree);

        let text = root.to_custom_string(&symbols);
        let parsed = parser.parse(&text, &symbols, Some(0));
        prop_assert!(parsed.is_ok(), "{:?} failed to parse: {:?}", text, parsed);
        let parsed = parsed.unwrap();
        prop_assert!(root.equivalent_to(&parsed).unwrap(), "{:?} changed meaning", text);

        // a second round is stable
        prop_assert_eq!(parsed.to_custom_string(&symbols), text);
    }

    #[test]
    fn test_flags_are_derived_from_children(tree in any_tree()) {
        fn check(node: &LogicNode) -> Result<(), TestCaseError> {
            let kids = children(node);
            if !kids.is_empty() {
                prop_assert_eq!(
                    node.contains_z_variable(),
                    kids.iter().any(|c| c.contains_z_variable())
                );
                prop_assert_eq!(
                    node.contains_control_signal(),
                    kids.iter().any(|c| c.contains_control_signal())
                );
            }
            for kid in kids {
                check(kid)?;
            }
            Ok(())
        }
        check(&tree)?;
    }

    #[test]
    fn test_internal_string_is_fully_bracketed(tree in any_tree()) {
        let text = LogicRoot::new(tree.clone()).to_internal_string();
        let opens = text.matches('(').count();
        let closes = text.matches(')').count();
        prop_assert_eq!(opens, closes);
        prop_assert_eq!(opens, operator_count(&tree));
    }
}

fn operator_count(node: &LogicNode) -> usize {
    let own = usize::from(!children(node).is_empty());
    own + children(node).into_iter().map(operator_count).sum::<usize>()
}

#[test]
fn test_user_brackets_survive() {
    let symbols = symbols(OperatorSet::default());
    let parser = ExpressionParser::for_symbols(&symbols);
    for text in ["((a))", "(a+b)&clock", "/((a&b))", "timer.done+(z1&/z0)"] {
        let root = parser.parse(text, &symbols, Some(0)).unwrap();
        let rendered = root.to_custom_string(&symbols);
        assert_eq!(rendered.to_lowercase(), text.to_lowercase());
    }
}
