#![cfg(test)]

use lazy_static::lazy_static;
use matches::assert_matches;
use test_utils::{arithmetic, arithmetic_actions, sum, CharLexer};
use zlr::{evaluate, parse, EvalError, Evaluator, Node, Parser};

lazy_static! {
    static ref PARSER: Parser<i64> = Parser::build(arithmetic(), arithmetic_actions()).unwrap();
}

#[test]
fn test_sum_tree() {
    let table = sum().build_table().unwrap();
    let tree: Node<()> = parse(&table, CharLexer::new("2 + 1")).unwrap();
    assert_eq!(tree.qualified_name(), "S");
    assert_eq!(
        tree.children()
            .iter()
            .map(|child| child.node_name().to_owned())
            .collect::<Vec<_>>(),
        vec!["S", "+", "P"]
    );
    assert_eq!(
        tree.dump(),
        "S\n  S\n    P\n      int \"2\"\n  + \"+\"\n  P\n    int \"1\"\n"
    );
}

#[test]
fn test_evaluate() {
    assert_eq!(PARSER.parse(CharLexer::new("2 * (-10 + 33) - 4")).unwrap(), 42);
    assert_eq!(PARSER.parse(CharLexer::new("7")).unwrap(), 7);
    assert_eq!(PARSER.parse(CharLexer::new("1 - 2 - 3")).unwrap(), -4);
    assert_eq!(PARSER.parse(CharLexer::new("2 + 3 * 4")).unwrap(), 14);
    assert_eq!(PARSER.parse(CharLexer::new("--(8 / 2)")).unwrap(), 4);
}

#[test]
fn test_hidden_symbols_are_not_children() {
    let tree = PARSER.parse_tree(CharLexer::new("(1 + 2)")).unwrap();
    assert_eq!(
        tree.dump(),
        "Sum\n  Product\n    Value(group)\n      Sum(add)\n        Sum\n          Product\n            Value\n              int \"1\"\n        Product\n          Value\n            int \"2\"\n"
    );
}

#[test]
fn test_prune() {
    let input = "2 * (-10 + 33) - 4";

    let mut tree = PARSER.parse_tree(CharLexer::new(input)).unwrap();
    let evaluator = Evaluator::new(PARSER.actions()).prune(true);
    assert_eq!(evaluator.evaluate(&mut tree).unwrap(), Some(&42));
    assert!(tree.children().is_empty());

    let mut tree = PARSER.parse_tree(CharLexer::new(input)).unwrap();
    assert_eq!(evaluate(&mut tree, PARSER.actions(), false).unwrap(), Some(42));
    assert_eq!(tree.qualified_name(), "Sum(sub)");
    assert_eq!(tree.children().len(), 2);
    assert_eq!(tree.children()[0].made_value(), Some(&46));
    assert_eq!(tree.children()[1].made_value(), Some(&4));
}

#[test]
fn test_long_sum() {
    let input = vec!["1"; 100_000].join("+");
    assert_eq!(PARSER.parse(CharLexer::new(&input)).unwrap(), 100_000);

    let mut tree = PARSER.parse_tree(CharLexer::new(&input)).unwrap();
    assert_eq!(evaluate(&mut tree, PARSER.actions(), false).unwrap(), Some(100_000));
    drop(tree);

    let tree = PARSER.parse_tree(CharLexer::new(&input)).unwrap();
    assert_eq!(tree.qualified_name(), "Sum(add)");
    drop(tree);
}

#[test]
fn test_deep_nesting() {
    let input = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let mut tree = PARSER.parse_tree(CharLexer::new(&input)).unwrap();
    assert_eq!(tree.offset(), Some(0));
    assert_eq!(evaluate(&mut tree, PARSER.actions(), true).unwrap(), Some(1));
    assert_eq!(PARSER.parse(CharLexer::new(&input)).unwrap(), 1);
}

#[test]
fn test_abort() {
    assert_matches!(
        PARSER.parse(CharLexer::new("1 + 6 / (2 - 2)")),
        Err(zlr::Error::Eval(EvalError::Abort { offset: Some(4), .. }))
    );
    assert_matches!(
        PARSER.parse(CharLexer::new("1 + (6 / 0)")),
        Err(zlr::Error::Eval(EvalError::Abort { offset: Some(5), .. }))
    );
}

#[test]
fn test_shared_table() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let input = format!("{} * {}", i, i);
                let mut tree: Node<i64> = parse(PARSER.table(), CharLexer::new(&input)).unwrap();
                evaluate(&mut tree, &arithmetic_actions(), true).unwrap()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![Some(0), Some(1), Some(4), Some(9)]);
}
