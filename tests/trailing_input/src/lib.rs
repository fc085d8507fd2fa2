#![cfg(test)]

use lazy_static::lazy_static;
use matches::assert_matches;
use test_utils::{product, CharLexer};
use zlr::{parse, Node, SyntaxError, Table, ERROR_TERMINAL};

lazy_static! {
    static ref TABLE: Table = product().build_table().unwrap();
}

fn parse_str(input: &str) -> Result<Node<()>, SyntaxError> {
    parse(&TABLE, CharLexer::new(input))
}

#[test]
fn test_trailing_input() {
    assert_eq!(
        parse_str("A * 2 B").unwrap_err(),
        SyntaxError::UnexpectedTrailingInput {
            found: "id".to_owned(),
            content: "B".to_owned(),
            offset: 6,
        }
    );
    assert_eq!(
        parse_str("A * 2 B").unwrap_err().to_string(),
        "unexpected id \"B\" at offset 6, expected end of input"
    );
}

#[test]
fn test_complete_input() {
    let tree = parse_str("A * 2").unwrap();
    assert_eq!(tree.dump(), "Expr\n  id \"A\"\n  * \"*\"\n  int \"2\"\n");
}

#[test]
fn test_unknown_terminals() {
    assert_matches!(
        parse_str("A + 2"),
        Err(SyntaxError::UnexpectedToken { ref found, offset: 2, ref expected, .. })
            if found == "+" && expected == &vec!["*".to_owned()]
    );
    assert_matches!(
        parse_str("2 * 2"),
        Err(SyntaxError::UnexpectedToken { offset: 0, .. })
    );
}

#[test]
fn test_error_tokens() {
    let tokens = vec![
        zlr::Token::new("id", "A", 0),
        zlr::Token::new(ERROR_TERMINAL, "§", 2),
    ];
    let result: Result<Node<()>, _> = parse(&TABLE, tokens);
    assert_matches!(
        result,
        Err(SyntaxError::UnexpectedToken { offset: 2, ref found, .. }) if found == ERROR_TERMINAL
    );
}

#[test]
fn test_end_of_input() {
    assert_eq!(
        parse_str("A *").unwrap_err(),
        SyntaxError::UnexpectedEndOfInput {
            expected: vec!["int".to_owned()],
        }
    );
}
