use log::{debug, trace};

use crate::runtime::stack::{Stack, StackError};
use crate::{Node, SyntaxError, Table, TableRow, Token, END_OF_INPUT};

/// Parse a token stream into a syntax tree
///
/// Tokens are pulled one at a time; the table is only read, so one table can serve any number
/// of parses.
pub fn parse<V, I>(table: &Table, tokens: I) -> Result<Node<V>, SyntaxError>
where
    I: IntoIterator<Item = Token>,
{
    let mut tokens = tokens.into_iter();
    let mut lookahead = tokens.next();
    let mut stack = Stack::new(table);

    loop {
        let row = stack.row()?;

        if let Some(token) = lookahead.take() {
            if let Some(&next) = row.shift.get(token.kind()) {
                stack.shift(Node::leaf(token), next);
                lookahead = tokens.next();
                continue;
            }
            lookahead = Some(token);
        }

        if row.accept {
            return match lookahead {
                Some(token) => {
                    debug!("Trailing input at {}", token.offset());
                    Err(SyntaxError::UnexpectedTrailingInput {
                        found: token.kind().to_owned(),
                        content: token.content().to_owned(),
                        offset: token.offset(),
                    })
                }
                None => {
                    trace!("Accept in state {}", stack.state());
                    Ok(stack.accept()?)
                }
            };
        }

        match stack.reduce() {
            Ok(()) => {}
            Err(StackError::NoReduceRule { state }) => {
                debug!("No action in state {} for {:?}", state, lookahead);
                return Err(unexpected(row, lookahead));
            }
            Err(StackError::Internal(error)) => return Err(error.into()),
        }
    }
}

fn unexpected(row: &TableRow, lookahead: Option<Token>) -> SyntaxError {
    let mut expected: Vec<String> = row.shift.keys().cloned().collect();
    if row.accept {
        expected.push(END_OF_INPUT.to_owned());
    }
    match lookahead {
        Some(token) => SyntaxError::UnexpectedToken {
            found: token.kind().to_owned(),
            content: token.content().to_owned(),
            offset: token.offset(),
            expected,
        },
        None => SyntaxError::UnexpectedEndOfInput { expected },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Grammar, Production};
    use matches::assert_matches;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sum() -> Table {
        Grammar::builder()
            .terminal("int")
            .production(Production::main("G").symbol("S"))
            .production(Production::new("S").symbol("S").literal("+").symbol("P"))
            .production(Production::new("S").symbol("P"))
            .production(Production::new("P").symbol("int"))
            .build_table()
            .unwrap()
    }

    fn tokens(input: &[(&str, &str, usize)]) -> Vec<Token> {
        input
            .iter()
            .map(|&(kind, content, offset)| Token::new(kind, content, offset))
            .collect()
    }

    #[test]
    fn test_sum() {
        init();
        let table = sum();
        let tree: Node<()> = parse(
            &table,
            tokens(&[("int", "2", 0), ("+", "+", 2), ("int", "1", 4)]),
        )
        .unwrap();
        assert_eq!(tree.node_name(), "S");
        assert_eq!(
            tree.dump(),
            "S\n  S\n    P\n      int \"2\"\n  + \"+\"\n  P\n    int \"1\"\n"
        );
    }

    #[test]
    fn test_deterministic() {
        init();
        let table = sum();
        let input = tokens(&[
            ("int", "1", 0),
            ("+", "+", 1),
            ("int", "2", 2),
            ("+", "+", 3),
            ("int", "3", 4),
        ]);
        let first: Node<()> = parse(&table, input.clone()).unwrap();
        let second: Node<()> = parse(&table, input).unwrap();
        assert_eq!(first.dump(), second.dump());
    }

    #[test]
    fn test_unexpected_token() {
        init();
        let table = sum();
        let result: Result<Node<()>, _> =
            parse(&table, tokens(&[("int", "2", 0), ("int", "3", 2)]));
        assert_eq!(
            result.unwrap_err(),
            SyntaxError::UnexpectedTrailingInput {
                found: "int".to_owned(),
                content: "3".to_owned(),
                offset: 2,
            }
        );

        let result: Result<Node<()>, _> = parse(&table, tokens(&[("+", "+", 0)]));
        assert_eq!(
            result.unwrap_err(),
            SyntaxError::UnexpectedToken {
                found: "+".to_owned(),
                content: "+".to_owned(),
                offset: 0,
                expected: vec!["int".to_owned()],
            }
        );

        let result: Result<Node<()>, _> =
            parse(&table, tokens(&[("int", "2", 0), ("+", "+", 2), ("+", "+", 3)]));
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { offset: 3, .. })
        );
    }

    #[test]
    fn test_end_of_input() {
        init();
        let table = sum();
        let result: Result<Node<()>, _> = parse(&table, Vec::new());
        assert_eq!(
            result.unwrap_err(),
            SyntaxError::UnexpectedEndOfInput {
                expected: vec!["int".to_owned()],
            }
        );

        let result: Result<Node<()>, _> = parse(&table, tokens(&[("int", "2", 0), ("+", "+", 2)]));
        let error = result.unwrap_err();
        assert_eq!(error.offset(), None);
        assert_eq!(
            error.to_string(),
            "unexpected end of input, expected one of: int"
        );
    }

    #[test]
    fn test_unknown_terminal() {
        init();
        let table = sum();
        let result: Result<Node<()>, _> = parse(&table, tokens(&[("<error>", "?", 0)]));
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { ref found, .. }) if found == "<error>"
        );
    }

    #[test]
    fn test_table_reused_after_error() {
        init();
        let table = sum();
        let failed: Result<Node<()>, _> = parse(&table, tokens(&[("+", "+", 0)]));
        assert!(failed.is_err());
        let tree: Node<()> = parse(&table, tokens(&[("int", "5", 0)])).unwrap();
        assert_eq!(tree.dump(), "S\n  P\n    int \"5\"\n");
    }
}
