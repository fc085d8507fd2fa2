use zlr_core::{parse, Actions, BuildError, Evaluator, GrammarBuilder, Node, SyntaxError, Table, Token};

use crate::Error;

/// A parse table bundled with the actions that evaluate its trees
///
/// ```
/// use zlr::{Actions, Grammar, Parser, Production, Token};
///
/// let grammar = Grammar::builder()
///     .terminal("int")
///     .production(Production::main("G").symbol("S"))
///     .production(Production::new("S").tag("add").symbol("S").hidden_literal("+").symbol("int"))
///     .production(Production::new("S").symbol("int"));
/// let actions = Actions::new()
///     .made("int", |args| Ok(args.text(0)?.parse::<i64>()?))
///     .bubble("S")
///     .made("S(add)", |args| Ok(args.value(0)? + args.value(1)?));
/// let parser = Parser::build(grammar, actions).unwrap();
///
/// let tokens = vec![
///     Token::new("int", "40", 0),
///     Token::new("+", "+", 2),
///     Token::new("int", "2", 3),
/// ];
/// assert_eq!(parser.parse(tokens).unwrap(), 42);
/// ```
#[derive(Debug)]
pub struct Parser<V> {
    table: Table,
    actions: Actions<V>,
    prune: bool,
}

impl<V: Clone> Parser<V> {
    pub fn new(table: Table, actions: Actions<V>) -> Self {
        Parser {
            table,
            actions,
            prune: false,
        }
    }

    pub fn build(grammar: GrammarBuilder, actions: Actions<V>) -> Result<Self, BuildError> {
        Ok(Self::new(grammar.build_table()?, actions))
    }

    /// Drop subtrees as soon as their values are known
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn actions(&self) -> &Actions<V> {
        &self.actions
    }

    pub fn parse_tree<I>(&self, tokens: I) -> Result<Node<V>, SyntaxError>
    where
        I: IntoIterator<Item = Token>,
    {
        parse(&self.table, tokens)
    }

    /// Parse and evaluate, requiring a value for the root
    pub fn parse<I>(&self, tokens: I) -> Result<V, Error>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut tree = self.parse_tree(tokens)?;
        let evaluator = Evaluator::new(&self.actions).prune(self.prune);
        let value = evaluator.evaluate(&mut tree)?.cloned();
        value.ok_or_else(|| Error::NoValue {
            node: tree.qualified_name(),
        })
    }
}
