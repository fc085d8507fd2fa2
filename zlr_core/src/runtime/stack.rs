use log::trace;
use thiserror::Error;

use crate::{InternalError, Node, Rule, Table, TableRow};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    /// The current state cannot reduce, so the lookahead is not valid here
    #[error("state {state} has no rule to reduce")]
    NoReduceRule { state: usize },
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Parse stack of `(state, node)` entries over a table
///
/// The current state is the state of the topmost entry, or 0 for an empty stack.
#[derive(Debug)]
pub struct Stack<'t, V> {
    table: &'t Table,
    entries: Vec<(usize, Node<V>)>,
}

impl<'t, V> Stack<'t, V> {
    pub fn new(table: &'t Table) -> Self {
        Stack {
            table,
            entries: Vec::new(),
        }
    }

    pub fn state(&self) -> usize {
        self.entries.last().map(|(state, _)| *state).unwrap_or(0)
    }

    pub fn row(&self) -> Result<&'t TableRow, InternalError> {
        let state = self.state();
        self.table
            .row(state)
            .ok_or(InternalError::NoState { state })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn shift(&mut self, node: Node<V>, state: usize) {
        trace!("Shift {} -> {}", node.node_name(), state);
        self.entries.push((state, node));
    }

    /// Reduce by the rule of the current state and take the goto for its subject
    pub fn reduce(&mut self) -> Result<(), StackError> {
        let state = self.state();
        let rule = match &self.row()?.reduce {
            Some(rule) => rule.clone(),
            None => return Err(StackError::NoReduceRule { state }),
        };
        trace!("Reduce {} in state {}", rule, state);

        let node = self.collapse(&rule)?;
        let base = self.state();
        let next = self
            .row()?
            .goto
            .get(rule.subject.name())
            .copied()
            .ok_or_else(|| InternalError::NoGoto {
                state: base,
                symbol: rule.subject.name().to_owned(),
            })?;
        trace!("Goto {} -> {}", rule.subject, next);
        self.shift(node, next);
        Ok(())
    }

    /// Pop the entries matched by `rule` and build its node from the visible ones
    fn collapse(&mut self, rule: &Rule) -> Result<Node<V>, InternalError> {
        let needed = rule.definition.len();
        let available = self.entries.len();
        if available < needed {
            return Err(InternalError::StackUnderflow { needed, available });
        }

        let mut children = Vec::with_capacity(needed);
        let mut offset = None;
        for ((_, node), symbol) in self
            .entries
            .drain(available - needed..)
            .zip(rule.definition.iter())
        {
            if node.node_name() != symbol.name() {
                return Err(InternalError::SymbolMismatch {
                    expected: symbol.name().to_owned(),
                    found: node.node_name().to_owned(),
                });
            }
            offset = offset.or_else(|| node.offset());
            if !symbol.is_hidden() {
                children.push(node);
            }
        }
        Ok(Node::reduced(
            rule.subject.name(),
            rule.tag.clone(),
            children,
            offset,
        ))
    }

    /// Finish in an accepting state
    ///
    /// A single-symbol main rule leaves its symbol's node as the root, any other main rule is
    /// reduced into a node of its own first.
    pub fn accept(mut self) -> Result<Node<V>, InternalError> {
        let state = self.state();
        let row = self.row()?;
        let rule = match &row.reduce {
            Some(rule) if row.accept => rule.clone(),
            _ => return Err(InternalError::NotAccepting { state }),
        };
        if rule.definition.len() != 1 {
            let node = self.collapse(&rule)?;
            self.entries.push((state, node));
        }
        self.done()
    }

    /// Root node, valid only with exactly one entry left
    pub fn done(mut self) -> Result<Node<V>, InternalError> {
        match self.entries.len() {
            1 => match self.entries.pop() {
                Some((_, node)) => Ok(node),
                None => Err(InternalError::UnbalancedStack { entries: 0 }),
            },
            entries => Err(InternalError::UnbalancedStack { entries }),
        }
    }
}
