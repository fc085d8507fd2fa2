use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::{ConflictError, FollowSets, Grammar, Item, ItemSet, Rule};

/// Transition function of a single state
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub accept: bool,
    pub shift: BTreeMap<String, usize>,
    pub goto: BTreeMap<String, usize>,
    pub reduce: Option<Arc<Rule>>,
}

/// LR(0) parse table
///
/// `rows[i]` is the transition function of `states[i]`; state 0 is the closure of the main
/// rule. A table is immutable once built and may be shared between any number of parses.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<TableRow>,
    states: Vec<ItemSet>,
}

impl Table {
    /// Build the automaton of `grammar`
    ///
    /// Fails on the first state that is not deterministic; a partial table is never returned.
    pub fn build(grammar: &Grammar) -> Result<Self, ConflictError> {
        TableBuilder::new(grammar).build()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, state: usize) -> Option<&TableRow> {
        self.rows.get(state)
    }

    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct TableBuilder<'g> {
    grammar: &'g Grammar,
    follow: FollowSets,
    terminals: BTreeSet<&'g str>,
    states: Vec<ItemSet>,
    rows: Vec<TableRow>,
    index: BTreeMap<Vec<Item>, usize>,
}

impl<'g> TableBuilder<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            follow: FollowSets::compute(grammar),
            terminals: grammar.terminals().map(|t| t.name()).collect(),
            states: Vec::new(),
            rows: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    fn build(mut self) -> Result<Table, ConflictError> {
        let initial = ItemSet::closure(vec![Item::new(self.grammar.main_rule().clone())], self.grammar);
        self.add_state(initial)?;

        let mut next_states = VecDeque::new();
        next_states.push_back(0);

        while let Some(current_state) = next_states.pop_front() {
            for (symbol, kernel) in self.states[current_state].successors() {
                let candidate = ItemSet::closure(kernel, self.grammar);
                let next = match self.index.get(candidate.items()) {
                    Some(&idx) => idx,
                    None => {
                        let idx = self.add_state(candidate)?;
                        next_states.push_back(idx);
                        idx
                    }
                };

                log::trace!("state {} --{}--> state {}", current_state, symbol, next);
                let row = &mut self.rows[current_state];
                if symbol.is_terminal() {
                    row.shift.insert(symbol.name().to_owned(), next);
                } else {
                    row.goto.insert(symbol.name().to_owned(), next);
                }
            }
        }

        for (row, state) in self.rows.iter_mut().zip(self.states.iter()) {
            row.accept = state.is_accepting();
            row.reduce = state.finite().next().map(|item| item.rule().clone());
        }

        log::debug!("built LR(0) table with {} states", self.states.len());

        Ok(Table {
            rows: self.rows,
            states: self.states,
        })
    }

    /// Validate and register a newly discovered state
    fn add_state(&mut self, state: ItemSet) -> Result<usize, ConflictError> {
        let idx = self.states.len();
        self.validate(idx, &state)?;
        self.index.insert(state.items().to_vec(), idx);
        self.states.push(state);
        self.rows.push(TableRow::default());
        Ok(idx)
    }

    /// LR(0) determinism check for a single state
    ///
    /// More than one completed item is always a reduce-reduce conflict. A completed item next
    /// to shift items conflicts when the shifts leave some grammar terminal uncovered and one
    /// of the shifted terminals may also follow the completed subject; the parser would not
    /// know which of both to do on that terminal. The completed main item is only ever
    /// followed by end of input.
    fn validate(&self, idx: usize, state: &ItemSet) -> Result<(), ConflictError> {
        let finite: Vec<Item> = state.finite().cloned().collect();
        if finite.is_empty() {
            return Ok(());
        }

        if finite.len() > 1 {
            log::debug!("reduce-reduce conflict in state {}", idx);
            return Err(ConflictError::ReduceReduce {
                state: idx,
                items: finite,
            });
        }

        let terminals: Vec<Item> = state.terminal_pending().cloned().collect();
        if terminals.is_empty() {
            return Ok(());
        }

        let shifted: BTreeSet<&str> = terminals
            .iter()
            .filter_map(|item| item.expected())
            .map(|symbol| symbol.name())
            .collect();
        let leftover = self.terminals.difference(&shifted).count();
        if leftover == 0 {
            // Reduce only stays reachable at end of input
            return Ok(());
        }

        let reduced = &finite[0];
        let ambiguous = !reduced.has_eof_mark()
            && shifted
                .iter()
                .any(|terminal| self.follow.contains(reduced.subject().name(), terminal));
        if !ambiguous {
            return Ok(());
        }

        log::debug!("shift-reduce conflict in state {}", idx);
        Err(ConflictError::ShiftReduce {
            state: idx,
            finite,
            terminals,
            nonterminals: state.nonterminal_pending().cloned().collect(),
        })
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for (idx, (row, state)) in self.rows.iter().zip(self.states.iter()).enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            writeln!(f, "state {}", idx)?;
            write!(f, "{}", state)?;
            for (terminal, next) in row.shift.iter() {
                writeln!(f, "  shift {} -> {}", terminal, next)?;
            }
            for (nonterminal, next) in row.goto.iter() {
                writeln!(f, "  goto {} -> {}", nonterminal, next)?;
            }
            if let Some(rule) = &row.reduce {
                writeln!(f, "  reduce {}", rule)?;
            }
            if row.accept {
                writeln!(f, "  accept")?;
            }
        }
        Ok(())
    }
}
