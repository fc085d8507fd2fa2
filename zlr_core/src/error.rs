use std::error::Error;

use thiserror::Error;

use crate::Item;

/// Grammar violates a structural invariant
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    Empty,
    #[error("grammar has no main rule")]
    MissingMainRule,
    #[error("grammar has more than one main rule: `{first}` and `{second}`")]
    DuplicateMainRule { first: String, second: String },
    #[error("terminal `{name}` used in `{rule}` has no definition")]
    UndefinedTerminal { name: String, rule: String },
    #[error("non-terminal `{name}` used in `{rule}` has no rules")]
    UndefinedNonterminal { name: String, rule: String },
    #[error("symbol `{name}` is defined both as terminal and as non-terminal")]
    AmbiguousSymbol { name: String },
    #[error("rule `{rule}` is defined more than once")]
    DuplicateRule { rule: String },
}

/// Grammar is not deterministic under LR(0)
///
/// Carries the items of the offending state, so that the state can be shown to the user.
#[derive(Debug, Error)]
pub enum ConflictError {
    #[error("reduce-reduce conflict in state {state} between {}", render(.items))]
    ReduceReduce { state: usize, items: Vec<Item> },
    #[error("shift-reduce conflict in state {state} between {} and {}", render(.finite), render(.terminals))]
    ShiftReduce {
        state: usize,
        finite: Vec<Item>,
        terminals: Vec<Item>,
        nonterminals: Vec<Item>,
    },
}

impl ConflictError {
    /// Index the offending state would have had
    pub fn state(&self) -> usize {
        match self {
            ConflictError::ReduceReduce { state, .. } => *state,
            ConflictError::ShiftReduce { state, .. } => *state,
        }
    }

    /// All items of the offending state
    pub fn items(&self) -> Vec<&Item> {
        match self {
            ConflictError::ReduceReduce { items, .. } => items.iter().collect(),
            ConflictError::ShiftReduce {
                finite,
                terminals,
                nonterminals,
                ..
            } => finite
                .iter()
                .chain(terminals.iter())
                .chain(nonterminals.iter())
                .collect(),
        }
    }
}

fn render(items: &[Item]) -> String {
    let items: Vec<String> = items.iter().map(|item| format!("`{}`", item)).collect();
    items.join(", ")
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// Broken invariant of the table builder or the parse engine
///
/// Never caused by user input for a grammar that passed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InternalError {
    #[error("state {state} does not exist")]
    NoState { state: usize },
    #[error("state {state} has no goto for `{symbol}`")]
    NoGoto { state: usize, symbol: String },
    #[error("stack holds `{found}` where `{expected}` was expected")]
    SymbolMismatch { expected: String, found: String },
    #[error("reduce needs {needed} stack entries, only {available} available")]
    StackUnderflow { needed: usize, available: usize },
    #[error("stack must hold exactly one entry when done, found {entries}")]
    UnbalancedStack { entries: usize },
    #[error("state {state} does not accept")]
    NotAccepting { state: usize },
    #[error("made value of `{node}` was computed twice")]
    MadeTwice { node: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected {found} {content:?} at offset {offset}, expected one of: {}", list(.expected))]
    UnexpectedToken {
        found: String,
        content: String,
        offset: usize,
        expected: Vec<String>,
    },
    #[error("unexpected {found} {content:?} at offset {offset}, expected end of input")]
    UnexpectedTrailingInput {
        found: String,
        content: String,
        offset: usize,
    },
    #[error("unexpected end of input, expected one of: {}", list(.expected))]
    UnexpectedEndOfInput { expected: Vec<String> },
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl SyntaxError {
    /// Byte offset of the offending token, if there is one
    pub fn offset(&self) -> Option<usize> {
        match self {
            SyntaxError::UnexpectedToken { offset, .. } => Some(*offset),
            SyntaxError::UnexpectedTrailingInput { offset, .. } => Some(*offset),
            SyntaxError::UnexpectedEndOfInput { .. } | SyntaxError::Internal(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("action for `{node}` failed: {source}")]
    Action {
        node: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    #[error("aborted{}: {message}", at(.offset))]
    Abort {
        message: String,
        offset: Option<usize>,
    },
    #[error("cannot bubble `{node}`: expected exactly one child, found {children}")]
    Bubble { node: String, children: usize },
    #[error(transparent)]
    Internal(#[from] InternalError),
}

fn at(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!(" at offset {}", offset),
        None => String::new(),
    }
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        "nothing".to_owned()
    } else {
        names.join(", ")
    }
}
