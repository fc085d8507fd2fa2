use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::slice;

use crate::lr0::qualified_name;
use crate::{Evaluator, Node};

type NodeFn<V> =
    dyn Fn(&Node<V>, &Evaluator<'_, V>) -> Result<V, ActionFailure> + Send + Sync + 'static;
type MadeFn<V> = dyn Fn(Args<'_, V>) -> Result<V, ActionFailure> + Send + Sync + 'static;

/// User action attached to a production or a terminal
pub enum Action<V> {
    /// Receives the node itself and asks for child values explicitly
    Node(Box<NodeFn<V>>),
    /// Receives the made values of all visible children
    Made(Box<MadeFn<V>>),
    /// Forwards the made value of the only child
    Bubble,
}

impl<V> fmt::Debug for Action<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Action::Node(_) => write!(f, "Action::Node"),
            Action::Made(_) => write!(f, "Action::Made"),
            Action::Bubble => write!(f, "Action::Bubble"),
        }
    }
}

/// Actions keyed by `Name` or `Name(tag)`
pub struct Actions<V> {
    actions: BTreeMap<String, Action<V>>,
}

impl<V> Default for Actions<V> {
    fn default() -> Self {
        Actions {
            actions: BTreeMap::new(),
        }
    }
}

impl<V> fmt::Debug for Actions<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.debug_map().entries(self.actions.iter()).finish()
    }
}

impl<V> Actions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node<F>(self, name: &str, action: F) -> Self
    where
        F: Fn(&Node<V>, &Evaluator<'_, V>) -> Result<V, ActionFailure> + Send + Sync + 'static,
    {
        self.with(name, Action::Node(Box::new(action)))
    }

    pub fn made<F>(self, name: &str, action: F) -> Self
    where
        F: Fn(Args<'_, V>) -> Result<V, ActionFailure> + Send + Sync + 'static,
    {
        self.with(name, Action::Made(Box::new(action)))
    }

    pub fn bubble(self, name: &str) -> Self {
        self.with(name, Action::Bubble)
    }

    fn with(mut self, name: &str, action: Action<V>) -> Self {
        self.insert(name, action);
        self
    }

    /// Registers `action`, returning the one it replaces
    pub fn insert(&mut self, name: &str, action: Action<V>) -> Option<Action<V>> {
        self.actions.insert(name.to_owned(), action)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Tag-qualified name first, then the plain name
    pub fn lookup(&self, name: &str, tag: Option<&str>) -> Option<&Action<V>> {
        if tag.is_some() {
            if let Some(action) = self.actions.get(&qualified_name(name, tag)) {
                return Some(action);
            }
        }
        self.actions.get(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Made value of one child, as seen by a `Made` action
pub enum Arg<'a, V> {
    Made(&'a V),
    /// Leaf without an action of its own
    Token(&'a str),
    Null,
}

impl<'a, V> Clone for Arg<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V> Copy for Arg<'a, V> {}

impl<'a, V: fmt::Debug> fmt::Debug for Arg<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Arg::Made(value) => f.debug_tuple("Made").field(value).finish(),
            Arg::Token(text) => f.debug_tuple("Token").field(text).finish(),
            Arg::Null => write!(f, "Null"),
        }
    }
}

#[derive(Debug)]
pub struct Args<'a, V> {
    args: Vec<Arg<'a, V>>,
}

impl<'a, V> Args<'a, V> {
    pub(crate) fn new(args: Vec<Arg<'a, V>>) -> Self {
        Args { args }
    }

    pub fn get(&self, index: usize) -> Option<Arg<'a, V>> {
        self.args.get(index).copied()
    }

    /// Made value of child `index`, failing for tokens and missing values
    pub fn value(&self, index: usize) -> Result<&'a V, ActionFailure> {
        match self.get(index) {
            Some(Arg::Made(value)) => Ok(value),
            Some(Arg::Token(text)) => Err(ActionFailure::msg(format!(
                "argument {} is the token {:?}, not a value",
                index, text
            ))),
            Some(Arg::Null) => Err(ActionFailure::msg(format!(
                "argument {} has no value",
                index
            ))),
            None => Err(ActionFailure::msg(format!(
                "argument {} out of range for {} arguments",
                index,
                self.args.len()
            ))),
        }
    }

    /// Text of the token at `index`
    pub fn text(&self, index: usize) -> Result<&'a str, ActionFailure> {
        match self.get(index) {
            Some(Arg::Token(text)) => Ok(text),
            _ => Err(ActionFailure::msg(format!(
                "argument {} is not a token",
                index
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Arg<'a, V>> {
        self.args.iter()
    }
}

/// Deliberate stop of the evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abort {
    pub message: String,
    pub offset: Option<usize>,
}

impl Abort {
    pub fn new(message: impl Into<String>) -> Self {
        Abort {
            message: message.into(),
            offset: None,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Failure of a user action
///
/// Any error converts into `ActionFailure::Error` through `?`.
#[derive(Debug)]
pub enum ActionFailure {
    Error(Box<dyn Error + Send + Sync>),
    Abort(Abort),
}

impl ActionFailure {
    pub fn msg(message: impl fmt::Display) -> Self {
        ActionFailure::Error(message.to_string().into())
    }

    pub fn abort(message: impl Into<String>) -> Self {
        ActionFailure::Abort(Abort::new(message))
    }
}

impl<E> From<E> for ActionFailure
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        ActionFailure::Error(Box::new(error))
    }
}
