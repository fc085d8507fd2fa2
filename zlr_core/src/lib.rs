mod error;
mod lr0;
mod runtime;
mod tree;

pub use crate::error::{
    BuildError, ConflictError, EvalError, GrammarError, InternalError, SyntaxError,
};
pub use crate::lr0::*;
pub use crate::runtime::{parse, Stack, StackError, Token, END_OF_INPUT, ERROR_TERMINAL};
pub use crate::tree::{
    evaluate, Abort, Action, ActionFailure, Actions, Arg, Args, Evaluator, Internal, Leaf, Node,
};
