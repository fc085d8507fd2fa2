use thiserror::Error;

use zlr_core::{EvalError, SyntaxError};

/// Failure of a complete parse-and-evaluate run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("no action produced a value for `{node}`")]
    NoValue { node: String },
}
