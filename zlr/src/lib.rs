mod error;
pub mod extra;
mod parser;

pub use crate::error::Error;
pub use crate::parser::Parser;

pub use zlr_core::*;
