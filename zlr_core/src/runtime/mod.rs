mod parse;
pub use self::parse::parse;

mod stack;
pub use self::stack::{Stack, StackError};

mod token;
pub use self::token::Token;

/// Terminal name standing for the end of the token stream in expected lists
pub const END_OF_INPUT: &str = "$";

/// Token kind produced by lexers for input they could not recognize
pub const ERROR_TERMINAL: &str = "<error>";
