mod char_lexer;
pub use self::char_lexer::CharLexer;

mod grammars;
pub use self::grammars::{arithmetic, arithmetic_actions, product, sum};
