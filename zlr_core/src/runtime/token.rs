use std::fmt;

/// Lexical token handed to the parser
///
/// `kind` is the terminal name the token matches, `offset` the byte offset of `content` in the
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: String,
    content: String,
    offset: usize,
}

impl Token {
    pub fn new(kind: impl Into<String>, content: impl Into<String>, offset: usize) -> Self {
        Token {
            kind: kind.into(),
            content: content.into(),
            offset,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} {:?} at {}", self.kind, self.content, self.offset)
    }
}
