use std::iter::Peekable;
use std::str::CharIndices;

use zlr::Token;

/// Minimal lexer for test input
///
/// Digit runs become `int`, runs of letters and digits starting with a letter become `id`,
/// whitespace is skipped and any other character is a token whose kind is the character itself.
pub struct CharLexer<'source> {
    input: &'source str,
    chars: Peekable<CharIndices<'source>>,
}

impl<'source> CharLexer<'source> {
    pub fn new(input: &'source str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn run<F>(&mut self, start: usize, kind: &str, accept: F) -> Token
    where
        F: Fn(char) -> bool,
    {
        let mut end = self.input.len();
        while let Some(&(pos, c)) = self.chars.peek() {
            if !accept(c) {
                end = pos;
                break;
            }
            self.chars.next();
        }
        Token::new(kind, &self.input[start..end], start)
    }
}

impl<'source> Iterator for CharLexer<'source> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
        let (start, c) = self.chars.next()?;
        if c.is_ascii_digit() {
            Some(self.run(start, "int", |c| c.is_ascii_digit()))
        } else if c.is_alphabetic() {
            Some(self.run(start, "id", char::is_alphanumeric))
        } else {
            let end = start + c.len_utf8();
            Some(Token::new(&self.input[start..end], &self.input[start..end], start))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tokens() {
        let tokens: Vec<Token> = CharLexer::new("A * 2 B\n(x1+40)").collect();
        assert_eq!(
            tokens,
            vec![
                Token::new("id", "A", 0),
                Token::new("*", "*", 2),
                Token::new("int", "2", 4),
                Token::new("id", "B", 6),
                Token::new("(", "(", 8),
                Token::new("id", "x1", 9),
                Token::new("+", "+", 11),
                Token::new("int", "40", 12),
                Token::new(")", ")", 14),
            ]
        );
        assert_eq!(CharLexer::new("  ").count(), 0);
    }
}
