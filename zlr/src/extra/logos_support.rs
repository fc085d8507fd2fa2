use logos::{Lexer, Logos, SpannedIter};

use zlr_core::{Token, ERROR_TERMINAL};

use crate::{Error, Parser};

/// Maps a logos token to the terminal name used in the grammar
pub trait LogosTerminal {
    fn terminal(&self) -> &'static str;
}

/// Token stream over a logos lexer
///
/// Input logos cannot match becomes a token of kind `ERROR_TERMINAL`, which no grammar shifts.
pub struct LogosTokens<'source, T>
where
    T: Logos<'source>,
{
    inner: SpannedIter<'source, T>,
}

impl<'source, T> LogosTokens<'source, T>
where
    T: Logos<'source, Source = str>,
{
    pub fn new(lexer: Lexer<'source, T>) -> Self {
        LogosTokens {
            inner: lexer.spanned(),
        }
    }
}

impl<'source, T> Iterator for LogosTokens<'source, T>
where
    T: Logos<'source, Source = str> + LogosTerminal,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (result, span) = self.inner.next()?;
        let kind = match result {
            Ok(terminal) => terminal.terminal(),
            Err(_) => ERROR_TERMINAL,
        };
        Some(Token::new(kind, self.inner.slice(), span.start))
    }
}

pub trait LogosSupport<V> {
    fn parse_logos<'source, T>(&self, lexer: Lexer<'source, T>) -> Result<V, Error>
    where
        T: Logos<'source, Source = str> + LogosTerminal;
}

impl<V: Clone> LogosSupport<V> for Parser<V> {
    fn parse_logos<'source, T>(&self, lexer: Lexer<'source, T>) -> Result<V, Error>
    where
        T: Logos<'source, Source = str> + LogosTerminal,
    {
        self.parse(LogosTokens::new(lexer))
    }
}
