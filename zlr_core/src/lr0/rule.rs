use std::cmp::Ordering;
use std::fmt;

use crate::Symbol;

/// Production of a grammar
///
/// The derived `PartialEq` compares everything including the tag. Automaton construction uses
/// [`Rule::compare`] without the tag instead, since the tag only matters for action dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub subject: Symbol,
    pub definition: Vec<Symbol>,
    pub tag: Option<String>,
    pub eof: bool,
}

impl Rule {
    pub fn new(subject: Symbol, definition: Vec<Symbol>) -> Self {
        Self {
            subject,
            definition,
            tag: None,
            eof: false,
        }
    }

    /// Structural comparison by subject, definition and eof mark, optionally followed by the tag
    pub fn compare(&self, other: &Rule, with_tag: bool) -> Ordering {
        let ordering = self
            .subject
            .cmp(&other.subject)
            .then_with(|| self.definition.cmp(&other.definition))
            .then_with(|| self.eof.cmp(&other.eof));
        if with_tag {
            ordering.then_with(|| self.tag.cmp(&other.tag))
        } else {
            ordering
        }
    }

    /// Action lookup key: `Subject` or `Subject(tag)`
    pub fn qualified_name(&self) -> String {
        qualified_name(self.subject.name(), self.tag.as_deref())
    }
}

pub(crate) fn qualified_name(name: &str, tag: Option<&str>) -> String {
    match tag {
        Some(tag) => format!("{}({})", name, tag),
        None => name.to_owned(),
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}:", self.qualified_name())?;
        for symbol in self.definition.iter() {
            write!(f, " {}", symbol)?;
        }
        if self.eof {
            write!(f, " $")?;
        }
        Ok(())
    }
}
