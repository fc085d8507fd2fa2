use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Rule, Symbol};

/// LR(0) item: a rule with a dot somewhere in its definition
///
/// Items are immutable values. Equality, ordering and hashing ignore the rule tag, so two
/// productions differing only in their tag would collapse into one item.
#[derive(Debug, Clone)]
pub struct Item {
    rule: Arc<Rule>,
    pos: usize,
}

impl Item {
    /// Item with the dot at the start of `rule`
    pub fn new(rule: Arc<Rule>) -> Self {
        Self { rule, pos: 0 }
    }

    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    pub fn subject(&self) -> &Symbol {
        &self.rule.subject
    }

    /// Symbols left of the dot
    pub fn passed(&self) -> &[Symbol] {
        &self.rule.definition[..self.pos]
    }

    /// Symbols right of the dot
    pub fn further(&self) -> &[Symbol] {
        &self.rule.definition[self.pos..]
    }

    /// Symbol expected next, `None` once the dot reached the end
    pub fn expected(&self) -> Option<&Symbol> {
        self.rule.definition.get(self.pos)
    }

    pub fn is_finite(&self) -> bool {
        self.pos == self.rule.definition.len()
    }

    pub fn has_eof_mark(&self) -> bool {
        self.rule.eof
    }

    /// Move the dot over the expected symbol
    pub fn shift(&self) -> Option<Item> {
        if self.is_finite() {
            return None;
        }
        Some(Item {
            rule: Arc::clone(&self.rule),
            pos: self.pos + 1,
        })
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Item {}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.subject()
            .cmp(other.subject())
            .then_with(|| self.passed().cmp(other.passed()))
            .then_with(|| self.further().cmp(other.further()))
            .then_with(|| self.has_eof_mark().cmp(&other.has_eof_mark()))
    }
}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rule.subject.hash(state);
        self.rule.definition.hash(state);
        self.rule.eof.hash(state);
        self.pos.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}:", self.rule.qualified_name())?;
        for symbol in self.passed() {
            write!(f, " {}", symbol)?;
        }
        write!(f, " •")?;
        for symbol in self.further() {
            write!(f, " {}", symbol)?;
        }
        if self.has_eof_mark() {
            write!(f, " $")?;
        }
        Ok(())
    }
}
