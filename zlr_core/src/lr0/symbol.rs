use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Grammar symbol
///
/// Ordering and equality only look at terminal-ness and name: non-terminals sort before
/// terminals, ties are broken by name. Hidden-ness and literal-ness are carried along for tree
/// construction and display, two symbols that only differ in them compare equal.
#[derive(Debug, Clone)]
pub struct Symbol {
    name: Arc<str>,
    terminal: bool,
    hidden: bool,
    literal: bool,
}

impl Symbol {
    pub fn new(name: &str, terminal: bool, hidden: bool) -> Self {
        Self {
            name: Arc::from(name),
            terminal,
            hidden,
            literal: false,
        }
    }

    /// Inline terminal written as its own text in a production
    pub fn literal(text: &str) -> Self {
        Self {
            literal: true,
            ..Self::terminal(text)
        }
    }

    pub fn terminal(name: &str) -> Self {
        Self::new(name, true, false)
    }

    pub fn nonterminal(name: &str) -> Self {
        Self::new(name, false, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// Copy of this symbol with the given hidden flag
    pub fn with_hidden(&self, hidden: bool) -> Self {
        Self {
            name: Arc::clone(&self.name),
            terminal: self.terminal,
            hidden,
            literal: self.literal,
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.terminal == other.terminal && self.name == other.name
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.terminal
            .cmp(&other.terminal)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.terminal.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if self.hidden {
            write!(f, ".")?;
        }
        if self.literal || (self.terminal && !is_plain_name(&self.name)) {
            write!(f, "{:?}", &*self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn arb_symbol() -> impl Strategy<Value = Symbol> {
        ("[a-c]{0,2}", any::<bool>(), any::<bool>())
            .prop_map(|(name, terminal, hidden)| Symbol::new(&name, terminal, hidden))
    }

    #[test]
    fn test_terminals_after_nonterminals() {
        assert!(Symbol::nonterminal("z") < Symbol::terminal("a"));
        assert!(Symbol::terminal("a") < Symbol::terminal("b"));
        assert!(Symbol::nonterminal("A") < Symbol::nonterminal("B"));
    }

    #[test]
    fn test_hidden_is_not_identity() {
        let visible = Symbol::terminal("+");
        let hidden = Symbol::new("+", true, true);
        assert_eq!(visible, hidden);
        assert_eq!(visible.cmp(&hidden), Ordering::Equal);
        assert_ne!(Symbol::terminal("x"), Symbol::nonterminal("x"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Symbol::terminal("int").to_string(), "int");
        assert_eq!(Symbol::terminal("+").to_string(), "\"+\"");
        assert_eq!(Symbol::new("(", true, true).to_string(), ".\"(\"");
        assert_eq!(Symbol::new("Sum", false, true).to_string(), ".Sum");
        assert_eq!(Symbol::literal("true").to_string(), "\"true\"");
        assert_eq!(Symbol::literal("true").with_hidden(true).to_string(), ".\"true\"");
        assert_eq!(Symbol::literal("int"), Symbol::terminal("int"));
    }

    proptest! {
        #[test]
        fn prop_antisymmetric(a in arb_symbol(), b in arb_symbol()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }

        #[test]
        fn prop_transitive(a in arb_symbol(), b in arb_symbol(), c in arb_symbol()) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
        }

        #[test]
        fn prop_terminal_always_last(name_a in "[a-z]{1,3}", name_b in "[a-z]{1,3}") {
            prop_assert!(Symbol::nonterminal(&name_a) < Symbol::terminal(&name_b));
        }
    }
}
