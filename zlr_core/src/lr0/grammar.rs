use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::{BuildError, GrammarError, Rule, Symbol, Table};

/// Validated set of productions with exactly one main rule
///
/// Owns the rules and the symbol maps derived from them. Once built, a grammar is never
/// modified again.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Arc<Rule>>,
    main: usize,
    symbols: BTreeMap<String, Symbol>,
    terminals: BTreeMap<String, Symbol>,
    nonterminals: BTreeMap<String, Symbol>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// Validate `rules` against the terminals the external tokenizer defines
    pub fn new<'a, I>(rules: Vec<Rule>, defined_terminals: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if rules.is_empty() {
            return Err(GrammarError::Empty);
        }

        let defined: BTreeSet<&str> = defined_terminals.into_iter().collect();

        let mut main: Option<usize> = None;
        for (idx, rule) in rules.iter().enumerate() {
            if !rule.eof {
                continue;
            }
            if let Some(first) = main {
                return Err(GrammarError::DuplicateMainRule {
                    first: rules[first].to_string(),
                    second: rule.to_string(),
                });
            }
            main = Some(idx);
        }
        let main = main.ok_or(GrammarError::MissingMainRule)?;

        let mut nonterminals = BTreeMap::new();
        for rule in rules.iter() {
            if rule.subject.is_terminal() || defined.contains(rule.subject.name()) {
                return Err(GrammarError::AmbiguousSymbol {
                    name: rule.subject.name().to_owned(),
                });
            }
            nonterminals
                .entry(rule.subject.name().to_owned())
                .or_insert_with(|| rule.subject.with_hidden(false));
        }

        let mut terminals = BTreeMap::new();
        for rule in rules.iter() {
            for symbol in rule.definition.iter() {
                if symbol.is_terminal() {
                    if nonterminals.contains_key(symbol.name()) {
                        return Err(GrammarError::AmbiguousSymbol {
                            name: symbol.name().to_owned(),
                        });
                    }
                    if !defined.contains(symbol.name()) {
                        return Err(GrammarError::UndefinedTerminal {
                            name: symbol.name().to_owned(),
                            rule: rule.to_string(),
                        });
                    }
                    terminals
                        .entry(symbol.name().to_owned())
                        .or_insert_with(|| symbol.with_hidden(false));
                } else if !nonterminals.contains_key(symbol.name()) {
                    return Err(GrammarError::UndefinedNonterminal {
                        name: symbol.name().to_owned(),
                        rule: rule.to_string(),
                    });
                }
            }
        }

        let mut sorted: Vec<&Rule> = rules.iter().collect();
        sorted.sort_by(|a, b| a.compare(b, false));
        if let Some(pair) = sorted
            .windows(2)
            .find(|pair| pair[0].compare(pair[1], false) == Ordering::Equal)
        {
            return Err(GrammarError::DuplicateRule {
                rule: pair[1].to_string(),
            });
        }

        let mut symbols = nonterminals.clone();
        symbols.extend(terminals.iter().map(|(k, v)| (k.clone(), v.clone())));

        log::debug!(
            "grammar with {} rules, {} terminals, {} non-terminals",
            rules.len(),
            terminals.len(),
            nonterminals.len()
        );

        Ok(Self {
            rules: rules.into_iter().map(Arc::new).collect(),
            main,
            symbols,
            terminals,
            nonterminals,
        })
    }

    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    /// The rule carrying the eof mark
    pub fn main_rule(&self) -> &Arc<Rule> {
        &self.rules[self.main]
    }

    /// All productions of the given non-terminal, in definition order
    pub fn rules_for<'g>(&'g self, subject: &'g Symbol) -> impl Iterator<Item = &'g Arc<Rule>> {
        self.rules.iter().filter(move |rule| rule.subject == *subject)
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.terminals.values()
    }

    pub fn terminal(&self, name: &str) -> Option<&Symbol> {
        self.terminals.get(name)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &Symbol> {
        self.nonterminals.values()
    }

    pub fn nonterminal(&self, name: &str) -> Option<&Symbol> {
        self.nonterminals.get(name)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for rule in self.rules.iter() {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Name { name: String, hidden: bool },
    Literal { text: String, hidden: bool },
}

/// Production under construction
///
/// Names stay unresolved until [`GrammarBuilder::build`] knows every subject: a name is a
/// non-terminal iff some production defines it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    subject: String,
    tag: Option<String>,
    main: bool,
    parts: Vec<Part>,
}

impl Production {
    pub fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_owned(),
            tag: None,
            main: false,
            parts: Vec::new(),
        }
    }

    /// The main rule, accepted at end of input
    pub fn main(subject: &str) -> Self {
        Self {
            main: true,
            ..Self::new(subject)
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_owned());
        self
    }

    pub fn symbol(mut self, name: &str) -> Self {
        self.parts.push(Part::Name {
            name: name.to_owned(),
            hidden: false,
        });
        self
    }

    pub fn hidden(mut self, name: &str) -> Self {
        self.parts.push(Part::Name {
            name: name.to_owned(),
            hidden: true,
        });
        self
    }

    /// Inline terminal whose token kind is the literal text itself
    pub fn literal(mut self, text: &str) -> Self {
        self.parts.push(Part::Literal {
            text: text.to_owned(),
            hidden: false,
        });
        self
    }

    pub fn hidden_literal(mut self, text: &str) -> Self {
        self.parts.push(Part::Literal {
            text: text.to_owned(),
            hidden: true,
        });
        self
    }
}

/// One symbol instance per (name, hidden, literal) triple
#[derive(Default)]
struct SymbolTable {
    interned: HashMap<(String, bool, bool), Symbol>,
}

impl SymbolTable {
    fn intern(&mut self, symbol: Symbol) -> Symbol {
        let key = (symbol.name().to_owned(), symbol.is_hidden(), symbol.is_literal());
        self.interned.entry(key).or_insert(symbol).clone()
    }
}

#[derive(Debug, Default, Clone)]
pub struct GrammarBuilder {
    terminals: BTreeSet<String>,
    productions: Vec<Production>,
}

impl GrammarBuilder {
    /// Declare a terminal defined by the external tokenizer
    pub fn terminal(mut self, name: &str) -> Self {
        self.terminals.insert(name.to_owned());
        self
    }

    pub fn terminals<'a, I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.terminals.extend(names.into_iter().map(str::to_owned));
        self
    }

    pub fn production(mut self, production: Production) -> Self {
        self.productions.push(production);
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        let subjects: BTreeSet<&str> = self
            .productions
            .iter()
            .map(|p| p.subject.as_str())
            .collect();

        let mut table = SymbolTable::default();
        let mut defined: BTreeSet<&str> = self.terminals.iter().map(String::as_str).collect();

        let mut rules = Vec::with_capacity(self.productions.len());
        for production in self.productions.iter() {
            let subject = table.intern(Symbol::nonterminal(&production.subject));
            let definition = production
                .parts
                .iter()
                .map(|part| match part {
                    Part::Name { name, hidden } => {
                        let terminal = !subjects.contains(name.as_str());
                        table.intern(Symbol::new(name, terminal, *hidden))
                    }
                    Part::Literal { text, hidden } => {
                        table.intern(Symbol::literal(text).with_hidden(*hidden))
                    }
                })
                .collect();
            for part in production.parts.iter() {
                if let Part::Literal { text, .. } = part {
                    defined.insert(text.as_str());
                }
            }
            rules.push(Rule {
                subject,
                definition,
                tag: production.tag.clone(),
                eof: production.main,
            });
        }

        Grammar::new(rules, defined)
    }

    /// Build the grammar and its parse table in one go
    pub fn build_table(self) -> Result<Table, BuildError> {
        let grammar = self.build()?;
        Ok(Table::build(&grammar)?)
    }
}
