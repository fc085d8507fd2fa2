use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use crate::{Grammar, Item, Symbol};

/// Canonical LR(0) state: a sorted, deduplicated item set closed under non-terminal expansion
#[derive(Debug, Clone)]
pub struct ItemSet {
    items: Vec<Item>,
    kernel: Vec<bool>,
}

impl ItemSet {
    /// Close `kernel` over the grammar
    ///
    /// Every item expecting a non-terminal pulls in a fresh item for each production of that
    /// non-terminal, until nothing new appears. The result only depends on the set of kernel
    /// items, never on their order.
    pub fn closure<I>(kernel: I, grammar: &Grammar) -> Self
    where
        I: IntoIterator<Item = Item>,
    {
        let kernel: BTreeSet<Item> = kernel.into_iter().collect();

        let mut closure = BTreeSet::new();
        let mut expanded = BTreeSet::<Symbol>::new();
        let mut pending: VecDeque<Item> = kernel.iter().cloned().collect();

        while let Some(item) = pending.pop_front() {
            if let Some(next) = item.expected() {
                if !next.is_terminal() && expanded.insert(next.clone()) {
                    pending.extend(grammar.rules_for(next).cloned().map(Item::new));
                }
            }
            closure.insert(item);
        }

        let items: Vec<Item> = closure.into_iter().collect();
        let kernel = items.iter().map(|item| kernel.contains(item)).collect();
        Self { items, kernel }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items that were part of the closure input
    pub fn kernel(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .zip(self.kernel.iter())
            .filter(|(_, &kernel)| kernel)
            .map(|(item, _)| item)
    }

    pub fn is_kernel(&self, idx: usize) -> bool {
        self.kernel.get(idx).copied().unwrap_or(false)
    }

    /// Completed items, candidates for reduce or accept
    pub fn finite(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_finite())
    }

    /// Items waiting for a terminal
    pub fn terminal_pending(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|item| item.expected().map_or(false, Symbol::is_terminal))
    }

    /// Items waiting for a non-terminal
    pub fn nonterminal_pending(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|item| item.expected().map_or(false, |s| !s.is_terminal()))
    }

    /// Kernels of all successor states, grouped by the symbol that leads to them
    pub fn successors(&self) -> BTreeMap<Symbol, Vec<Item>> {
        let mut groups: BTreeMap<Symbol, Vec<Item>> = BTreeMap::new();
        for item in self.items.iter() {
            if let (Some(symbol), Some(next)) = (item.expected(), item.shift()) {
                groups
                    .entry(symbol.with_hidden(false))
                    .or_default()
                    .push(next);
            }
        }
        groups
    }

    /// Whether the state holds the completed main rule
    pub fn is_accepting(&self) -> bool {
        self.finite().any(Item::has_eof_mark)
    }
}

impl PartialEq for ItemSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for ItemSet {}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for (idx, item) in self.items.iter().enumerate() {
            let marker = if self.is_kernel(idx) { '*' } else { ' ' };
            writeln!(f, "{} {}", marker, item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Production;
    use proptest::prelude::*;

    fn grammar() -> Grammar {
        Grammar::builder()
            .terminal("int")
            .production(Production::main("G").symbol("S"))
            .production(Production::new("S").symbol("S").literal("+").symbol("P"))
            .production(Production::new("S").symbol("P"))
            .production(Production::new("P").symbol("int"))
            .production(Production::new("P").literal("(").symbol("S").literal(")"))
            .build()
            .unwrap()
    }

    /// Every item of every rule, at every dot position
    fn all_items(grammar: &Grammar) -> Vec<Item> {
        let mut items = Vec::new();
        for rule in grammar.rules() {
            let mut item = Item::new(rule.clone());
            items.push(item.clone());
            while let Some(next) = item.shift() {
                items.push(next.clone());
                item = next;
            }
        }
        items
    }

    #[test]
    fn test_initial_closure() {
        let grammar = grammar();
        let state = ItemSet::closure(vec![Item::new(grammar.main_rule().clone())], &grammar);
        let rendered: Vec<String> = state.items().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "G: • S $",
                "P: • \"(\" S \")\"",
                "P: • int",
                "S: • P",
                "S: • S \"+\" P",
            ]
        );
        assert_eq!(state.kernel().count(), 1);
        assert!(state.is_kernel(0));
        assert_eq!(state.finite().count(), 0);
        assert_eq!(state.terminal_pending().count(), 2);
        assert_eq!(state.nonterminal_pending().count(), 3);
    }

    #[test]
    fn test_successors() {
        let grammar = grammar();
        let state = ItemSet::closure(vec![Item::new(grammar.main_rule().clone())], &grammar);
        let successors = state.successors();
        let symbols: Vec<&str> = successors.keys().map(Symbol::name).collect();
        assert_eq!(symbols, vec!["P", "S", "(", "int"]);
        assert_eq!(successors[&Symbol::nonterminal("S")].len(), 2);

        let next = ItemSet::closure(successors[&Symbol::nonterminal("S")].clone(), &grammar);
        assert!(next.is_accepting());
        assert_eq!(next.finite().count(), 1);
    }

    #[test]
    fn test_display_marks_kernel() {
        let grammar = grammar();
        let kernel = vec![Item::new(grammar.rules()[4].clone()).shift().unwrap()];
        let state = ItemSet::closure(kernel, &grammar);
        assert_eq!(
            state.to_string(),
            "  P: • \"(\" S \")\"\n  P: • int\n* P: \"(\" • S \")\"\n  S: • P\n  S: • S \"+\" P\n"
        );
    }

    proptest! {
        #[test]
        fn prop_closure_is_idempotent(kernel in Just(all_items(&grammar())).prop_flat_map(|items| {
            let len = items.len();
            proptest::sample::subsequence(items, 1..=len)
        })) {
            let grammar = grammar();
            let once = ItemSet::closure(kernel, &grammar);
            let twice = ItemSet::closure(once.items().to_vec(), &grammar);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_closure_ignores_kernel_order(kernel in Just(all_items(&grammar())).prop_flat_map(|items| {
            let len = items.len();
            proptest::sample::subsequence(items, 1..=len).prop_shuffle()
        })) {
            let grammar = grammar();
            let mut sorted = kernel.clone();
            sorted.sort();
            let shuffled = ItemSet::closure(kernel, &grammar);
            let ordered = ItemSet::closure(sorted, &grammar);
            prop_assert_eq!(shuffled.items(), ordered.items());
            prop_assert_eq!(shuffled.kernel().count(), ordered.kernel().count());
        }
    }
}
