use std::collections::{BTreeMap, BTreeSet};

use crate::{Grammar, Symbol};

/// FOLLOW sets of all non-terminals of a grammar
///
/// Only consulted while validating states that hold both a completed item and shift items;
/// the parse table itself carries no lookahead.
#[derive(Debug, Clone, Default)]
pub struct FollowSets {
    follow: BTreeMap<String, BTreeSet<String>>,
}

impl FollowSets {
    pub fn compute(grammar: &Grammar) -> Self {
        let nullable = nullable_set(grammar);
        let first = first_sets(grammar, &nullable);

        let mut sets = FollowSets::default();

        let mut changed = true;
        while changed {
            changed = false;
            for rule in grammar.rules() {
                for (pos, symbol) in rule.definition.iter().enumerate() {
                    if symbol.is_terminal() {
                        continue;
                    }
                    let rest = &rule.definition[pos + 1..];
                    let (mut followers, rest_nullable) = first_of_sequence(rest, &first, &nullable);
                    if rest_nullable {
                        // Whatever follows the subject also follows a symbol that ends the rule
                        if let Some(subject_follow) = sets.follow.get(rule.subject.name()) {
                            followers.extend(subject_follow.iter().cloned());
                        }
                    }

                    let entry = sets.follow.entry(symbol.name().to_owned()).or_default();
                    let before = entry.len();
                    entry.extend(followers);
                    changed |= entry.len() != before;
                }
            }
        }

        sets
    }

    /// Whether `terminal` may directly follow `nonterminal` in some sentential form
    pub fn contains(&self, nonterminal: &str, terminal: &str) -> bool {
        self.follow
            .get(nonterminal)
            .map_or(false, |set| set.contains(terminal))
    }

}

fn nullable_set(grammar: &Grammar) -> BTreeSet<String> {
    let mut nullable = BTreeSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for rule in grammar.rules() {
            if nullable.contains(rule.subject.name()) {
                continue;
            }
            let all_nullable = rule
                .definition
                .iter()
                .all(|s| !s.is_terminal() && nullable.contains(s.name()));
            if all_nullable {
                nullable.insert(rule.subject.name().to_owned());
                changed = true;
            }
        }
    }
    nullable
}

/// FIRST sets: all terminals a non-terminal can produce as leftmost symbol
fn first_sets(
    grammar: &Grammar,
    nullable: &BTreeSet<String>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut first: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut changed = true;
    while changed {
        changed = false;
        for rule in grammar.rules() {
            let (found, _) = first_of_sequence(&rule.definition, &first, nullable);
            let entry = first.entry(rule.subject.name().to_owned()).or_default();
            let before = entry.len();
            entry.extend(found);
            changed |= entry.len() != before;
        }
    }
    first
}

/// FIRST of a symbol sequence and whether the whole sequence is nullable
fn first_of_sequence(
    symbols: &[Symbol],
    first: &BTreeMap<String, BTreeSet<String>>,
    nullable: &BTreeSet<String>,
) -> (BTreeSet<String>, bool) {
    let mut result = BTreeSet::new();
    for symbol in symbols {
        if symbol.is_terminal() {
            result.insert(symbol.name().to_owned());
            return (result, false);
        }
        if let Some(set) = first.get(symbol.name()) {
            result.extend(set.iter().cloned());
        }
        if !nullable.contains(symbol.name()) {
            return (result, false);
        }
    }
    (result, true)
}
