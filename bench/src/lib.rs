use logos::Logos;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use zlr::extra::LogosTerminal;
use zlr::*;

#[derive(Logos, PartialEq, Eq, Clone, Copy, Debug)]
pub enum Terminal {
    #[token("(")]
    BracketOpen,
    #[token(")")]
    BracketClose,
}

impl LogosTerminal for Terminal {
    fn terminal(&self) -> &'static str {
        match self {
            Terminal::BracketOpen => "(",
            Terminal::BracketClose => ")",
        }
    }
}

/// Balanced brackets
pub fn grammar() -> GrammarBuilder {
    Grammar::builder()
        .production(Production::main("Balanced").symbol("Sequence"))
        .production(
            Production::new("Sequence")
                .tag("more")
                .symbol("Sequence")
                .symbol("Pair"),
        )
        .production(Production::new("Sequence").symbol("Pair"))
        .production(
            Production::new("Pair")
                .tag("nested")
                .hidden_literal("(")
                .symbol("Sequence")
                .hidden_literal(")"),
        )
        .production(Production::new("Pair").hidden_literal("(").hidden_literal(")"))
}

/// Balanced brackets, evaluated to the number of pairs
pub fn parser() -> Parser<usize> {
    let actions = Actions::<usize>::new()
        .made("Sequence(more)", |args| Ok(args.value(0)? + args.value(1)?))
        .bubble("Sequence")
        .made("Pair(nested)", |args| Ok(args.value(0)? + 1))
        .made("Pair", |_| Ok(1));
    Parser::build(grammar(), actions).expect("balanced grammar is LR(0)")
}

/// Seeded balanced input with exactly `pairs` bracket pairs
///
/// Before each new pair, open pairs are closed one at a time until a draw with probability
/// `nesting` keeps the rest open, so higher values give deeper input.
pub fn balanced_input(pairs: usize, nesting: f64) -> String {
    let mut rng = XorShiftRng::seed_from_u64(pairs as u64);
    let mut input = String::with_capacity(pairs * 2);
    let mut open = 0;
    for _ in 0..pairs {
        while open > 0 && !rng.gen_bool(nesting) {
            input.push(')');
            open -= 1;
        }
        input.push('(');
        open += 1;
    }
    input.extend(std::iter::repeat(')').take(open));
    input
}
