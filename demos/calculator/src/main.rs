use lazy_static::lazy_static;
use logos::Logos;
use zlr::extra::{LogosSupport, LogosTerminal};
use zlr::*;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n]+")]
enum Terminal {
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[regex(r"(0|[1-9][0-9]*)(\.[0-9]+)?")]
    Number,
    #[token("(")]
    BracketOpen,
    #[token(")")]
    BracketClose,
}

impl LogosTerminal for Terminal {
    fn terminal(&self) -> &'static str {
        match self {
            Terminal::Plus => "+",
            Terminal::Minus => "-",
            Terminal::Asterisk => "*",
            Terminal::Slash => "/",
            Terminal::Caret => "^",
            Terminal::Number => "number",
            Terminal::BracketOpen => "(",
            Terminal::BracketClose => ")",
        }
    }
}

// Precedence by layering: Expression over Term over Power over Value. `^` is right
// associative because Power recurses on its right side.
fn grammar() -> GrammarBuilder {
    Grammar::builder()
        .terminal("number")
        .production(Production::main("Calculation").symbol("Expression"))
        .production(
            Production::new("Expression")
                .tag("add")
                .symbol("Expression")
                .hidden_literal("+")
                .symbol("Term"),
        )
        .production(
            Production::new("Expression")
                .tag("sub")
                .symbol("Expression")
                .hidden_literal("-")
                .symbol("Term"),
        )
        .production(Production::new("Expression").symbol("Term"))
        .production(
            Production::new("Term")
                .tag("mul")
                .symbol("Term")
                .hidden_literal("*")
                .symbol("Power"),
        )
        .production(
            Production::new("Term")
                .tag("div")
                .symbol("Term")
                .hidden_literal("/")
                .symbol("Power"),
        )
        .production(Production::new("Term").symbol("Power"))
        .production(
            Production::new("Power")
                .tag("pow")
                .symbol("Value")
                .hidden_literal("^")
                .symbol("Power"),
        )
        .production(Production::new("Power").symbol("Value"))
        .production(Production::new("Value").symbol("number"))
        .production(
            Production::new("Value")
                .tag("neg")
                .hidden_literal("-")
                .symbol("Value"),
        )
        .production(
            Production::new("Value")
                .hidden_literal("(")
                .symbol("Expression")
                .hidden_literal(")"),
        )
}

fn actions() -> Actions<f64> {
    Actions::<f64>::new()
        .made("number", |args| Ok(args.text(0)?.parse::<f64>()?))
        .bubble("Expression")
        .bubble("Term")
        .bubble("Power")
        .bubble("Value")
        .made("Expression(add)", |args| Ok(args.value(0)? + args.value(1)?))
        .made("Expression(sub)", |args| Ok(args.value(0)? - args.value(1)?))
        .made("Term(mul)", |args| Ok(args.value(0)? * args.value(1)?))
        .made("Term(div)", |args| {
            let divisor = *args.value(1)?;
            if divisor == 0.0 {
                return Err(ActionFailure::abort("division by zero"));
            }
            Ok(args.value(0)? / divisor)
        })
        .made("Power(pow)", |args| Ok(args.value(0)?.powf(*args.value(1)?)))
        .made("Value(neg)", |args| Ok(-*args.value(0)?))
}

lazy_static! {
    static ref PARSER: Parser<f64> =
        Parser::build(grammar(), actions()).expect("calculator grammar is LR(0)");
}

fn parse_str(input: &str) -> Result<f64, Error> {
    PARSER.parse_logos(Terminal::lexer(input))
}


fn main() {
    let input = "(20.5+64/4*2-1.5+70)/11";
    match parse_str(input) {
        Ok(value) => println!("{} = {}", input, value),
        Err(error) => println!("{}: {}", input, error),
    }
}
