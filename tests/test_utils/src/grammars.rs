use zlr::{Actions, Grammar, GrammarBuilder, Production};

/// `S: S "+" P | P`, `P: int`
pub fn sum() -> GrammarBuilder {
    Grammar::builder()
        .terminal("int")
        .production(Production::main("G").symbol("S"))
        .production(Production::new("S").symbol("S").literal("+").symbol("P"))
        .production(Production::new("S").symbol("P"))
        .production(Production::new("P").symbol("int"))
}

/// Exactly `id "*" int`, then end of input
pub fn product() -> GrammarBuilder {
    Grammar::builder()
        .terminals(vec!["id", "int"])
        .production(Production::main("G").symbol("Expr"))
        .production(Production::new("Expr").symbol("id").literal("*").symbol("int"))
}

/// Sums of products of values, with unary minus and parentheses
pub fn arithmetic() -> GrammarBuilder {
    Grammar::builder()
        .terminal("int")
        .production(Production::main("G").symbol("Sum"))
        .production(
            Production::new("Sum")
                .tag("add")
                .symbol("Sum")
                .hidden_literal("+")
                .symbol("Product"),
        )
        .production(
            Production::new("Sum")
                .tag("sub")
                .symbol("Sum")
                .hidden_literal("-")
                .symbol("Product"),
        )
        .production(Production::new("Sum").symbol("Product"))
        .production(
            Production::new("Product")
                .tag("mul")
                .symbol("Product")
                .hidden_literal("*")
                .symbol("Value"),
        )
        .production(
            Production::new("Product")
                .tag("div")
                .symbol("Product")
                .hidden_literal("/")
                .symbol("Value"),
        )
        .production(Production::new("Product").symbol("Value"))
        .production(Production::new("Value").symbol("int"))
        .production(
            Production::new("Value")
                .tag("neg")
                .hidden_literal("-")
                .symbol("Value"),
        )
        .production(
            Production::new("Value")
                .tag("group")
                .hidden_literal("(")
                .symbol("Sum")
                .hidden_literal(")"),
        )
}

pub fn arithmetic_actions() -> Actions<i64> {
    Actions::<i64>::new()
        .made("int", |args| Ok(args.text(0)?.parse::<i64>()?))
        .bubble("Sum")
        .bubble("Product")
        .bubble("Value")
        .made("Sum(add)", |args| Ok(args.value(0)? + args.value(1)?))
        .made("Sum(sub)", |args| Ok(args.value(0)? - args.value(1)?))
        .made("Product(mul)", |args| Ok(args.value(0)? * args.value(1)?))
        .made("Product(div)", |args| {
            args.value(0)?
                .checked_div(*args.value(1)?)
                .ok_or_else(|| zlr::ActionFailure::abort("division by zero"))
        })
        .made("Value(neg)", |args| Ok(-*args.value(0)?))
}
