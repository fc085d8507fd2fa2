use std::collections::HashMap;

use lazy_static::lazy_static;
use logos::Logos;
use zlr::extra::{LogosSupport, LogosTerminal};
use zlr::*;

pub type JsonObject = HashMap<String, JsonValue>;
pub type JsonArray = Vec<JsonValue>;

#[derive(Debug, PartialEq, Clone)]
pub enum JsonValue {
    String(String),
    Number(f64),
    Object(JsonObject),
    Array(JsonArray),
    True,
    False,
    Null,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
// Allowed whitespace: space, horizontal tab, line feed and carriage return
#[logos(skip r"[ \u0009\u000a\u000d]+")]
pub enum Terminal {
    #[regex(r#""([^"\\\t\n]|\\["\\/bfnrt]|\\u[a-fA-F0-9]{4})*""#)]
    String,
    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
}

impl LogosTerminal for Terminal {
    fn terminal(&self) -> &'static str {
        match self {
            Terminal::String => "string",
            Terminal::Number => "number",
            Terminal::LeftBrace => "{",
            Terminal::RightBrace => "}",
            Terminal::Colon => ":",
            Terminal::Comma => ",",
            Terminal::LeftBracket => "[",
            Terminal::RightBracket => "]",
            Terminal::Null => "null",
            Terminal::True => "true",
            Terminal::False => "false",
        }
    }
}

// Lists are collected left to right with the separator closing each element but the last,
// which keeps every state free of reduce decisions that would need lookahead.
fn grammar() -> GrammarBuilder {
    Grammar::builder()
        .terminals(vec!["string", "number"])
        .production(Production::main("Json").symbol("Value"))
        .production(Production::new("Value").tag("string").symbol("String"))
        .production(Production::new("Value").tag("number").symbol("number"))
        .production(Production::new("Value").tag("true").hidden_literal("true"))
        .production(Production::new("Value").tag("false").hidden_literal("false"))
        .production(Production::new("Value").tag("null").hidden_literal("null"))
        .production(Production::new("Value").tag("object").symbol("Object"))
        .production(Production::new("Value").tag("array").symbol("Array"))
        .production(Production::new("String").symbol("string"))
        .production(
            Production::new("Object")
                .tag("empty")
                .hidden_literal("{")
                .hidden_literal("}"),
        )
        .production(
            Production::new("Object")
                .tag("one")
                .hidden_literal("{")
                .symbol("String")
                .hidden_literal(":")
                .symbol("Value")
                .hidden_literal("}"),
        )
        .production(
            Production::new("Object")
                .tag("many")
                .hidden_literal("{")
                .symbol("Members")
                .symbol("String")
                .hidden_literal(":")
                .symbol("Value")
                .hidden_literal("}"),
        )
        .production(
            Production::new("Members")
                .tag("more")
                .symbol("Members")
                .symbol("String")
                .hidden_literal(":")
                .symbol("Value")
                .hidden_literal(","),
        )
        .production(
            Production::new("Members")
                .symbol("String")
                .hidden_literal(":")
                .symbol("Value")
                .hidden_literal(","),
        )
        .production(
            Production::new("Array")
                .tag("empty")
                .hidden_literal("[")
                .hidden_literal("]"),
        )
        .production(
            Production::new("Array")
                .tag("one")
                .hidden_literal("[")
                .symbol("Value")
                .hidden_literal("]"),
        )
        .production(
            Production::new("Array")
                .tag("many")
                .hidden_literal("[")
                .symbol("Elements")
                .symbol("Value")
                .hidden_literal("]"),
        )
        .production(
            Production::new("Elements")
                .tag("more")
                .symbol("Elements")
                .symbol("Value")
                .hidden_literal(","),
        )
        .production(
            Production::new("Elements")
                .symbol("Value")
                .hidden_literal(","),
        )
}

type JsonEvaluator<'e> = Evaluator<'e, JsonValue>;

fn value<'t>(
    node: &'t Node<JsonValue>,
    evaluator: &JsonEvaluator<'_>,
) -> Result<&'t JsonValue, ActionFailure> {
    node.made(evaluator)?
        .ok_or_else(|| ActionFailure::msg(format!("`{}` has no value", node.qualified_name())))
}

fn key(node: &Node<JsonValue>, evaluator: &JsonEvaluator<'_>) -> Result<String, ActionFailure> {
    match value(node, evaluator)? {
        JsonValue::String(string) => Ok(string.clone()),
        other => Err(ActionFailure::msg(format!("expected a string, got {:?}", other))),
    }
}

/// Walks a left-recursive `Members` or `Elements` list down its spine
///
/// Yields the visible children of each entry, first entry first. Collecting the whole list in
/// one place avoids rebuilding the collection once per element.
fn entries(list: &Node<JsonValue>) -> Vec<&[Node<JsonValue>]> {
    let mut entries = Vec::new();
    let mut current = list;
    loop {
        let children = current.children();
        match current.tag() {
            Some("more") if !children.is_empty() => {
                entries.push(&children[1..]);
                current = &children[0];
            }
            _ => {
                entries.push(children);
                break;
            }
        }
    }
    entries.reverse();
    entries
}

fn object(
    node: &Node<JsonValue>,
    evaluator: &JsonEvaluator<'_>,
) -> Result<JsonValue, ActionFailure> {
    let children = node.children();
    let mut object = HashMap::new();
    for member in entries(&children[0]).into_iter().chain(Some(&children[1..])) {
        let made = value(&member[1], evaluator)?.clone();
        object.insert(key(&member[0], evaluator)?, made);
    }
    Ok(JsonValue::Object(object))
}

fn array(
    node: &Node<JsonValue>,
    evaluator: &JsonEvaluator<'_>,
) -> Result<JsonValue, ActionFailure> {
    let children = node.children();
    let mut array = Vec::new();
    for element in entries(&children[0]).into_iter().chain(Some(&children[1..])) {
        array.push(value(&element[0], evaluator)?.clone());
    }
    Ok(JsonValue::Array(array))
}

fn actions() -> Actions<JsonValue> {
    Actions::<JsonValue>::new()
        .made("String", |args| {
            // Cuts at valid utf-8 borders because first and last character are always quotes
            let text = args.text(0)?;
            Ok(JsonValue::String(text[1..text.len() - 1].to_owned()))
        })
        .made("Value(number)", |args| {
            Ok(JsonValue::Number(args.text(0)?.parse::<f64>()?))
        })
        .bubble("Value(string)")
        .bubble("Value(object)")
        .bubble("Value(array)")
        .made("Value(true)", |_| Ok(JsonValue::True))
        .made("Value(false)", |_| Ok(JsonValue::False))
        .made("Value(null)", |_| Ok(JsonValue::Null))
        .made("Object(empty)", |_| Ok(JsonValue::Object(HashMap::new())))
        .node("Object(one)", |node, evaluator| {
            let children = node.children();
            let mut object = HashMap::new();
            let member = value(&children[1], evaluator)?.clone();
            object.insert(key(&children[0], evaluator)?, member);
            Ok(JsonValue::Object(object))
        })
        .node("Object(many)", object)
        .made("Array(empty)", |_| Ok(JsonValue::Array(Vec::new())))
        .made("Array(one)", |args| Ok(JsonValue::Array(vec![args.value(0)?.clone()])))
        .node("Array(many)", array)
}

lazy_static! {
    static ref PARSER: Parser<JsonValue> = Parser::build(grammar(), actions())
        .expect("json grammar is LR(0)")
        .prune(true);
}

pub fn parse_str(input: &str) -> Result<JsonValue, Error> {
    PARSER.parse_logos(Terminal::lexer(input))
}
