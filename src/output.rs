//! JSON rendering of token streams and syntax trees.
//!
//! Every node becomes an object tagged with a `"type"` field, so a code
//! generator in any language can walk the tree without linking this crate.
//!
//! # Examples
//!
//! ```
//! use pseudo_lang::{parse_source, program_to_json};
//!
//! let program = parse_source("A = 1 + 2").unwrap();
//! let json = program_to_json(&program);
//! assert_eq!(json[0]["type"], "Assignment");
//! assert_eq!(json[0]["value"]["op"], "+");
//! ```

use serde_json::{Value as Json, json};

use crate::ast::{Branch, Expr, LeftSide, Statement, Token, Value};

/// Renders `(offset, token)` pairs.
pub fn tokens_to_json(tokens: &[(usize, Token)]) -> Json {
    Json::Array(
        tokens
            .iter()
            .map(|(offset, token)| {
                let mut object = token_to_json(token);
                object["offset"] = json!(offset);
                object
            })
            .collect(),
    )
}

pub fn token_to_json(token: &Token) -> Json {
    match token {
        Token::Bool(b) => json!({"type": "Bool", "value": b}),
        Token::Integer(n) => json!({"type": "Integer", "value": n}),
        Token::Decimal(n) => json!({"type": "Decimal", "value": number(*n)}),
        Token::Str(s) => json!({"type": "Str", "value": s}),
        Token::VariableName(name) => json!({"type": "VariableName", "name": name}),
        Token::MethodName(name) => json!({"type": "MethodName", "name": name}),
        Token::ClassName(name) => json!({"type": "ClassName", "name": name}),
        Token::Defined(d) => json!({"type": "Defined", "kind": format!("{:?}", d), "literal": d.literal()}),
    }
}

pub fn program_to_json(statements: &[Statement]) -> Json {
    Json::Array(statements.iter().map(statement_to_json).collect())
}

pub fn statement_to_json(statement: &Statement) -> Json {
    match statement {
        Statement::MethodCall { name, args } => json!({
            "type": "MethodCall",
            "name": name,
            "args": expressions(args),
        }),
        Statement::Output(exprs) => json!({"type": "Output", "values": expressions(exprs)}),
        Statement::Input(name) => json!({"type": "Input", "variable": name}),
        Statement::If(branches) => json!({
            "type": "If",
            "branches": branches.iter().map(branch_to_json).collect::<Vec<_>>(),
        }),
        Statement::LoopWhile { condition, body } => json!({
            "type": "LoopWhile",
            "condition": expr_to_json(condition),
            "body": program_to_json(body),
        }),
        Statement::LoopUntil { condition, body } => json!({
            "type": "LoopUntil",
            "condition": expr_to_json(condition),
            "body": program_to_json(body),
        }),
        Statement::LoopRange {
            variable,
            start,
            end,
            body,
        } => json!({
            "type": "LoopRange",
            "variable": variable,
            "start": expr_to_json(start),
            "end": expr_to_json(end),
            "body": program_to_json(body),
        }),
        Statement::MethodDefinition { name, params, body } => json!({
            "type": "MethodDefinition",
            "name": name,
            "params": params,
            "body": program_to_json(body),
        }),
        Statement::Assignment { target, value } => json!({
            "type": "Assignment",
            "target": target_to_json(target),
            "value": expr_to_json(value),
        }),
    }
}

fn branch_to_json(branch: &Branch) -> Json {
    json!({
        "condition": expr_to_json(&branch.condition),
        "body": program_to_json(&branch.body),
    })
}

fn target_to_json(target: &LeftSide) -> Json {
    match target {
        LeftSide::Variable(name) => json!({"type": "Variable", "name": name}),
        LeftSide::ArrayAccess { array, index } => json!({
            "type": "ArrayAccess",
            "array": array,
            "index": expr_to_json(index),
        }),
    }
}

pub fn expr_to_json(expr: &Expr) -> Json {
    match expr {
        Expr::Value(value) => value_to_json(value),
        Expr::ArrayLiteral(items) => json!({"type": "ArrayLiteral", "items": expressions(items)}),
        Expr::UnaryOperation { op, operand } => json!({
            "type": "UnaryOperation",
            "op": op.token().literal(),
            "operand": expr_to_json(operand),
        }),
        Expr::BinaryOperation { op, left, right } => json!({
            "type": "BinaryOperation",
            "op": op.token().literal(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::ArrayAccess { array, index } => json!({
            "type": "ArrayAccess",
            "array": array,
            "index": expr_to_json(index),
        }),
        Expr::MethodCall { name, args } => json!({
            "type": "MethodCall",
            "name": name,
            "args": expressions(args),
        }),
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Bool(b) => json!({"type": "Value", "value": b}),
        Value::Integer(n) => json!({"type": "Value", "value": n}),
        Value::Decimal(n) => json!({"type": "Value", "value": number(*n)}),
        Value::Str(s) => json!({"type": "Value", "value": s}),
        Value::Variable(name) => json!({"type": "Variable", "name": name}),
    }
}

fn expressions(exprs: &[Expr]) -> Json {
    Json::Array(exprs.iter().map(expr_to_json).collect())
}

/// Non-finite decimals have no JSON spelling.
fn number(n: f64) -> Json {
    serde_json::Number::from_f64(n)
        .map(Json::Number)
        .unwrap_or(Json::Null)
}
