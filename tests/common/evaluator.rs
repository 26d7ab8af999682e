//! Evaluates emitted predicate fragments against in-memory rows.
//!
//! Understands exactly the grammar the builder produces: AND/OR chains,
//! parentheses, `col <op> ?`, `col IN (?)`, `col IS [NOT] NULL` and `1=0`,
//! using SQL three-valued logic (`None` is UNKNOWN).

use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::slice::Iter;

/// Whether `row` satisfies the predicate as a WHERE clause would
pub fn matches(sql: &str, params: &[Value], row: &Map<String, Value>) -> bool {
    if sql.is_empty() {
        return true;
    }

    let mut parser = Parser {
        tokens: tokenize(sql),
        pos: 0,
        params: params.iter(),
        row,
    };
    let result = parser.expr();

    assert_eq!(parser.pos, parser.tokens.len(), "unparsed input in `{sql}`");
    assert!(parser.params.next().is_none(), "unused parameters for `{sql}`");

    result == Some(true)
}

fn tokenize(sql: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in sql.chars() {
        match ch {
            '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

struct Parser<'a> {
    tokens: Vec<String>,
    pos: usize,
    params: Iter<'a, Value>,
    row: &'a Map<String, Value>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn next_token(&mut self) -> String {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .unwrap_or_else(|| panic!("unexpected end of predicate"));
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: &str) {
        let token = self.next_token();
        assert_eq!(token, expected, "unexpected token at {}", self.pos - 1);
    }

    fn param(&mut self) -> Value {
        self.params
            .next()
            .cloned()
            .unwrap_or_else(|| panic!("missing parameter"))
    }

    fn expr(&mut self) -> Option<bool> {
        let mut value = self.conjunction();
        while self.peek() == Some("OR") {
            self.pos += 1;
            let rhs = self.conjunction();
            value = or(value, rhs);
        }
        value
    }

    fn conjunction(&mut self) -> Option<bool> {
        let mut value = self.atom();
        while self.peek() == Some("AND") {
            self.pos += 1;
            let rhs = self.atom();
            value = and(value, rhs);
        }
        value
    }

    fn atom(&mut self) -> Option<bool> {
        let token = self.next_token();
        if token == "(" {
            let value = self.expr();
            self.expect(")");
            return value;
        }
        if token == "1=0" {
            return Some(false);
        }

        let column = self
            .row
            .get(&token)
            .cloned()
            .unwrap_or_else(|| panic!("unknown column `{token}`"));

        match self.next_token().as_str() {
            "IS" => {
                if self.peek() == Some("NOT") {
                    self.pos += 1;
                    self.expect("NULL");
                    Some(!column.is_null())
                } else {
                    self.expect("NULL");
                    Some(column.is_null())
                }
            }
            "IN" => {
                self.expect("(");
                self.expect("?");
                self.expect(")");
                let Value::Array(items) = self.param() else {
                    panic!("IN expects a list parameter");
                };
                if column.is_null() {
                    None
                } else {
                    Some(items.contains(&column))
                }
            }
            op => {
                let op = op.to_string();
                self.expect("?");
                let value = self.param();
                compare(&column, &op, &value)
            }
        }
    }
}

fn or(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

fn and(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

fn compare(column: &Value, op: &str, value: &Value) -> Option<bool> {
    if column.is_null() || value.is_null() {
        return None;
    }
    let ordering = cmp_values(column, value);
    Some(match op {
        "<" => ordering == Ordering::Less,
        "<=" => ordering != Ordering::Greater,
        ">" => ordering == Ordering::Greater,
        ">=" => ordering != Ordering::Less,
        "=" => ordering == Ordering::Equal,
        other => panic!("unsupported operator `{other}`"),
    })
}

/// Order two non-null JSON scalars of the same kind
pub fn cmp_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_i64()
            .zip(y.as_i64())
            .map(|(x, y)| x.cmp(&y))
            .unwrap_or_else(|| panic!("non-integer numbers {x} and {y}")),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => panic!("cannot compare {a} with {b}"),
    }
}

#[test]
fn evaluator_handles_three_valued_logic() {
    let row = serde_json::json!({"a": null, "b": 2}).as_object().cloned().unwrap();
    assert!(!matches("a > ?", &[Value::from(1)], &row));
    assert!(matches("a > ? OR b = ?", &[Value::from(1), Value::from(2)], &row));
    assert!(matches("(a IS NULL AND b IN (?))", &[serde_json::json!([1, 2])], &row));
    assert!(!matches("1=0", &[], &row));
    assert!(matches("", &[], &row));
}
