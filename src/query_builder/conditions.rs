use crate::constants::sql;
use serde_json::Value;

/// Boolean operator used to join predicate terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    fn as_sql(self) -> &'static str {
        match self {
            LogicalOperator::And => sql::AND,
            LogicalOperator::Or => sql::OR,
        }
    }
}

/// A concrete SQL predicate fragment with `?` placeholders and its parameters,
/// in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    sql: String,
    params: Vec<Value>,
    /// Top level is a bare AND/OR chain and needs parentheses as an operand
    compound: bool,
}

impl Fragment {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
            compound: false,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn is_compound(&self) -> bool {
        self.compound
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Wrap in parentheses unconditionally
    fn parenthesized(self) -> Self {
        Self {
            sql: format!("({})", self.sql),
            params: self.params,
            compound: false,
        }
    }

    fn as_operand(self) -> Self {
        if self.compound {
            self.parenthesized()
        } else {
            self
        }
    }
}

/// A predicate term: either a concrete fragment or one of the two sentinels.
///
/// The sentinels are algebraic and never compared by text:
///
/// - `Identity` is always true. It absorbs an OR and vanishes from an AND.
/// - `Never` is always false. It vanishes from an OR and absorbs an AND.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Identity,
    Never,
    Fragment(Fragment),
}

impl Term {
    pub fn fragment(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Term::Fragment(Fragment::new(sql, params))
    }

    /// `column <operator> ?`
    pub fn comparison(column: &str, operator: &str, value: Value) -> Self {
        Term::fragment(format!("{column} {operator} ?"), vec![value])
    }

    /// `column = ?`
    pub fn equals(column: &str, value: Value) -> Self {
        Term::comparison(column, "=", value)
    }

    pub fn is_null(column: &str) -> Self {
        Term::fragment(format!("{column} IS NULL"), Vec::new())
    }

    pub fn is_not_null(column: &str) -> Self {
        Term::fragment(format!("{column} IS NOT NULL"), Vec::new())
    }

    /// Membership of `column` in a value set.
    ///
    /// No values is `Never`, one value is an equality, more values bind a
    /// single list parameter to `column IN (?)`.
    pub fn membership(column: &str, mut values: Vec<Value>) -> Self {
        match values.len() {
            0 => Term::Never,
            1 => Term::equals(column, values.remove(0)),
            _ => Term::fragment(format!("{column} IN (?)"), vec![Value::Array(values)]),
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Term::Fragment(_))
    }

    pub fn and(self, other: Term) -> Term {
        Term::join(LogicalOperator::And, [self, other])
    }

    pub fn or(self, other: Term) -> Term {
        Term::join(LogicalOperator::Or, [self, other])
    }

    /// Join terms with a boolean operator, applying the sentinel algebra.
    ///
    /// Compound operands are parenthesized; parameters are concatenated
    /// left to right.
    pub fn join(operator: LogicalOperator, terms: impl IntoIterator<Item = Term>) -> Term {
        let mut parts: Vec<Fragment> = Vec::new();

        for term in terms {
            match (operator, term) {
                (LogicalOperator::And, Term::Identity) | (LogicalOperator::Or, Term::Never) => {}
                (LogicalOperator::And, Term::Never) => return Term::Never,
                (LogicalOperator::Or, Term::Identity) => return Term::Identity,
                (_, Term::Fragment(fragment)) => parts.push(fragment),
            }
        }

        match parts.len() {
            0 => match operator {
                LogicalOperator::And => Term::Identity,
                LogicalOperator::Or => Term::Never,
            },
            1 => Term::Fragment(parts.remove(0)),
            _ => {
                let mut sql_parts = Vec::with_capacity(parts.len());
                let mut params = Vec::new();
                for part in parts {
                    let operand = part.as_operand();
                    sql_parts.push(operand.sql);
                    params.extend(operand.params);
                }
                Term::Fragment(Fragment {
                    sql: sql_parts.join(operator.as_sql()),
                    params,
                    compound: true,
                })
            }
        }
    }

    /// Wrap a concrete term in parentheses; sentinels are returned unchanged
    pub fn parenthesized(self) -> Term {
        match self {
            Term::Fragment(fragment) => Term::Fragment(fragment.parenthesized()),
            sentinel => sentinel,
        }
    }

    /// Number of bound parameters (list parameters count once)
    pub fn param_count(&self) -> usize {
        match self {
            Term::Fragment(fragment) => fragment.params.len(),
            Term::Identity | Term::Never => 0,
        }
    }

    /// Render as SQL text: `Identity` is empty, `Never` is always false
    pub fn to_sql(&self) -> String {
        match self {
            Term::Identity => String::new(),
            Term::Never => sql::ALWAYS_FALSE.to_string(),
            Term::Fragment(fragment) => fragment.sql.clone(),
        }
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        match self {
            Term::Fragment(fragment) => fragment.into_parts(),
            sentinel => (sentinel.to_sql(), Vec::new()),
        }
    }
}

/// Format a JSON value as an SQL literal
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Array(items) if items.is_empty() => sql::EMPTY_LIST.to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => format!("'{}'", value.to_string().replace('\'', "''")),
    }
}
