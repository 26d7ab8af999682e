//! # PostgreSQL Binding
//!
//! Appends keyset predicates to a [`sqlx::QueryBuilder`], expanding list
//! parameters into one bind per element. Strings and integers beyond the
//! `bigint` range are bound as `unknown` so the server infers their type from
//! the compared column (`timestamptz`, `uuid`, `numeric`, ...).
//!
//! ```rust,no_run
//! use keyset_core::postgres::push_predicate;
//! use keyset_core::{build_predicate, OrderCondition, OrderSpace, PredicateConfig, Side};
//! use sqlx::{Postgres, QueryBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let space = OrderSpace::new(vec![
//!     OrderCondition::desc("score"),
//!     OrderCondition::asc("id").unique(),
//! ])?;
//! let cursor = serde_json::json!({"score": 10, "id": 7});
//! let predicate = build_predicate(&cursor, &space, Side::After, PredicateConfig::default())?;
//!
//! let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM posts");
//! push_predicate(&mut query, &predicate);
//! # Ok(())
//! # }
//! ```

use crate::constants::sql::{EMPTY_LIST, PLACEHOLDER};
use crate::query_builder::keyset::Predicate;
use serde_json::Value;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::types::Oid;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo};
use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Append ` WHERE <predicate>`; an unrestricted predicate appends nothing
pub fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    if predicate.is_unrestricted() {
        return;
    }
    builder.push(" WHERE ");
    push_condition(builder, predicate);
}

/// Append the predicate SQL as-is, e.g. after an existing `WHERE ... AND `
pub fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    let mut values = predicate.params.iter();
    let mut segments = predicate.sql.split(PLACEHOLDER).peekable();

    while let Some(segment) = segments.next() {
        builder.push(segment);
        if segments.peek().is_none() {
            break;
        }
        match values.next() {
            Some(Value::Array(items)) if items.is_empty() => {
                builder.push(EMPTY_LIST);
            }
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        builder.push(", ");
                    }
                    push_value(builder, item);
                }
            }
            Some(value) => push_value(builder, value),
            None => {
                builder.push(PLACEHOLDER);
            }
        }
    }
}

/// Bind value for one JSON parameter
#[derive(Debug, Clone, PartialEq)]
enum PgBind {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Text sent with the `unknown` type so the server resolves it against the column
    Untyped(String),
    Json(Value),
}

impl PgBind {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => PgBind::Null,
            Value::Bool(b) => PgBind::Bool(*b),
            Value::Number(n) => match (n.as_i64(), n.is_f64()) {
                (Some(i), _) => PgBind::Int(i),
                (None, true) => PgBind::Float(n.as_f64().unwrap_or(f64::NAN)),
                // u64 beyond i64::MAX
                (None, false) => PgBind::Untyped(n.to_string()),
            },
            Value::String(s) => PgBind::Untyped(s.clone()),
            Value::Array(_) | Value::Object(_) => PgBind::Json(value.clone()),
        }
    }
}

/// String parameter declared as the Postgres `unknown` pseudo-type
#[derive(Debug, Clone, PartialEq)]
struct UntypedText(String);

/// OID of the `unknown` pseudo-type
const UNKNOWN_OID: Oid = Oid(705);

impl Type<Postgres> for UntypedText {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_oid(UNKNOWN_OID)
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}

impl Encode<'_, Postgres> for UntypedText {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <String as Encode<'_, Postgres>>::encode_by_ref(&self.0, buf)
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &Value) {
    match PgBind::from_value(value) {
        PgBind::Null => {
            builder.push_bind(None::<UntypedText>);
        }
        PgBind::Bool(b) => {
            builder.push_bind(b);
        }
        PgBind::Int(i) => {
            builder.push_bind(i);
        }
        PgBind::Float(f) => {
            builder.push_bind(f);
        }
        PgBind::Untyped(text) => {
            builder.push_bind(UntypedText(text));
        }
        PgBind::Json(json) => {
            builder.push_bind(sqlx::types::Json(json));
        }
    }
}
