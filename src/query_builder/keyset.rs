//! Keyset predicate composition.
//!
//! For a reference record `r` and conditions `c₀ … cₙ`, a record is on a side
//! of `r` iff its first key is strictly on that side, or the first key ties and
//! the remaining keys are on that side:
//!
//! ```text
//! x₀ OR (y₀ AND (x₁ OR (y₁ AND … xₙ)))
//! ```
//!
//! `xᵢ` is the strict relative term of `cᵢ` and `yᵢ` its tie term. A unique
//! condition has no tie term and ends the chain.

use super::conditions::{format_value, Term};
use super::order::{OrderSpace, Side};
use super::record::RecordValues;
use super::relative::{equality_term, relative_term};
use crate::config::PredicateConfig;
use crate::constants::sql::{EMPTY_LIST, PLACEHOLDER};
use crate::error::Result;
use crate::logging::{log_error, log_predicate_operation};
use serde_json::Value;
use tracing::debug;

/// Relative and tie terms of one condition
#[derive(Debug, Clone)]
struct TermPair {
    relative: Term,
    /// `None` for unique conditions
    tie: Option<Term>,
}

impl TermPair {
    /// Number of concrete fragments in the pair; sentinels do not count
    fn effective_len(&self) -> usize {
        usize::from(self.relative.is_concrete())
            + usize::from(self.tie.as_ref().is_some_and(Term::is_concrete))
    }
}

/// A rendered keyset predicate: SQL with `?` placeholders and its parameters.
///
/// List-valued parameters (`Value::Array`) bind to a single `IN (?)`
/// placeholder and must be expanded by the executing layer, see
/// [`Predicate::to_numbered_sql`].
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Predicate {
    pub fn from_term(term: Term) -> Self {
        let (sql, params) = term.into_parts();
        Self { sql, params }
    }

    /// Empty SQL: no restriction, omit the WHERE clause
    pub fn is_unrestricted(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Rewrite placeholders to PostgreSQL `$n` form starting at `$start`.
    ///
    /// List parameters expand to one placeholder per element and their values
    /// are flattened into the returned parameter list. An empty list renders
    /// as `NULL`.
    pub fn to_numbered_sql(&self, start: usize) -> (String, Vec<Value>) {
        let mut sql = String::with_capacity(self.sql.len() + self.params.len() * 2);
        let mut params = Vec::with_capacity(self.params.len());
        let mut next = start;
        let mut values = self.params.iter();

        for ch in self.sql.chars() {
            if ch != PLACEHOLDER {
                sql.push(ch);
                continue;
            }
            match values.next() {
                Some(Value::Array(items)) if items.is_empty() => sql.push_str(EMPTY_LIST),
                Some(Value::Array(items)) => {
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            sql.push_str(", ");
                        }
                        sql.push_str(&format!("${next}"));
                        params.push(item.clone());
                        next += 1;
                    }
                }
                Some(value) => {
                    params.push(value.clone());
                    sql.push_str(&format!("${next}"));
                    next += 1;
                }
                None => sql.push(ch),
            }
        }

        (sql, params)
    }

    /// Render with parameters inlined as SQL literals, for logs and diagnostics
    pub fn to_inline_sql(&self) -> String {
        let mut sql = String::with_capacity(self.sql.len());
        let mut values = self.params.iter();
        for ch in self.sql.chars() {
            match (ch == PLACEHOLDER).then(|| values.next()).flatten() {
                Some(value) => sql.push_str(&format_value(value)),
                None => sql.push(ch),
            }
        }
        sql
    }
}

/// Builds keyset predicates for one order space
#[derive(Debug, Clone)]
pub struct KeysetPredicateBuilder<'a> {
    space: &'a OrderSpace,
    config: PredicateConfig,
}

impl<'a> KeysetPredicateBuilder<'a> {
    pub fn new(space: &'a OrderSpace, config: PredicateConfig) -> Self {
        Self { space, config }
    }

    pub fn space(&self) -> &OrderSpace {
        self.space
    }

    pub fn config(&self) -> PredicateConfig {
        self.config
    }

    /// Records sorting strictly before `record`
    pub fn before<R: RecordValues + ?Sized>(&self, record: &R) -> Result<Predicate> {
        self.build(record, Side::Before)
    }

    /// Records sorting strictly after `record`
    pub fn after<R: RecordValues + ?Sized>(&self, record: &R) -> Result<Predicate> {
        self.build(record, Side::After)
    }

    pub fn build<R: RecordValues + ?Sized>(&self, record: &R, side: Side) -> Result<Predicate> {
        match self.build_term(record, side) {
            Ok(term) => {
                let predicate = Predicate::from_term(term);
                log_predicate_operation(
                    "build_predicate",
                    side,
                    self.space.len(),
                    predicate.params.len(),
                    "success",
                    None,
                );
                Ok(predicate)
            }
            Err(e) => {
                log_error(
                    "keyset",
                    "build_predicate",
                    &e.to_string(),
                    Some(&format!("side={side}")),
                );
                Err(e)
            }
        }
    }

    /// Build the predicate as a [`Term`], keeping the sentinels distinguishable
    pub fn build_term<R: RecordValues + ?Sized>(&self, record: &R, side: Side) -> Result<Term> {
        let conditions = self.space.conditions();

        let values = conditions
            .iter()
            .map(|condition| record.attribute(&condition.name))
            .collect::<Result<Vec<Value>>>()?;

        let pairs = conditions
            .iter()
            .zip(&values)
            .map(|(condition, value)| {
                Ok(TermPair {
                    relative: relative_term(condition, value, side, true)?,
                    tie: if condition.unique {
                        None
                    } else {
                        Some(equality_term(condition, value)?)
                    },
                })
            })
            .collect::<Result<Vec<TermPair>>>()?;

        let leading = pairs
            .iter()
            .position(|pair| pair.effective_len() > 0)
            .filter(|&index| pairs[index].effective_len() == 2);

        let (composed, tie_branch) = compose(pairs, leading);
        let restructure = leading
            .filter(|_| self.config.wrap_top_level_or && tie_branch && composed.is_concrete());

        let term = match restructure {
            Some(index) => {
                let seek = relative_term(&conditions[index], &values[index], side, false)?;
                seek.and(composed.parenthesized())
            }
            None => composed,
        };

        debug!(
            side = %side,
            conditions = conditions.len(),
            restructured = restructure.is_some(),
            params = term.param_count(),
            "composed keyset predicate"
        );

        Ok(term)
    }
}

/// Right fold over the pairs, innermost condition first.
///
/// Also reports whether the tie branch of the pair at `leading` survived,
/// i.e. whether that step produced `x OR (y AND rest)` rather than just `x`.
fn compose(pairs: Vec<TermPair>, leading: Option<usize>) -> (Term, bool) {
    let mut rest = Term::Never;
    let mut tie_branch = false;

    for (index, pair) in pairs.into_iter().enumerate().rev() {
        if leading == Some(index) {
            tie_branch = !matches!(rest, Term::Never);
        }
        rest = match pair.tie {
            None => pair.relative,
            Some(tie) => pair.relative.or(tie.and(rest)),
        };
    }

    (rest, tie_branch)
}

/// Build the predicate selecting the records strictly on `side` of `record`
pub fn build_predicate<R: RecordValues + ?Sized>(
    record: &R,
    space: &OrderSpace,
    side: Side,
    config: PredicateConfig,
) -> Result<Predicate> {
    KeysetPredicateBuilder::new(space, config).build(record, side)
}
