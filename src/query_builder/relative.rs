//! Leaf terms: per-condition relative and tie-break conditions.

use super::conditions::Term;
use super::order::{Direction, OrderCondition, Side};
use crate::error::{KeysetError, Result};
use serde_json::Value;
use tracing::trace;

/// Comparison operator selecting the values on `side` of the reference
fn comparison_operator(direction: Direction, side: Side, strict: bool) -> &'static str {
    match (side.ascends(direction), strict) {
        (true, true) => ">",
        (true, false) => ">=",
        (false, true) => "<",
        (false, false) => "<=",
    }
}

/// Term matching values of `condition` on `side` of the reference `value`.
///
/// Strict excludes the reference value itself, non-strict includes it.
pub fn relative_term(
    condition: &OrderCondition,
    value: &Value,
    side: Side,
    strict: bool,
) -> Result<Term> {
    let term = match &condition.enumeration {
        Some(enumeration) => {
            let position = enumeration.position(value).ok_or_else(|| {
                KeysetError::ValueOutsideEnumeration {
                    name: condition.name.clone(),
                    value: value.clone(),
                }
            })?;
            let subset = enumeration.side_of(position, side, condition.direction, strict);

            if enumeration.complete && subset.len() == enumeration.len() {
                Term::Identity
            } else {
                Term::membership(&condition.column, subset)
            }
        }
        None if value.is_null() => null_relative_term(condition, side, strict)?,
        None => {
            let operator = comparison_operator(condition.direction, side, strict);
            let comparison = Term::comparison(&condition.column, operator, value.clone());
            match condition.nulls {
                Some(nulls) if nulls.lies_on(side) => {
                    comparison.or(Term::is_null(&condition.column))
                }
                _ => comparison,
            }
        }
    };

    trace!(
        condition = %condition.name,
        side = %side,
        strict = strict,
        sql = %term.to_sql(),
        "relative term"
    );

    Ok(term)
}

/// Relative term when the reference value is NULL
fn null_relative_term(condition: &OrderCondition, side: Side, strict: bool) -> Result<Term> {
    let nulls = condition
        .nulls
        .ok_or_else(|| KeysetError::NullReferenceValue {
            name: condition.name.clone(),
        })?;

    Ok(match (nulls.lies_on(side), strict) {
        (true, true) => Term::Never,
        (true, false) => Term::is_null(&condition.column),
        (false, true) => Term::is_not_null(&condition.column),
        (false, false) => Term::Identity,
    })
}

/// Tie-break term: `condition` equals the reference `value`
pub fn equality_term(condition: &OrderCondition, value: &Value) -> Result<Term> {
    if value.is_null() {
        if condition.nulls.is_none() {
            return Err(KeysetError::NullReferenceValue {
                name: condition.name.clone(),
            });
        }
        return Ok(Term::is_null(&condition.column));
    }

    Ok(Term::equals(&condition.column, value.clone()))
}
