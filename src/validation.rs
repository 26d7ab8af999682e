//! Input validation for ordering specifications
//!
//! Rejects malformed order spaces when they are constructed so that predicate
//! building can assume a well-formed lexicographic key.

use crate::constants::sql::PLACEHOLDER;
use crate::error::{KeysetError, Result};
use crate::query_builder::order::OrderCondition;

/// Validates an ordering specification.
///
/// A valid specification is non-empty, ends with a unique condition and has
/// no condition after a unique one. Names and columns must be non-blank and
/// columns must not contain the `?` placeholder. Enumerations must be
/// non-empty, free of duplicates and NULLs, and cannot be combined with a
/// NULL placement.
pub fn validate_order_conditions(conditions: &[OrderCondition]) -> Result<()> {
    let Some(last) = conditions.last() else {
        return Err(KeysetError::invalid_order_space(
            "at least one condition is required",
        ));
    };

    for (index, condition) in conditions.iter().enumerate() {
        validate_condition(condition)?;

        if condition.unique && index + 1 < conditions.len() {
            return Err(KeysetError::invalid_order_space(format!(
                "condition '{}' is unique but followed by {} more condition(s)",
                condition.name,
                conditions.len() - index - 1
            )));
        }
    }

    if !last.unique {
        return Err(KeysetError::invalid_order_space(format!(
            "last condition '{}' must be unique to totally order records",
            last.name
        )));
    }

    Ok(())
}

fn validate_condition(condition: &OrderCondition) -> Result<()> {
    if condition.name.trim().is_empty() {
        return Err(KeysetError::invalid_order_space(
            "condition name must not be blank",
        ));
    }

    if condition.column.trim().is_empty() {
        return Err(KeysetError::invalid_order_space(format!(
            "condition '{}' has a blank column",
            condition.name
        )));
    }

    if condition.column.contains(PLACEHOLDER) {
        return Err(KeysetError::invalid_order_space(format!(
            "column '{}' contains the placeholder character '{PLACEHOLDER}'",
            condition.column
        )));
    }

    if let Some(enumeration) = &condition.enumeration {
        if enumeration.is_empty() {
            return Err(KeysetError::invalid_order_space(format!(
                "enumeration of '{}' is empty",
                condition.name
            )));
        }

        if condition.nulls.is_some() {
            return Err(KeysetError::invalid_order_space(format!(
                "enumerated condition '{}' cannot declare a nulls placement",
                condition.name
            )));
        }

        for (index, value) in enumeration.values.iter().enumerate() {
            if value.is_null() {
                return Err(KeysetError::invalid_order_space(format!(
                    "enumeration of '{}' contains NULL",
                    condition.name
                )));
            }
            if enumeration.position(value) != Some(index) {
                return Err(KeysetError::invalid_order_space(format!(
                    "enumeration of '{}' lists {value} more than once",
                    condition.name
                )));
            }
        }
    }

    Ok(())
}
