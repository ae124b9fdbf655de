//! Typed comparison of rule operands against metadata values.
//!
//! Ordering is always the rule operand compared to the node value, so
//! `GreaterThan` holds when the rule operand is the larger one. Values that
//! do not parse as the declared type never match.

use crate::types::{Operator, ValueType};
use chrono::{DateTime, FixedOffset, Utc};
use std::cmp::Ordering;

/// Rule operand that stands for the evaluation instant in date rules.
pub const TODAY: &str = "today";

/// Applies an operator to an ordering result.
pub fn compare(operator: Operator, ordering: Ordering) -> bool {
    operator.holds(ordering)
}

/// String membership: the value matches if it is one of the rule operands.
pub fn matches_string(values: &[String], value: &str) -> bool {
    values.iter().any(|v| v == value)
}

/// Compares two integers; false if either side is not an `i32`.
pub fn compare_int(operator: Operator, rule_value: &str, node_value: &str) -> bool {
    match (rule_value.parse::<i32>(), node_value.parse::<i32>()) {
        (Ok(rule), Ok(node)) => compare(operator, rule.cmp(&node)),
        _ => false,
    }
}

/// Compares two timestamps; false if either side does not parse.
///
/// A rule operand of `today` (any case) stands for `now`.
pub fn compare_date(
    operator: Operator,
    rule_value: &str,
    node_value: &str,
    format: &str,
    now: DateTime<Utc>,
) -> bool {
    let Some(node) = parse_date(node_value, format) else {
        return false;
    };
    let rule = if rule_value.eq_ignore_ascii_case(TODAY) {
        now
    } else {
        match parse_date(rule_value, format) {
            Some(date) => date,
            None => return false,
        }
    };
    compare(operator, rule.cmp(&node))
}

/// Parses a timestamp with `format`, falling back to RFC 3339.
pub fn parse_date(value: &str, format: &str) -> Option<DateTime<Utc>> {
    DateTime::<FixedOffset>::parse_from_str(value, format)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Compares one metadata value against the rule operands.
///
/// Strings use membership over all operands and ignore the operator; ints
/// and dates use the first operand only.
pub fn compare_typed(
    value_type: ValueType,
    operator: Operator,
    values: &[String],
    node_value: &str,
    date_format: &str,
    now: DateTime<Utc>,
) -> bool {
    match value_type {
        ValueType::String => matches_string(values, node_value),
        ValueType::Int => values
            .first()
            .map(|rule| compare_int(operator, rule, node_value))
            .unwrap_or(false),
        ValueType::Date => values
            .first()
            .map(|rule| compare_date(operator, rule, node_value, date_format, now))
            .unwrap_or(false),
    }
}
