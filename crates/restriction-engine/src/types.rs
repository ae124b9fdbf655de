//! Core types for the restriction engine.

use crate::error::{RestrictionError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Whether a rule grants or withholds access where it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Allow,
    Deny,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Allow => "allow",
            AccessType::Deny => "deny",
        }
    }
}

impl FromStr for AccessType {
    type Err = RestrictionError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("allow") {
            Ok(AccessType::Allow)
        } else if s.eq_ignore_ascii_case("deny") {
            Ok(AccessType::Deny)
        } else {
            Err(RestrictionError::UnknownAccessType(s.to_string()))
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How metadata values are compared against the rule operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Date,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Date => "date",
        }
    }
}

impl FromStr for ValueType {
    type Err = RestrictionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(ValueType::String),
            "int" => Ok(ValueType::Int),
            "date" => Ok(ValueType::Date),
            _ => Err(RestrictionError::UnknownValueType(s.to_string())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator shared by the property and depth rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    GreaterThanOrEqual,
    LessThanOrEqual,
    GreaterThan,
    LessThan,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThanOrEqual => "less_than_or_equal",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
        }
    }

    /// Returns true if `ordering` (left compared to right) satisfies this operator.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Equals => ordering == Ordering::Equal,
            Operator::GreaterThanOrEqual => ordering != Ordering::Less,
            Operator::LessThanOrEqual => ordering != Ordering::Greater,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::LessThan => ordering == Ordering::Less,
        }
    }

    /// Returns true for `<` and `<=`.
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Operator::LessThan | Operator::LessThanOrEqual)
    }

    /// Spellings of this operator in the rule encodings.
    pub fn tokens(&self) -> &'static OperatorToken {
        let index = match self {
            Operator::GreaterThanOrEqual => 0,
            Operator::LessThanOrEqual => 1,
            Operator::Equals => 2,
            Operator::GreaterThan => 3,
            Operator::LessThan => 4,
        };
        &OPERATOR_TOKENS[index]
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spelling of one operator in each rule encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorToken {
    pub operator: Operator,
    pub compact: &'static str,
    pub legacy: &'static str,
}

/// Every operator with its tokens, longest compact token first.
pub const OPERATOR_TOKENS: [OperatorToken; 5] = [
    OperatorToken {
        operator: Operator::GreaterThanOrEqual,
        compact: ">=",
        legacy: "_GREATER_THAN_EQUALS_",
    },
    OperatorToken {
        operator: Operator::LessThanOrEqual,
        compact: "<=",
        legacy: "_LESS_THAN_EQUALS_",
    },
    OperatorToken {
        operator: Operator::Equals,
        compact: "==",
        legacy: "_EQUALS_",
    },
    OperatorToken {
        operator: Operator::GreaterThan,
        compact: ">",
        legacy: "_GREATER_THEN_",
    },
    OperatorToken {
        operator: Operator::LessThan,
        compact: "<",
        legacy: "_LESS_THEN_",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_type_parsing() {
        assert_eq!("deny".parse::<AccessType>().unwrap(), AccessType::Deny);
        assert_eq!("ALLOW".parse::<AccessType>().unwrap(), AccessType::Allow);
        assert!(matches!(
            "grant".parse::<AccessType>(),
            Err(RestrictionError::UnknownAccessType(_))
        ));
    }

    #[test]
    fn test_value_type_parsing() {
        assert_eq!("int".parse::<ValueType>().unwrap(), ValueType::Int);
        assert_eq!("Date".parse::<ValueType>().unwrap(), ValueType::Date);
        assert!("float".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_operator_holds() {
        assert!(Operator::Equals.holds(Ordering::Equal));
        assert!(!Operator::Equals.holds(Ordering::Less));
        assert!(Operator::GreaterThanOrEqual.holds(Ordering::Equal));
        assert!(Operator::GreaterThanOrEqual.holds(Ordering::Greater));
        assert!(!Operator::GreaterThanOrEqual.holds(Ordering::Less));
        assert!(Operator::LessThanOrEqual.holds(Ordering::Less));
        assert!(!Operator::LessThanOrEqual.holds(Ordering::Greater));
        assert!(Operator::GreaterThan.holds(Ordering::Greater));
        assert!(!Operator::GreaterThan.holds(Ordering::Equal));
        assert!(Operator::LessThan.holds(Ordering::Less));
        assert!(!Operator::LessThan.holds(Ordering::Equal));
    }

    #[test]
    fn test_operator_tokens() {
        for token in &OPERATOR_TOKENS {
            assert_eq!(token.operator.tokens(), token);
        }
        assert_eq!(Operator::Equals.tokens().compact, "==");
        assert_eq!(Operator::GreaterThanOrEqual.tokens().legacy, "_GREATER_THAN_EQUALS_");
        assert_eq!(Operator::LessThan.tokens().compact, "<");
    }
}
