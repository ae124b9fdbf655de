//! Restriction rule decoder.
//!
//! Two encodings are understood:
//!
//! - **v2** (canonical): `deny#string$!cq:tags==portrait,landscape` for
//!   property rules and `deny#!>=2` for depth rules. Operators are `==`
//!   (or `=`), `>=`, `<=`, `>`, `<`.
//! - **v1** (legacy): `deny_string_!cq:tags_EQUALS_portrait` and
//!   `deny_GREATER_THAN_EQUALS_2`, with `_EQUALS_`, `_GREATER_THAN_EQUALS_`,
//!   `_LESS_THAN_EQUALS_`, `_GREATER_THEN_` and `_LESS_THEN_`.
//!
//! A `v<N>:` header pins the encoding; without one it is inferred from the
//! separator that follows the access type. Operators are lexed at their
//! earliest position, longest token first, so `>=` never reads as `>`.

use crate::error::{RestrictionError, Result};
use crate::rule::{DepthRule, PropertyRule};
use crate::types::{AccessType, Operator, ValueType, OPERATOR_TOKENS};
use tracing::trace;

/// Supported rule encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEncoding {
    /// Underscore-delimited, word operators.
    Legacy,
    /// `#`/`$`-delimited, symbolic operators.
    Compact,
}

impl RuleEncoding {
    /// Encoding written by [`PropertyRule`] and [`DepthRule`] `Display`.
    pub const CURRENT: RuleEncoding = RuleEncoding::Compact;

    pub fn version(&self) -> u32 {
        match self {
            RuleEncoding::Legacy => 1,
            RuleEncoding::Compact => 2,
        }
    }

    pub fn from_version(version: u32) -> Option<Self> {
        match version {
            1 => Some(RuleEncoding::Legacy),
            2 => Some(RuleEncoding::Compact),
            _ => None,
        }
    }

    /// Detects the encoding and returns it with the rule body.
    pub fn detect(encoded: &str) -> Result<(Self, &str)> {
        if let Some((version, body)) = split_header(encoded) {
            let encoding = version
                .parse::<u32>()
                .ok()
                .and_then(Self::from_version)
                .ok_or_else(|| RestrictionError::UnsupportedEncoding(format!("v{}", version)))?;
            return Ok((encoding, body));
        }

        match encoded.find(['#', '_']) {
            Some(i) if encoded[i..].starts_with('#') => Ok((RuleEncoding::Compact, encoded)),
            Some(_) => Ok((RuleEncoding::Legacy, encoded)),
            None => Err(RestrictionError::syntax(encoded, "missing access type separator")),
        }
    }

    /// Spelling of `operator` in this encoding.
    pub fn operator_token(&self, operator: Operator) -> &'static str {
        match self {
            RuleEncoding::Legacy => operator.tokens().legacy,
            RuleEncoding::Compact => operator.tokens().compact,
        }
    }

    /// Writes a property rule in this encoding, without a version header.
    pub fn encode_property(&self, rule: &PropertyRule) -> String {
        format!(
            "{}{}{}{}{}{}{}{}",
            rule.access,
            self.separator(),
            rule.value_type,
            self.value_type_separator(),
            if rule.negate { "!" } else { "" },
            rule.property,
            self.operator_token(rule.operator),
            rule.values.join(",")
        )
    }

    /// Writes a depth rule in this encoding, without a version header.
    pub fn encode_depth(&self, rule: &DepthRule) -> String {
        let negation = if rule.negate { "!" } else { "" };
        let token = self.operator_token(rule.operator);
        match self {
            // The legacy operator's leading underscore doubles as the separator.
            RuleEncoding::Legacy if !rule.negate => format!("{}{}{}", rule.access, token, rule.level),
            RuleEncoding::Legacy => format!(
                "{}_{}{}{}",
                rule.access,
                negation,
                token.trim_start_matches('_'),
                rule.level
            ),
            RuleEncoding::Compact => format!("{}#{}{}{}", rule.access, negation, token, rule.level),
        }
    }

    fn separator(&self) -> char {
        match self {
            RuleEncoding::Legacy => '_',
            RuleEncoding::Compact => '#',
        }
    }

    fn value_type_separator(&self) -> char {
        match self {
            RuleEncoding::Legacy => '_',
            RuleEncoding::Compact => '$',
        }
    }

    fn tokens(&self) -> Vec<(&'static str, Operator)> {
        match self {
            RuleEncoding::Legacy => OPERATOR_TOKENS.iter().map(|t| (t.legacy, t.operator)).collect(),
            RuleEncoding::Compact => OPERATOR_TOKENS
                .iter()
                .map(|t| (t.compact, t.operator))
                .chain(std::iter::once(("=", Operator::Equals)))
                .collect(),
        }
    }
}

/// Splits a `v<digits>:` header off the rule.
fn split_header(encoded: &str) -> Option<(&str, &str)> {
    let rest = encoded.strip_prefix('v')?;
    let (version, body) = rest.split_once(':')?;
    if !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit()) {
        Some((version, body))
    } else {
        None
    }
}

/// An operator found in a rule expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Lexeme {
    position: usize,
    len: usize,
    operator: Operator,
}

/// Finds the earliest operator in `expr`, preferring the longest token.
fn lex_operator(expr: &str, encoding: RuleEncoding) -> Option<Lexeme> {
    encoding
        .tokens()
        .into_iter()
        .filter_map(|(token, operator)| {
            expr.find(token).map(|position| Lexeme {
                position,
                len: token.len(),
                operator,
            })
        })
        .min_by(|a, b| a.position.cmp(&b.position).then(b.len.cmp(&a.len)))
}

fn split_access<'a>(rule: &str, body: &'a str, encoding: RuleEncoding) -> Result<(AccessType, &'a str)> {
    let (access, rest) = body
        .split_once(encoding.separator())
        .ok_or_else(|| RestrictionError::syntax(rule, "missing access type separator"))?;
    Ok((access.parse()?, rest))
}

fn strip_negation(expr: &str) -> (bool, &str) {
    match expr.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, expr),
    }
}

fn split_values(values: &str) -> Vec<String> {
    let mut values: Vec<String> = values.split(',').map(str::to_string).collect();
    while values.last().map(|v| v.is_empty()).unwrap_or(false) {
        values.pop();
    }
    values
}

/// Decodes a property rule declared at `anchor_path`.
pub fn parse_property_rule(encoded: &str, anchor_path: &str) -> Result<PropertyRule> {
    let (encoding, body) = RuleEncoding::detect(encoded)?;
    let (access, rest) = split_access(encoded, body, encoding)?;

    let (value_type, expr) = rest
        .split_once(encoding.value_type_separator())
        .ok_or_else(|| RestrictionError::syntax(encoded, "missing value type separator"))?;
    let value_type: ValueType = value_type.parse()?;

    let (negate, expr) = strip_negation(expr);
    let lexeme = lex_operator(expr, encoding)
        .ok_or_else(|| RestrictionError::syntax(encoded, "missing operator"))?;

    let property = &expr[..lexeme.position];
    if property.is_empty() {
        return Err(RestrictionError::syntax(encoded, "missing property name"));
    }

    let values = split_values(&expr[lexeme.position + lexeme.len..]);
    if values.is_empty() {
        return Err(RestrictionError::syntax(encoded, "missing values"));
    }

    let rule = PropertyRule {
        access,
        negate,
        value_type,
        operator: lexeme.operator,
        property: property.to_string(),
        values,
        anchor_path: anchor_path.to_string(),
    };
    trace!(encoded, version = encoding.version(), rule = %rule, "Decoded property rule");
    Ok(rule)
}

/// Decodes a depth rule declared at `anchor_path`.
pub fn parse_depth_rule(encoded: &str, anchor_path: &str) -> Result<DepthRule> {
    let (encoding, body) = RuleEncoding::detect(encoded)?;
    let (access, rest) = split_access(encoded, body, encoding)?;
    let (negate, expr) = strip_negation(rest);

    // The legacy separator doubles as the operator's leading underscore.
    let expr = match encoding {
        RuleEncoding::Legacy if !expr.starts_with('_') => format!("_{}", expr),
        _ => expr.to_string(),
    };

    let lexeme = lex_operator(&expr, encoding)
        .filter(|l| l.position == 0)
        .ok_or_else(|| RestrictionError::syntax(encoded, "missing operator"))?;

    let level = &expr[lexeme.len..];
    let level = level
        .trim()
        .parse::<u32>()
        .map_err(|_| RestrictionError::InvalidLevel(level.to_string()))?;

    let rule = DepthRule {
        access,
        negate,
        operator: lexeme.operator,
        level,
        anchor_path: anchor_path.to_string(),
    };
    trace!(encoded, version = encoding.version(), rule = %rule, "Decoded depth rule");
    Ok(rule)
}
