//! Compilation of one condition string into a named expression tree.

use crate::expression::{ConditionExpr, ExprParser};
use crate::token::tokenize;
use once_cell::sync::Lazy;
use parser::{ParseError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Which condition slot of a constraint instance a condition came from.
/// Determines the prefix of every synthetic name derived for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionSlot {
    Activation,
    Correlation,
}

impl ConditionSlot {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "activation",
            Self::Correlation => "correlation",
        }
    }

    /// Head predicate name for this slot, e.g. `activation_condition`.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{}_condition", self.as_str())
    }
}

impl fmt::Display for ConditionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relational operator of a literal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    Equal,            // =
    GreaterThan,      // >
    LessThan,         // <
    GreaterEqualThan, // >=
    LessEqualThan,    // <=
    Is,               // is
    IsNot,            // is not
    In,               // in
    NotIn,            // not in
}

impl ConditionOperator {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Self::Equal),
            ">" => Some(Self::GreaterThan),
            "<" => Some(Self::LessThan),
            ">=" => Some(Self::GreaterEqualThan),
            "<=" => Some(Self::LessEqualThan),
            "is" => Some(Self::Is),
            "is_not" => Some(Self::IsNot),
            "in" => Some(Self::In),
            "not_in" => Some(Self::NotIn),
            _ => None,
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            Self::Equal => "=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterEqualThan => ">=",
            Self::LessEqualThan => "<=",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::In => "in",
            Self::NotIn => "not in",
        };
        write!(f, "{sym}")
    }
}

static RELATIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\.(\w+)(<=|>=|=|<|>)([+-]?[\w.]+)$").unwrap());
static MEMBERSHIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\.(\w+) (is_not|is) ([\w.]+)$").unwrap());
static ENUM_SET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\.(\w+) (not_in|in) \(([\w.]+(?:,[\w.]+)*)\)$").unwrap());

/// One atomic relational test `entity.attribute OP value`, treated as an
/// indivisible boolean variable during decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralCondition {
    entity: String,
    attribute: String,
    operator: ConditionOperator,
    value: String,
}

impl LiteralCondition {
    /// Parse one merged literal token; `None` if the shape or operator is
    /// not recognized.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let caps = RELATIONAL
            .captures(token)
            .or_else(|| MEMBERSHIP.captures(token))
            .or_else(|| ENUM_SET.captures(token))?;
        Some(Self {
            entity: caps[1].to_string(),
            attribute: caps[2].to_string(),
            operator: ConditionOperator::from_token(&caps[3])?,
            value: caps[4].to_string(),
        })
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn operator(&self) -> ConditionOperator {
        self.operator
    }

    /// Raw right-hand side; for `in`/`not in` the comma-joined member list.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Member tokens of an `in`/`not in` list (a single element otherwise).
    #[must_use]
    pub fn members(&self) -> Vec<&str> {
        self.value.split(',').collect()
    }
}

impl fmt::Display for LiteralCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            ConditionOperator::In | ConditionOperator::NotIn => {
                write!(
                    f,
                    "{}.{} {} ({})",
                    self.entity, self.attribute, self.operator, self.value
                )
            }
            _ => write!(
                f,
                "{}.{} {} {}",
                self.entity, self.attribute, self.operator, self.value
            ),
        }
    }
}

/// The result of compiling one condition string: the expression tree over
/// synthetic literal names plus both naming maps.
#[derive(Debug, Clone)]
pub struct CompiledCondition {
    slot: ConditionSlot,
    expr: ConditionExpr,
    name_to_literal: HashMap<String, String>,
    literal_to_name: HashMap<String, String>,
}

impl CompiledCondition {
    #[must_use]
    pub fn slot(&self) -> ConditionSlot {
        self.slot
    }

    #[must_use]
    pub fn expr(&self) -> &ConditionExpr {
        &self.expr
    }

    /// Synthetic name -> literal text.
    #[must_use]
    pub fn name_to_literal(&self) -> &HashMap<String, String> {
        &self.name_to_literal
    }

    /// Literal text -> synthetic name.
    #[must_use]
    pub fn literal_to_name(&self) -> &HashMap<String, String> {
        &self.literal_to_name
    }

    /// All assigned literal names.
    pub fn literal_names(&self) -> impl Iterator<Item = &String> {
        self.name_to_literal.keys()
    }
}

/// Compile a raw condition string from the given slot.
///
/// Every distinct literal is assigned `<slot>_condition_<ordinal>` in
/// first-seen order (a repeated literal reuses its first name); the
/// name-substituted token stream is then parsed into the expression tree.
/// `line` is the source line of the owning constraint instance, attached
/// to any [`ParseError::UnparsableCondition`].
pub fn compile(slot: ConditionSlot, text: &str, line: usize) -> Result<CompiledCondition> {
    let tokens = tokenize(text, line)?;

    let mut name_to_literal = HashMap::new();
    let mut literal_to_name: HashMap<String, String> = HashMap::new();
    let mut substituted = Vec::with_capacity(tokens.len());
    let mut ordinal = 0usize;

    for token in &tokens {
        if matches!(token.as_str(), "and" | "or" | "(" | ")") {
            substituted.push(token.clone());
            continue;
        }
        if LiteralCondition::parse(token).is_none() {
            return Err(ParseError::UnparsableCondition {
                line,
                text: text.to_string(),
                reason: format!("unrecognized literal `{token}`"),
            });
        }
        let name = match literal_to_name.get(token) {
            Some(name) => name.clone(),
            None => {
                ordinal += 1;
                let name = format!("{}_{}", slot.prefix(), ordinal);
                name_to_literal.insert(name.clone(), token.clone());
                literal_to_name.insert(token.clone(), name.clone());
                name
            }
        };
        substituted.push(name);
    }

    let expr = ExprParser::new(&substituted, text, line).parse()?;
    Ok(CompiledCondition {
        slot,
        expr,
        name_to_literal,
        literal_to_name,
    })
}
