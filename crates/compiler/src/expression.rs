//! Boolean expression trees over named literal conditions.

use itertools::Itertools;
use parser::{ParseError, Result};
use std::fmt;

/// A boolean expression tree. Leaves are the synthetic names assigned to
/// literal conditions; internal nodes are n-ary AND / OR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionExpr {
    Literal(String),
    And(Vec<ConditionExpr>),
    Or(Vec<ConditionExpr>),
}

impl ConditionExpr {
    /// Whether this tree is a single literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Concatenated ordinals of all descendant literals, left-to-right.
    ///
    /// A literal named `activation_condition_3` contributes `3`; the
    /// decomposer derives compound names from this.
    #[must_use]
    pub fn literal_ordinals(&self) -> String {
        match self {
            Self::Literal(name) => name.rsplit('_').next().unwrap_or_default().to_string(),
            Self::And(children) | Self::Or(children) => {
                children.iter().map(Self::literal_ordinals).collect()
            }
        }
    }
}

impl fmt::Display for ConditionExpr {
    /// Infix rendering with compound children parenthesized.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn child_to_string(child: &ConditionExpr) -> String {
            if child.is_literal() {
                child.to_string()
            } else {
                format!("({child})")
            }
        }
        match self {
            Self::Literal(name) => write!(f, "{name}"),
            Self::And(children) => {
                write!(f, "{}", children.iter().map(child_to_string).join(" and "))
            }
            Self::Or(children) => {
                write!(f, "{}", children.iter().map(child_to_string).join(" or "))
            }
        }
    }
}

/// Recursive-descent parser for the name-substituted token stream.
///
/// Grammar (AND binds tighter than OR):
/// ```text
/// expr    := term ("or" term)*
/// term    := primary ("and" primary)*
/// primary := "(" expr ")" | literal-name
/// ```
pub(crate) struct ExprParser<'a> {
    tokens: &'a [String],
    pos: usize,
    text: &'a str,
    line: usize,
}

impl<'a> ExprParser<'a> {
    pub(crate) fn new(tokens: &'a [String], text: &'a str, line: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            text,
            line,
        }
    }

    pub(crate) fn parse(mut self) -> Result<ConditionExpr> {
        let expr = self.expr()?;
        if self.pos != self.tokens.len() {
            return Err(self.error("unbalanced parentheses or trailing tokens"));
        }
        Ok(expr)
    }

    fn expr(&mut self) -> Result<ConditionExpr> {
        let mut children = vec![self.term()?];
        while self.peek() == Some("or") {
            self.pos += 1;
            children.push(self.term()?);
        }
        Ok(Self::collapse(children, ConditionExpr::Or))
    }

    fn term(&mut self) -> Result<ConditionExpr> {
        let mut children = vec![self.primary()?];
        while self.peek() == Some("and") {
            self.pos += 1;
            children.push(self.primary()?);
        }
        Ok(Self::collapse(children, ConditionExpr::And))
    }

    fn primary(&mut self) -> Result<ConditionExpr> {
        match self.peek() {
            Some("(") => {
                self.pos += 1;
                let inner = self.expr()?;
                if self.peek() != Some(")") {
                    return Err(self.error("unbalanced parentheses"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some("and") | Some("or") | Some(")") => Err(self.error("dangling operator")),
            Some(name) => {
                let literal = ConditionExpr::Literal(name.to_string());
                self.pos += 1;
                Ok(literal)
            }
            None => Err(self.error("unexpected end of condition")),
        }
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn collapse(
        mut children: Vec<ConditionExpr>,
        node: fn(Vec<ConditionExpr>) -> ConditionExpr,
    ) -> ConditionExpr {
        if children.len() == 1 {
            children.remove(0)
        } else {
            node(children)
        }
    }

    fn error(&self, reason: &str) -> ParseError {
        ParseError::UnparsableCondition {
            line: self.line,
            text: self.text.to_string(),
            reason: reason.to_string(),
        }
    }
}
