//! Lexical classification of Declare model lines.
//!
//! A trimmed, non-empty, non-comment line falls into exactly one of four
//! kinds. Rules are tried in a fixed priority order and the first match
//! wins; the constraint template pattern is the most permissive and
//! therefore comes last.

use once_cell::sync::Lazy;
use regex::Regex;

/// The four line kinds of the Declare model grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `activity A`
    EventDefinition,
    /// `bind A: grade, mark`
    AttributeBinding,
    /// `grade, mark: integer between 1 and 5`
    AttributeValueDeclaration,
    /// `Response[A, B] |A.grade = 3 |B.grade > 5 |1,5,s`
    ConstraintTemplate,
}

static EVENT_DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+ \w+$").unwrap());
static ATTRIBUTE_BINDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^bind \w+\s*:\s*[\w, ]+$").unwrap());
static VALUE_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_, ]*\s*:\s*.+$").unwrap());
static CONSTRAINT_TEMPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*\[.*\]\s*.*$").unwrap());

fn is_event_definition(line: &str) -> bool {
    EVENT_DEFINITION.is_match(line)
}

fn is_attribute_binding(line: &str) -> bool {
    ATTRIBUTE_BINDING.is_match(line)
}

fn is_value_declaration(line: &str) -> bool {
    !line.starts_with("bind") && VALUE_DECLARATION.is_match(line)
}

fn is_constraint_template(line: &str) -> bool {
    CONSTRAINT_TEMPLATE.is_match(line)
}

/// Ordered (predicate, kind) cascade; first match wins.
const RULES: [(fn(&str) -> bool, LineKind); 4] = [
    (is_event_definition, LineKind::EventDefinition),
    (is_attribute_binding, LineKind::AttributeBinding),
    (is_value_declaration, LineKind::AttributeValueDeclaration),
    (is_constraint_template, LineKind::ConstraintTemplate),
];

/// Classify a line, or `None` if no rule matches (fatal for the compile).
pub fn classify(line: &str) -> Option<LineKind> {
    RULES
        .iter()
        .find(|(predicate, _)| predicate(line))
        .map(|(_, kind)| *kind)
}
