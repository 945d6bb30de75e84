//! The fixed catalog of known constraint templates.

use std::fmt;

/// Catalog entry for a constraint template.
///
/// `binary` templates relate two events, unary ones a single event.
/// `negative` marks templates forbidding (rather than requiring) the
/// related behavior; `cardinality` marks templates that accept a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    binary: bool,
    negative: bool,
    cardinality: bool,
    semantic: &'static str,
}

impl Template {
    const fn new(
        name: &'static str,
        binary: bool,
        negative: bool,
        cardinality: bool,
        semantic: &'static str,
    ) -> Self {
        Self {
            name,
            binary,
            negative,
            cardinality,
            semantic,
        }
    }

    /// Template name as written in a model file.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the template relates two events.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Whether the template is a negative (forbidding) one.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the template accepts a cardinality.
    #[must_use]
    pub fn has_cardinality(&self) -> bool {
        self.cardinality
    }

    /// Number of events the template applies to.
    #[must_use]
    pub fn arity(&self) -> usize {
        if self.binary {
            2
        } else {
            1
        }
    }

    /// Human-readable description of the template.
    #[must_use]
    pub fn semantic(&self) -> &'static str {
        self.semantic
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// All known templates. Resolution validates template names against this
/// list; anything else is a fatal parse error.
pub const CATALOG: [Template; 18] = [
    Template::new("Init", false, false, false, "First task is A"),
    Template::new(
        "Existence",
        false,
        false,
        true,
        "Task A should be executed. If cardinality defined, should be executed n or more times.",
    ),
    Template::new(
        "Absence",
        false,
        false,
        true,
        "Task A should not be executed. If cardinality defined, should be executed n times or less",
    ),
    Template::new(
        "Exactly",
        false,
        false,
        true,
        "Task A should be executed (exactly) N times",
    ),
    Template::new(
        "Choice",
        true,
        false,
        false,
        "Task A or task B should be executed (or both)",
    ),
    Template::new(
        "ExclusiveChoice",
        true,
        false,
        false,
        "Task A or task B should be executed, but not both",
    ),
    Template::new(
        "RespondedExistence",
        true,
        false,
        false,
        "If task A executed, task B executed as well",
    ),
    Template::new(
        "Response",
        true,
        false,
        false,
        "If task A executed, task B executed after A",
    ),
    Template::new(
        "AlternateResponse",
        true,
        false,
        false,
        "If task A executed, task B executed after A, without other A in between",
    ),
    Template::new(
        "ChainResponse",
        true,
        false,
        false,
        "If task A executed, task B executed next",
    ),
    Template::new(
        "Precedence",
        true,
        false,
        false,
        "If task A executed, task B was executed before A",
    ),
    Template::new(
        "AlternatePrecedence",
        true,
        false,
        false,
        "If task A executed, task B was executed before A, without other A in between",
    ),
    Template::new(
        "ChainPrecedence",
        true,
        false,
        false,
        "If task A executed, previous executed task was B",
    ),
    Template::new(
        "NotRespondedExistence",
        true,
        true,
        false,
        "If task A executed, task B is not executed",
    ),
    Template::new(
        "NotResponse",
        true,
        true,
        false,
        "If task A executed, task B will not be executed after A",
    ),
    Template::new(
        "NotPrecedence",
        true,
        true,
        false,
        "If task A executed, task B was not executed before A",
    ),
    Template::new(
        "NotChainResponse",
        true,
        true,
        false,
        "If task A executed, task B is not executed next",
    ),
    Template::new(
        "NotChainPrecedence",
        true,
        true,
        false,
        "If task A executed, previous executed task was not B",
    ),
];

/// Look up a catalog entry by its exact name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_templates() {
        let response = lookup("Response").expect("Response is in the catalog");
        assert!(response.is_binary());
        assert!(!response.is_negative());
        assert_eq!(response.arity(), 2);

        let existence = lookup("Existence").expect("Existence is in the catalog");
        assert!(!existence.is_binary());
        assert!(existence.has_cardinality());
        assert_eq!(existence.arity(), 1);

        let not_response = lookup("NotResponse").expect("NotResponse is in the catalog");
        assert!(not_response.is_negative());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("response").is_none());
        assert!(lookup("Succession").is_none());
    }

    #[test]
    fn catalog_names_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
