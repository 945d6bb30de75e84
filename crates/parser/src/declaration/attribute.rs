//! Shared attribute declarations and their tagged values.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared-ownership handle to an attribute. All events binding the same
/// attribute name alias one instance through this handle.
pub type AttributeRef = Rc<RefCell<Attribute>>;

/// The value kind of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Enumeration,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Enumeration => "enumeration",
        };
        write!(f, "{s}")
    }
}

static INTEGER_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^integer +between +([+-]?\d+) +and +([+-]?\d+)$").unwrap());
static FLOAT_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^float +between +([+-]?\d+(?:\.\d+)?) +and +([+-]?\d+(?:\.\d+)?)$").unwrap()
});
static INTEGER_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());
static FLOAT_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?$").unwrap());
static ENUMERATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+(?:, *[\w.]+)*$").unwrap());

/// A declared attribute value. The variants make invalid combinations of
/// kind, range flag and payload unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    IntegerRange { low: i64, high: i64 },
    FloatRange { low: f64, high: f64 },
    Integer(i64),
    Float(f64),
    Enumeration(Vec<String>),
}

impl AttributeValue {
    /// Classify a value expression by sub-pattern.
    ///
    /// Numeric sub-patterns are tried before the enumeration pattern so
    /// that a bare `5` is an integer literal rather than a one-element
    /// enumeration. `None` means no sub-pattern matched (fatal for the
    /// caller).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(caps) = INTEGER_RANGE.captures(text) {
            let low = caps[1].parse().ok()?;
            let high = caps[2].parse().ok()?;
            return Some(Self::IntegerRange { low, high });
        }
        if let Some(caps) = FLOAT_RANGE.captures(text) {
            let low = caps[1].parse().ok()?;
            let high = caps[2].parse().ok()?;
            return Some(Self::FloatRange { low, high });
        }
        if INTEGER_LITERAL.is_match(text) {
            return text.parse().ok().map(Self::Integer);
        }
        if FLOAT_LITERAL.is_match(text) {
            return text.parse().ok().map(Self::Float);
        }
        if ENUMERATION.is_match(text) {
            let values = text.split(',').map(|v| v.trim().to_string()).collect();
            return Some(Self::Enumeration(values));
        }
        None
    }

    /// The value kind of this declaration.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::IntegerRange { .. } | Self::Integer(_) => ValueKind::Integer,
            Self::FloatRange { .. } | Self::Float(_) => ValueKind::Float,
            Self::Enumeration(_) => ValueKind::Enumeration,
        }
    }

    /// Whether this declaration is a `between L and H` range.
    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!(self, Self::IntegerRange { .. } | Self::FloatRange { .. })
    }
}

impl fmt::Display for AttributeValue {
    /// Formats the value back in Declare syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerRange { low, high } => write!(f, "integer between {low} and {high}"),
            Self::FloatRange { low, high } => write!(f, "float between {low} and {high}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Enumeration(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// An attribute declaration, created empty when first bound by an event and
/// populated by a later value declaration (last write wins).
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    value: Option<AttributeValue>,
}

impl Attribute {
    /// Create an attribute with no declared value yet.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
        }
    }

    /// Create a shared handle for a fresh attribute.
    #[must_use]
    pub fn shared(name: &str) -> AttributeRef {
        Rc::new(RefCell::new(Self::new(name)))
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&AttributeValue> {
        self.value.as_ref()
    }

    /// Declare (or overwrite) the value.
    pub fn set_value(&mut self, value: AttributeValue) {
        self.value = Some(value);
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}
