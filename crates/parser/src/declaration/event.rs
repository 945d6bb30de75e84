//! Event declarations.

use super::AttributeRef;
use itertools::Itertools;
use std::fmt;

/// A named process entity (e.g. an activity) with an object type tag and
/// the attributes bound to it, in bind order.
///
/// Events are created by an event-definition line, gain attributes through
/// `bind` lines, and are never mutated after model construction completes.
#[derive(Debug, Clone)]
pub struct Event {
    name: String,
    object_type: String,
    attributes: Vec<AttributeRef>,
}

impl Event {
    /// Create an event with no attributes bound yet.
    #[must_use]
    pub fn new(name: &str, object_type: &str) -> Self {
        Self {
            name: name.to_string(),
            object_type: object_type.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form classifier tag (`activity` in `activity A`).
    #[must_use]
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// Bound attributes in bind order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeRef] {
        &self.attributes
    }

    /// Look up a bound attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<AttributeRef> {
        self.attributes
            .iter()
            .find(|attr| attr.borrow().name() == name)
            .cloned()
    }

    /// Bind a shared attribute handle. Re-binding the same name is a no-op.
    pub fn bind(&mut self, attribute: AttributeRef) {
        let name = attribute.borrow().name().to_string();
        if self.attribute(&name).is_none() {
            self.attributes.push(attribute);
        }
    }
}

impl fmt::Display for Event {
    /// Formats as the defining line, e.g. `activity A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.object_type, self.name)?;
        if !self.attributes.is_empty() {
            write!(
                f,
                " [{}]",
                self.attributes
                    .iter()
                    .map(|attr| attr.borrow().name().to_string())
                    .join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Attribute;
    use std::rc::Rc;

    #[test]
    fn new_and_accessors() {
        let ev = Event::new("A", "activity");
        assert_eq!(ev.name(), "A");
        assert_eq!(ev.object_type(), "activity");
        assert!(ev.attributes().is_empty());
    }

    #[test]
    fn bind_is_idempotent() {
        let mut ev = Event::new("A", "activity");
        let grade = Attribute::shared("grade");
        ev.bind(Rc::clone(&grade));
        ev.bind(grade);
        assert_eq!(ev.attributes().len(), 1);
        assert!(ev.attribute("grade").is_some());
        assert!(ev.attribute("mark").is_none());
    }

    #[test]
    fn display_with_attributes() {
        let mut ev = Event::new("A", "activity");
        assert_eq!(ev.to_string(), "activity A");
        ev.bind(Attribute::shared("grade"));
        ev.bind(Attribute::shared("mark"));
        assert_eq!(ev.to_string(), "activity A [grade, mark]");
    }
}
