//! Declare model representation and construction.
//!
//! A model contains:
//! - Event declarations, in first-seen order
//! - The global attribute table (shared handles, keyed by name)
//! - Constraint instances, in source order
//!
//! The model is populated strictly in line order: attributes must be bound
//! before their value is declared, events must be defined before constraint
//! lines reference them. Once every line is consumed the model is handed
//! read-only to the program emitter.

use crate::constraint::ConstraintInstance;
use crate::declaration::{is_reserved, Attribute, AttributeRef, AttributeValue, Event};
use crate::error::ParseError;
use crate::line::{classify, LineKind};
use crate::Result;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// A complete Declare model.
#[derive(Debug, Clone, Default)]
pub struct DeclareModel {
    events: Vec<Event>,
    attributes: Vec<AttributeRef>,
    constraints: Vec<ConstraintInstance>,
}

impl DeclareModel {
    /// Parse a model from source text.
    ///
    /// Blank lines and `#` comment lines are ignored; every other line must
    /// classify into one of the four line kinds. The first fatal error
    /// aborts the compile; no partial model is returned.
    pub fn parse(content: &str) -> Result<Self> {
        let mut model = Self::default();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            model.consume(line, idx + 1)?;
        }
        Ok(model)
    }

    fn consume(&mut self, line: &str, number: usize) -> Result<()> {
        match classify(line) {
            Some(LineKind::EventDefinition) => self.define_event(line, number),
            Some(LineKind::AttributeBinding) => self.bind_attributes(line, number),
            Some(LineKind::AttributeValueDeclaration) => self.declare_values(line, number),
            Some(LineKind::ConstraintTemplate) => self.resolve_constraint(line, number),
            None => Err(ParseError::UnclassifiedLine {
                line: number,
                text: line.to_string(),
            }),
        }
    }

    /// `Type Name`: define a new event.
    fn define_event(&mut self, line: &str, number: usize) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let &[object_type, name] = tokens.as_slice() else {
            return Err(ParseError::MalformedEventDefinition {
                line: number,
                text: line.to_string(),
            });
        };
        if self.event(name).is_some() {
            return Err(ParseError::DuplicateEvent {
                line: number,
                name: name.to_string(),
            });
        }
        for word in [name, object_type] {
            if is_reserved(word) {
                return Err(ParseError::ReservedWordMisuse {
                    line: number,
                    word: word.to_string(),
                });
            }
        }
        self.events.push(Event::new(name, object_type));
        Ok(())
    }

    /// `bind Name: a, b, c`: register attributes on an existing event.
    fn bind_attributes(&mut self, line: &str, number: usize) -> Result<()> {
        let rest = line.strip_prefix("bind").unwrap_or(line).trim();
        let (event_name, attr_list) =
            rest.split_once(':')
                .ok_or_else(|| ParseError::UnclassifiedLine {
                    line: number,
                    text: line.to_string(),
                })?;
        let event_name = event_name.trim();
        let position = self
            .events
            .iter()
            .position(|ev| ev.name() == event_name)
            .ok_or_else(|| ParseError::UnknownEvent {
                line: number,
                name: event_name.to_string(),
            })?;

        for name in attr_list.split(',') {
            let name = name.trim();
            if is_reserved(name) {
                return Err(ParseError::ReservedWordMisuse {
                    line: number,
                    word: name.to_string(),
                });
            }
            // Attribute identity is global: reuse the shared handle if any
            // event already bound this name, otherwise create it.
            let attribute = match self.attribute(name) {
                Some(shared) => shared,
                None => {
                    let shared = Attribute::shared(name);
                    self.attributes.push(Rc::clone(&shared));
                    shared
                }
            };
            self.events[position].bind(attribute);
        }
        Ok(())
    }

    /// `a, b: <value-expr>`: declare the value of already bound attributes.
    fn declare_values(&mut self, line: &str, number: usize) -> Result<()> {
        let (names, value_text) =
            line.split_once(':')
                .ok_or_else(|| ParseError::UnclassifiedLine {
                    line: number,
                    text: line.to_string(),
                })?;
        let value =
            AttributeValue::parse(value_text).ok_or_else(|| ParseError::UnparsableValue {
                line: number,
                text: value_text.trim().to_string(),
            })?;

        for name in names.split(',') {
            let name = name.trim();
            match self.attribute(name) {
                Some(attribute) => attribute.borrow_mut().set_value(value.clone()),
                // The one recoverable case: a value declaration for an
                // attribute nobody bound is reported and skipped.
                None => warn!(
                    "attribute `{}` not defined, skipping in line {}: `{}`",
                    name, number, line
                ),
            }
        }
        Ok(())
    }

    /// `Name[E1, E2] |...`: resolve a constraint template line.
    fn resolve_constraint(&mut self, line: &str, number: usize) -> Result<()> {
        let instance = ConstraintInstance::resolve(line, number, self)?;
        self.constraints.push(instance);
        Ok(())
    }

    /// Declared events, in first-seen order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Look up an event by name.
    #[must_use]
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|ev| ev.name() == name)
    }

    /// The global attribute table, in first-bind order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeRef] {
        &self.attributes
    }

    /// Look up a shared attribute handle by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<AttributeRef> {
        self.attributes
            .iter()
            .find(|attr| attr.borrow().name() == name)
            .cloned()
    }

    /// Constraint instances, in source order.
    #[must_use]
    pub fn constraints(&self) -> &[ConstraintInstance] {
        &self.constraints
    }
}

impl fmt::Display for DeclareModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=============================================")?;
        writeln!(f, "DECLARE MODEL")?;
        writeln!(f, "=============================================")?;
        writeln!(f)?;

        if !self.events.is_empty() {
            writeln!(f, "Events")?;
            writeln!(f, "---------------------------------------------")?;
            for event in &self.events {
                writeln!(f, "{}", event)?;
            }
            writeln!(f)?;
        }

        if !self.attributes.is_empty() {
            writeln!(f, "Attributes")?;
            writeln!(f, "---------------------------------------------")?;
            for attribute in &self.attributes {
                writeln!(f, "{}", attribute.borrow())?;
            }
            writeln!(f)?;
        }

        if !self.constraints.is_empty() {
            writeln!(f, "Constraints")?;
            writeln!(f, "---------------------------------------------")?;
            for constraint in &self.constraints {
                writeln!(f, "{}", constraint)?;
            }
        }
        Ok(())
    }
}
