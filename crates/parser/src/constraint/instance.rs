//! Resolution of constraint template lines.

use super::catalog::{lookup, Template};
use crate::error::ParseError;
use crate::model::DeclareModel;
use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TEMPLATE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*)\[(.*)\]\s*(.*)$").unwrap());

/// One parsed occurrence of a constraint template.
///
/// The condition tail of the source line is split on `|` into at most three
/// segments populating the activation, correlation and time-window slots in
/// that order. Slots keep the raw segment text; compiling a segment into a
/// rule set happens downstream, which is why the instance also records its
/// originating line number and text.
#[derive(Debug, Clone)]
pub struct ConstraintInstance {
    template: &'static Template,
    events: Vec<String>,
    condition_text: String,
    activation: Option<String>,
    correlation: Option<String>,
    time_window: Option<String>,
    line: usize,
    source: String,
}

impl ConstraintInstance {
    /// Resolve a `Name[E1, E2] |cond1|cond2|cond3` line against the template
    /// catalog and the events defined in `model` so far.
    pub fn resolve(text: &str, line: usize, model: &DeclareModel) -> Result<Self> {
        let caps = TEMPLATE_LINE
            .captures(text)
            .ok_or_else(|| ParseError::UnclassifiedLine {
                line,
                text: text.to_string(),
            })?;

        let name = caps[1].trim();
        let template = lookup(name).ok_or_else(|| ParseError::UnknownTemplate {
            line,
            name: name.to_string(),
        })?;

        let mut events = Vec::new();
        for event in caps[2].split(',') {
            let event = event.trim();
            if model.event(event).is_none() {
                return Err(ParseError::UnknownEvent {
                    line,
                    name: event.to_string(),
                });
            }
            events.push(event.to_string());
        }

        let condition_text = caps[3].trim().to_string();
        let mut instance = Self {
            template,
            events,
            condition_text: condition_text.clone(),
            activation: None,
            correlation: None,
            time_window: None,
            line,
            source: text.to_string(),
        };
        instance.split_condition_tail(&condition_text)?;
        Ok(instance)
    }

    /// Split the condition tail into 1-3 slots; a 4th segment is fatal.
    fn split_condition_tail(&mut self, tail: &str) -> Result<()> {
        let segments: Vec<&str> = tail
            .trim()
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();

        if segments.len() > 3 {
            return Err(ParseError::TooManyConditionSegments {
                line: self.line,
                text: self.source.clone(),
            });
        }

        let mut slots = [
            &mut self.activation,
            &mut self.correlation,
            &mut self.time_window,
        ];
        for (slot, segment) in slots.iter_mut().zip(segments) {
            if !segment.is_empty() {
                **slot = Some(segment.to_string());
            }
        }
        Ok(())
    }

    /// The catalog entry this instance applies.
    #[must_use]
    pub fn template(&self) -> &'static Template {
        self.template
    }

    /// The associated event names, in written order.
    #[must_use]
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// The raw condition tail of the source line.
    #[must_use]
    pub fn condition_text(&self) -> &str {
        &self.condition_text
    }

    /// The activation condition segment, if present.
    #[must_use]
    pub fn activation_condition(&self) -> Option<&str> {
        self.activation.as_deref()
    }

    /// The correlation condition segment, if present.
    #[must_use]
    pub fn correlation_condition(&self) -> Option<&str> {
        self.correlation.as_deref()
    }

    /// The time-window segment, if present.
    #[must_use]
    pub fn time_window(&self) -> Option<&str> {
        self.time_window.as_deref()
    }

    /// 1-based number of the source line this instance came from.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The full source line text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for ConstraintInstance {
    /// Formats as a canonical template line, e.g.
    /// `Response[A, B] |A.grade = 3 |B.grade > 5 |1,5,s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.template, self.events.join(", "))?;
        for slot in [&self.activation, &self.correlation, &self.time_window]
            .into_iter()
            .flatten()
        {
            write!(f, " |{slot}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeclareModel;

    fn two_event_model() -> DeclareModel {
        DeclareModel::parse("activity A\nactivity B").expect("valid model")
    }

    #[test]
    fn resolve_three_segments() {
        let model = two_event_model();
        let c = ConstraintInstance::resolve(
            "Response[A, B] |A.grade = 3 |B.grade > 5 |1,5,s",
            4,
            &model,
        )
        .expect("resolvable constraint");
        assert_eq!(c.template().name(), "Response");
        assert_eq!(c.events(), ["A", "B"]);
        assert_eq!(c.activation_condition(), Some("A.grade = 3"));
        assert_eq!(c.correlation_condition(), Some("B.grade > 5"));
        assert_eq!(c.time_window(), Some("1,5,s"));
        assert_eq!(c.line(), 4);
    }

    #[test]
    fn resolve_one_segment() {
        let model = two_event_model();
        let c = ConstraintInstance::resolve("Existence[A] |A.grade > 3", 1, &model)
            .expect("resolvable constraint");
        assert_eq!(c.activation_condition(), Some("A.grade > 3"));
        assert_eq!(c.correlation_condition(), None);
        assert_eq!(c.time_window(), None);
    }

    #[test]
    fn resolve_without_conditions() {
        let model = two_event_model();
        let c = ConstraintInstance::resolve("Existence[A]", 1, &model).expect("no conditions");
        assert_eq!(c.activation_condition(), None);
        assert_eq!(c.correlation_condition(), None);
    }

    #[test]
    fn empty_segment_leaves_slot_unset() {
        let model = two_event_model();
        let c = ConstraintInstance::resolve("Response[A, B] | |B.grade > 5", 1, &model)
            .expect("resolvable constraint");
        assert_eq!(c.activation_condition(), None);
        assert_eq!(c.correlation_condition(), Some("B.grade > 5"));
    }

    #[test]
    fn four_segments_are_rejected() {
        let model = two_event_model();
        let err =
            ConstraintInstance::resolve("Response[A, B] |a|b|c|d", 7, &model).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TooManyConditionSegments { line: 7, .. }
        ));
    }

    #[test]
    fn unknown_template_is_rejected() {
        let model = two_event_model();
        let err = ConstraintInstance::resolve("Succession[A, B]", 2, &model).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownTemplate {
                line: 2,
                name: "Succession".into()
            }
        );
    }

    #[test]
    fn undefined_event_is_rejected() {
        let model = two_event_model();
        let err = ConstraintInstance::resolve("Response[A, C]", 3, &model).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownEvent {
                line: 3,
                name: "C".into()
            }
        );
    }

    #[test]
    fn display_reconstructs_line() {
        let model = two_event_model();
        let c = ConstraintInstance::resolve(
            "Response[A,B] |A.grade = 3 |B.grade > 5 |1,5,s",
            1,
            &model,
        )
        .expect("resolvable constraint");
        assert_eq!(
            c.to_string(),
            "Response[A, B] |A.grade = 3 |B.grade > 5 |1,5,s"
        );
    }
}
