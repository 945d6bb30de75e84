//! Normalized event/trace structures handed to the log exporter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// One event of a generated trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Case identifier of the owning trace.
    pub case_id: String,
    /// Activity (event) name.
    pub activity: String,
    /// Ordinal position of the event within its trace.
    pub timestamp: u64,
    /// Free-form attribute assignments, keyed by attribute name.
    pub attributes: BTreeMap<String, String>,
}

impl TraceEvent {
    #[must_use]
    pub fn new(case_id: &str, activity: &str, timestamp: u64) -> Self {
        Self {
            case_id: case_id.to_string(),
            activity: activity.to_string(),
            timestamp,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach one attribute assignment.
    pub fn assign(&mut self, attribute: &str, value: &str) {
        self.attributes
            .insert(attribute.to_string(), value.to_string());
    }
}

/// One generated trace: a case with its events in timestamp order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub case_id: String,
    pub events: Vec<TraceEvent>,
}

impl Trace {
    #[must_use]
    pub fn new(case_id: &str) -> Self {
        Self {
            case_id: case_id.to_string(),
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// The log-export collaborator: writes normalized traces to a log file.
pub trait LogSink {
    fn write(&mut self, traces: &[Trace], path: &Path) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_a_trace() {
        let mut event = TraceEvent::new("case_0", "A", 1);
        event.assign("grade", "4");
        let mut trace = Trace::new("case_0");
        trace.push(event);

        assert_eq!(trace.len(), 1);
        assert!(!trace.is_empty());
        assert_eq!(trace.events[0].attributes["grade"], "4");
    }

    #[test]
    fn serialized_shape_is_stable() {
        let mut event = TraceEvent::new("case_0", "A", 1);
        event.assign("grade", "4");
        let json = serde_json::to_string(&event).expect("serializable event");
        assert_eq!(
            json,
            r#"{"case_id":"case_0","activity":"A","timestamp":1,"attributes":{"grade":"4"}}"#
        );

        let back: TraceEvent = serde_json::from_str(&json).expect("deserializable event");
        assert_eq!(back, event);
    }
}
