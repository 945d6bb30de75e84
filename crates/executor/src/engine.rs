//! The constraint-solving engine boundary.

use crate::term::{Atom, DecodeError};
use thiserror::Error;

/// Failures crossing the engine boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Engine error: {0}")]
    Engine(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// One satisfying assignment returned by the engine: a set of ground atoms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverModel {
    atoms: Vec<Atom>,
}

impl SolverModel {
    #[must_use]
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Decode a whitespace-separated answer-set line as engines print it,
    /// e.g. `activity(a) trace(10,1,a) assigned_value(grade,s_1,5)`.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let atoms = text
            .split_whitespace()
            .map(Atom::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(atoms))
    }

    /// All atoms of the model.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Atoms of one predicate, in model order.
    #[must_use]
    pub fn atoms_named(&self, name: &str) -> Vec<&Atom> {
        self.atoms.iter().filter(|a| a.name() == name).collect()
    }
}

/// The external solving engine. One solve call per generated program;
/// invocation is synchronous and blocking from the caller's perspective.
pub trait SolverEngine {
    /// Solve `program` and return the requested satisfying assignments.
    fn solve(&mut self, program: &str) -> Result<Vec<SolverModel>, EngineError>;
}

/// Picks the number of events of each generated trace. Implemented by the
/// external distribution collaborator.
pub trait LengthSampler {
    fn sample(&mut self) -> usize;
}

/// Settings of one generation run, bounding trace count and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    pub num_traces: usize,
    pub min_events: usize,
    pub max_events: usize,
}

impl GenerationSettings {
    #[must_use]
    pub fn new(num_traces: usize, min_events: usize, max_events: usize) -> Self {
        Self {
            num_traces,
            min_events,
            max_events,
        }
    }

    /// Clamp a sampled trace length into the configured bounds.
    #[must_use]
    pub fn clamp_length(&self, length: usize) -> usize {
        length.clamp(self.min_events, self.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn parse_answer_set_line() {
        let model = SolverModel::parse("activity(a) trace(10,1,a) assigned_value(grade,s_1,5)")
            .expect("decodable model");
        assert_eq!(model.atoms().len(), 3);
        let traces = model.atoms_named("trace");
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].args()[0], Term::Integer(10));
    }

    #[test]
    fn parse_propagates_decode_errors() {
        assert!(SolverModel::parse("activity(a) trace(").is_err());
    }

    #[test]
    fn settings_clamp_sampled_lengths() {
        let settings = GenerationSettings::new(100, 2, 10);
        assert_eq!(settings.clamp_length(1), 2);
        assert_eq!(settings.clamp_length(5), 5);
        assert_eq!(settings.clamp_length(50), 10);
    }
}
