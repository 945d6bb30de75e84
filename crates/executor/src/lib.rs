//! Solver Interface Library
//!
//! The generated fact/rule program is handed to an external constraint
//! solving engine; a satisfying assignment comes back as a set of ground
//! atoms, and a solved model is ultimately exported as a process log. This
//! crate specifies those collaborator boundaries without implementing the
//! collaborators themselves:
//!
//! - [`term`]: structural decoding of ground-atom text into typed terms
//! - [`engine`]: the solve operation, answer sets and generation settings
//! - [`trace`]: the normalized event/trace structures handed to a log sink

pub mod engine;
pub mod term;
pub mod trace;

pub use engine::{EngineError, GenerationSettings, LengthSampler, SolverEngine, SolverModel};
pub use term::{Atom, DecodeError, Term};
pub use trace::{LogSink, Trace, TraceEvent};
