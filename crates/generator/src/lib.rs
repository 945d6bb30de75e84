//! Program Emitter Library
//!
//! Serializes a finalized Declare model, together with the compiled and
//! decomposed data conditions of its constraint instances, into the final
//! fact/rule program handed to the external solving engine.

pub mod program;

pub use program::LpProgram;
