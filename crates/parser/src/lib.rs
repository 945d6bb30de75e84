//! Declare Model Parser Library
//!
//! A parser for the Declare process-constraint DSL. Provides structured
//! representations for Declare models including event declarations, shared
//! typed attributes and constraint template instances.
//!
//! The DSL is line-oriented: `#` comment lines and blank lines are ignored,
//! every other line is one of four kinds (see [`line::LineKind`]):
//!
//! ```text
//! activity A
//! bind A: grade
//! grade: integer between 1 and 5
//! Response[A, B] |A.grade = 3 |B.grade > 5 |1,5,s
//! ```

pub mod constraint;
pub mod declaration;
pub mod error;
pub mod line;
pub mod model;

#[cfg(test)]
mod tests;

// Re-export core types for convenient access
pub use constraint::{ConstraintInstance, Template, CATALOG};
pub use declaration::{Attribute, AttributeRef, AttributeValue, Event, ValueKind};
pub use error::ParseError;
pub use line::LineKind;
pub use model::DeclareModel;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ParseError>;
