//! Condition Compiler Library
//!
//! Compiles the data conditions attached to Declare constraint instances
//! into named, stratified rule sets for the target fact language:
//!
//! 1. [`condition::compile`] turns one raw condition string (e.g.
//!    `A.grade > 5 and A.name is not x`) into a boolean expression tree
//!    over named relational literals, plus the two naming maps.
//! 2. [`decompose::decompose`] lowers the tree into rule lines, giving
//!    every compound sub-expression exactly one stable synthetic name.

pub mod condition;
pub mod decompose;
pub mod expression;
mod token;

// Re-export core types for convenient access
pub use condition::{
    compile, CompiledCondition, ConditionOperator, ConditionSlot, LiteralCondition,
};
pub use decompose::{decompose, ConditionAtom, ConditionRule};
pub use expression::ConditionExpr;
