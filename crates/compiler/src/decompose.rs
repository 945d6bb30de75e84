//! Lowering of condition expression trees into stratified rule lines.
//!
//! Every rule head and body atom carries the owning constraint instance
//! index and the trace variable `T`, so a decomposed set reads:
//!
//! ```text
//! activation_condition(0,T) :- activation_condition_12(0,T).
//! activation_condition_12(0,T) :- activation_condition_1(0,T), activation_condition_2(0,T).
//! ```
//!
//! Traversal is depth-first and left-to-right for both connectives (the
//! same order the disjunction case uses), which makes naming and emission
//! reproducible for identical input.

use crate::condition::{CompiledCondition, ConditionSlot};
use crate::expression::ConditionExpr;
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// One `name(index,T)` atom of a decomposed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionAtom {
    name: String,
    index: usize,
}

impl ConditionAtom {
    #[must_use]
    pub fn new(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ConditionAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},T)", self.name, self.index)
    }
}

/// One Horn rule of a decomposed condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRule {
    head: ConditionAtom,
    body: Vec<ConditionAtom>,
}

impl ConditionRule {
    #[must_use]
    pub fn new(head: ConditionAtom, body: Vec<ConditionAtom>) -> Self {
        Self { head, body }
    }

    #[must_use]
    pub fn head(&self) -> &ConditionAtom {
        &self.head
    }

    #[must_use]
    pub fn body(&self) -> &[ConditionAtom] {
        &self.body
    }
}

impl fmt::Display for ConditionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :- {}.", self.head, self.body.iter().join(", "))
    }
}

/// Naming state threaded through the lowering recursion.
///
/// Seeded with every assigned literal name so a derived compound name can
/// never shadow one; collisions between compound names resolve by
/// appending `_` until free.
struct NamingContext {
    slot: ConditionSlot,
    seen: HashSet<String>,
}

impl NamingContext {
    fn new(condition: &CompiledCondition) -> Self {
        Self {
            slot: condition.slot(),
            seen: condition.literal_names().cloned().collect(),
        }
    }

    /// The stable name referencing `expr`: literals keep their assigned
    /// name, compounds get `<slot>_condition_<descendant ordinals>`.
    fn name_for(&mut self, expr: &ConditionExpr) -> String {
        match expr {
            ConditionExpr::Literal(name) => name.clone(),
            compound => {
                let mut name =
                    format!("{}_{}", self.slot.prefix(), compound.literal_ordinals());
                while self.seen.contains(&name) {
                    name.push('_');
                }
                self.seen.insert(name.clone());
                name
            }
        }
    }
}

/// Decompose a compiled condition into its rule set for instance `index`.
///
/// A single-literal condition yields one bridging rule referencing the
/// literal name directly; compound conditions lower recursively:
/// disjunction as one single-premise rule per child, conjunction as one
/// multi-premise rule over all children.
#[must_use]
pub fn decompose(condition: &CompiledCondition, index: usize) -> Vec<ConditionRule> {
    let head = condition.slot().prefix();
    let mut rules = Vec::new();

    match condition.expr() {
        ConditionExpr::Literal(name) => rules.push(ConditionRule::new(
            ConditionAtom::new(&head, index),
            vec![ConditionAtom::new(name, index)],
        )),
        expr => {
            let mut naming = NamingContext::new(condition);
            lower(expr, &head, index, &mut naming, &mut rules);
        }
    }
    rules
}

fn lower(
    expr: &ConditionExpr,
    head: &str,
    index: usize,
    naming: &mut NamingContext,
    rules: &mut Vec<ConditionRule>,
) {
    match expr {
        // Literals are referenced by name; they need no defining rule.
        ConditionExpr::Literal(_) => {}
        ConditionExpr::Or(children) => {
            for child in children {
                let name = naming.name_for(child);
                rules.push(ConditionRule::new(
                    ConditionAtom::new(head, index),
                    vec![ConditionAtom::new(&name, index)],
                ));
                lower(child, &name, index, naming, rules);
            }
        }
        ConditionExpr::And(children) => {
            let names: Vec<String> = children.iter().map(|c| naming.name_for(c)).collect();
            rules.push(ConditionRule::new(
                ConditionAtom::new(head, index),
                names
                    .iter()
                    .map(|name| ConditionAtom::new(name, index))
                    .collect(),
            ));
            for (child, name) in children.iter().zip(&names) {
                lower(child, name, index, naming, rules);
            }
        }
    }
}
