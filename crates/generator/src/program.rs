//! Emission of the fact/rule program for a finalized Declare model.

use compiler::{compile, decompose, ConditionSlot};
use itertools::Itertools;
use parser::{AttributeValue, DeclareModel, Result};
use std::collections::HashSet;
use std::fmt;

/// The generated logic program, kept as its three text sections:
/// membership facts, attribute value facts and per-constraint blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LpProgram {
    facts: Vec<String>,
    values: Vec<String>,
    constraints: Vec<String>,
}

impl LpProgram {
    /// Emit the program for `model`.
    ///
    /// Walks the model in declaration order: one membership fact per event,
    /// one `has_attribute` fact per event/attribute pair, one value fact set
    /// per attribute of the shared table (inherently deduplicated), then per
    /// constraint instance its `template`/`activation` facts followed by the
    /// decomposed rules of the activation and correlation conditions.
    pub fn from_model(model: &DeclareModel) -> Result<Self> {
        let mut facts = Vec::new();
        for event in model.events() {
            facts.push(format!("{}({}).", event.object_type(), event.name()));
        }
        for event in model.events() {
            for attribute in event.attributes() {
                facts.push(format!(
                    "has_attribute({}, {}).",
                    event.name(),
                    attribute.borrow().name()
                ));
            }
        }

        let mut values = Vec::new();
        for attribute in model.attributes() {
            let attribute = attribute.borrow();
            if let Some(value) = attribute.value() {
                emit_value(&mut values, attribute.name(), value);
            }
        }
        // No value fact is emitted twice (e.g. a repeated enumeration member).
        let mut seen = HashSet::new();
        values.retain(|fact| seen.insert(fact.clone()));

        let mut constraints = Vec::new();
        for (index, instance) in model.constraints().iter().enumerate() {
            if index > 0 {
                constraints.push(String::new());
            }
            constraints.push(format!(
                "template({},\"{}\").",
                index,
                instance.template().name()
            ));
            for event in instance.events() {
                constraints.push(format!("activation({},{}).", index, event));
            }
            let slots = [
                (ConditionSlot::Activation, instance.activation_condition()),
                (ConditionSlot::Correlation, instance.correlation_condition()),
            ];
            for (slot, text) in slots {
                let Some(text) = text else { continue };
                let compiled = compile(slot, text, instance.line())?;
                for rule in decompose(&compiled, index) {
                    constraints.push(rule.to_string());
                }
            }
        }

        Ok(Self {
            facts,
            values,
            constraints,
        })
    }

    /// Membership and `has_attribute` facts.
    #[must_use]
    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    /// Attribute value facts.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Per-constraint statement lines (blank lines separate instances).
    #[must_use]
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// Number of emitted statements across all sections.
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.facts.len()
            + self.values.len()
            + self.constraints.iter().filter(|l| !l.is_empty()).count()
    }
}

impl fmt::Display for LpProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = [&self.facts, &self.values, &self.constraints]
            .into_iter()
            .filter(|section| !section.is_empty())
            .map(|section| section.join("\n"))
            .join("\n\n");
        writeln!(f, "{text}")
    }
}

/// Append the value fact(s) for one attribute.
///
/// The target fact language has no floats, so float bounds and literals are
/// scaled to the smallest integers by the minimal power of ten covering
/// their fractional digits.
fn emit_value(out: &mut Vec<String>, name: &str, value: &AttributeValue) {
    match value {
        AttributeValue::IntegerRange { low, high } => {
            out.push(format!("value({}, {}..{}).", name, low, high));
        }
        AttributeValue::FloatRange { low, high } => {
            let digits = fraction_digits(*low).max(fraction_digits(*high));
            out.push(format!(
                "value({}, {}..{}).",
                name,
                scale(*low, digits),
                scale(*high, digits)
            ));
        }
        AttributeValue::Integer(v) => out.push(format!("value({}, {}).", name, v)),
        AttributeValue::Float(v) => {
            out.push(format!("value({}, {}).", name, scale(*v, fraction_digits(*v))));
        }
        AttributeValue::Enumeration(members) => {
            for member in members {
                out.push(format!("value({}, {}).", name, member));
            }
        }
    }
}

fn fraction_digits(v: f64) -> u32 {
    format!("{v}")
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len() as u32)
}

fn scale(v: f64, digits: u32) -> i64 {
    (v * 10f64.powi(digits as i32)).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::DeclareModel;

    fn emit(src: &str) -> String {
        let model = DeclareModel::parse(src).expect("valid model");
        LpProgram::from_model(&model)
            .expect("emittable program")
            .to_string()
    }

    #[test]
    fn end_to_end_single_constraint() {
        let program = emit(
            "activity A\nbind A: grade\ngrade: integer between 1 and 5\nExistence[A] |A.grade>3",
        );
        assert_eq!(
            program,
            "activity(A).\n\
             has_attribute(A, grade).\n\
             \n\
             value(grade, 1..5).\n\
             \n\
             template(0,\"Existence\").\n\
             activation(0,A).\n\
             activation_condition(0,T) :- activation_condition_1(0,T).\n"
        );
    }

    #[test]
    fn shared_attribute_value_fact_is_emitted_once() {
        let program = emit(
            "activity A\nactivity B\nbind A: grade\nbind B: grade\n\
             grade: integer between 1 and 5",
        );
        assert_eq!(
            program.matches("value(grade, 1..5).").count(),
            1,
            "shared attribute must produce exactly one value fact"
        );
        assert!(program.contains("has_attribute(A, grade)."));
        assert!(program.contains("has_attribute(B, grade)."));
    }

    #[test]
    fn enumeration_emits_one_fact_per_member() {
        let program = emit("activity A\nbind A: name\nname: x, y, z");
        assert!(program.contains("value(name, x).\nvalue(name, y).\nvalue(name, z)."));
    }

    #[test]
    fn float_bounds_are_scaled_to_integers() {
        let program = emit("activity A\nbind A: mark\nmark: float between 2 and 9.5");
        assert!(program.contains("value(mark, 20..95)."));

        let program = emit("activity A\nbind A: mark\nmark: 2.75");
        assert!(program.contains("value(mark, 275)."));
    }

    #[test]
    fn bare_literal_value_fact() {
        let program = emit("activity A\nbind A: grade\ngrade: 4");
        assert!(program.contains("value(grade, 4)."));
    }

    #[test]
    fn constraint_blocks_in_source_order_with_both_conditions() {
        let src = "activity A\nactivity B\nbind A: grade\nbind B: grade\n\
                   grade: integer between 1 and 5\n\
                   Response[A, B] |A.grade = 3 |B.grade > 5 |1,5,s\n\
                   Existence[A] |A.grade>3";
        let program = emit(src);

        let first = program.find("template(0,\"Response\").").expect("first block");
        let second = program.find("template(1,\"Existence\").").expect("second block");
        assert!(first < second);

        assert!(program.contains("activation(0,A)."));
        assert!(program.contains("activation(0,B)."));
        assert!(program.contains("activation_condition(0,T) :- activation_condition_1(0,T)."));
        assert!(program.contains("correlation_condition(0,T) :- correlation_condition_1(0,T)."));
        assert!(program.contains("activation(1,A)."));
        assert!(program.contains("activation_condition(1,T) :- activation_condition_1(1,T)."));
    }

    #[test]
    fn compound_condition_rules_are_tagged_with_instance_index() {
        let src = "activity A\nbind A: grade, name\n\
                   grade: integer between 1 and 5\nname: x, y\n\
                   Absence[A] |A.grade > 2 and A.name is x or A.grade < 2";
        let program = emit(src);
        assert!(program.contains(
            "activation_condition(0,T) :- activation_condition_12(0,T)."
        ));
        assert!(program.contains(
            "activation_condition_12(0,T) :- activation_condition_1(0,T), activation_condition_2(0,T)."
        ));
        assert!(program.contains(
            "activation_condition(0,T) :- activation_condition_3(0,T)."
        ));
    }

    #[test]
    fn emission_is_deterministic() {
        let src = "activity A\nactivity B\nbind A: grade\nbind B: grade\n\
                   grade: integer between 1 and 5\n\
                   Response[A, B] |A.grade = 3 or A.grade = 4 |B.grade > 2";
        assert_eq!(emit(src), emit(src));
    }

    #[test]
    fn condition_errors_carry_the_constraint_line() {
        let src = "activity A\nExistence[A] |A.grade >";
        let model = DeclareModel::parse(src).expect("model parses, condition compiles later");
        let err = LpProgram::from_model(&model).unwrap_err();
        assert!(matches!(
            err,
            parser::ParseError::UnparsableCondition { line: 2, .. }
        ));
    }
}
