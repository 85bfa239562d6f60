//! Value-level schema rules for the entity model.
//!
//! Shape conformance is the deserializer's job; these rules cover everything
//! the type system cannot express: name format, numeric ranges, category
//! counts and the data-type/distribution compatibility table.

use crate::model::{
    Distribution, Effect, StudyDesign, StudyNode, MAX_CATEGORIES, MAX_NAME_LEN,
    MAX_NUMERIC_MAGNITUDE, MIN_CATEGORIES,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// No whitespace anywhere, no leading digit.
static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn name_pattern() -> &'static Regex {
    NAME_PATTERN.get_or_init(|| Regex::new(r"^[^0-9\s]\S*$").expect("static pattern"))
}

/// True when `name` is a legal variable/item identifier.
pub fn is_valid_name(name: &str) -> bool {
    name.chars().count() <= MAX_NAME_LEN && name_pattern().is_match(name)
}

/// Collects every schema violation in the design. An empty result means the
/// design conforms; a non-empty one is reported as a single summary error.
pub fn check(design: &StudyDesign) -> Vec<String> {
    let mut violations = Vec::new();

    for (index, node) in design.nodes.iter().enumerate() {
        check_node(index, node, &mut violations);
    }

    for (index, eff) in design.effects.iter().enumerate() {
        check_effect(index, eff, &mut violations);
    }

    violations
}

fn check_node(index: usize, node: &StudyNode, out: &mut Vec<String>) {
    let path = format!("nodes[{}]", index);

    check_name(&path, node.name(), out);
    check_distribution(&path, node.distribution(), out);

    let data_type = node.data_type();
    if !data_type
        .valid_distributions()
        .contains(&node.distribution().kind())
    {
        out.push(format!(
            "{}: distribution '{}' is not valid for a {:?} variable",
            path,
            node.distribution().kind().label(),
            data_type
        ));
    }

    match node {
        StudyNode::Variable(v) => {
            if data_type.is_categorical() {
                match &v.categories {
                    Some(labels) => check_categories(&path, labels, out),
                    None => out.push(format!(
                        "{}: {:?} variable '{}' requires category labels",
                        path, data_type, v.name
                    )),
                }
            }
        }
        StudyNode::Instrument(inst) => {
            if !data_type.is_categorical() {
                out.push(format!(
                    "{}: instrument '{}' must be ordinal or nominal",
                    path, inst.name
                ));
            }
            check_categories(&path, &inst.categories, out);
            for (item_index, item) in inst.items.iter().enumerate() {
                check_name(&format!("{}.items[{}]", path, item_index), &item.name, out);
            }
        }
    }
}

fn check_name(path: &str, name: &str, out: &mut Vec<String>) {
    if !is_valid_name(name) {
        out.push(format!(
            "{}: name '{}' must have no whitespace, not start with a digit, and be at most {} characters",
            path, name, MAX_NAME_LEN
        ));
    }
}

fn check_distribution(path: &str, dist: &Distribution, out: &mut Vec<String>) {
    match dist {
        Distribution::Normal { mean, std_dev } => {
            check_magnitude(path, "mean", *mean, out);
            if !(*std_dev > 0.0 && *std_dev <= MAX_NUMERIC_MAGNITUDE) {
                out.push(format!("{}: stdDev must be positive and at most 1e9", path));
            }
        }
        Distribution::Uniform { min, max } => {
            check_magnitude(path, "min", *min, out);
            check_magnitude(path, "max", *max, out);
        }
        Distribution::Categorical => {}
    }
}

fn check_magnitude(path: &str, field: &str, value: f64, out: &mut Vec<String>) {
    if !(value.is_finite() && value.abs() <= MAX_NUMERIC_MAGNITUDE) {
        out.push(format!("{}: {} must be a finite number within ±1e9", path, field));
    }
}

fn check_categories(path: &str, labels: &[String], out: &mut Vec<String>) {
    if labels.len() < MIN_CATEGORIES || labels.len() > MAX_CATEGORIES {
        out.push(format!(
            "{}: between {} and {} category labels required",
            path, MIN_CATEGORIES, MAX_CATEGORIES
        ));
    }
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            out.push(format!("{}: duplicate category label '{}'", path, label));
        }
    }
}

fn check_effect(index: usize, eff: &Effect, out: &mut Vec<String>) {
    if !(eff.coefficient >= -1.0 && eff.coefficient <= 1.0) {
        out.push(format!(
            "effects[{}]: coefficient must be between -1 and 1",
            index
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Age", true)]
    #[case("blood_pressure", true)]
    #[case("x", true)]
    #[case("Q1", true)]
    #[case("9lives", false)] // leading digit
    #[case("has space", false)]
    #[case("tab\there", false)]
    #[case("", false)]
    fn name_rule(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_name(name), expected);
    }

    #[test]
    fn name_rule_caps_length() {
        assert!(is_valid_name(&"a".repeat(70)));
        assert!(!is_valid_name(&"a".repeat(71)));
    }

    #[test]
    fn nominal_variable_cannot_be_normal() {
        use crate::model::{DataType, StudyDesign, StudyType, Variable};
        let mut design = StudyDesign::new(StudyType::CrossSectional);
        design.nodes.push(StudyNode::Variable(Variable {
            name: "Group".into(),
            data_type: DataType::Nominal,
            categories: Some(vec!["A".into(), "B".into()]),
            distribution: Distribution::Normal { mean: 0.0, std_dev: 1.0 },
        }));

        let violations = check(&design);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("not valid for a Nominal variable"));
    }

    #[test]
    fn zero_std_dev_is_rejected() {
        use crate::model::{DataType, StudyDesign, StudyType, Variable};
        let mut design = StudyDesign::new(StudyType::CrossSectional);
        design.nodes.push(StudyNode::Variable(Variable {
            name: "Age".into(),
            data_type: DataType::Continuous,
            categories: None,
            distribution: Distribution::Normal { mean: 40.0, std_dev: 0.0 },
        }));

        let violations = check(&design);
        assert!(violations.iter().any(|v| v.contains("stdDev")));
    }
}
