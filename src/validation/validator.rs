//! The central validator that orchestrates every structural check against a
//! study design.

use super::error::{IssueKind, ValidationIssue, ValidationReport};
use super::schema;
use crate::model::{StudyDesign, StudyNode};
use std::collections::HashMap;

/// Runs every check against an untyped JSON document, the form designs arrive
/// in over the network boundary. A document that does not even deserialize is
/// a schema failure.
pub fn validate_value(input: &serde_json::Value) -> ValidationReport {
    match serde_json::from_value::<StudyDesign>(input.clone()) {
        Ok(design) => validate(&design),
        Err(err) => ValidationReport::from_errors(vec![ValidationIssue::new(
            IssueKind::Schema,
            "schema",
            err.to_string(),
        )]),
    }
}

/// Runs every check against a typed design, accumulating all applicable
/// issues. Checks run in a fixed order: schema (short-circuiting), name
/// uniqueness, per-effect reference checks, then global cycle detection.
pub fn validate(design: &StudyDesign) -> ValidationReport {
    // 1. Schema conformance. A schema failure ends the run with a single
    // summary issue; later checks assume a conforming design.
    let violations = schema::check(design);
    if !violations.is_empty() {
        return ValidationReport::from_errors(vec![ValidationIssue::new(
            IssueKind::Schema,
            "schema",
            violations.join("\n"),
        )]);
    }

    let mut errors = Vec::new();

    // 2. Name uniqueness across variable, instrument and item names.
    let mut known_names: Vec<&str> = Vec::new();
    for (index, node) in design.nodes.iter().enumerate() {
        if known_names.contains(&node.name()) {
            errors.push(ValidationIssue::new(
                IssueKind::DuplicateName,
                format!("nodes[{}]", index),
                format!("Duplicate variable name: {}", node.name()),
            ));
        }
        known_names.push(node.name());

        if let StudyNode::Instrument(inst) = node {
            for (item_index, item) in inst.items.iter().enumerate() {
                if known_names.contains(&item.name.as_str()) {
                    errors.push(ValidationIssue::new(
                        IssueKind::DuplicateName,
                        format!("nodes[{}].items[{}]", index, item_index),
                        format!("Duplicate item name: {}", item.name),
                    ));
                }
                known_names.push(&item.name);
            }
        }
    }

    // 3. Per-effect checks. All conditions are independent; several may fire
    // for the same effect.
    let distributions = design.distributions();
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();

    for (index, eff) in design.effects.iter().enumerate() {
        let path = format!("effects[{}]", index);
        let source_known = known_names.contains(&eff.source.as_str());
        let target_known = known_names.contains(&eff.target.as_str());

        if !source_known {
            errors.push(ValidationIssue::new(
                IssueKind::DanglingReference,
                path.clone(),
                format!("Source variable not found: {}", eff.source),
            ));
        }
        if !target_known {
            errors.push(ValidationIssue::new(
                IssueKind::DanglingReference,
                path.clone(),
                format!("Target variable not found: {}", eff.target),
            ));
        }
        if eff.source == eff.target {
            errors.push(ValidationIssue::new(
                IssueKind::SelfLoop,
                path.clone(),
                format!("Self-reference not allowed: {}", eff.source),
            ));
        }

        // A correlation needs a mean and variance on both ends; the
        // categorical family declares neither.
        for (role, name, resolved) in [
            ("source", &eff.source, source_known),
            ("target", &eff.target, target_known),
        ] {
            if resolved
                && distributions
                    .get(name.as_str())
                    .is_some_and(|dist| dist.moments().is_none())
            {
                errors.push(ValidationIssue::new(
                    IssueKind::CategoricalEndpoint,
                    path.clone(),
                    format!("Effect {} has no numeric distribution: {}", role, name),
                ));
            }
        }

        // Only fully resolved edges participate in the cycle check.
        if source_known && target_known {
            adjacency
                .entry(eff.source.as_str())
                .or_default()
                .push(eff.target.as_str());
        }
    }

    // 4. Global cycle detection. One issue regardless of how many cycles the
    // graph contains.
    if detect_cycle(&known_names, &adjacency) {
        errors.push(ValidationIssue::new(
            IssueKind::Cycle,
            "effects",
            "Cycle detected in variable relationships",
        ));
    }

    ValidationReport::from_errors(errors)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting, // On the recursion stack; reaching it again is a back-edge.
    Visited,
}

fn detect_cycle<'a>(names: &[&'a str], adjacency: &HashMap<&'a str, Vec<&'a str>>) -> bool {
    let mut state: HashMap<&str, VisitState> = HashMap::new();
    names
        .iter()
        .any(|&name| !state.contains_key(name) && visit(name, adjacency, &mut state))
}

fn visit<'a>(
    node: &'a str,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
    state: &mut HashMap<&'a str, VisitState>,
) -> bool {
    state.insert(node, VisitState::Visiting);

    for &next in adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]) {
        match state.get(next) {
            Some(VisitState::Visiting) => return true,
            Some(VisitState::Visited) => {}
            None => {
                if visit(next, adjacency, state) {
                    return true;
                }
            }
        }
    }

    state.insert(node, VisitState::Visited);
    false
}
