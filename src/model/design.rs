//! The `StudyDesign` root aggregate and its effect edges.

use super::node::{Distribution, StudyNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hard ceiling on generated sample size.
pub const MAX_GENERATION_N: u32 = 10_000;
/// Row count used for quick previews in the editing UI.
pub const PREVIEW_LIMIT: u32 = 10;

/// Largest magnitude accepted for means, bounds and other free numerics.
pub const MAX_NUMERIC_MAGNITUDE: f64 = 1_000_000_000.0;
/// Longest accepted variable name, in characters.
pub const MAX_NAME_LEN: usize = 70;
/// Bounds on the number of category labels.
pub const MIN_CATEGORIES: usize = 2;
pub const MAX_CATEGORIES: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudyType {
    #[serde(rename = "cross-sectional")]
    CrossSectional,
    #[serde(rename = "cohort")]
    Cohort,
    #[serde(rename = "case-control")]
    CaseControl,
}

/// The only effect kind currently modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Correlation,
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Correlation => "correlation",
        }
    }
}

/// A directed edge `source -> target`: the target's value is partly explained
/// by the source's value with the given correlation coefficient.
///
/// Endpoints are held by name only; removing or renaming a node is the
/// caller's responsibility to cascade, and the validator flags whatever is
/// left dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub coefficient: f64,
}

/// The root aggregate. Owns all nodes and effects; every core operation is a
/// pure function of one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDesign {
    pub study_type: StudyType,
    #[serde(default, rename = "variables")]
    pub nodes: Vec<StudyNode>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl StudyDesign {
    pub fn new(study_type: StudyType) -> Self {
        Self { study_type, nodes: Vec::new(), effects: Vec::new() }
    }

    /// Every addressable name, in declaration order: each node's own name
    /// followed by its item names when the node is an instrument.
    pub fn node_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            names.push(node.name().to_string());
            if let StudyNode::Instrument(inst) = node {
                names.extend(inst.items.iter().map(|item| item.name.clone()));
            }
        }
        names
    }

    /// Maps every addressable name to its governing distribution. Items map
    /// to the owning instrument's distribution.
    pub fn distributions(&self) -> HashMap<&str, &Distribution> {
        let mut map = HashMap::new();
        for node in &self.nodes {
            map.insert(node.name(), node.distribution());
            if let StudyNode::Instrument(inst) = node {
                for item in &inst.items {
                    map.insert(item.name.as_str(), &inst.distribution);
                }
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::{DataType, Variable};

    fn variable(name: &str) -> StudyNode {
        StudyNode::Variable(Variable {
            name: name.into(),
            data_type: DataType::Continuous,
            categories: None,
            distribution: Distribution::Normal { mean: 0.0, std_dev: 1.0 },
        })
    }

    #[test]
    fn node_names_flatten_instrument_items_in_order() {
        let mut design = StudyDesign::new(StudyType::CrossSectional);
        design.nodes.push(variable("Age"));
        design.nodes.push(StudyNode::Instrument(crate::model::node::Instrument {
            name: "Mood".into(),
            data_type: DataType::Ordinal,
            categories: vec!["1".into(), "2".into()],
            distribution: Distribution::Normal { mean: 1.5, std_dev: 0.5 },
            items: vec![
                crate::model::node::InstrumentItem { id: "a".into(), name: "Q1".into() },
                crate::model::node::InstrumentItem { id: "b".into(), name: "Q2".into() },
            ],
            scales: None,
        }));

        assert_eq!(design.node_names(), vec!["Age", "Mood", "Q1", "Q2"]);
        let dists = design.distributions();
        assert_eq!(dists["Q2"], dists["Mood"]);
    }

    #[test]
    fn design_wire_shape_uses_variables_field() {
        let design: StudyDesign = serde_json::from_str(
            r#"{"studyType": "cohort", "variables": [], "effects": []}"#,
        )
        .unwrap();
        assert_eq!(design.study_type, StudyType::Cohort);

        // Both lists are optional on the wire.
        let bare: StudyDesign = serde_json::from_str(r#"{"studyType": "case-control"}"#).unwrap();
        assert!(bare.nodes.is_empty() && bare.effects.is_empty());

        let json = serde_json::to_value(&design).unwrap();
        assert!(json.get("variables").is_some());
    }
}
