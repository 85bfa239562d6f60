//! Flattens a design and its resolution into per-node configuration records.
//!
//! Records are the generator's intermediate form: one entry per generatable
//! column, in declaration order, with instruments expanded in place: the
//! instrument itself, then each of its items, which share the instrument's
//! distribution and categories.

use crate::model::{Distribution, StudyDesign, StudyNode};
use crate::resolve::{format_number, ResolvedModel, ResolvedParent};

/// Distribution-specific parameters of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordBody {
    /// Normal marginals and every resolved node: a formula string (the bare
    /// mean, or the resolved linear expression) plus a variance.
    Formula { formula: String, variance: f64 },
    /// Unresolved uniform marginals.
    Range { min: f64, max: f64 },
    /// Categorical nodes: the labels and the record's 1-based position in
    /// the emitted sequence.
    Labels { labels: Vec<String>, order: usize },
}

/// One generatable column of the study.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub name: String,
    /// Lowercase distribution family label for the `type` field.
    pub family: &'static str,
    pub body: RecordBody,
    /// Resolved incoming edges, in effect-declaration order. Empty for
    /// unresolved nodes; never contains a dangling source.
    pub parents: Vec<ResolvedParent>,
}

/// Builds the record sequence for a design.
pub fn records(design: &StudyDesign, resolved: &ResolvedModel) -> Vec<NodeRecord> {
    let mut out = Vec::new();
    for node in &design.nodes {
        push_record(&mut out, node.name(), node.distribution(), node.categories(), resolved);
        if let StudyNode::Instrument(inst) = node {
            for item in &inst.items {
                push_record(&mut out, &item.name, &inst.distribution, Some(&inst.categories), resolved);
            }
        }
    }
    out
}

fn push_record(
    out: &mut Vec<NodeRecord>,
    name: &str,
    distribution: &Distribution,
    categories: Option<&[String]>,
    resolved: &ResolvedModel,
) {
    let position = out.len() + 1;

    let (body, parents) = match resolved.get(name) {
        // Resolved nodes substitute formula/variance for their declared
        // marginals, whatever the declared family.
        Some(node) => (
            RecordBody::Formula { formula: node.formula.clone(), variance: node.variance },
            node.parents.clone(),
        ),
        None => {
            let body = match distribution {
                Distribution::Normal { mean, std_dev } => RecordBody::Formula {
                    formula: format_number(*mean),
                    variance: std_dev * std_dev,
                },
                Distribution::Uniform { min, max } => RecordBody::Range { min: *min, max: *max },
                Distribution::Categorical => RecordBody::Labels {
                    labels: categories.unwrap_or_default().to_vec(),
                    order: position,
                },
            };
            (body, Vec::new())
        }
    };

    out.push(NodeRecord {
        name: name.to_string(),
        family: distribution.kind().label(),
        body,
        parents,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DataType, Effect, EffectKind, Instrument, InstrumentItem, StudyType, Variable,
    };
    use crate::resolve::resolve;

    fn design() -> StudyDesign {
        StudyDesign {
            study_type: StudyType::CrossSectional,
            nodes: vec![
                StudyNode::Variable(Variable {
                    name: "Age".into(),
                    data_type: DataType::Continuous,
                    categories: None,
                    distribution: Distribution::Normal { mean: 40.0, std_dev: 12.0 },
                }),
                StudyNode::Instrument(Instrument {
                    name: "Mood".into(),
                    data_type: DataType::Ordinal,
                    categories: vec!["1".into(), "2".into(), "3".into()],
                    distribution: Distribution::Normal { mean: 2.0, std_dev: 0.5 },
                    items: vec![
                        InstrumentItem { id: "a".into(), name: "Q1".into() },
                        InstrumentItem { id: "b".into(), name: "Q2".into() },
                    ],
                    scales: None,
                }),
                StudyNode::Variable(Variable {
                    name: "Group".into(),
                    data_type: DataType::Nominal,
                    categories: Some(vec!["Yes".into(), "No".into()]),
                    distribution: Distribution::Categorical,
                }),
            ],
            effects: vec![Effect {
                id: "e1".into(),
                source: "Age".into(),
                target: "Q1".into(),
                kind: EffectKind::Correlation,
                coefficient: 0.5,
            }],
        }
    }

    #[test]
    fn instruments_expand_in_declaration_order() {
        let design = design();
        let records = records(&design, &resolve(&design));
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Age", "Mood", "Q1", "Q2", "Group"]);
    }

    #[test]
    fn categorical_order_is_position_in_emitted_sequence() {
        let design = design();
        let records = records(&design, &resolve(&design));
        let group = records.last().unwrap();
        assert_eq!(group.family, "categorical");
        match &group.body {
            RecordBody::Labels { labels, order } => {
                assert_eq!(labels, &vec!["Yes".to_string(), "No".to_string()]);
                assert_eq!(*order, 5);
            }
            other => panic!("expected labels body, got {:?}", other),
        }
    }

    #[test]
    fn resolved_item_substitutes_formula_and_keeps_parents() {
        let design = design();
        let records = records(&design, &resolve(&design));
        let q1 = records.iter().find(|r| r.name == "Q1").unwrap();
        assert_eq!(q1.parents.len(), 1);
        assert_eq!(q1.parents[0].source, "Age");
        match &q1.body {
            RecordBody::Formula { formula, .. } => assert!(formula.contains("* Age")),
            other => panic!("expected formula body, got {:?}", other),
        }
        // Q2 has no incoming effect and keeps the marginal mean.
        let q2 = records.iter().find(|r| r.name == "Q2").unwrap();
        assert_eq!(q2.body, RecordBody::Formula { formula: "2".into(), variance: 0.25 });
    }
}
