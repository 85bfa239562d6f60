//! Turns pairwise correlation effects into per-target linear formulas and
//! adjusted residual variances.
//!
//! Resolution is a single pass over a validated design. Every beta and shift
//! is computed from the *declared* marginal moments of the variables
//! involved, never from an already-resolved ancestor, so no topological
//! ordering is needed: a target's resolution is independent of whether its
//! parents have incoming effects of their own.

use super::formula::LinearFormula;
use crate::model::{EffectKind, Moments, StudyDesign};
use smallvec::SmallVec;
use std::collections::HashMap;

/// One usable incoming edge, kept in effect-declaration order for codegen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParent {
    pub source: String,
    pub kind: EffectKind,
    pub coefficient: f64,
}

/// The resolved description of a target with at least one incoming effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    /// Intercept plus weighted parent terms, e.g. `"-5 + 0.05 * VarA"`.
    pub formula: String,
    /// Residual variance after subtracting what the parents explain. Not
    /// clamped: an over-constrained correlation structure yields a negative
    /// value, which is passed through for the generation runtime to reject.
    pub variance: f64,
    pub parents: Vec<ResolvedParent>,
}

/// Resolution output, keyed by target name. Nodes without usable incoming
/// effects have no entry and keep their declared marginals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedModel {
    nodes: HashMap<String, ResolvedNode>,
}

impl ResolvedModel {
    pub fn get(&self, name: &str) -> Option<&ResolvedNode> {
        self.nodes.get(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Resolves every target of the design.
///
/// Effects that do not resolve to two distinct existing names with numeric
/// distributions are skipped silently; they were either flagged by the
/// validator already or are stale references the caller chose to keep, and
/// must never surface downstream.
pub fn resolve(design: &StudyDesign) -> ResolvedModel {
    let moments: HashMap<&str, Moments> = design
        .distributions()
        .into_iter()
        .filter_map(|(name, dist)| dist.moments().map(|m| (name, m)))
        .collect();

    let mut model = ResolvedModel::default();

    for target in design.node_names() {
        let Some(target_moments) = moments.get(target.as_str()).copied() else {
            continue;
        };

        let incoming: SmallVec<[_; 4]> = design
            .effects
            .iter()
            .filter(|eff| {
                eff.target == target
                    && eff.source != eff.target
                    && moments.contains_key(eff.source.as_str())
            })
            .collect();
        if incoming.is_empty() {
            continue;
        }

        let mut total_shift = 0.0;
        let mut explained = 0.0;
        let mut terms: SmallVec<[(f64, &str); 4]> = SmallVec::new();
        let mut parents = Vec::with_capacity(incoming.len());

        for eff in &incoming {
            let source = moments[eff.source.as_str()];
            let beta = eff.coefficient * (target_moments.variance / source.variance).sqrt();
            total_shift += beta * source.mean;
            explained += beta * beta * source.variance;
            terms.push((beta, eff.source.as_str()));
            parents.push(ResolvedParent {
                source: eff.source.clone(),
                kind: eff.kind,
                coefficient: eff.coefficient,
            });
        }

        let mut formula = LinearFormula::new(target_moments.mean - total_shift);
        for (beta, source) in terms {
            formula.push_term(beta, source);
        }
        model.nodes.insert(
            target,
            ResolvedNode {
                formula: formula.render(),
                variance: target_moments.variance - explained,
                parents,
            },
        );
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DataType, Distribution, Effect, StudyNode, StudyType, Variable,
    };

    fn normal_var(name: &str, mean: f64, std_dev: f64) -> StudyNode {
        StudyNode::Variable(Variable {
            name: name.into(),
            data_type: DataType::Continuous,
            categories: None,
            distribution: Distribution::Normal { mean, std_dev },
        })
    }

    fn correlation(source: &str, target: &str, coefficient: f64) -> Effect {
        Effect {
            id: format!("eff_{}_{}", source, target),
            source: source.into(),
            target: target.into(),
            kind: EffectKind::Correlation,
            coefficient,
        }
    }

    fn design_with(nodes: Vec<StudyNode>, effects: Vec<Effect>) -> StudyDesign {
        StudyDesign { study_type: StudyType::CrossSectional, nodes, effects }
    }

    #[test]
    fn no_effects_resolves_nothing() {
        let design = design_with(
            vec![normal_var("A", 10.0, 1.0), normal_var("B", 20.0, 5.0)],
            vec![],
        );
        assert!(resolve(&design).is_empty());
    }

    #[test]
    fn single_edge_applies_scaled_beta_and_intercept_shift() {
        let design = design_with(
            vec![normal_var("VarA", 100.0, 10.0), normal_var("VarB", 0.0, 1.0)],
            vec![correlation("VarA", "VarB", 0.5)],
        );
        let model = resolve(&design);

        // beta = 0.5 * (1/10) = 0.05; shift = 5; intercept = -5;
        // residual = 1 - 0.05^2 * 100 = 0.75.
        let node = model.get("VarB").expect("VarB resolves");
        assert_eq!(node.formula, "-5 + 0.05 * VarA");
        assert!((node.variance - 0.75).abs() < 1e-9);
        assert!(model.get("VarA").is_none());
    }

    #[test]
    fn two_parents_accumulate_shift_and_explained_variance() {
        let design = design_with(
            vec![
                normal_var("A", 10.0, 1.0),
                normal_var("B", 20.0, 1.0),
                normal_var("C", 30.0, 1.0),
            ],
            vec![correlation("A", "C", 0.2), correlation("B", "C", 0.3)],
        );
        let model = resolve(&design);

        // shifts 2 and 6 -> intercept 22; explained 0.04 + 0.09 = 0.13.
        let node = model.get("C").expect("C resolves");
        assert_eq!(node.formula, "22 + 0.2 * A + 0.3 * B");
        assert!((node.variance - 0.87).abs() < 1e-9);
        assert_eq!(node.parents.len(), 2);
        assert_eq!(node.parents[0].source, "A");
        assert_eq!(node.parents[1].source, "B");
    }

    #[test]
    fn chains_use_declared_marginals_not_resolved_ancestors() {
        let design = design_with(
            vec![
                normal_var("A", 10.0, 1.0),
                normal_var("B", 20.0, 1.0),
                normal_var("C", 30.0, 1.0),
            ],
            vec![correlation("A", "B", 0.5), correlation("B", "C", 0.3)],
        );
        let model = resolve(&design);

        assert_eq!(model.get("B").unwrap().formula, "15 + 0.5 * A");
        // C shifts by B's declared mean (20), not B's resolved intercept.
        assert_eq!(model.get("C").unwrap().formula, "24 + 0.3 * B");
    }

    #[test]
    fn dangling_and_categorical_edges_are_skipped() {
        let mut design = design_with(
            vec![normal_var("A", 0.0, 1.0)],
            vec![correlation("ghost", "A", 0.5), correlation("A", "ghost", 0.5)],
        );
        assert!(resolve(&design).is_empty());

        design.nodes.push(StudyNode::Variable(Variable {
            name: "Group".into(),
            data_type: DataType::Nominal,
            categories: Some(vec!["Yes".into(), "No".into()]),
            distribution: Distribution::Categorical,
        }));
        design.effects = vec![correlation("Group", "A", 0.5)];
        assert!(resolve(&design).is_empty());
    }

    #[test]
    fn negative_residual_variance_is_passed_through() {
        // Two strong parents overdetermine a unit-variance target.
        let design = design_with(
            vec![
                normal_var("A", 0.0, 1.0),
                normal_var("B", 0.0, 1.0),
                normal_var("C", 0.0, 1.0),
            ],
            vec![correlation("A", "C", 0.9), correlation("B", "C", 0.9)],
        );
        let model = resolve(&design);
        let variance = model.get("C").unwrap().variance;
        assert!(variance < 0.0);
        assert!((variance - (1.0 - 0.81 - 0.81)).abs() < 1e-9);
    }

    #[test]
    fn resolution_is_deterministic() {
        let design = design_with(
            vec![normal_var("A", 10.0, 2.0), normal_var("B", 0.0, 1.0)],
            vec![correlation("A", "B", -0.4)],
        );
        assert_eq!(resolve(&design), resolve(&design));
    }
}
