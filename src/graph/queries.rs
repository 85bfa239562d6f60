//! Candidate filters used while a design is being edited.
//!
//! The editing surface asks these before offering a (source, target) pair, so
//! a user can never even propose an edge that would close a cycle. The
//! validator's cycle check is the symmetric backstop for designs submitted
//! wholesale.

use super::adjacency::{effect_graph, reachable};
use crate::model::Effect;

/// Names that may legally become a new edge's source into `target`.
///
/// Excludes `target` itself and any candidate the target already reaches:
/// with a path `target -> ... -> candidate` in place, adding
/// `candidate -> target` would close the loop. Order of `node_names` is
/// preserved. An empty `target` applies no constraint yet.
pub fn available_sources(
    target: &str,
    node_names: &[String],
    effects: &[Effect],
) -> Vec<String> {
    if target.is_empty() {
        return node_names.to_vec();
    }

    let graph = effect_graph(effects);
    node_names
        .iter()
        .filter(|candidate| {
            candidate.as_str() != target && !reachable(&graph, target, candidate)
        })
        .cloned()
        .collect()
}

/// Names that may legally become a new edge's target from `source`.
///
/// Symmetric to `available_sources`: excludes `source` itself and any
/// candidate that already reaches `source` as an ancestor.
pub fn available_targets(
    source: &str,
    node_names: &[String],
    effects: &[Effect],
) -> Vec<String> {
    if source.is_empty() {
        return node_names.to_vec();
    }

    let graph = effect_graph(effects);
    node_names
        .iter()
        .filter(|candidate| {
            candidate.as_str() != source && !reachable(&graph, candidate, source)
        })
        .cloned()
        .collect()
}
