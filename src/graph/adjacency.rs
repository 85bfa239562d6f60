//! Per-call adjacency over the effect edges.
//!
//! Designs are small (tens of nodes), so the graph is rebuilt fresh on every
//! query instead of being cached alongside the design.

use crate::model::Effect;
use petgraph::graphmap::DiGraphMap;
use std::collections::{HashSet, VecDeque};

/// Builds the directed name graph implied by `effects` (source -> target).
///
/// Parallel edges collapse to one; that is fine for reachability, which is
/// all this graph is used for. Sign-aware traversal keeps its own adjacency
/// (see `conflicts`).
pub(crate) fn effect_graph(effects: &[Effect]) -> DiGraphMap<&str, ()> {
    let mut graph = DiGraphMap::new();
    for eff in effects {
        graph.add_edge(eff.source.as_str(), eff.target.as_str(), ());
    }
    graph
}

/// True when a directed path `from -> ... -> to` exists in the current
/// effect graph. A name trivially reaches itself.
pub fn path_exists(from: &str, to: &str, effects: &[Effect]) -> bool {
    reachable(&effect_graph(effects), from, to)
}

/// Breadth-first reachability, bounded by the number of distinct names seen.
pub(crate) fn reachable(graph: &DiGraphMap<&str, ()>, from: &str, to: &str) -> bool {
    if from == to {
        return true;
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            return true;
        }
        if visited.insert(current) {
            for neighbor in graph.neighbors(current) {
                if !visited.contains(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
    }
    false
}
