//! Advisory detection of sign-conflicting ancestor paths.
//!
//! A target is flagged when some ancestor influences it along one path with a
//! net positive sign and along another with a net negative sign; the two
//! pulls partially cancel and the declared pairwise correlations stop telling
//! the whole story. This is a hint for the editing surface, not a validation
//! failure.

use crate::model::Effect;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Hard cap on edge expansions per (ancestor, target) pair. Exhaustive path
/// enumeration is exponential on dense graphs; past this budget the pair is
/// reported with whatever signs were seen.
const MAX_PATH_STEPS: usize = 1000;

type SignedAdjacency<'a> = HashMap<&'a str, SmallVec<[(&'a str, i8); 4]>>;

/// Names with at least one ancestor whose influence arrives with both net
/// signs. Order of `node_names` is preserved; each flagged name appears once.
pub fn conflicting_nodes(node_names: &[String], effects: &[Effect]) -> Vec<String> {
    // Parallel edges are kept: two effects over the same pair may disagree
    // in sign, which is exactly what this probe is after.
    let mut adj: SignedAdjacency = HashMap::new();
    for eff in effects {
        let sign: i8 = if eff.coefficient >= 0.0 { 1 } else { -1 };
        adj.entry(eff.source.as_str())
            .or_default()
            .push((eff.target.as_str(), sign));
    }

    node_names
        .iter()
        .filter(|target| {
            node_names.iter().any(|source| {
                source != *target && has_conflicting_paths(&adj, source, target)
            })
        })
        .cloned()
        .collect()
}

/// Depth-first enumeration of every path `source -> ... -> target`, tracking
/// the running product of edge signs. Stops as soon as both net signs have
/// been seen or the step budget runs out.
fn has_conflicting_paths(adj: &SignedAdjacency, source: &str, target: &str) -> bool {
    let mut seen_positive = false;
    let mut seen_negative = false;
    let mut steps = 0usize;

    let mut stack: SmallVec<[(&str, i8); 16]> = SmallVec::new();
    stack.push((source, 1));

    while let Some((node, sign)) = stack.pop() {
        let Some(edges) = adj.get(node) else { continue };
        for &(next, edge_sign) in edges {
            steps += 1;
            if steps > MAX_PATH_STEPS {
                return seen_positive && seen_negative;
            }

            let net = sign * edge_sign;
            if next == target {
                if net > 0 {
                    seen_positive = true;
                } else {
                    seen_negative = true;
                }
                if seen_positive && seen_negative {
                    return true;
                }
            } else {
                stack.push((next, net));
            }
        }
    }

    seen_positive && seen_negative
}
