use crate::{
    data::{CspEntry, DataGraph, Neighbor},
    pattern::Pattern,
    types::VId,
};

/// Whether the `(elabel, nlabel)` multiset of `sub` is contained in the one
/// of `sup`. Both lists are sorted.
fn is_submultiset(sub: &[Neighbor], sup: &[Neighbor]) -> bool {
    let mut sup = sup.iter().map(|n| n.labels());
    'outer: for labels in sub.iter().map(|n| n.labels()) {
        for other in &mut sup {
            if other == labels {
                continue 'outer;
            }
            if other > labels {
                return false;
            }
        }
        return false;
    }
    true
}

/// Whether the input node `data` may be the image of the candidate node
/// `candidate`.
pub fn is_potential_partner(candidate: &CspEntry, data: &CspEntry) -> bool {
    candidate.label() == data.label()
        && candidate.in_deg() <= data.in_deg()
        && candidate.out_deg() <= data.out_deg()
        && is_submultiset(candidate.ingoing(), data.ingoing())
        && is_submultiset(candidate.outgoing(), data.outgoing())
}

/// Potential partners of the pattern node `vid`, in ascending id order.
pub fn potential_partners(pattern: &Pattern, vid: VId, data_graph: &DataGraph) -> Vec<VId> {
    match pattern.csp_graph().entry(vid) {
        Some(entry) => data_graph
            .vertices(entry.label())
            .iter()
            .copied()
            .filter(|&d| {
                data_graph
                    .entry(d)
                    .map_or(false, |data| is_potential_partner(entry, data))
            })
            .collect(),
        None => vec![],
    }
}
