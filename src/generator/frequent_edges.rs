use crate::{
    data::DataGraph,
    types::{ELabel, VLabel},
};
use std::collections::BTreeMap;

/// A labeled edge type occurring at least `min_support` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrequentEdge {
    pub source_label: VLabel,
    pub target_label: VLabel,
    pub elabel: ELabel,
    pub frequency: usize,
}

/// Counts every `(source_label, target_label, elabel)` triple of the input
/// graph and keeps those occurring at least `min_support` times.
///
/// The result is sorted by `(source_label, target_label, elabel)`.
pub fn frequent_edges(data_graph: &DataGraph, min_support: usize) -> Vec<FrequentEdge> {
    let mut counts: BTreeMap<(VLabel, VLabel, ELabel), usize> = BTreeMap::new();
    for (_, entry) in data_graph.csp_graph().entries() {
        for n in entry.outgoing() {
            *counts
                .entry((entry.label(), n.nlabel(), n.elabel()))
                .or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(_, frequency)| frequency >= min_support)
        .map(
            |((source_label, target_label, elabel), frequency)| FrequentEdge {
                source_label,
                target_label,
                elabel,
                frequency,
            },
        )
        .collect()
}
