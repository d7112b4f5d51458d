use crate::{
    data::{CspEntry, CspGraph},
    types::{ELabel, VLabel},
};
use itertools::Itertools;
use std::collections::BTreeMap;

/// The structural signature of one vertex.
///
/// Vertices related by an isomorphism have the same Signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature {
    vlabel: VLabel,
    in_deg: usize,
    out_deg: usize,
    ingoing: Vec<(ELabel, VLabel)>,
    outgoing: Vec<(ELabel, VLabel)>,
}

impl Signature {
    pub fn new(entry: &CspEntry) -> Self {
        // Neighbor lists are sorted by (elabel, nlabel, nid), so the
        // projections are sorted as well.
        Self {
            vlabel: entry.label(),
            in_deg: entry.in_deg(),
            out_deg: entry.out_deg(),
            ingoing: entry.ingoing().iter().map(|n| n.labels()).collect(),
            outgoing: entry.outgoing().iter().map(|n| n.labels()).collect(),
        }
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:[{}]:[{}]",
            self.vlabel,
            self.in_deg,
            self.out_deg,
            self.ingoing
                .iter()
                .format_with(";", |(e, n), f| f(&format_args!("{},{}", e, n))),
            self.outgoing
                .iter()
                .format_with(";", |(e, n), f| f(&format_args!("{},{}", e, n))),
        )
    }
}

/// Builds the canonical code of `csp_graph`.
///
/// Equal codes are necessary for two graphs to be isomorphic but not
/// sufficient: non-isomorphic graphs sharing the same multiset of vertex
/// signatures collide.
pub fn build_canonical_code(csp_graph: &CspGraph) -> String {
    let mut counts: BTreeMap<Signature, usize> = BTreeMap::new();
    for (_, entry) in csp_graph.entries() {
        *counts.entry(Signature::new(entry)).or_insert(0) += 1;
    }
    counts
        .iter()
        .map(|(signature, count)| format!("{}#{}#", signature, count))
        .collect()
}
