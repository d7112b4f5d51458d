use super::{CspEntry, CspGraph, Edge, GraphInfo, Neighbor, Node};
use crate::{
    error::Result,
    types::{ELabel, VId, VLabel},
};
use std::collections::{BTreeMap, HashSet};

/// The static input graph.
///
/// Built once, then shared read-only by every generation and evaluation
/// worker.
pub struct DataGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    csp_graph: CspGraph,
    label_index: BTreeMap<VLabel, Vec<VId>>,
}

impl DataGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let csp_graph = CspGraph::from_tables(&nodes, &edges)?;
        let mut label_index: BTreeMap<VLabel, Vec<VId>> = BTreeMap::new();
        for (vid, entry) in csp_graph.entries() {
            label_index.entry(entry.label()).or_default().push(vid);
        }
        Ok(Self {
            nodes,
            edges,
            csp_graph,
            label_index,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn csp_graph(&self) -> &CspGraph {
        &self.csp_graph
    }

    pub fn entry(&self, vid: VId) -> Option<&CspEntry> {
        self.csp_graph.entry(vid)
    }

    pub fn label(&self, vid: VId) -> Option<VLabel> {
        self.csp_graph.label(vid)
    }

    /// Vertices labeled `vlabel`, in ascending id order.
    pub fn vertices(&self, vlabel: VLabel) -> &[VId] {
        self.label_index
            .get(&vlabel)
            .map_or(&[][..], |vertices| vertices.as_slice())
    }

    pub fn has_edge(&self, source: VId, target: VId, elabel: ELabel) -> bool {
        match (self.csp_graph.entry(source), self.csp_graph.label(target)) {
            (Some(entry), Some(target_label)) => {
                entry.has_outgoing(&Neighbor::new(elabel, target_label, target))
            }
            _ => false,
        }
    }

    pub fn outgoing_matching(&self, vid: VId, elabel: ELabel, nlabel: VLabel) -> &[Neighbor] {
        self.csp_graph
            .entry(vid)
            .map_or(&[][..], |entry| entry.outgoing_matching(elabel, nlabel))
    }

    pub fn ingoing_matching(&self, vid: VId, elabel: ELabel, nlabel: VLabel) -> &[Neighbor] {
        self.csp_graph
            .entry(vid)
            .map_or(&[][..], |entry| entry.ingoing_matching(elabel, nlabel))
    }

    pub fn info(&self) -> GraphInfo {
        GraphInfo::new(
            self.csp_graph.len(),
            self.edges.len(),
            self.label_index.len(),
            self.edges
                .iter()
                .map(|e| e.label)
                .collect::<HashSet<_>>()
                .len(),
        )
    }
}
