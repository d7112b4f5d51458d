use crate::{
    error::{self, Result},
    types::{EId, ELabel, VId, VLabel},
};
use itertools::Itertools;
use rayon::slice::ParallelSliceMut;
use std::collections::{BTreeMap, HashMap};

/// A row of the node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    pub id: VId,
    pub label: VLabel,
}

impl Node {
    pub fn new(id: VId, label: VLabel) -> Self {
        Self { id, label }
    }
}

/// A row of the edge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub id: EId,
    pub source: VId,
    pub target: VId,
    pub label: ELabel,
}

impl Edge {
    pub fn new(id: EId, source: VId, target: VId, label: ELabel) -> Self {
        Self {
            id,
            source,
            target,
            label,
        }
    }

    /// Returns the endpoint opposite to `vid`, if `vid` is an endpoint.
    pub fn other(&self, vid: VId) -> Option<VId> {
        if self.source == vid {
            Some(self.target)
        } else if self.target == vid {
            Some(self.source)
        } else {
            None
        }
    }
}

/// One entry of a neighbor list.
///
/// The derived ordering is `(elabel, nlabel, nid)`, which is the order the
/// neighbor lists are kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Neighbor {
    elabel: ELabel,
    nlabel: VLabel,
    nid: VId,
}

impl Neighbor {
    pub fn new(elabel: ELabel, nlabel: VLabel, nid: VId) -> Self {
        Self {
            elabel,
            nlabel,
            nid,
        }
    }

    pub fn elabel(&self) -> ELabel {
        self.elabel
    }

    pub fn nlabel(&self) -> VLabel {
        self.nlabel
    }

    pub fn nid(&self) -> VId {
        self.nid
    }

    /// The `(edge_label, neighbour_label)` pair used for matching.
    pub fn labels(&self) -> (ELabel, VLabel) {
        (self.elabel, self.nlabel)
    }
}

/// The CSP record of one vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CspEntry {
    label: VLabel,
    in_deg: usize,
    out_deg: usize,
    ingoing: Vec<Neighbor>,
    outgoing: Vec<Neighbor>,
}

impl CspEntry {
    fn new(label: VLabel) -> Self {
        Self {
            label,
            in_deg: 0,
            out_deg: 0,
            ingoing: vec![],
            outgoing: vec![],
        }
    }

    pub fn label(&self) -> VLabel {
        self.label
    }

    pub fn in_deg(&self) -> usize {
        self.in_deg
    }

    pub fn out_deg(&self) -> usize {
        self.out_deg
    }

    pub fn ingoing(&self) -> &[Neighbor] {
        &self.ingoing
    }

    pub fn outgoing(&self) -> &[Neighbor] {
        &self.outgoing
    }

    /// Outgoing neighbors reached by an `elabel` edge and labeled `nlabel`.
    pub fn outgoing_matching(&self, elabel: ELabel, nlabel: VLabel) -> &[Neighbor] {
        matching(&self.outgoing, elabel, nlabel)
    }

    /// Ingoing neighbors reaching this vertex by an `elabel` edge and labeled `nlabel`.
    pub fn ingoing_matching(&self, elabel: ELabel, nlabel: VLabel) -> &[Neighbor] {
        matching(&self.ingoing, elabel, nlabel)
    }

    pub fn has_outgoing(&self, neighbor: &Neighbor) -> bool {
        self.outgoing.binary_search(neighbor).is_ok()
    }

    fn add_outgoing(&mut self, neighbor: Neighbor) {
        let pos = self.outgoing.partition_point(|n| n < &neighbor);
        self.outgoing.insert(pos, neighbor);
        self.out_deg += 1;
    }

    fn add_ingoing(&mut self, neighbor: Neighbor) {
        let pos = self.ingoing.partition_point(|n| n < &neighbor);
        self.ingoing.insert(pos, neighbor);
        self.in_deg += 1;
    }
}

fn matching(neighbors: &[Neighbor], elabel: ELabel, nlabel: VLabel) -> &[Neighbor] {
    let start = neighbors.partition_point(|n| n.labels() < (elabel, nlabel));
    let len = neighbors[start..].partition_point(|n| n.labels() == (elabel, nlabel));
    &neighbors[start..start + len]
}

/// The per-vertex degree and neighbor-list table used for matching and
/// canonicalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspGraph {
    entries: BTreeMap<VId, CspEntry>,
}

impl CspGraph {
    /// Create a new empty CSP-graph.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builds the CSP-graph of the whole graph at once.
    ///
    /// Fails on the first edge whose source or target is missing from `nodes`.
    pub fn from_tables(nodes: &[Node], edges: &[Edge]) -> Result<Self> {
        let labels: HashMap<VId, VLabel> = nodes.iter().map(|n| (n.id, n.label)).collect();
        let mut info_edges: Vec<(VId, bool, Neighbor)> = Vec::with_capacity(2 * edges.len());
        for edge in edges {
            let source_label = lookup_label(&labels, edge, edge.source)?;
            let target_label = lookup_label(&labels, edge, edge.target)?;
            info_edges.push((
                edge.source,
                true,
                Neighbor::new(edge.label, target_label, edge.target),
            ));
            info_edges.push((
                edge.target,
                false,
                Neighbor::new(edge.label, source_label, edge.source),
            ));
        }
        info_edges.par_sort_unstable();
        let mut entries: BTreeMap<VId, CspEntry> = nodes
            .iter()
            .map(|n| (n.id, CspEntry::new(n.label)))
            .collect();
        for ((vid, outgoing), group) in &info_edges.iter().group_by(|e| (e.0, e.1)) {
            if let Some(entry) = entries.get_mut(&vid) {
                let neighbors: Vec<Neighbor> = group.map(|e| e.2).collect();
                if outgoing {
                    entry.out_deg = neighbors.len();
                    entry.outgoing = neighbors;
                } else {
                    entry.in_deg = neighbors.len();
                    entry.ingoing = neighbors;
                }
            }
        }
        Ok(Self { entries })
    }

    /// Adds a single edge, touching only its two endpoints.
    ///
    /// An endpoint missing from the CSP-graph gets a zero-degree entry first;
    /// its label is taken from `nodes`, which must be indexed by node id.
    pub fn extend(&mut self, edge: &Edge, nodes: &[Node]) -> Result<()> {
        let source_label = node_label(nodes, edge, edge.source)?;
        let target_label = node_label(nodes, edge, edge.target)?;
        self.entries
            .entry(edge.source)
            .or_insert_with(|| CspEntry::new(source_label))
            .add_outgoing(Neighbor::new(edge.label, target_label, edge.target));
        self.entries
            .entry(edge.target)
            .or_insert_with(|| CspEntry::new(target_label))
            .add_ingoing(Neighbor::new(edge.label, source_label, edge.source));
        Ok(())
    }

    pub fn entry(&self, vid: VId) -> Option<&CspEntry> {
        self.entries.get(&vid)
    }

    pub fn label(&self, vid: VId) -> Option<VLabel> {
        self.entries.get(&vid).map(|entry| entry.label)
    }

    pub fn entries(&self) -> impl Iterator<Item = (VId, &CspEntry)> {
        self.entries.iter().map(|(&vid, entry)| (vid, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn lookup_label(labels: &HashMap<VId, VLabel>, edge: &Edge, vid: VId) -> Result<VLabel> {
    labels.get(&vid).copied().ok_or(error::Err::DanglingEdge {
        edge: edge.id,
        node: vid,
    })
}

/// `nodes` is indexed by node id.
fn node_label(nodes: &[Node], edge: &Edge, vid: VId) -> Result<VLabel> {
    nodes
        .get(vid as usize)
        .filter(|n| n.id == vid)
        .map(|n| n.label)
        .ok_or(error::Err::DanglingEdge {
            edge: edge.id,
            node: vid,
        })
}
