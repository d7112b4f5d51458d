use super::{build_canonical_code, find_path};
use crate::{
    data::{CspGraph, Edge, Node},
    error::Result,
    types::{EId, ELabel, VId, VLabel},
};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// The edge introduced a new node.
    Forward,
    /// The edge connects the right-most node to a node already on the
    /// right-most path.
    Backward,
}

/// The edge a pattern was extended by, relative to its parent.
///
/// `parent_node_id` is the source and `child_node_id` the target of the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewEdge {
    pub parent_node_id: VId,
    pub child_node_id: VId,
    pub elabel: ELabel,
    pub edge_type: EdgeType,
}

/// Images of the pattern nodes in the input graph, indexed by pattern node id.
pub type Instance = Vec<VId>;

/// A connected candidate subgraph.
///
/// Node ids are dense: node `i` is `nodes()[i]`.
#[derive(Debug, Clone)]
pub struct Pattern {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    csp_graph: CspGraph,
    canonical_code: String,
    root: VId,
    right_most: VId,
    right_most_path: Vec<VId>,
    new_added_edge: Option<NewEdge>,
    instances: Vec<Instance>,
    frequency: usize,
}

impl Pattern {
    /// Creates the pattern `0 -elabel-> 1`.
    pub fn single_edge(source_label: VLabel, target_label: VLabel, elabel: ELabel) -> Result<Self> {
        Self::from_tables(&[source_label, target_label], &[(0, 1, elabel)])
    }

    /// Creates a pattern from a label per node and `(source, target, elabel)`
    /// triples.
    ///
    /// The root is node 0 and the right-most node is the last node.
    pub fn from_tables(vlabels: &[VLabel], arcs: &[(VId, VId, ELabel)]) -> Result<Self> {
        let nodes: Vec<Node> = vlabels
            .iter()
            .enumerate()
            .map(|(id, &label)| Node::new(id as VId, label))
            .collect();
        let edges: Vec<Edge> = arcs
            .iter()
            .enumerate()
            .map(|(id, &(source, target, label))| Edge::new(id as EId, source, target, label))
            .collect();
        let csp_graph = CspGraph::from_tables(&nodes, &edges)?;
        let right_most = nodes.len().saturating_sub(1) as VId;
        let right_most_path = find_path(&edges, 0, right_most)?;
        let canonical_code = build_canonical_code(&csp_graph);
        Ok(Self {
            nodes,
            edges,
            csp_graph,
            canonical_code,
            root: 0,
            right_most,
            right_most_path,
            new_added_edge: None,
            instances: vec![],
            frequency: 0,
        })
    }

    /// Returns a copy of this pattern extended by `source -elabel-> target`.
    ///
    /// When `new_node` is given, a node with that label and id `num_nodes()`
    /// is added first and becomes the right-most node; one of `source` and
    /// `target` must be that id. The copy inherits this pattern's instances.
    pub fn extend(
        &self,
        new_node: Option<VLabel>,
        source: VId,
        target: VId,
        elabel: ELabel,
    ) -> Result<Self> {
        let mut nodes = self.nodes.clone();
        let (right_most, edge_type) = match new_node {
            Some(label) => {
                let id = nodes.len() as VId;
                nodes.push(Node::new(id, label));
                (id, EdgeType::Forward)
            }
            None => (self.right_most, EdgeType::Backward),
        };
        let edge = Edge::new(self.edges.len() as EId, source, target, elabel);
        let mut edges = self.edges.clone();
        edges.push(edge);
        let mut csp_graph = self.csp_graph.clone();
        csp_graph.extend(&edge, &nodes)?;
        let right_most_path = find_path(&edges, self.root, right_most)?;
        let canonical_code = build_canonical_code(&csp_graph);
        Ok(Self {
            nodes,
            edges,
            csp_graph,
            canonical_code,
            root: self.root,
            right_most,
            right_most_path,
            new_added_edge: Some(NewEdge {
                parent_node_id: source,
                child_node_id: target,
                elabel,
                edge_type,
            }),
            instances: self.instances.clone(),
            frequency: 0,
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

    pub fn canonical_code(&self) -> &str {
        &self.canonical_code
    }

    /// The number of edges.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn label(&self, vid: VId) -> VLabel {
        self.nodes[vid as usize].label
    }

    pub fn root(&self) -> VId {
        self.root
    }

    pub fn right_most(&self) -> VId {
        self.right_most
    }

    pub fn right_most_path(&self) -> &[VId] {
        &self.right_most_path
    }

    pub fn new_added_edge(&self) -> Option<&NewEdge> {
        self.new_added_edge.as_ref()
    }

    /// The node introduced by the last forward extension.
    pub fn added_node(&self) -> Option<VId> {
        match self.new_added_edge {
            Some(NewEdge {
                edge_type: EdgeType::Forward,
                ..
            }) => Some(self.right_most),
            _ => None,
        }
    }

    /// Whether some edge `source -elabel-> target` already exists.
    pub fn has_edge(&self, source: VId, target: VId, elabel: ELabel) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target && e.label == elabel)
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn frequency(&self) -> usize {
        self.frequency
    }

    pub fn set_evaluation(&mut self, frequency: usize, instances: Vec<Instance>) {
        self.frequency = frequency;
        self.instances = instances;
    }

    /// Drops the instance list once no child will be generated from this
    /// pattern anymore.
    pub fn release_instances(&mut self) {
        self.instances = vec![];
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "size: {}, frequency: {}, nodes: [{}], edges: [{}], code: {}",
            self.size(),
            self.frequency,
            self.nodes
                .iter()
                .format_with(", ", |n, f| f(&format_args!("{}:{}", n.id, n.label))),
            self.edges.iter().format_with(", ", |e, f| f(&format_args!(
                "{}->{}:{}",
                e.source, e.target, e.label
            ))),
            self.canonical_code
        )
    }
}
