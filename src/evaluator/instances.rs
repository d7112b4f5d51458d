use super::partners::potential_partners;
use crate::{
    data::DataGraph,
    pattern::{Instance, Pattern},
    types::VId,
};
use itertools::Itertools;
use std::collections::VecDeque;

type Partial = Vec<Option<VId>>;

/// Matches `pattern` against the input graph from scratch.
pub fn cold_instances(pattern: &Pattern, data_graph: &DataGraph) -> Vec<Instance> {
    let partners: Vec<Vec<VId>> = (0..pattern.num_nodes())
        .map(|vid| potential_partners(pattern, vid as VId, data_graph))
        .collect();
    if partners.iter().any(|p| p.is_empty()) {
        return vec![];
    }
    let mut partials: Vec<Partial> = vec![vec![None; pattern.num_nodes()]];
    for u in matching_order(pattern) {
        let mut next = vec![];
        for partial in &partials {
            let images = candidate_images(pattern, data_graph, &partners[u as usize], partial, u);
            for image in images {
                let mut extended = partial.clone();
                extended[u as usize] = Some(image);
                next.push(extended);
            }
        }
        partials = next;
        if partials.is_empty() {
            break;
        }
    }
    partials
        .into_iter()
        .filter_map(|partial| partial.into_iter().collect::<Option<Instance>>())
        .collect()
}

/// Pattern nodes in BFS order from the root, ignoring edge direction.
fn matching_order(pattern: &Pattern) -> Vec<VId> {
    let mut visited = vec![false; pattern.num_nodes()];
    let mut order = Vec::with_capacity(pattern.num_nodes());
    let starts = std::iter::once(pattern.root()).chain(0..pattern.num_nodes() as VId);
    for start in starts {
        if visited[start as usize] {
            continue;
        }
        visited[start as usize] = true;
        let mut queue = VecDeque::from(vec![start]);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for e in pattern.edges() {
                if let Some(v) = e.other(u) {
                    if !visited[v as usize] {
                        visited[v as usize] = true;
                        queue.push_back(v);
                    }
                }
            }
        }
    }
    order
}

/// Unused input nodes `u` may be mapped to under `partial`.
fn candidate_images(
    pattern: &Pattern,
    data_graph: &DataGraph,
    partners: &[VId],
    partial: &[Option<VId>],
    u: VId,
) -> Vec<VId> {
    let assigned = |v: VId| v == u || partial[v as usize].is_some();
    let constraints: Vec<_> = pattern
        .edges()
        .iter()
        .filter(|e| e.other(u).is_some() && assigned(e.source) && assigned(e.target))
        .collect();
    let vlabel = pattern.label(u);
    let image = |v: VId, d: VId| {
        if v == u {
            d
        } else {
            partial[v as usize].unwrap_or_default()
        }
    };
    let seeds: Vec<VId> = match constraints.iter().find(|e| e.source != e.target) {
        Some(e) if e.target == u => data_graph
            .outgoing_matching(image(e.source, 0), e.label, vlabel)
            .iter()
            .map(|n| n.nid())
            .dedup()
            .collect(),
        Some(e) => data_graph
            .ingoing_matching(image(e.target, 0), e.label, vlabel)
            .iter()
            .map(|n| n.nid())
            .dedup()
            .collect(),
        None => partners.to_vec(),
    };
    seeds
        .into_iter()
        .filter(|d| partners.binary_search(d).is_ok())
        .filter(|&d| !partial.contains(&Some(d)))
        .filter(|&d| {
            constraints
                .iter()
                .all(|e| data_graph.has_edge(image(e.source, d), image(e.target, d), e.label))
        })
        .collect()
}

/// Grows the inherited instances of `pattern` by its last added edge.
///
/// Falls back to [`cold_instances`] when nothing is inherited.
pub fn incremental_instances(pattern: &Pattern, data_graph: &DataGraph) -> Vec<Instance> {
    let new_edge = match pattern.new_added_edge() {
        Some(new_edge) if !pattern.instances().is_empty() => *new_edge,
        _ => return cold_instances(pattern, data_graph),
    };
    let (source, target, elabel) = (
        new_edge.parent_node_id,
        new_edge.child_node_id,
        new_edge.elabel,
    );
    let source_partners = potential_partners(pattern, source, data_graph);
    let target_partners = potential_partners(pattern, target, data_graph);
    match pattern.added_node() {
        Some(added) => {
            let (existing, existing_partners, added_partners) = if added == target {
                (source, &source_partners, &target_partners)
            } else {
                (target, &target_partners, &source_partners)
            };
            let added_label = pattern.label(added);
            let mut instances = vec![];
            for instance in pattern.instances() {
                if instance.len() != added as usize {
                    continue;
                }
                let a = instance[existing as usize];
                if existing_partners.binary_search(&a).is_err() {
                    continue;
                }
                let neighbors = if added == target {
                    data_graph.outgoing_matching(a, elabel, added_label)
                } else {
                    data_graph.ingoing_matching(a, elabel, added_label)
                };
                for nid in neighbors.iter().map(|n| n.nid()).dedup() {
                    if !instance.contains(&nid) && added_partners.binary_search(&nid).is_ok() {
                        let mut extended = instance.clone();
                        extended.push(nid);
                        instances.push(extended);
                    }
                }
            }
            instances
        }
        None => pattern
            .instances()
            .iter()
            .filter(|instance| {
                let (a, b) = (instance[source as usize], instance[target as usize]);
                source_partners.binary_search(&a).is_ok()
                    && target_partners.binary_search(&b).is_ok()
                    && data_graph.has_edge(a, b, elabel)
            })
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Edge, Node};

    /// 1 -> 2 -> 3 -> 1 plus 1 -> 4 -> 5, all labeled 7, every edge 0.
    fn create_data_graph() -> DataGraph {
        DataGraph::new(
            (1..=5).map(|vid| Node::new(vid, 7)).collect(),
            vec![
                Edge::new(0, 1, 2, 0),
                Edge::new(1, 2, 3, 0),
                Edge::new(2, 3, 1, 0),
                Edge::new(3, 1, 4, 0),
                Edge::new(4, 4, 5, 0),
            ],
        )
        .unwrap()
    }

    fn sorted(mut instances: Vec<Instance>) -> Vec<Instance> {
        instances.sort();
        instances
    }

    #[test]
    fn test_matching_order() {
        let p = Pattern::from_tables(&[1, 1, 1, 1], &[(0, 3, 0), (2, 1, 0), (3, 2, 0)]).unwrap();
        assert_eq!(matching_order(&p), [0, 3, 2, 1]);
    }

    #[test]
    fn test_cold_single_edge() {
        let g = create_data_graph();
        let p = Pattern::single_edge(7, 7, 0).unwrap();
        assert_eq!(
            sorted(cold_instances(&p, &g)),
            [[1, 2], [1, 4], [2, 3], [3, 1], [4, 5]]
        );
    }

    #[test]
    fn test_cold_triangle() {
        let g = create_data_graph();
        let p = Pattern::from_tables(&[7, 7, 7], &[(0, 1, 0), (1, 2, 0), (2, 0, 0)]).unwrap();
        assert_eq!(
            sorted(cold_instances(&p, &g)),
            [[1, 2, 3], [2, 3, 1], [3, 1, 2]]
        );
    }

    #[test]
    fn test_cold_injective() {
        // a single data edge cannot host a two-cycle
        let g = DataGraph::new(
            vec![Node::new(1, 7), Node::new(2, 7)],
            vec![Edge::new(0, 1, 2, 0)],
        )
        .unwrap();
        let p = Pattern::from_tables(&[7, 7], &[(0, 1, 0), (1, 0, 0)]).unwrap();
        assert!(cold_instances(&p, &g).is_empty());
        let chain = Pattern::from_tables(&[7, 7, 7], &[(0, 1, 0), (1, 2, 0)]).unwrap();
        assert!(cold_instances(&chain, &g).is_empty());
    }

    #[test]
    fn test_incremental_forward() {
        let g = create_data_graph();
        let mut p = Pattern::single_edge(7, 7, 0).unwrap();
        p.set_evaluation(5, cold_instances(&p, &g));
        for c in [p.extend(Some(7), 1, 2, 0), p.extend(Some(7), 2, 0, 0)]
            .iter()
            .map(|c| c.as_ref().unwrap())
        {
            assert_eq!(
                sorted(incremental_instances(c, &g)),
                sorted(cold_instances(c, &g))
            );
        }
        let chain = p.extend(Some(7), 1, 2, 0).unwrap();
        assert_eq!(
            sorted(incremental_instances(&chain, &g)),
            [[1, 2, 3], [1, 4, 5], [2, 3, 1], [3, 1, 2], [3, 1, 4]]
        );
    }

    #[test]
    fn test_incremental_backward() {
        let g = create_data_graph();
        let mut p = Pattern::from_tables(&[7, 7, 7], &[(0, 1, 0), (1, 2, 0)]).unwrap();
        p.set_evaluation(5, cold_instances(&p, &g));
        let c = p.extend(None, 2, 0, 0).unwrap();
        assert_eq!(
            sorted(incremental_instances(&c, &g)),
            [[1, 2, 3], [2, 3, 1], [3, 1, 2]]
        );
    }

    #[test]
    fn test_incremental_without_instances() {
        let g = create_data_graph();
        let p = Pattern::single_edge(7, 7, 0).unwrap();
        let c = p.extend(Some(7), 1, 2, 0).unwrap();
        assert_eq!(incremental_instances(&c, &g).len(), 5);
    }
}
