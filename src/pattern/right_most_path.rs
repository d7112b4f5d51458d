use crate::{
    data::Edge,
    error::{self, Result},
    types::VId,
};
use std::collections::{HashMap, HashSet, VecDeque};

/// Finds the right-most path of a pattern, from `root` to `right_most`.
///
/// Edges are traversed in both directions. The search starts at
/// `right_most` and stops as soon as `root` is dequeued.
pub fn find_path(edges: &[Edge], root: VId, right_most: VId) -> Result<Vec<VId>> {
    let mut adjacency: HashMap<VId, Vec<VId>> = HashMap::new();
    for edge in edges {
        adjacency.entry(edge.source).or_default().push(edge.target);
        adjacency.entry(edge.target).or_default().push(edge.source);
    }
    let mut parents: HashMap<VId, VId> = HashMap::new();
    let mut visited: HashSet<VId> = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(right_most);
    queue.push_back(right_most);
    while let Some(v) = queue.pop_front() {
        if v == root {
            break;
        }
        for &n in adjacency.get(&v).into_iter().flatten() {
            if visited.insert(n) {
                parents.insert(n, v);
                queue.push_back(n);
            }
        }
    }
    if !visited.contains(&root) {
        return Err(error::Err::DisconnectedPattern { root, right_most });
    }
    // Parents point towards `right_most`, so walking them from `root` yields
    // the path already in root-first order.
    let mut path = vec![root];
    let mut v = root;
    while let Some(&p) = parents.get(&v) {
        path.push(p);
        v = p;
    }
    Ok(path)
}
