use super::FrequentEdge;
use crate::{
    error::Result,
    pattern::Pattern,
    types::{VId, VLabel},
};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Candidates indexed by canonical code.
pub type Candidates = BTreeMap<String, Pattern>;

/// Which right-most path nodes a backward edge may point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackwardExtension {
    /// Every path node with a matching label.
    AllMatches,
    /// Only the matching path node closest to the right-most node.
    NearestMatch,
}

impl Default for BackwardExtension {
    fn default() -> Self {
        BackwardExtension::AllMatches
    }
}

pub struct Generator<'a> {
    frequent_edges: &'a [FrequentEdge],
    backward_extension: BackwardExtension,
    parallel: bool,
}

impl<'a> Generator<'a> {
    pub fn new(frequent_edges: &'a [FrequentEdge]) -> Self {
        Self {
            frequent_edges,
            backward_extension: BackwardExtension::default(),
            parallel: false,
        }
    }

    pub fn backward_extension(mut self, backward_extension: BackwardExtension) -> Self {
        self.backward_extension = backward_extension;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// One single-edge pattern per frequent edge.
    pub fn generate_initial_candidates(&self) -> Result<Candidates> {
        let mut candidates = Candidates::new();
        for fe in self.frequent_edges {
            insert(
                &mut candidates,
                Pattern::single_edge(fe.source_label, fe.target_label, fe.elabel)?,
            );
        }
        Ok(candidates)
    }

    /// Every distinct one-edge extension of `parents`.
    ///
    /// When two children share a canonical code, the one generated from the
    /// earlier parent is kept.
    pub fn generate_new_subgraphs(&self, parents: &[Pattern]) -> Result<Candidates> {
        let children: Vec<Candidates> = if self.parallel {
            parents
                .par_iter()
                .map(|parent| self.extend_pattern(parent))
                .collect::<Result<_>>()?
        } else {
            parents
                .iter()
                .map(|parent| self.extend_pattern(parent))
                .collect::<Result<_>>()?
        };
        let mut candidates = Candidates::new();
        for siblings in children {
            for (code, child) in siblings {
                candidates.entry(code).or_insert(child);
            }
        }
        Ok(candidates)
    }

    /// Forward and backward children of a single parent.
    pub fn extend_pattern(&self, parent: &Pattern) -> Result<Candidates> {
        let mut children = Candidates::new();
        self.extend_forward(parent, &mut children)?;
        self.extend_backward(parent, &mut children)?;
        Ok(children)
    }

    fn extend_forward(&self, parent: &Pattern, children: &mut Candidates) -> Result<()> {
        let new_id = parent.num_nodes() as VId;
        for &v in parent.right_most_path() {
            let vlabel = parent.label(v);
            for fe in self.frequent_edges {
                if fe.source_label == vlabel {
                    insert(
                        children,
                        parent.extend(Some(fe.target_label), v, new_id, fe.elabel)?,
                    );
                }
                if fe.target_label == vlabel {
                    insert(
                        children,
                        parent.extend(Some(fe.source_label), new_id, v, fe.elabel)?,
                    );
                }
            }
        }
        Ok(())
    }

    fn extend_backward(&self, parent: &Pattern, children: &mut Candidates) -> Result<()> {
        let right_most = parent.right_most();
        let rm_label = parent.label(right_most);
        for fe in self.frequent_edges {
            if fe.source_label == rm_label {
                for u in self.backward_targets(parent, fe.target_label, |u| {
                    !parent.has_edge(right_most, u, fe.elabel)
                }) {
                    insert(children, parent.extend(None, right_most, u, fe.elabel)?);
                }
            }
            if fe.target_label == rm_label {
                for u in self.backward_targets(parent, fe.source_label, |u| {
                    !parent.has_edge(u, right_most, fe.elabel)
                }) {
                    insert(children, parent.extend(None, u, right_most, fe.elabel)?);
                }
            }
        }
        Ok(())
    }

    /// Path nodes other than the right-most one labeled `vlabel` and
    /// accepted by `free`, filtered by the backward policy.
    fn backward_targets<F>(&self, parent: &Pattern, vlabel: VLabel, free: F) -> Vec<VId>
    where
        F: Fn(VId) -> bool,
    {
        let right_most = parent.right_most();
        let mut targets: Vec<VId> = parent
            .right_most_path()
            .iter()
            .copied()
            .filter(|&u| u != right_most && parent.label(u) == vlabel && free(u))
            .collect();
        if self.backward_extension == BackwardExtension::NearestMatch {
            targets = targets.pop().into_iter().collect();
        }
        targets
    }
}

fn insert(candidates: &mut Candidates, pattern: Pattern) {
    candidates
        .entry(pattern.canonical_code().to_string())
        .or_insert(pattern);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::frequent_edges;
    use crate::{
        data::{DataGraph, Edge, Node},
        pattern::EdgeType,
    };

    const DB: i64 = 1;
    const DM: i64 = 2;
    const IR: i64 = 3;
    const A: i64 = 10;
    const B: i64 = 11;
    const C: i64 = 12;

    fn fe(source_label: i64, target_label: i64, elabel: i64) -> FrequentEdge {
        FrequentEdge {
            source_label,
            target_label,
            elabel,
            frequency: 1,
        }
    }

    #[test]
    fn test_initial_candidates() {
        let g = DataGraph::new(
            vec![
                Node::new(1, DB),
                Node::new(2, DM),
                Node::new(3, DM),
                Node::new(4, IR),
                Node::new(5, IR),
            ],
            vec![
                Edge::new(0, 1, 2, A),
                Edge::new(1, 1, 3, A),
                Edge::new(2, 2, 4, B),
                Edge::new(3, 3, 5, C),
            ],
        )
        .unwrap();
        let fes = frequent_edges(&g, 2);
        assert_eq!(fes, vec![fe_with(DB, DM, A, 2)]);
        let candidates = Generator::new(&fes).generate_initial_candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        let p = candidates.values().next().unwrap();
        assert_eq!(p.right_most_path(), &[0, 1]);
        assert_eq!(p.label(0), DB);
        assert_eq!(p.label(1), DM);
    }

    fn fe_with(s: i64, t: i64, e: i64, frequency: usize) -> FrequentEdge {
        FrequentEdge {
            frequency,
            ..fe(s, t, e)
        }
    }

    #[test]
    fn test_forward_extension() {
        let fes = vec![fe(DM, IR, B)];
        let parent = Pattern::single_edge(DB, DM, A).unwrap();
        let children = Generator::new(&fes)
            .generate_new_subgraphs(&[parent])
            .unwrap();
        assert_eq!(children.len(), 1);
        let child = children.values().next().unwrap();
        assert_eq!(child.num_nodes(), 3);
        assert_eq!(child.size(), 2);
        assert!(child.has_edge(1, 2, B));
        assert_eq!(child.label(2), IR);
        assert_eq!(child.right_most(), 2);
        assert_eq!(child.right_most_path(), &[0, 1, 2]);
        assert_eq!(
            child.new_added_edge().map(|e| e.edge_type),
            Some(EdgeType::Forward)
        );
    }

    #[test]
    fn test_forward_both_directions() {
        let fes = vec![fe(IR, IR, A)];
        let parent = Pattern::single_edge(IR, IR, A).unwrap();
        let children = Generator::new(&fes)
            .generate_new_subgraphs(&[parent])
            .unwrap();
        // chain, fan-out, fan-in and the two-cycle 0 <-> 1
        assert_eq!(children.len(), 4);
        assert!(children.values().all(|c| c.size() == 2));
        assert_eq!(
            children
                .values()
                .filter(|c| c.added_node().is_none())
                .count(),
            1
        );
    }

    #[test]
    fn test_forward_only_from_right_most_path() {
        // 0 -> 1, 0 -> 2: the path is [0, 2] and node 1 is off it
        let parent = Pattern::from_tables(&[DB, DM, IR], &[(0, 1, A), (0, 2, A)]).unwrap();
        assert_eq!(parent.right_most_path(), &[0, 2]);
        let off_path = vec![fe(DM, 9, C)];
        assert!(Generator::new(&off_path)
            .extend_pattern(&parent)
            .unwrap()
            .is_empty());
        let at_root = vec![fe(DM, 9, C), fe(DB, 9, B)];
        let children = Generator::new(&at_root).extend_pattern(&parent).unwrap();
        assert_eq!(children.len(), 1);
        let child = children.values().next().unwrap();
        assert!(child.has_edge(0, 3, B));
        assert_eq!(child.right_most_path(), &[0, 3]);
    }

    #[test]
    fn test_backward_extension() {
        let fes = vec![fe(DM, DB, C)];
        let parent = Pattern::single_edge(DB, DM, A).unwrap();
        let children = Generator::new(&fes)
            .generate_new_subgraphs(&[parent])
            .unwrap();
        let backward: Vec<_> = children
            .values()
            .filter(|c| c.added_node().is_none())
            .collect();
        assert_eq!(backward.len(), 1);
        assert!(backward[0].has_edge(1, 0, C));
        assert_eq!(backward[0].num_nodes(), 2);
        assert_eq!(backward[0].right_most(), 1);
    }

    #[test]
    fn test_backward_never_duplicates_edge() {
        let fes = vec![fe(DB, DM, A)];
        let parent = Pattern::single_edge(DM, DB, A).unwrap();
        // the right-most node is DB, so DB->DM:a targets the root DM
        let children = Generator::new(&fes)
            .generate_new_subgraphs(&[parent])
            .unwrap();
        assert!(children.values().any(|c| c.has_edge(1, 0, A)));
        let parent = Pattern::single_edge(DB, DM, A).unwrap();
        let children = Generator::new(&fes)
            .generate_new_subgraphs(&[parent])
            .unwrap();
        assert!(children.values().all(|c| c.added_node().is_some()));
    }

    #[test]
    fn test_backward_policies() {
        // path 0 -> 1 -> 2 -> 3, labels IR DM IR DM
        let parent =
            Pattern::from_tables(&[IR, DM, IR, DM], &[(0, 1, A), (1, 2, A), (2, 3, A)]).unwrap();
        let fes = vec![fe(DM, IR, B)];
        let backward = |policy| {
            let mut children = Candidates::new();
            Generator::new(&fes)
                .backward_extension(policy)
                .extend_backward(&parent, &mut children)
                .unwrap();
            children
                .into_iter()
                .map(|(_, c)| {
                    let e = c.new_added_edge().unwrap();
                    (e.parent_node_id, e.child_node_id)
                })
                .collect::<std::collections::BTreeSet<_>>()
        };
        let all = backward(BackwardExtension::AllMatches);
        assert_eq!(all, [(3, 0), (3, 2)].iter().copied().collect());
        let nearest = backward(BackwardExtension::NearestMatch);
        assert_eq!(nearest, [(3, 2)].iter().copied().collect());
    }

    #[test]
    fn test_dedup_across_parents() {
        let fes = vec![fe(DB, DM, A)];
        // both parents grow into the fan-out DB -> {DM, DM}
        let first = Pattern::single_edge(DB, DM, A).unwrap();
        let second = Pattern::single_edge(DB, DM, A).unwrap();
        let generator = Generator::new(&fes);
        let single = generator.generate_new_subgraphs(&[first.clone()]).unwrap();
        let merged = generator.generate_new_subgraphs(&[first, second]).unwrap();
        assert_eq!(single.len(), merged.len());
        let parallel = generator
            .parallel(true)
            .generate_new_subgraphs(&single.values().cloned().collect::<Vec<_>>())
            .unwrap();
        let sequential = Generator::new(&fes)
            .generate_new_subgraphs(&single.values().cloned().collect::<Vec<_>>())
            .unwrap();
        assert_eq!(
            parallel.keys().collect::<Vec<_>>(),
            sequential.keys().collect::<Vec<_>>()
        );
    }
}
