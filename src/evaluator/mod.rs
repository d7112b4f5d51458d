//! Frequency evaluation of candidate patterns.

pub use instances::{cold_instances, incremental_instances};
pub use partners::{is_potential_partner, potential_partners};

mod instances;
mod partners;

use crate::{
    data::DataGraph,
    pattern::{Instance, Pattern},
};
use log::debug;
use rayon::prelude::*;
use std::collections::HashSet;

/// How the frequency of a pattern is derived from its instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportMeasure {
    /// The number of complete instances.
    Embeddings,
    /// The minimum, over pattern nodes, of the number of distinct input
    /// nodes the node is mapped to.
    MinimumImage,
}

impl Default for SupportMeasure {
    fn default() -> Self {
        SupportMeasure::Embeddings
    }
}

impl SupportMeasure {
    pub fn support(&self, num_nodes: usize, instances: &[Instance]) -> usize {
        match self {
            SupportMeasure::Embeddings => instances.len(),
            SupportMeasure::MinimumImage => (0..num_nodes)
                .map(|vid| {
                    instances
                        .iter()
                        .map(|instance| instance[vid])
                        .collect::<HashSet<_>>()
                        .len()
                })
                .min()
                .unwrap_or(0),
        }
    }
}

pub struct Evaluator<'a> {
    data_graph: &'a DataGraph,
    min_support: usize,
    support_measure: SupportMeasure,
    parallel: bool,
}

impl<'a> Evaluator<'a> {
    pub fn new(data_graph: &'a DataGraph, min_support: usize) -> Self {
        Self {
            data_graph,
            min_support,
            support_measure: SupportMeasure::default(),
            parallel: false,
        }
    }

    pub fn support_measure(mut self, support_measure: SupportMeasure) -> Self {
        self.support_measure = support_measure;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the frequency of `candidate` and, when it reaches the minimum
    /// support, its instances.
    ///
    /// Inherited instances are grown by the last added edge; without any the
    /// candidate is matched from scratch.
    pub fn evaluate(&self, candidate: &Pattern) -> (usize, Vec<Instance>) {
        let instances = incremental_instances(candidate, self.data_graph);
        let frequency = self
            .support_measure
            .support(candidate.num_nodes(), &instances);
        if frequency < self.min_support {
            debug!(
                "pruned (frequency {} < {}): {}",
                frequency,
                self.min_support,
                candidate.canonical_code()
            );
            (frequency, vec![])
        } else {
            (frequency, instances)
        }
    }

    /// Evaluates every candidate and keeps the frequent ones, in input order.
    pub fn evaluate_candidates(&self, candidates: Vec<Pattern>) -> Vec<Pattern> {
        let evaluate = |mut candidate: Pattern| {
            let (frequency, instances) = self.evaluate(&candidate);
            candidate.set_evaluation(frequency, instances);
            candidate
        };
        let min_support = self.min_support;
        if self.parallel {
            candidates
                .into_par_iter()
                .map(evaluate)
                .filter(|c| c.frequency() >= min_support)
                .collect()
        } else {
            candidates
                .into_iter()
                .map(evaluate)
                .filter(|c| c.frequency() >= min_support)
                .collect()
        }
    }
}
