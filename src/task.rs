use crate::{
    data::DataGraph,
    error::Result,
    evaluator::{Evaluator, SupportMeasure},
    generator::{frequent_edges, BackwardExtension, Candidates, Generator},
    pattern::Pattern,
};
use log::info;
use std::time::Instant;

/// Frequent patterns grouped by size, smallest first.
#[derive(Debug, Clone, Default)]
pub struct FrequentSubgraphs {
    levels: Vec<Vec<Pattern>>,
}

impl FrequentSubgraphs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the patterns of the next size, dropping their instances.
    pub fn push_level(&mut self, mut level: Vec<Pattern>) {
        level.iter_mut().for_each(Pattern::release_instances);
        self.levels.push(level);
    }

    pub fn levels(&self) -> &[Vec<Pattern>] {
        &self.levels
    }

    /// Patterns with `size` edges.
    pub fn of_size(&self, size: usize) -> &[Pattern] {
        match size {
            0 => &[],
            _ => self.levels.get(size - 1).map_or(&[][..], |level| level.as_slice()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.levels.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(|level| level.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The size of the largest frequent pattern.
    pub fn max_size(&self) -> usize {
        self.levels.len()
    }
}

/// A mining task over one input graph.
///
/// Only extensions of frequent patterns by frequent edges are evaluated.
/// Under [`SupportMeasure::Embeddings`] a forward extension may have more
/// embeddings than its parent, so a pattern can reach `min_support` while
/// one of its edges or sub-patterns does not, and such a pattern is never
/// generated. For example, with `A -a-> B` occurring twice and every `B`
/// having two `B -b-> C` edges, `A -a-> B -b-> C` has four embeddings but is
/// not reported for a `min_support` of 3. [`SupportMeasure::MinimumImage`]
/// never grows along an extension, so every sub-pattern of a pattern
/// frequent under it is frequent as well.
///
/// ```ignore
/// let frequent_subgraphs = Pasigram::new(&data_graph, 2)
///     .backward_extension(BackwardExtension::NearestMatch)
///     .support_measure(SupportMeasure::MinimumImage)
///     .execute()?;
/// ```
pub struct Pasigram<'a> {
    data_graph: &'a DataGraph,
    min_support: usize,
    backward_extension: BackwardExtension,
    support_measure: SupportMeasure,
    parallel: bool,
}

impl<'a> Pasigram<'a> {
    /// A `min_support` of 0 is treated as 1.
    pub fn new(data_graph: &'a DataGraph, min_support: usize) -> Self {
        Self {
            data_graph,
            min_support: min_support.max(1),
            backward_extension: BackwardExtension::default(),
            support_measure: SupportMeasure::default(),
            parallel: true,
        }
    }

    pub fn backward_extension(mut self, backward_extension: BackwardExtension) -> Self {
        self.backward_extension = backward_extension;
        self
    }

    pub fn support_measure(mut self, support_measure: SupportMeasure) -> Self {
        self.support_measure = support_measure;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn min_support(&self) -> usize {
        self.min_support
    }

    /// Mines level by level until no candidate of the next size is frequent.
    pub fn execute(&self) -> Result<FrequentSubgraphs> {
        let start_time = Instant::now();
        let frequent_edges = frequent_edges(self.data_graph, self.min_support);
        info!("frequent edges: {}", frequent_edges.len());
        let generator = Generator::new(&frequent_edges)
            .backward_extension(self.backward_extension)
            .parallel(self.parallel);
        let evaluator = Evaluator::new(self.data_graph, self.min_support)
            .support_measure(self.support_measure)
            .parallel(self.parallel);
        let mut frequent_subgraphs = FrequentSubgraphs::new();
        let mut candidates = generator.generate_initial_candidates()?;
        while !candidates.is_empty() {
            candidates = mine_level(&generator, &evaluator, candidates, &mut frequent_subgraphs)?;
        }
        info!(
            "frequent subgraphs: {}, max size: {}, total time: {} ms",
            frequent_subgraphs.len(),
            frequent_subgraphs.max_size(),
            start_time.elapsed().as_millis()
        );
        Ok(frequent_subgraphs)
    }
}

/// Evaluates one level of candidates, appends the frequent ones and returns
/// the candidates of the next size.
fn mine_level(
    generator: &Generator,
    evaluator: &Evaluator,
    candidates: Candidates,
    frequent_subgraphs: &mut FrequentSubgraphs,
) -> Result<Candidates> {
    let size = frequent_subgraphs.max_size() + 1;
    let time_now = Instant::now();
    info!("size {}: {} candidates", size, candidates.len());
    let frequent = evaluator
        .evaluate_candidates(candidates.into_iter().map(|(_, p)| p).collect());
    info!(
        "size {}: {} frequent ({} ms)",
        size,
        frequent.len(),
        time_now.elapsed().as_millis()
    );
    if frequent.is_empty() {
        return Ok(Candidates::new());
    }
    let next = generator.generate_new_subgraphs(&frequent)?;
    frequent_subgraphs.push_level(frequent);
    Ok(next)
}
